//! # Pack Manifests
//!
//! Strict record types for downloadable content packs and the checksum that
//! binds each manifest to its content.
//!
//! A `PackManifestDefinition` is exactly what the bundled data file holds.
//! Unknown keys are rejected at parse time: every key that reaches a client
//! is covered by the checksum.

use serde::{Deserialize, Serialize};

use sdiv_core::{sha256_digest, CanonicalBytes, CanonicalizationError, ContentDigest};

/// Divination technique a pack provides content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technique {
    Tarot,
    Iching,
    Runes,
}

impl Technique {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tarot => "tarot",
            Self::Iching => "iching",
            Self::Runes => "runes",
        }
    }
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symbol counts and spread identifiers shipped in a pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackContent {
    pub cards: u32,
    pub hexagrams: u32,
    pub runes: u32,
    pub spreads: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageAssets {
    pub format: String,
    pub resolution: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioAssets {
    pub format: String,
    pub count: u32,
}

/// Media bundled with a pack. Audio is optional and omitted from the
/// serialized form (and therefore from the checksum) when absent. An
/// explicit `"audio": null` is rejected: it would hash differently from an
/// omitted key in other clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackAssets {
    pub images: ImageAssets,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_audio"
    )]
    pub audio: Option<AudioAssets>,
}

fn present_audio<'de, D>(deserializer: D) -> Result<Option<AudioAssets>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    AudioAssets::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Compatibility {
    pub min_app_version: String,
    pub supported_platforms: Vec<String>,
}

/// Where clients download the pack archive from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Distribution {
    /// Must be an `https://` URL.
    pub uri: String,
    pub format: String,
    /// Archive size in bytes.
    pub size: u64,
}

/// A content-pack descriptor as authored in the bundled data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackManifestDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    /// `MAJOR.MINOR.PATCH`, digits only.
    pub version: String,
    pub technique: Technique,
    pub author: String,
    pub license: String,
    pub created_at: String,
    pub updated_at: String,
    /// Locale codes the pack text is available in.
    pub languages: Vec<String>,
    pub content: PackContent,
    pub assets: PackAssets,
    pub compatibility: Compatibility,
    pub premium_required: bool,
    pub required_entitlements: Vec<String>,
    pub distribution: Distribution,
}

/// Compute the content checksum of a definition.
///
/// The definition is serialized with keys sorted at every depth, then hashed
/// with SHA-256. The result renders as `"sha256:<hex>"`.
pub fn compute_checksum(
    definition: &PackManifestDefinition,
) -> Result<ContentDigest, CanonicalizationError> {
    let canonical = CanonicalBytes::new(definition)?;
    Ok(sha256_digest(&canonical))
}

/// A validated definition together with its checksum.
///
/// Registry-produced manifests are immutable; `from_parts` exists for
/// manifests received from elsewhere (or tampered with in tests) so they
/// can be checked with [`PackManifest::verify_checksum`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackManifest {
    #[serde(flatten)]
    definition: PackManifestDefinition,
    checksum: ContentDigest,
}

impl PackManifest {
    /// Build a manifest by computing the checksum of `definition`.
    pub fn new(definition: PackManifestDefinition) -> Result<Self, CanonicalizationError> {
        let checksum = compute_checksum(&definition)?;
        Ok(Self {
            definition,
            checksum,
        })
    }

    /// Pair a definition with a claimed checksum without recomputing it.
    pub fn from_parts(definition: PackManifestDefinition, checksum: ContentDigest) -> Self {
        Self {
            definition,
            checksum,
        }
    }

    pub fn into_parts(self) -> (PackManifestDefinition, ContentDigest) {
        (self.definition, self.checksum)
    }

    pub fn definition(&self) -> &PackManifestDefinition {
        &self.definition
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn version(&self) -> &str {
        &self.definition.version
    }

    pub fn checksum(&self) -> &ContentDigest {
        &self.checksum
    }

    /// Recompute the checksum from the definition and compare it with the
    /// stored one. Any failure to recompute counts as a mismatch.
    pub fn verify_checksum(&self) -> bool {
        compute_checksum(&self.definition)
            .map(|computed| computed == self.checksum)
            .unwrap_or(false)
    }

    pub fn requires_premium(&self) -> bool {
        self.definition.premium_required
    }

    /// Entitlements a user must hold to download this pack. Returns an
    /// owned copy.
    pub fn required_entitlements(&self) -> Vec<String> {
        self.definition.required_entitlements.clone()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::definition;
    use super::*;

    #[test]
    fn checksum_ignores_key_order_of_the_source_text() {
        let def = definition("tarot-test");
        let value = serde_json::to_value(&def).unwrap();
        // Write the source text with top-level keys in reverse order and
        // parse it straight into the struct, bypassing any map.
        let map = value.as_object().unwrap();
        let fields: Vec<String> = map
            .iter()
            .rev()
            .map(|(k, v)| format!("{}:{}", serde_json::to_string(k).unwrap(), v))
            .collect();
        let text = format!("{{{}}}", fields.join(","));
        assert!(text.starts_with(r#"{"version":"#), "{text}");
        let reparsed: PackManifestDefinition = serde_json::from_str(&text).unwrap();
        assert_eq!(
            compute_checksum(&def).unwrap(),
            compute_checksum(&reparsed).unwrap()
        );
    }

    #[test]
    fn audio_may_be_omitted_but_not_null() {
        let mut value = serde_json::to_value(definition("tarot-test")).unwrap();
        value["assets"]
            .as_object_mut()
            .unwrap()
            .remove("audio");
        let def: PackManifestDefinition = serde_json::from_value(value.clone()).unwrap();
        assert!(def.assets.audio.is_none());
        assert!(!serde_json::to_string(&def).unwrap().contains("audio"));

        value["assets"]["audio"] = serde_json::Value::Null;
        let err = serde_json::from_value::<PackManifestDefinition>(value).unwrap_err();
        assert!(err.to_string().contains("null"), "{err}");

        let mut present = serde_json::to_value(definition("tarot-test")).unwrap();
        present["assets"]["audio"] = serde_json::json!({ "format": "AAC", "count": 3 });
        let def: PackManifestDefinition = serde_json::from_value(present).unwrap();
        assert_eq!(def.assets.audio.unwrap().count, 3);
    }

    #[test]
    fn checksum_changes_with_any_field() {
        let base = compute_checksum(&definition("tarot-test")).unwrap();
        let mutations: Vec<Box<dyn Fn(&mut PackManifestDefinition)>> = vec![
            Box::new(|d: &mut PackManifestDefinition| d.id.push('x')),
            Box::new(|d: &mut PackManifestDefinition| d.name.push('x')),
            Box::new(|d: &mut PackManifestDefinition| d.version = "1.0.1".to_string()),
            Box::new(|d: &mut PackManifestDefinition| d.technique = Technique::Runes),
            Box::new(|d: &mut PackManifestDefinition| d.languages.push("ca".to_string())),
            Box::new(|d: &mut PackManifestDefinition| d.content.cards = 22),
            Box::new(|d: &mut PackManifestDefinition| d.content.spreads.clear()),
            Box::new(|d: &mut PackManifestDefinition| {
                d.assets.audio = Some(AudioAssets {
                    format: "AAC".to_string(),
                    count: 1,
                })
            }),
            Box::new(|d: &mut PackManifestDefinition| d.compatibility.min_app_version = "2.0.0".to_string()),
            Box::new(|d: &mut PackManifestDefinition| d.premium_required = true),
            Box::new(|d: &mut PackManifestDefinition| d.required_entitlements.push("premium".to_string())),
            Box::new(|d: &mut PackManifestDefinition| d.distribution.size += 1),
            Box::new(|d: &mut PackManifestDefinition| d.distribution.uri.push('/')),
        ];
        for mutate in mutations {
            let mut def = definition("tarot-test");
            mutate(&mut def);
            assert_ne!(compute_checksum(&def).unwrap(), base);
        }
    }

    #[test]
    fn verify_checksum_detects_tampering() {
        let manifest = PackManifest::new(definition("tarot-test")).unwrap();
        assert!(manifest.verify_checksum());

        let (mut def, checksum) = manifest.into_parts();
        def.premium_required = true;
        let tampered = PackManifest::from_parts(def, checksum);
        assert!(!tampered.verify_checksum());
    }

    #[test]
    fn serialized_manifest_carries_checksum_string() {
        let manifest = PackManifest::new(definition("tarot-test")).unwrap();
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["id"], "tarot-test");
        assert_eq!(json["technique"], "tarot");
        let checksum = json["checksum"].as_str().unwrap();
        assert_eq!(checksum, manifest.checksum().to_string());
        assert!(json["assets"].get("audio").is_none());
    }

    #[test]
    fn required_entitlements_is_a_copy() {
        let mut def = definition("tarot-test");
        def.premium_required = true;
        def.required_entitlements = vec!["premium".to_string()];
        let manifest = PackManifest::new(def).unwrap();
        let mut copy = manifest.required_entitlements();
        copy.push("extra".to_string());
        assert_eq!(manifest.required_entitlements(), vec!["premium".to_string()]);
        assert!(manifest.requires_premium());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut value = serde_json::to_value(definition("tarot-test")).unwrap();
        value["download_size"] = serde_json::json!(10);
        assert!(serde_json::from_value::<PackManifestDefinition>(value).is_err());
    }
}
