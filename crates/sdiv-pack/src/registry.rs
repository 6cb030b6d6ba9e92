//! # Manifest Registry
//!
//! Builds the immutable table of pack manifests from a JSON array of
//! definitions. Loading happens once; afterwards the registry only hands
//! out shared references and owned copies.
//!
//! Each record goes through, in order:
//!
//! 1. duplicate-id check against every id seen so far (first wins, even if
//!    the first occurrence is later rejected),
//! 2. strict parsing into [`PackManifestDefinition`] (failures are
//!    quarantined as issues under the record's id, or `#<index>` when it
//!    has none),
//! 3. the per-definition rules in [`crate::validation`],
//! 4. checksum computation.
//!
//! [`ValidationMode::Strict`] fails the load if any error-severity issue was
//! recorded. [`ValidationMode::Lenient`] keeps every definition that produced
//! no error and records the rest as issues.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde_json::Value;

use crate::error::PackError;
use crate::manifest::{PackManifest, PackManifestDefinition};
use crate::validation::{validate_definition, ManifestValidationIssue};

const BUNDLED_MANIFESTS: &str = include_str!("../data/manifests.json");

/// How load-time validation errors are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Any error-severity issue aborts the load.
    #[default]
    Strict,
    /// Errors are recorded; offending definitions are left out.
    Lenient,
}

/// Read-only table of validated pack manifests.
#[derive(Debug, Clone)]
pub struct ManifestRegistry {
    manifests: Vec<PackManifest>,
    index: HashMap<String, usize>,
    issues: Vec<ManifestValidationIssue>,
}

impl ManifestRegistry {
    /// Load the manifest file compiled into this crate.
    pub fn bundled(mode: ValidationMode) -> Result<Self, PackError> {
        Self::load(BUNDLED_MANIFESTS, mode)
    }

    /// Load manifests from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>, mode: ValidationMode) -> Result<Self, PackError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| PackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(&source, mode)
    }

    /// Load manifests from JSON text holding an array of definitions.
    pub fn load(source: &str, mode: ValidationMode) -> Result<Self, PackError> {
        let records = match serde_json::from_str::<Value>(source)? {
            Value::Array(records) => records,
            _ => return Err(PackError::NotAnArray),
        };

        let mut registry = Self {
            manifests: Vec::with_capacity(records.len()),
            index: HashMap::with_capacity(records.len()),
            issues: Vec::new(),
        };
        let mut seen: HashSet<String> = HashSet::new();

        for (position, record) in records.into_iter().enumerate() {
            let raw_id = record.get("id").and_then(Value::as_str).map(str::to_owned);
            let label = raw_id.clone().unwrap_or_else(|| format!("#{position}"));

            if let Some(id) = raw_id {
                if !seen.insert(id) {
                    registry.issues.push(ManifestValidationIssue::error(
                        label,
                        "duplicate pack id detected",
                    ));
                    continue;
                }
            }

            let definition: PackManifestDefinition = match serde_json::from_value(record) {
                Ok(definition) => definition,
                Err(e) => {
                    registry.issues.push(ManifestValidationIssue::error(
                        label,
                        format!("invalid manifest record: {e}"),
                    ));
                    continue;
                }
            };

            let found = validate_definition(&definition);
            let rejected = found.iter().any(ManifestValidationIssue::is_error);
            registry.issues.extend(found);
            if rejected {
                continue;
            }

            match PackManifest::new(definition) {
                Ok(manifest) => registry.insert(manifest),
                Err(e) => registry.issues.push(ManifestValidationIssue::error(
                    label,
                    format!("checksum could not be computed: {e}"),
                )),
            }
        }

        if mode == ValidationMode::Strict {
            let errors = registry.errors();
            if !errors.is_empty() {
                return Err(PackError::Validation(errors));
            }
        }

        Ok(registry)
    }

    fn insert(&mut self, manifest: PackManifest) {
        self.index
            .insert(manifest.id().to_string(), self.manifests.len());
        self.manifests.push(manifest);
    }

    /// Look up a loaded manifest by pack id.
    pub fn get_pack_manifest(&self, pack_id: &str) -> Option<&PackManifest> {
        self.index.get(pack_id).map(|&i| &self.manifests[i])
    }

    /// All loaded manifests in source order.
    pub fn list_pack_manifests(&self) -> &[PackManifest] {
        &self.manifests
    }

    /// Every issue recorded during load, warnings included.
    pub fn collect_manifest_validation_issues(&self) -> Vec<ManifestValidationIssue> {
        self.issues.clone()
    }

    /// Error-severity issues only.
    pub fn errors(&self) -> Vec<ManifestValidationIssue> {
        self.issues.iter().filter(|i| i.is_error()).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::fixtures::definition;
    use crate::validation::Severity;

    fn source(defs: &[PackManifestDefinition]) -> String {
        serde_json::to_string(defs).unwrap()
    }

    #[test]
    fn loads_clean_definitions_in_order() {
        let defs = vec![definition("a"), definition("b"), definition("c")];
        let registry = ManifestRegistry::load(&source(&defs), ValidationMode::Strict).unwrap();
        let ids: Vec<&str> = registry.list_pack_manifests().iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(registry.collect_manifest_validation_issues().is_empty());
        assert_eq!(registry.get_pack_manifest("b").unwrap().id(), "b");
        assert!(registry.get_pack_manifest("missing").is_none());
    }

    #[test]
    fn duplicate_is_skipped_and_first_wins() {
        let mut second = definition("a");
        second.name = "Second".to_string();
        let defs = vec![definition("a"), second];
        let registry = ManifestRegistry::load(&source(&defs), ValidationMode::Lenient).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_pack_manifest("a").unwrap().definition().name, "Test Deck");
        let issues = registry.collect_manifest_validation_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "duplicate pack id detected");
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn duplicate_of_rejected_definition_is_still_skipped() {
        let mut first = definition("a");
        first.version = "bad".to_string();
        let defs = vec![first, definition("a")];
        let registry = ManifestRegistry::load(&source(&defs), ValidationMode::Lenient).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.errors().len(), 2);
    }

    #[test]
    fn strict_mode_fails_with_every_error_listed() {
        let mut bad = definition("bad-pack");
        bad.premium_required = true;
        let mut worse = definition("worse-pack");
        worse.distribution.uri = "http://cdn.example.com".to_string();
        let defs = vec![definition("ok"), bad, worse];
        let err = ManifestRegistry::load(&source(&defs), ValidationMode::Strict).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("pack manifest validation failed:\n"));
        assert!(message.contains(
            "bad-pack: premium packs must include \"premium\" in required_entitlements"
        ));
        assert!(message.contains("worse-pack: distribution.uri must be https"));
        match err {
            PackError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_mode_tolerates_warnings() {
        let mut def = definition("quiet");
        def.languages.clear();
        let registry = ManifestRegistry::load(&source(&[def]), ValidationMode::Strict).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.collect_manifest_validation_issues().len(), 1);
        assert!(registry.errors().is_empty());
    }

    #[test]
    fn lenient_mode_excludes_erroring_definitions() {
        let mut bad = definition("bad-pack");
        bad.premium_required = true;
        let defs = vec![definition("ok"), bad];
        let registry = ManifestRegistry::load(&source(&defs), ValidationMode::Lenient).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get_pack_manifest("bad-pack").is_none());
        assert_eq!(registry.errors()[0].pack_id, "bad-pack");
    }

    #[test]
    fn malformed_records_are_quarantined() {
        let mut missing_field = serde_json::to_value(definition("no-license")).unwrap();
        missing_field.as_object_mut().unwrap().remove("license");
        let mut wrong_type = serde_json::to_value(definition("wrong-type")).unwrap();
        wrong_type["premium_required"] = serde_json::json!("yes");
        let mut null_audio = serde_json::to_value(definition("null-audio")).unwrap();
        null_audio["assets"]["audio"] = serde_json::Value::Null;
        let records = serde_json::json!([
            definition("ok"),
            missing_field,
            wrong_type,
            {"name": "anonymous"},
            42,
            null_audio
        ]);
        let registry =
            ManifestRegistry::load(&records.to_string(), ValidationMode::Lenient).unwrap();
        assert_eq!(registry.len(), 1);
        let labels: Vec<String> = registry.errors().into_iter().map(|i| i.pack_id).collect();
        assert_eq!(labels, vec!["no-license", "wrong-type", "#3", "#4", "null-audio"]);
    }

    #[test]
    fn non_array_source_is_rejected() {
        let err = ManifestRegistry::load("{}", ValidationMode::Lenient).unwrap_err();
        assert!(matches!(err, PackError::NotAnArray));
        let err = ManifestRegistry::load("not json", ValidationMode::Lenient).unwrap_err();
        assert!(matches!(err, PackError::Parse(_)));
    }

    #[test]
    fn issue_log_is_a_copy() {
        let mut def = definition("quiet");
        def.languages.clear();
        let registry = ManifestRegistry::load(&source(&[def]), ValidationMode::Lenient).unwrap();
        let mut issues = registry.collect_manifest_validation_issues();
        issues.clear();
        assert_eq!(registry.collect_manifest_validation_issues().len(), 1);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ManifestRegistry::from_path("/nonexistent/manifests.json", ValidationMode::Strict)
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/manifests.json"));
    }
}
