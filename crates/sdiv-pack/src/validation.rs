//! # Manifest Validation Rules
//!
//! Per-definition checks applied once at load time.
//!
//! | Rule | Severity |
//! |---|---|
//! | `version` not `N.N.N` | error |
//! | `languages` empty | warn |
//! | `distribution.uri` not HTTPS | error |
//! | premium flag without the `"premium"` entitlement | error |
//! | `"premium"` entitlement on a non-premium pack | error |
//! | entitlement containing whitespace | error |
//!
//! Duplicate ids and records that fail to parse are detected by the
//! registry loader, which owns the cross-record view.

use serde::{Deserialize, Serialize};

use crate::manifest::PackManifestDefinition;

/// The entitlement that gates premium packs.
pub const PREMIUM_ENTITLEMENT: &str = "premium";

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks startup outside production; the definition is not loaded.
    Error,
    /// Reported, never blocking.
    Warn,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warn => f.write_str("warn"),
        }
    }
}

/// A single load-time finding against one pack definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestValidationIssue {
    #[serde(rename = "packId")]
    pub pack_id: String,
    pub message: String,
    pub severity: Severity,
}

impl ManifestValidationIssue {
    pub fn error(pack_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pack_id: pack_id.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warn(pack_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pack_id: pack_id.into(),
            message: message.into(),
            severity: Severity::Warn,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ManifestValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.pack_id, self.message)
    }
}

/// Run every per-definition rule and return all findings.
pub fn validate_definition(definition: &PackManifestDefinition) -> Vec<ManifestValidationIssue> {
    let id = definition.id.as_str();
    let mut issues = Vec::new();

    if !is_semver_like(&definition.version) {
        issues.push(ManifestValidationIssue::error(
            id,
            format!("version {} is not semver", definition.version),
        ));
    }

    if definition.languages.is_empty() {
        issues.push(ManifestValidationIssue::warn(id, "languages array is empty"));
    }

    if !is_https_uri(&definition.distribution.uri) {
        issues.push(ManifestValidationIssue::error(
            id,
            "distribution.uri must be https",
        ));
    }

    let has_premium = definition
        .required_entitlements
        .iter()
        .any(|e| e == PREMIUM_ENTITLEMENT);
    if definition.premium_required && !has_premium {
        issues.push(ManifestValidationIssue::error(
            id,
            "premium packs must include \"premium\" in required_entitlements",
        ));
    }
    if !definition.premium_required && has_premium {
        issues.push(ManifestValidationIssue::error(
            id,
            "non-premium packs cannot require the premium entitlement",
        ));
    }

    if definition
        .required_entitlements
        .iter()
        .any(|e| e.chars().any(char::is_whitespace))
    {
        issues.push(ManifestValidationIssue::error(
            id,
            "entitlements must not include whitespace",
        ));
    }

    issues
}

/// `true` for three dot-separated, non-empty runs of ASCII digits.
pub fn is_semver_like(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

/// `true` when the string starts with `https://` and parses as a URL with
/// a host.
pub fn is_https_uri(uri: &str) -> bool {
    if !uri.starts_with("https://") {
        return false;
    }
    match url::Url::parse(uri) {
        Ok(parsed) => parsed.scheme() == "https" && parsed.host().is_some(),
        Err(_) => false,
    }
}
