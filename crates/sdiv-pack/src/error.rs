use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ManifestValidationIssue;

/// Errors raised while building a manifest registry.
#[derive(Error, Debug)]
pub enum PackError {
    /// Strict-mode load found error-severity issues. The message lists each
    /// one as `"{packId}: {message}"` on its own line.
    #[error("pack manifest validation failed:\n{}", join_issues(.0))]
    Validation(Vec<ManifestValidationIssue>),

    /// The manifest source is not valid JSON.
    #[error("manifest source is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("manifest source must be a JSON array of pack definitions")]
    NotAnArray,

    #[error("failed to read manifest file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_issues(issues: &[ManifestValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
