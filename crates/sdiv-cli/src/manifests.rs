//! # Manifests Subcommand
//!
//! Read-only access to the manifest registry from the command line.
//!
//! - `list` prints one line per loaded pack.
//! - `validate` loads every record, prints every issue, and exits 1 when any
//!   error-severity issue was found.
//! - `verify` checks published manifests (definition plus `checksum`, as
//!   served by the API) against a freshly computed checksum.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use sdiv_core::ContentDigest;
use sdiv_pack::{ManifestRegistry, PackManifest, PackManifestDefinition, Severity, ValidationMode};

/// Arguments for the `sdiv manifests` subcommand.
#[derive(Args, Debug)]
pub struct ManifestsArgs {
    #[command(subcommand)]
    pub command: ManifestsCommand,
}

/// Where manifests are loaded from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Manifest file (JSON array of definitions). Defaults to the bundled set.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ManifestsCommand {
    /// Print every loaded manifest with its checksum.
    List {
        #[command(flatten)]
        source: SourceArgs,
        /// Skip invalid manifests instead of failing, as the server does in
        /// production.
        #[arg(long)]
        production: bool,
    },

    /// Report every load-time issue.
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Check published manifests against their checksums.
    Verify {
        /// JSON file holding one manifest, an array of manifests, or a
        /// `{"packs": [...]}` listing.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Execute the manifests subcommand.
pub fn run_manifests(args: &ManifestsArgs) -> Result<u8> {
    match &args.command {
        ManifestsCommand::List { source, production } => {
            let mode = if *production {
                ValidationMode::Lenient
            } else {
                ValidationMode::Strict
            };
            cmd_list(source, mode)
        }
        ManifestsCommand::Validate { source } => cmd_validate(source),
        ManifestsCommand::Verify { file } => cmd_verify(file),
    }
}

/// Load the registry from `--file` or the bundled data.
pub fn load_registry(source: &SourceArgs, mode: ValidationMode) -> Result<ManifestRegistry> {
    let registry = match &source.file {
        Some(path) => ManifestRegistry::from_path(path, mode)
            .with_context(|| format!("failed to load manifests from {}", path.display()))?,
        None => ManifestRegistry::bundled(mode).context("failed to load bundled manifests")?,
    };
    tracing::info!(packs = registry.len(), "manifest registry loaded");
    Ok(registry)
}

fn cmd_list(source: &SourceArgs, mode: ValidationMode) -> Result<u8> {
    let registry = load_registry(source, mode)?;
    for manifest in registry.list_pack_manifests() {
        let def = manifest.definition();
        let tier = if manifest.requires_premium() {
            "premium"
        } else {
            "free"
        };
        println!(
            "{} {} {} {} {}",
            def.id,
            def.version,
            def.technique,
            tier,
            manifest.checksum()
        );
    }
    for issue in registry.errors() {
        println!("SKIPPED: {issue}");
    }
    Ok(0)
}

fn cmd_validate(source: &SourceArgs) -> Result<u8> {
    let registry = load_registry(source, ValidationMode::Lenient)?;
    let issues = registry.collect_manifest_validation_issues();

    for issue in &issues {
        match issue.severity {
            Severity::Error => println!("ERROR: {issue}"),
            Severity::Warn => println!("WARN: {issue}"),
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors == 0 {
        println!("PASS: {} manifests valid", registry.len());
        Ok(0)
    } else {
        println!(
            "FAIL: {errors} error(s); {} manifests loadable",
            registry.len()
        );
        Ok(1)
    }
}

/// Result of checking one published manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Match {
        pack_id: String,
        checksum: ContentDigest,
    },
    Mismatch {
        pack_id: String,
        claimed: ContentDigest,
    },
    Unreadable {
        label: String,
        reason: String,
    },
}

impl VerifyOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

fn cmd_verify(file: &Path) -> Result<u8> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read file: {}", file.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON: {}", file.display()))?;

    let outcomes = verify_published(value)?;
    for outcome in &outcomes {
        match outcome {
            VerifyOutcome::Match { pack_id, checksum } => println!("PASS: {pack_id} {checksum}"),
            VerifyOutcome::Mismatch { pack_id, claimed } => {
                println!("FAIL: {pack_id} checksum {claimed} does not match content")
            }
            VerifyOutcome::Unreadable { label, reason } => println!("FAIL: {label}: {reason}"),
        }
    }

    Ok(if outcomes.iter().all(VerifyOutcome::is_match) {
        0
    } else {
        1
    })
}

/// Check every published manifest in `value`.
pub fn verify_published(value: Value) -> Result<Vec<VerifyOutcome>> {
    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("packs") {
            Some(Value::Array(records)) => records,
            Some(_) => bail!("\"packs\" must be an array"),
            None => vec![Value::Object(map)],
        },
        _ => bail!("expected a manifest object or an array of manifests"),
    };

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(position, record)| verify_record(position, record))
        .collect())
}

fn verify_record(position: usize, record: Value) -> VerifyOutcome {
    let label = record
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{position}"));

    let Value::Object(mut map) = record else {
        return VerifyOutcome::Unreadable {
            label,
            reason: "not an object".to_string(),
        };
    };

    let claimed = match map.remove("checksum") {
        Some(Value::String(s)) => match s.parse::<ContentDigest>() {
            Ok(digest) => digest,
            Err(e) => {
                return VerifyOutcome::Unreadable {
                    label,
                    reason: e.to_string(),
                }
            }
        },
        _ => {
            return VerifyOutcome::Unreadable {
                label,
                reason: "missing checksum".to_string(),
            }
        }
    };

    let definition: PackManifestDefinition = match serde_json::from_value(Value::Object(map)) {
        Ok(def) => def,
        Err(e) => {
            return VerifyOutcome::Unreadable {
                label,
                reason: e.to_string(),
            }
        }
    };

    let manifest = PackManifest::from_parts(definition, claimed.clone());
    if manifest.verify_checksum() {
        VerifyOutcome::Match {
            pack_id: label,
            checksum: claimed,
        }
    } else {
        VerifyOutcome::Mismatch {
            pack_id: label,
            claimed,
        }
    }
}
