//! Exit codes of `sdiv manifests` against files on disk.

use std::io::Write;
use std::path::PathBuf;

use serde_json::Value;

use sdiv_cli::manifests::{run_manifests, ManifestsArgs, ManifestsCommand, SourceArgs};
use sdiv_pack::{ManifestRegistry, ValidationMode};

fn write_json(value: &Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

fn bundled_definitions() -> Vec<Value> {
    ManifestRegistry::bundled(ValidationMode::Strict)
        .unwrap()
        .list_pack_manifests()
        .iter()
        .map(|m| serde_json::to_value(m.definition()).unwrap())
        .collect()
}

fn source(path: Option<PathBuf>) -> SourceArgs {
    SourceArgs { file: path }
}

fn run(command: ManifestsCommand) -> anyhow::Result<u8> {
    run_manifests(&ManifestsArgs { command })
}

#[test]
fn validate_bundled_passes() {
    let code = run(ManifestsCommand::Validate {
        source: source(None),
    })
    .unwrap();
    assert_eq!(code, 0);
}

#[test]
fn validate_reports_failure_exit_code() {
    let mut defs = bundled_definitions();
    defs[3]["required_entitlements"] = serde_json::json!([]);
    let file = write_json(&Value::Array(defs));

    let code = run(ManifestsCommand::Validate {
        source: source(Some(file.path().to_path_buf())),
    })
    .unwrap();
    assert_eq!(code, 1);
}

#[test]
fn list_strict_fails_on_invalid_file() {
    let mut defs = bundled_definitions();
    defs[0]["version"] = serde_json::json!("one");
    let file = write_json(&Value::Array(defs));

    let result = run(ManifestsCommand::List {
        source: source(Some(file.path().to_path_buf())),
        production: false,
    });
    assert!(result.is_err());

    let code = run(ManifestsCommand::List {
        source: source(Some(file.path().to_path_buf())),
        production: true,
    })
    .unwrap();
    assert_eq!(code, 0);
}

#[test]
fn list_rejects_non_array_file() {
    let file = write_json(&serde_json::json!({ "id": "not-a-list" }));
    let result = run(ManifestsCommand::List {
        source: source(Some(file.path().to_path_buf())),
        production: true,
    });
    assert!(result.is_err());
}

#[test]
fn verify_published_listing() {
    let registry = ManifestRegistry::bundled(ValidationMode::Strict).unwrap();
    let listing = serde_json::json!({ "packs": registry.list_pack_manifests() });
    let file = write_json(&listing);

    let code = run(ManifestsCommand::Verify {
        file: file.path().to_path_buf(),
    })
    .unwrap();
    assert_eq!(code, 0);
}

#[test]
fn verify_detects_tampering() {
    let registry = ManifestRegistry::bundled(ValidationMode::Strict).unwrap();
    let mut published = serde_json::to_value(registry.list_pack_manifests()).unwrap();
    published[1]["distribution"]["size"] = serde_json::json!(1);
    let file = write_json(&published);

    let code = run(ManifestsCommand::Verify {
        file: file.path().to_path_buf(),
    })
    .unwrap();
    assert_eq!(code, 1);
}

#[test]
fn verify_missing_file_is_an_error() {
    let result = run(ManifestsCommand::Verify {
        file: PathBuf::from("/nonexistent/sdiv/published.json"),
    });
    assert!(result.is_err());
}
