//! Checks against the manifest file compiled into the crate. The pinned
//! checksums are what shipped clients compare downloaded packs with, so a
//! change here is a wire-visible change.

use proptest::prelude::*;

use sdiv_pack::{
    compute_checksum, ManifestRegistry, PackManifestDefinition, Severity, ValidationMode,
};

const PINNED: &[(&str, &str)] = &[
    (
        "tarot-rider-waite",
        "sha256:9c602863d678d8ab7b51a316ff04e5fb12b471fa6f6141aa9cfbed928651025b",
    ),
    (
        "iching-classic",
        "sha256:8fbf88d0def3692d97bf3c4fa5bce6f318daacf13713f1a3c38400bdd07193c7",
    ),
    (
        "runes-elder-futhark",
        "sha256:156db32e25034e44d577c9f38ac6efb5ce5aab4a4a32c3ce4721e5b0f4452114",
    ),
    (
        "tarot-marseille-premium",
        "sha256:7d29eb1c9f83e0460379b0a6895aba87a1a8ee555214433caa38adbf02d7254c",
    ),
];

fn bundled() -> ManifestRegistry {
    ManifestRegistry::bundled(ValidationMode::Strict).expect("bundled manifests must load strictly")
}

#[test]
fn bundled_manifests_load_without_issues() {
    let registry = bundled();
    assert_eq!(registry.len(), PINNED.len());
    assert!(registry.collect_manifest_validation_issues().is_empty());
}

#[test]
fn bundled_checksums_are_pinned() {
    let registry = bundled();
    for (id, checksum) in PINNED {
        let manifest = registry
            .get_pack_manifest(id)
            .unwrap_or_else(|| panic!("{id} missing"));
        assert_eq!(manifest.checksum().to_string(), *checksum, "checksum of {id}");
    }
}

#[test]
fn every_loaded_manifest_verifies() {
    for manifest in bundled().list_pack_manifests() {
        assert!(manifest.verify_checksum(), "{} failed verification", manifest.id());
    }
}

#[test]
fn premium_flag_matches_entitlements() {
    for manifest in bundled().list_pack_manifests() {
        assert_eq!(
            manifest.requires_premium(),
            manifest
                .required_entitlements()
                .contains(&"premium".to_string()),
            "{}",
            manifest.id()
        );
    }
    let registry = bundled();
    let premium = registry.get_pack_manifest("tarot-marseille-premium").unwrap();
    assert!(premium.requires_premium());
    assert!(premium.definition().assets.audio.is_some());
}

#[test]
fn premium_pack_without_entitlement_is_a_load_error() {
    let registry = bundled();
    let mut def = registry
        .get_pack_manifest("tarot-marseille-premium")
        .unwrap()
        .definition()
        .clone();
    def.required_entitlements.clear();
    let source = serde_json::to_string(&[def]).unwrap();

    let lenient = ManifestRegistry::load(&source, ValidationMode::Lenient).unwrap();
    let issues = lenient.collect_manifest_validation_issues();
    assert!(issues.iter().any(|i| i.pack_id == "tarot-marseille-premium"
        && i.severity == Severity::Error
        && i.message.contains("premium")));
    assert!(lenient.get_pack_manifest("tarot-marseille-premium").is_none());

    assert!(ManifestRegistry::load(&source, ValidationMode::Strict).is_err());
}

#[test]
fn serialized_manifest_round_trips_through_definition() {
    let registry = bundled();
    let manifest = registry.get_pack_manifest("runes-elder-futhark").unwrap();
    let mut value = serde_json::to_value(manifest).unwrap();
    let checksum = value
        .as_object_mut()
        .and_then(|o| o.remove("checksum"))
        .and_then(|c| c.as_str().map(str::to_owned))
        .unwrap();
    let def: PackManifestDefinition = serde_json::from_value(value).unwrap();
    assert_eq!(compute_checksum(&def).unwrap().to_string(), checksum);
}

proptest! {
    #[test]
    fn checksum_tracks_entitlement_edits(extra in "[a-z]{1,12}") {
        let registry = bundled();
        let original = registry.get_pack_manifest("tarot-rider-waite").unwrap();
        let mut def = original.definition().clone();
        def.required_entitlements.push(extra);
        let recomputed = compute_checksum(&def).unwrap();
        prop_assert_ne!(&recomputed, original.checksum());
    }

    #[test]
    fn checksum_tracks_size_edits(size in any::<u32>()) {
        let registry = bundled();
        let original = registry.get_pack_manifest("iching-classic").unwrap();
        let mut def = original.definition().clone();
        prop_assume!(u64::from(size) != def.distribution.size);
        def.distribution.size = u64::from(size);
        prop_assert_ne!(&compute_checksum(&def).unwrap(), original.checksum());
    }
}
