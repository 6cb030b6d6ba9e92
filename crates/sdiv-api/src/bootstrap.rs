//! # Startup
//!
//! Loads the manifest registry before the server binds and reports every
//! load-time issue through `tracing`. In development a manifest error stops
//! startup; in production the issues are logged and the server runs with
//! the manifests that loaded cleanly.

use sdiv_pack::{ManifestRegistry, PackError, Severity};

use crate::state::{AppConfig, AppState};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("manifest registry failed to load: {0}")]
    Registry(#[from] PackError),
}

/// Build the application state from configuration.
pub fn bootstrap(config: AppConfig) -> Result<AppState, BootstrapError> {
    let mode = config.environment.validation_mode();
    let registry = match &config.manifests_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading pack manifests from file");
            ManifestRegistry::from_path(path, mode)?
        }
        None => ManifestRegistry::bundled(mode)?,
    };

    log_issues(&registry);
    tracing::info!(
        environment = config.environment.as_str(),
        packs = registry.len(),
        "pack manifest registry ready"
    );

    Ok(AppState::new(registry, config))
}

fn log_issues(registry: &ManifestRegistry) {
    for issue in registry.collect_manifest_validation_issues() {
        match issue.severity {
            Severity::Error => tracing::error!(
                pack_id = %issue.pack_id,
                message = %issue.message,
                "pack manifest rejected"
            ),
            Severity::Warn => tracing::warn!(
                pack_id = %issue.pack_id,
                message = %issue.message,
                "pack manifest warning"
            ),
        }
    }
}
