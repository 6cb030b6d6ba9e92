//! # Application State
//!
//! Shared state for the Axum application, passed to handlers via the
//! `State` extractor. The manifest registry is built once at startup and
//! shared read-only behind an `Arc`; draws carry no state at all.

use std::path::PathBuf;
use std::sync::Arc;

use sdiv_pack::{ManifestRegistry, ValidationMode};

/// Deployment environment, from `SDIV_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// `"production"` selects production; anything else is development.
    pub fn parse(value: &str) -> Self {
        if value.trim() == "production" {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// Development refuses to start on manifest errors; production starts
    /// with whatever loaded cleanly.
    pub fn validation_mode(&self) -> ValidationMode {
        match self {
            Self::Development => ValidationMode::Strict,
            Self::Production => ValidationMode::Lenient,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Server configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PORT`, default 8080.
    pub port: u16,
    /// `SDIV_ENV`.
    pub environment: Environment,
    /// `SDIV_MANIFESTS`: manifest file replacing the bundled one.
    pub manifests_path: Option<PathBuf>,
    /// `SDIV_DEFAULT_LOCALE`: locale used when a request has no `x-locale`.
    pub default_locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            environment: Environment::Development,
            manifests_path: None,
            default_locale: "en".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset, empty, or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port: non_empty("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            environment: non_empty("SDIV_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or(defaults.environment),
            manifests_path: non_empty("SDIV_MANIFESTS").map(PathBuf::from),
            default_locale: non_empty("SDIV_DEFAULT_LOCALE").unwrap_or(defaults.default_locale),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Arc<ManifestRegistry>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(registry: ManifestRegistry, config: AppConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }
}
