//! Configuration loading for the server binary.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use filestash_core::config::AppConfig;
use std::path::Path;

/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "FILESTASH_";

/// Legacy variable holding the public base URL.
pub const LEGACY_DOMAIN_VAR: &str = "DOMAIN";

/// Build the layered configuration.
///
/// Lowest to highest precedence: built-in defaults, the legacy `DOMAIN`
/// value, the TOML file at `path` (when it exists), `FILESTASH_*` variables
/// split on `__`.
pub fn figment(path: &Path, legacy_domain: Option<&str>) -> Figment {
    layered(path, legacy_domain, Env::prefixed(ENV_PREFIX))
}

fn layered(path: &Path, legacy_domain: Option<&str>, env: Env) -> Figment {
    // Full defaults underneath, so a single nested variable such as
    // FILESTASH_STORAGE__PATH still sees the section's `type` tag.
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(domain) = legacy_domain.filter(|d| !d.trim().is_empty()) {
        tracing::info!(base_url = %domain, "Using legacy DOMAIN as base URL fallback");
        figment = figment.merge(Serialized::defaults(serde_json::json!({
            "server": { "base_url": domain }
        })));
    }

    if path.exists() {
        tracing::info!(config_path = %path.display(), "Loading configuration from file");
        figment = figment.merge(Toml::file(path));
    } else {
        tracing::debug!(config_path = %path.display(), "No config file found");
    }

    figment.merge(env.split("__"))
}

/// Load configuration from `path` and the process environment.
pub fn load(path: &Path) -> Result<AppConfig, figment::Error> {
    let legacy_domain = std::env::var(LEGACY_DOMAIN_VAR).ok();
    figment(path, legacy_domain.as_deref()).extract()
}
