//! Configuration loading and backend factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use geoquiz_core::model::Domain;

use crate::supabase::SupabaseClient;

/// Connection settings for a Supabase project.
///
/// Note: Custom Debug impl masks the anon key to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &"***")
            .finish()
    }
}

/// Top-level geoquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoquizConfig {
    /// Remote backend; absent means offline play.
    #[serde(default)]
    pub backend: Option<BackendConfig>,
    /// Domain used when a command does not name one.
    #[serde(default = "default_domain")]
    pub default_domain: Domain,
    /// HTTP timeout for backend calls.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_domain() -> Domain {
    Domain::World
}
fn default_timeout() -> u64 {
    30
}

impl Default for GeoquizConfig {
    fn default() -> Self {
        Self {
            backend: None,
            default_domain: default_domain(),
            request_timeout_secs: default_timeout(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `geoquiz.toml` in the current directory
/// 2. `~/.config/geoquiz/config.toml`
///
/// Environment variable overrides: `GEOQUIZ_SUPABASE_URL`, `GEOQUIZ_SUPABASE_ANON_KEY`.
pub fn load_config() -> Result<GeoquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GeoquizConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("geoquiz.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GeoquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GeoquizConfig::default(),
    };

    apply_env_overrides(&mut config);

    if let Some(backend) = &mut config.backend {
        backend.url = resolve_env_vars(&backend.url);
        backend.anon_key = resolve_env_vars(&backend.anon_key);
    }

    Ok(config)
}

fn apply_env_overrides(config: &mut GeoquizConfig) {
    let url = std::env::var("GEOQUIZ_SUPABASE_URL").ok();
    let key = std::env::var("GEOQUIZ_SUPABASE_ANON_KEY").ok();
    if url.is_none() && key.is_none() {
        return;
    }
    let backend = config.backend.get_or_insert_with(|| BackendConfig {
        url: String::new(),
        anon_key: String::new(),
    });
    if let Some(url) = url {
        backend.url = url;
    }
    if let Some(key) = key {
        backend.anon_key = key;
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("geoquiz"))
}

/// Create the remote backend described by the configuration, if any.
pub fn create_backend(config: &GeoquizConfig) -> Result<Option<Arc<SupabaseClient>>> {
    let Some(backend) = &config.backend else {
        return Ok(None);
    };
    anyhow::ensure!(!backend.url.is_empty(), "backend url is empty");
    anyhow::ensure!(!backend.anon_key.is_empty(), "backend anon_key is empty");
    Ok(Some(Arc::new(SupabaseClient::new(
        &backend.url,
        &backend.anon_key,
        Some(config.request_timeout_secs),
    ))))
}
