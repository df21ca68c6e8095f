//! Configuration loading and backend factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use promptfixer_core::model::ToneMode;
use promptfixer_core::session::{SessionOptions, DEFAULT_MAX_PROMPT_LEN};
use promptfixer_core::traits::PromptBackend;

use crate::http::{HttpBackend, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::mock::MockBackend;

pub const CONFIG_FILE_NAME: &str = "promptfixer.toml";
pub const ENV_BASE_URL: &str = "PROMPTFIXER_BASE_URL";
pub const ENV_API_KEY: &str = "PROMPTFIXER_API_KEY";

/// Which backend serves the score / rewrite / run actions.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    Http {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
    Mock {
        /// Fixed scoring feedback; the built-in sample is used when absent.
        #[serde(default)]
        feedback: Option<String>,
    },
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendConfig::Http {
                base_url,
                api_key,
                timeout_secs,
            } => f
                .debug_struct("Http")
                .field("base_url", base_url)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .field("timeout_secs", timeout_secs)
                .finish(),
            BackendConfig::Mock { feedback } => {
                f.debug_struct("Mock").field("feedback", feedback).finish()
            }
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Http {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_true() -> bool {
    true
}
fn default_max_prompt_len() -> usize {
    DEFAULT_MAX_PROMPT_LEN
}

/// Top-level promptfixer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptFixerConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Tone used when none is given on the command line.
    #[serde(default)]
    pub default_tone: ToneMode,
    /// Show demo content instead of failing when the backend is unreachable.
    #[serde(default = "default_true")]
    pub demo_fallback: bool,
    /// Longest accepted prompt, in characters.
    #[serde(default = "default_max_prompt_len")]
    pub max_prompt_len: usize,
}

impl Default for PromptFixerConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            default_tone: ToneMode::default(),
            demo_fallback: true,
            max_prompt_len: DEFAULT_MAX_PROMPT_LEN,
        }
    }
}

impl PromptFixerConfig {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            demo_fallback: self.demo_fallback,
            max_prompt_len: self.max_prompt_len,
        }
    }
}

/// Resolve `${VAR_NAME}` references using `lookup`. Unknown variables become empty.
fn resolve_vars_with(s: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut result = s.to_string();
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("${") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = lookup(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        search_from = start + value.len();
    }
    result
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve `${VAR}` references and apply `PROMPTFIXER_*` overrides.
fn finalize(
    mut config: PromptFixerConfig,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> PromptFixerConfig {
    if let BackendConfig::Http {
        base_url, api_key, ..
    } = &mut config.backend
    {
        *base_url = resolve_vars_with(base_url, lookup);
        *api_key = api_key
            .as_ref()
            .map(|k| resolve_vars_with(k, lookup))
            .filter(|k| !k.is_empty());

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.is_empty()) {
            *base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.is_empty()) {
            *api_key = Some(key);
        }
    }
    config
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `promptfixer.toml` in the current directory
/// 2. `~/.config/promptfixer/config.toml`
///
/// Environment variable overrides: `PROMPTFIXER_BASE_URL`, `PROMPTFIXER_API_KEY`.
pub fn load_config() -> Result<PromptFixerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PromptFixerConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => {
            anyhow::bail!("config file not found: {}", p.display());
        }
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PromptFixerConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PromptFixerConfig::default(),
    };

    Ok(finalize(config, &env_lookup))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("promptfixer"))
}

/// Create a backend instance from its configuration.
pub fn create_backend(config: &BackendConfig) -> Result<Box<dyn PromptBackend>> {
    match config {
        BackendConfig::Http {
            base_url,
            api_key,
            timeout_secs,
        } => Ok(Box::new(HttpBackend::new(
            base_url,
            api_key.clone(),
            *timeout_secs,
        )?)),
        BackendConfig::Mock { feedback } => Ok(Box::new(match feedback {
            Some(text) => MockBackend::with_fixed_feedback(text),
            None => MockBackend::default(),
        })),
    }
}
