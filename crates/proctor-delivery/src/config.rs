//! Delivery configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use proctor_core::traits::ReportDelivery;

use crate::resend::ResendDelivery;

/// Configuration for the primary delivery collaborator.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in
/// logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeliveryConfig {
    Resend {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
}

impl std::fmt::Debug for DeliveryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryConfig::Resend {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Resend")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

/// Top-level proctor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProctorConfig {
    /// Primary delivery collaborator; when absent, only the mail-compose
    /// fallback is available.
    #[serde(default)]
    pub delivery: Option<DeliveryConfig>,
    /// Recruiting address receiving completed reports.
    #[serde(default = "default_recipient")]
    pub recipient: String,
    /// Sender address used by the email collaborator.
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Question bank file presented to candidates.
    #[serde(default = "default_bank")]
    pub bank: PathBuf,
    /// Directory holding the durable session slot.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Directory for archived reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_recipient() -> String {
    "recruiting@example.com".to_string()
}
fn default_sender() -> String {
    "onboarding@resend.dev".to_string()
}
fn default_bank() -> PathBuf {
    PathBuf::from("question-banks/example.toml")
}
fn default_state_dir() -> PathBuf {
    PathBuf::from(".proctor")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./proctor-results")
}

impl Default for ProctorConfig {
    fn default() -> Self {
        Self {
            delivery: None,
            recipient: default_recipient(),
            sender: default_sender(),
            bank: default_bank(),
            state_dir: default_state_dir(),
            output_dir: default_output_dir(),
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

/// Resolve env vars in a delivery config.
fn resolve_delivery_config(config: &DeliveryConfig) -> DeliveryConfig {
    match config {
        DeliveryConfig::Resend { api_key, base_url } => DeliveryConfig::Resend {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `proctor.toml` in the current directory
/// 2. `~/.config/proctor/config.toml`
///
/// Environment variable override: `PROCTOR_RESEND_KEY`.
pub fn load_config() -> Result<ProctorConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ProctorConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("proctor.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ProctorConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ProctorConfig::default(),
    };

    // Apply env var override
    if let Ok(key) = std::env::var("PROCTOR_RESEND_KEY") {
        config.delivery = Some(match config.delivery {
            Some(DeliveryConfig::Resend { base_url, .. }) => DeliveryConfig::Resend {
                api_key: key,
                base_url,
            },
            None => DeliveryConfig::Resend {
                api_key: key,
                base_url: None,
            },
        });
    }

    // Resolve env vars in the delivery config
    config.delivery = config.delivery.as_ref().map(resolve_delivery_config);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("proctor"))
}

/// Create the primary delivery collaborator from the configuration, if one
/// is configured.
pub fn create_delivery(config: &ProctorConfig) -> Option<Box<dyn ReportDelivery>> {
    match &config.delivery {
        Some(DeliveryConfig::Resend { api_key, base_url }) => Some(Box::new(ResendDelivery::new(
            api_key,
            &config.sender,
            &config.recipient,
            base_url.clone(),
        ))),
        None => None,
    }
}
