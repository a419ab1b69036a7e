use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Args;

pub const DEFAULT_VISION_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_TEXT_MODEL: &str = "gpt-4-0125-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Model connection flags shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct ModelArgs {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
    /// Alternative OpenAI-compatible endpoint
    #[arg(long, env = "OPENAI_BASE_URL", global = true)]
    pub base_url: Option<String>,
    /// Model used for screenshot analysis
    #[arg(long, env = "DESIGNLENS_VISION_MODEL", default_value = DEFAULT_VISION_MODEL, global = true)]
    pub vision_model: String,
    /// Model used for text-only flow analysis
    #[arg(long, env = "DESIGNLENS_TEXT_MODEL", default_value = DEFAULT_TEXT_MODEL, global = true)]
    pub text_model: String,
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE, global = true)]
    pub temperature: f32,
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub base_url: Option<String>,
    pub vision_model: String,
    pub text_model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ModelArgs {
    pub fn settings(&self) -> LlmSettings {
        LlmSettings {
            base_url: self.base_url.clone().filter(|u| !u.trim().is_empty()),
            vision_model: self.vision_model.clone(),
            text_model: self.text_model.clone(),
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow!("OpenAI API key is not configured (set OPENAI_API_KEY or pass --api-key)"))
    }
}
