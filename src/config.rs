//! Configuration management for Chatgate
//!
//! Configuration is loaded from environment variables once at startup.
//! There is no hot-reload: changing a value requires a restart.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::proxy::ProviderKind;

/// Default token ceiling applied when a request does not carry one
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// Secret value authorizing calls to an upstream provider
///
/// The `Debug` and `Display` impls are redacted, so the secret can sit inside
/// structs that derive `Debug` without ending up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret, rejecting blank values
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            None
        } else {
            Some(Self(secret))
        }
    }

    /// Access the raw secret. Only the outbound header builder should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Settings for one upstream model provider
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    pub api_url: String,
    /// API key, `None` when the variable is unset or blank
    pub api_key: Option<Credential>,
    /// Model used when the request does not override it
    pub model: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Provider used when a request does not name one
    pub provider: ProviderKind,
    /// OpenAI settings
    pub openai: ProviderSettings,
    /// Grok (x.ai) settings
    pub grok: ProviderSettings,
    /// Token ceiling used when a request does not specify one
    pub default_max_tokens: u32,

    /// YouTube Data API base URL
    pub youtube_api_url: String,
    /// YouTube Data API key (search is disabled without it)
    pub youtube_api_key: Option<Credential>,
    /// Number of search results requested from YouTube
    pub youtube_max_results: u32,

    /// Directory of static assets served as the router fallback
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = env::var("CHATGATE_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("Invalid CHATGATE_PORT")?;

        let provider = env::var("AI_PROVIDER")
            .unwrap_or_else(|_| "openai".to_string())
            .parse::<ProviderKind>()
            .map_err(|e| anyhow!(e))
            .context("Invalid AI_PROVIDER")?;

        let default_max_tokens: u32 = env::var("AI_MAX_TOKENS")
            .unwrap_or_else(|_| DEFAULT_MAX_TOKENS.to_string())
            .parse()
            .context("Invalid AI_MAX_TOKENS")?;
        if default_max_tokens == 0 {
            return Err(anyhow!("AI_MAX_TOKENS must be greater than zero"));
        }

        Ok(Self {
            host: env::var("CHATGATE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,

            provider,
            openai: ProviderSettings {
                api_url: env::var("OPENAI_API_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                api_key: secret_var("OPENAI_API_KEY"),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4-turbo".to_string()),
            },
            grok: ProviderSettings {
                api_url: env::var("GROK_API_URL")
                    .unwrap_or_else(|_| "https://api.x.ai/v1".to_string()),
                api_key: secret_var("GROK_API_KEY"),
                model: env::var("GROK_MODEL").unwrap_or_else(|_| "grok-1".to_string()),
            },
            default_max_tokens,

            youtube_api_url: env::var("YOUTUBE_API_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".to_string()),
            youtube_api_key: secret_var("YOUTUBE_API_KEY"),
            youtube_max_results: env::var("YOUTUBE_MAX_RESULTS")
                .unwrap_or_else(|_| "6".to_string())
                .parse()
                .context("Invalid YOUTUBE_MAX_RESULTS")?,

            static_dir: env::var("STATIC_DIR").ok().map(PathBuf::from),
        })
    }

    /// Settings for the given provider
    pub fn provider_settings(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Grok => &self.grok,
        }
    }
}

fn secret_var(name: &str) -> Option<Credential> {
    env::var(name).ok().and_then(Credential::new)
}
