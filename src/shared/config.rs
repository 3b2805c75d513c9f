//! Application configuration. API credentials, listen address, limits.
//!
//! `AppConfig` is the raw, optional view loaded from env/file. `Settings` is the
//! validated, immutable view built once at startup and handed to adapters and services.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_IMAGE_API_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";
/// Upper bound on prompt length, protects the upstream call.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 2000;
/// Upper bound on concepts rendered per request (one image call each).
pub const DEFAULT_MAX_CONCEPTS: usize = 6;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REQUEST_DEADLINE_SECS: u64 = 90;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Text backend API key. Read from DESIGN_STUDIO_GEMINI_API_KEY or GEMINI_API_KEY.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Generative Language API base URL. Read from DESIGN_STUDIO_GEMINI_API_URL.
    #[serde(default)]
    pub gemini_api_url: Option<String>,

    /// Model name. Defaults to "gemini-1.5-flash". Read from DESIGN_STUDIO_GEMINI_MODEL.
    #[serde(default)]
    pub gemini_model: Option<String>,

    /// Image backend API key. Read from DESIGN_STUDIO_IMAGE_API_KEY or HUGGINGFACE_API_KEY.
    #[serde(default)]
    pub image_api_key: Option<String>,

    /// Image inference endpoint. Read from DESIGN_STUDIO_IMAGE_API_URL.
    #[serde(default)]
    pub image_api_url: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Server
    // ─────────────────────────────────────────────────────────────────────────
    /// Listen port. Read from DESIGN_STUDIO_PORT or PORT (default 5000).
    #[serde(default)]
    pub port: Option<u16>,

    /// Bind address (default 0.0.0.0). Read from DESIGN_STUDIO_BIND.
    #[serde(default)]
    pub bind: Option<String>,

    /// Comma-separated allowed CORS origins; unset = any. Read from DESIGN_STUDIO_CORS_ORIGINS.
    #[serde(default)]
    pub cors_origins: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Limits
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub max_prompt_chars: Option<usize>,

    #[serde(default)]
    pub max_concepts: Option<usize>,

    /// Per upstream HTTP call timeout in seconds.
    #[serde(default)]
    pub upstream_timeout_secs: Option<u64>,

    /// Overall deadline for one generation request in seconds.
    #[serde(default)]
    pub request_deadline_secs: Option<u64>,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("missing required secret: set {0}")]
    MissingSecret(&'static str),

    #[error("invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("DESIGN_STUDIO"));
        if let Ok(path) = std::env::var("DESIGN_STUDIO_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        cfg.apply_unprefixed(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Unprefixed names so a plain .env with GEMINI_API_KEY / HUGGINGFACE_API_KEY / PORT
    /// works. Empty prefixed values count as unset.
    fn apply_unprefixed(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.gemini_api_key().is_none() {
            self.gemini_api_key = lookup("GEMINI_API_KEY");
        }
        if self.image_api_key().is_none() {
            self.image_api_key = lookup("HUGGINGFACE_API_KEY");
        }
        if self.port.is_none() {
            if let Some(port) = lookup("PORT").and_then(|s| s.parse::<u16>().ok()) {
                self.port = Some(port);
            }
        }
    }

    /// Returns the text backend key if set and non-empty.
    pub fn gemini_api_key(&self) -> Option<&str> {
        non_empty(self.gemini_api_key.as_deref())
    }

    /// Returns the image backend key if set and non-empty.
    pub fn image_api_key(&self) -> Option<&str> {
        non_empty(self.image_api_key.as_deref())
    }

    /// Which backend secrets are present. Reported by the health endpoint.
    pub fn backend_status(&self) -> BackendStatus {
        BackendStatus {
            text_backend_configured: self.gemini_api_key().is_some(),
            image_backend_configured: self.image_api_key().is_some(),
        }
    }

    /// Validate and freeze. Fails if either secret is missing.
    pub fn into_settings(self) -> Result<Settings, SettingsError> {
        let text_key = self
            .gemini_api_key()
            .ok_or(SettingsError::MissingSecret("GEMINI_API_KEY"))?
            .to_string();
        let image_key = self
            .image_api_key()
            .ok_or(SettingsError::MissingSecret("HUGGINGFACE_API_KEY"))?
            .to_string();

        let limits = GenerationLimits {
            max_prompt_chars: positive(
                "max_prompt_chars",
                self.max_prompt_chars.unwrap_or(DEFAULT_MAX_PROMPT_CHARS),
            )?,
            max_concepts: positive(
                "max_concepts",
                self.max_concepts.unwrap_or(DEFAULT_MAX_CONCEPTS),
            )?,
            upstream_timeout: Duration::from_secs(positive(
                "upstream_timeout_secs",
                self.upstream_timeout_secs
                    .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            )?),
            request_deadline: Duration::from_secs(positive(
                "request_deadline_secs",
                self.request_deadline_secs
                    .unwrap_or(DEFAULT_REQUEST_DEADLINE_SECS),
            )?),
        };

        let cors_origins = self
            .cors_origins
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Settings {
            text: TextBackendSettings {
                api_key: text_key,
                api_url: non_empty(self.gemini_api_url.as_deref())
                    .unwrap_or(DEFAULT_GEMINI_API_URL)
                    .trim_end_matches('/')
                    .to_string(),
                model: non_empty(self.gemini_model.as_deref())
                    .unwrap_or(DEFAULT_GEMINI_MODEL)
                    .to_string(),
            },
            image: ImageBackendSettings {
                api_key: image_key,
                api_url: non_empty(self.image_api_url.as_deref())
                    .unwrap_or(DEFAULT_IMAGE_API_URL)
                    .to_string(),
            },
            server: ServerSettings {
                bind: non_empty(self.bind.as_deref())
                    .unwrap_or(DEFAULT_BIND)
                    .to_string(),
                port: self.port.unwrap_or(DEFAULT_PORT),
                cors_origins,
            },
            limits,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn positive<T: PartialEq + Default + std::fmt::Display>(
    name: &'static str,
    value: T,
) -> Result<T, SettingsError> {
    if value == T::default() {
        return Err(SettingsError::Invalid {
            name,
            reason: format!("must be greater than zero, got {}", value),
        });
    }
    Ok(value)
}

/// Presence of the two backend secrets at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendStatus {
    pub text_backend_configured: bool,
    pub image_backend_configured: bool,
}

/// Validated configuration. Immutable after startup.
#[derive(Clone)]
pub struct Settings {
    pub text: TextBackendSettings,
    pub image: ImageBackendSettings,
    pub server: ServerSettings,
    pub limits: GenerationLimits,
}

#[derive(Clone)]
pub struct TextBackendSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

#[derive(Clone)]
pub struct ImageBackendSettings {
    pub api_key: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
    /// Empty = allow any origin.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct GenerationLimits {
    pub max_prompt_chars: usize,
    pub max_concepts: usize,
    pub upstream_timeout: Duration,
    pub request_deadline: Duration,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            max_concepts: DEFAULT_MAX_CONCEPTS,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            request_deadline: Duration::from_secs(DEFAULT_REQUEST_DEADLINE_SECS),
        }
    }
}
