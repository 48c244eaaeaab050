use clap::Args;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro-latest";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Raw settings as they arrive from flags, the environment or a `.env` file.
///
/// Every field is optional here so that missing secrets are reported by
/// [`Config::from_args`] with a proper diagnostic instead of a clap usage error.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// MongoDB connection string. The database named in it is the seed target.
    #[arg(long, env = "MONGO_URI", hide_env_values = true)]
    pub mongo_uri: Option<String>,

    /// API key for the Gemini generateContent endpoint.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Legacy location of the Gemini key, used only when GEMINI_API_KEY is unset.
    #[arg(long, env = "APP_SECRET_KEY", hide_env_values = true)]
    pub app_secret_key: Option<String>,

    /// Gemini model used for question generation.
    #[arg(long, env = "GEMINI_MODEL")]
    pub gemini_model: Option<String>,

    /// Base URL of the Gemini REST API.
    #[arg(long, env = "GEMINI_BASE_URL")]
    pub gemini_base_url: Option<String>,

    /// Timeout for a single generation request, in seconds.
    #[arg(long, env = "GENERATION_TIMEOUT_SECS", default_value_t = 120)]
    pub generation_timeout_secs: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MONGO_URI is not set")]
    MissingMongoUri,
    #[error("GEMINI_API_KEY is not set (and no APP_SECRET_KEY fallback was found)")]
    MissingApiKey,
    #[error("GENERATION_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

/// Resolved configuration, built once at startup and handed to whoever needs it.
#[derive(Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub generation_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("mongo_uri", &"***")
            .field("gemini_api_key", &"***")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("generation_timeout", &self.generation_timeout)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Checks the required secrets and fills in defaults.
    ///
    /// The database URI is checked first, so a run with nothing configured
    /// reports `MONGO_URI` before anything else.
    pub fn from_args(args: ConfigArgs) -> Result<Self, ConfigError> {
        let mongo_uri = non_empty(args.mongo_uri).ok_or(ConfigError::MissingMongoUri)?;

        let gemini_api_key = match non_empty(args.gemini_api_key) {
            Some(key) => key,
            None => {
                let fallback =
                    non_empty(args.app_secret_key).ok_or(ConfigError::MissingApiKey)?;
                warn!(
                    "Using API key from APP_SECRET_KEY. It's recommended to use GEMINI_API_KEY."
                );
                fallback
            }
        };

        if args.generation_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Config {
            mongo_uri,
            gemini_api_key,
            gemini_model: non_empty(args.gemini_model)
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
            gemini_base_url: non_empty(args.gemini_base_url)
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_owned()),
            generation_timeout: Duration::from_secs(args.generation_timeout_secs),
        })
    }
}
