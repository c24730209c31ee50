use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::FetchSettings;

pub const LISTINGS_ENDPOINT: &str = "https://www.startupjobs.cz/api/nabidky";
pub const SITE_BASE: &str = "https://www.startupjobs.cz";
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const STATE_FILENAME: &str = "seen_listings.ron";

const ENV_TOKEN: &str = "JOBWATCH_TG_TOKEN";
const ENV_CHAT_ID: &str = "JOBWATCH_TG_CHAT_ID";
const ENV_DRY_RUN: &str = "JOBWATCH_DRY_RUN";
const ENV_VERBOSE: &str = "JOBWATCH_VERBOSE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Everything one run needs. Endpoints are fixed; credentials come from the environment.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub listings_endpoint: Url,
    pub site_base: Url,
    pub telegram_api_base: String,
    pub bot_token: String,
    pub chat_id: String,
    pub dry_run: bool,
    pub verbose: bool,
    pub state_path: PathBuf,
    pub fetch: FetchSettings,
}

impl WatchConfig {
    pub fn new(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        state_path: PathBuf,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            listings_endpoint: Url::parse(LISTINGS_ENDPOINT)?,
            site_base: Url::parse(SITE_BASE)?,
            telegram_api_base: TELEGRAM_API_BASE.to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            dry_run: false,
            verbose: false,
            state_path,
            fetch: FetchSettings::default(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let flag = |name: &'static str| match lookup(name) {
            Some(raw) => parse_flag(name, &raw),
            None => Ok(false),
        };

        let mut config = Self::new(
            required(ENV_TOKEN)?,
            required(ENV_CHAT_ID)?,
            default_state_path(),
        )?;
        config.dry_run = flag(ENV_DRY_RUN)?;
        config.verbose = flag(ENV_VERBOSE)?;
        Ok(config)
    }
}

/// State file next to the running executable, or in the working directory
/// when the executable path is unknown.
pub fn default_state_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(STATE_FILENAME)))
        .unwrap_or_else(|| PathBuf::from(STATE_FILENAME))
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn credentials_are_required() {
        let err = WatchConfig::from_lookup(lookup_from(&[(ENV_CHAT_ID, "42")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_TOKEN));

        let err = WatchConfig::from_lookup(lookup_from(&[(ENV_TOKEN, "t"), (ENV_CHAT_ID, " ")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_CHAT_ID));
    }

    #[test]
    fn flags_default_to_off() {
        let config =
            WatchConfig::from_lookup(lookup_from(&[(ENV_TOKEN, "t"), (ENV_CHAT_ID, "42")]))
                .unwrap();
        assert!(!config.dry_run);
        assert!(!config.verbose);
        assert_eq!(config.listings_endpoint.as_str(), LISTINGS_ENDPOINT);
        assert!(config.state_path.ends_with(STATE_FILENAME));
    }

    #[test]
    fn dry_run_flag_is_parsed() {
        let config = WatchConfig::from_lookup(lookup_from(&[
            (ENV_TOKEN, "t"),
            (ENV_CHAT_ID, "42"),
            (ENV_DRY_RUN, "Yes"),
        ]))
        .unwrap();
        assert!(config.dry_run);

        let err = WatchConfig::from_lookup(lookup_from(&[
            (ENV_TOKEN, "t"),
            (ENV_CHAT_ID, "42"),
            (ENV_DRY_RUN, "maybe"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: ENV_DRY_RUN,
                value: "maybe".to_string()
            }
        );
    }
}
