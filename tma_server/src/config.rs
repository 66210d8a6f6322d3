use std::env;

use log::*;
use tma_auth::{
    acquire::DEFAULT_QUERY_PARAM,
    parse_max_age,
    QueryParamHook,
    TmaValidator,
    TokenAcquirer,
    ValidatorConfig,
    DEFAULT_MAX_AGE_SECONDS,
};
use tma_common::{parse_boolean_flag, Secret};

use crate::errors::ServerError;

const DEFAULT_TMA_HOST: &str = "127.0.0.1";
const DEFAULT_TMA_PORT: u16 = 8370;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_TMA_HOST.to_string(), port: DEFAULT_TMA_PORT, auth: AuthConfig::default() }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("TMA_HOST").ok().unwrap_or_else(|| DEFAULT_TMA_HOST.into());
        let port = env::var("TMA_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for TMA_PORT. {e} Using the default, {DEFAULT_TMA_PORT}, instead."
                    );
                    DEFAULT_TMA_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_TMA_PORT);
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            error!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. The server will \
                 not start until TMA_BOT_TOKEN is set."
            );
            AuthConfig::default()
        });
        Self { host, port, auth }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The token of the bot the Mini App belongs to. Init data is signed with a key derived from it.
    pub bot_token: Secret<String>,
    /// Init data older than this is rejected. Zero or less disables the check.
    pub max_age_seconds: i64,
    /// If true, identities include whether the user allows the bot to write to them.
    pub allows_write_to_pm: bool,
    /// The query parameter that may carry init data on `query_token_paths`.
    pub query_token_param: String,
    /// Path prefixes on which init data is also accepted in the query string. Empty means header only.
    pub query_token_paths: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bot_token: Secret::default(),
            max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
            allows_write_to_pm: false,
            query_token_param: DEFAULT_QUERY_PARAM.to_string(),
            query_token_paths: Vec::new(),
        }
    }
}

impl AuthConfig {
    pub fn new(bot_token: &str) -> Self {
        Self { bot_token: Secret::new(bot_token.to_string()), ..Default::default() }
    }

    pub fn try_from_env() -> Result<Self, ServerError> {
        let bot_token = env::var("TMA_BOT_TOKEN")
            .map_err(|e| ServerError::ConfigurationError(format!("{e} [TMA_BOT_TOKEN]")))?;
        if bot_token.trim().is_empty() {
            return Err(ServerError::ConfigurationError("TMA_BOT_TOKEN is empty".into()));
        }
        let max_age_seconds = env::var("TMA_MAX_AGE_SECONDS")
            .map_err(|_| {
                info!(
                    "🪛️ TMA_MAX_AGE_SECONDS is not set. Using the default value of {DEFAULT_MAX_AGE_SECONDS} seconds."
                )
            })
            .and_then(|s| {
                parse_max_age(&s).map_err(|e| warn!("🪛️ Invalid configuration value for TMA_MAX_AGE_SECONDS. {e}"))
            })
            .ok()
            .unwrap_or(DEFAULT_MAX_AGE_SECONDS);
        if max_age_seconds <= 0 {
            warn!("🚨️ Init data expiry checks are DISABLED. Any correctly signed init data will be accepted forever.");
        }
        let allows_write_to_pm = parse_boolean_flag(env::var("TMA_ALLOWS_WRITE_TO_PM").ok(), false);
        let query_token_param =
            env::var("TMA_QUERY_TOKEN_PARAM").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| DEFAULT_QUERY_PARAM.into());
        let query_token_paths = env::var("TMA_QUERY_TOKEN_PATHS").map(|s| parse_path_list(&s)).unwrap_or_default();
        match query_token_paths.as_slice() {
            [] => info!("🪛️ Init data is only accepted in the Authorization header."),
            paths => info!(
                "🪛️ Init data is also accepted in the '{query_token_param}' query parameter on: {}",
                paths.join(", ")
            ),
        }
        Ok(Self {
            bot_token: Secret::new(bot_token),
            max_age_seconds,
            allows_write_to_pm,
            query_token_param,
            query_token_paths,
        })
    }

    pub fn build_validator(&self) -> Result<TmaValidator, ServerError> {
        let config = ValidatorConfig::new(self.bot_token.reveal().as_str())
            .map_err(|e| ServerError::ConfigurationError(e.to_string()))?
            .with_max_age(self.max_age_seconds)
            .with_allows_write_to_pm(self.allows_write_to_pm);
        let acquirer = if self.query_token_paths.is_empty() {
            TokenAcquirer::new()
        } else {
            let hook = QueryParamHook::new(self.query_token_param.as_str(), self.query_token_paths.clone());
            TokenAcquirer::with_hook(hook)
        };
        Ok(TmaValidator::with_acquirer(config, acquirer))
    }
}

fn parse_path_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter_map(|p| {
            if p.starts_with('/') {
                Some(p.to_string())
            } else {
                warn!("🪛️ Ignoring query token path '{p}' in TMA_QUERY_TOKEN_PATHS. Paths must start with '/'.");
                None
            }
        })
        .collect()
}
