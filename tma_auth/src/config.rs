use std::fmt;

use tma_common::Secret;

use crate::{errors::ConfigError, signature::hmac_sha256};

/// Init data older than this many seconds is rejected unless configured otherwise.
pub const DEFAULT_MAX_AGE_SECONDS: i64 = 86_400;
/// The key used in the first HMAC stage. It binds the derived key to Mini App init data.
pub const DOMAIN_SEPARATION_KEY: &str = "WebAppData";

//-------------------------------------------------  BotSecret  --------------------------------------------------------
/// The bot token, together with the key derived from it in the first HMAC stage.
///
/// The derived key only depends on the token, so it is computed once here instead of on every validation.
#[derive(Clone)]
pub struct BotSecret {
    token: Secret<String>,
    derived_key: Secret<Vec<u8>>,
}

impl BotSecret {
    pub fn new<S: Into<String>>(token: S) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyBotToken);
        }
        let derived_key = hmac_sha256(DOMAIN_SEPARATION_KEY.as_bytes(), token.as_bytes()).to_vec();
        Ok(Self { token: Secret::new(token), derived_key: Secret::new(derived_key) })
    }

    pub fn token(&self) -> &Secret<String> {
        &self.token
    }

    /// `HMAC-SHA256(key = "WebAppData", message = token)`
    pub fn derived_key(&self) -> &[u8] {
        self.derived_key.reveal()
    }
}

impl fmt::Debug for BotSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotSecret(****)")
    }
}

//-----------------------------------------------  ValidatorConfig  ----------------------------------------------------
/// Immutable validation settings. Build it once at start-up and share it.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    secret: BotSecret,
    /// Values of zero or less switch the expiry check off.
    max_age_seconds: i64,
    /// When false, `allows_write_to_pm` is left out of the extracted identity.
    allows_write_to_pm: bool,
}

impl ValidatorConfig {
    pub fn new<S: Into<String>>(bot_token: S) -> Result<Self, ConfigError> {
        let secret = BotSecret::new(bot_token)?;
        Ok(Self { secret, max_age_seconds: DEFAULT_MAX_AGE_SECONDS, allows_write_to_pm: false })
    }

    pub fn with_max_age(mut self, max_age_seconds: i64) -> Self {
        self.max_age_seconds = max_age_seconds;
        self
    }

    pub fn with_allows_write_to_pm(mut self, enabled: bool) -> Self {
        self.allows_write_to_pm = enabled;
        self
    }

    pub fn secret(&self) -> &BotSecret {
        &self.secret
    }

    pub fn max_age_seconds(&self) -> i64 {
        self.max_age_seconds
    }

    pub fn allows_write_to_pm(&self) -> bool {
        self.allows_write_to_pm
    }
}

/// Parses a maximum age given in seconds. Negative values and zero are valid and disable the expiry check.
pub fn parse_max_age(value: &str) -> Result<i64, ConfigError> {
    value.trim().parse::<i64>().map_err(|e| ConfigError::InvalidMaxAge(format!("{value} is not a number. {e}")))
}
