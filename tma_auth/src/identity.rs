use log::debug;
use serde::{Deserialize, Serialize};

use crate::{claims, errors::FailureReason, init_data::ParsedInitData};

/// Stands in for a username or name that is absent or blank.
pub const PLACEHOLDER_NAME: &str = "Unknown";

/// The Telegram user that signed init data belongs to. Only ever built from init data with a valid signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    /// Only present when the validator is configured to emit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allows_write_to_pm: Option<bool>,
}

/// The `user` object as Telegram sends it. Anything not listed here is ignored.
#[derive(Debug, Deserialize)]
struct UserPayload {
    id: i64,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    language_code: Option<String>,
    #[serde(default)]
    is_premium: Option<bool>,
    #[serde(default)]
    allows_write_to_pm: Option<bool>,
}

fn name_or_placeholder(name: Option<String>) -> String {
    match name {
        Some(s) if !s.trim().is_empty() => s,
        _ => PLACEHOLDER_NAME.to_string(),
    }
}

impl Identity {
    /// Reads the JSON text of a `user` field.
    pub fn from_user_json(json: &str, allows_write_to_pm: bool) -> Result<Self, FailureReason> {
        let user = serde_json::from_str::<UserPayload>(json).map_err(|e| {
            debug!("👤️ Could not deserialize the user payload. {e}");
            FailureReason::MalformedUserPayload
        })?;
        Ok(Self {
            id: user.id,
            username: name_or_placeholder(user.username),
            first_name: name_or_placeholder(user.first_name),
            last_name: name_or_placeholder(user.last_name),
            language_code: user.language_code,
            is_premium: user.is_premium.unwrap_or(false),
            allows_write_to_pm: allows_write_to_pm.then(|| user.allows_write_to_pm.unwrap_or(false)),
        })
    }

    /// Extracts the identity from init data whose signature has already been checked.
    pub fn from_init_data(data: &ParsedInitData, allows_write_to_pm: bool) -> Result<Self, FailureReason> {
        let json = data.user_json().ok_or_else(|| {
            debug!("👤️ Init data has no user field");
            FailureReason::MalformedUserPayload
        })?;
        Self::from_user_json(json, allows_write_to_pm)
    }

    /// The identity as `(claim name, value)` pairs. Absent optional attributes are left out.
    pub fn claims(&self) -> Vec<(&'static str, String)> {
        let mut result = vec![
            (claims::ID, self.id.to_string()),
            (claims::USERNAME, self.username.clone()),
            (claims::FIRST_NAME, self.first_name.clone()),
            (claims::LAST_NAME, self.last_name.clone()),
        ];
        if let Some(code) = &self.language_code {
            result.push((claims::LANGUAGE_CODE, code.clone()));
        }
        result.push((claims::IS_PREMIUM, self.is_premium.to_string()));
        if let Some(allowed) = self.allows_write_to_pm {
            result.push((claims::ALLOWS_WRITE_TO_PM, allowed.to_string()));
        }
        result
    }
}
