//! # Init data parsing
//!
//! Mini App init data arrives as an `application/x-www-form-urlencoded` string, e.g.
//!
//! ```text
//!    query_id=AAH...&user=%7B%22id%22%3A42%7D&auth_date=1700000000&hash=c501b71e...
//! ```
//!
//! Parsing decodes every field, pulls out the `hash` and `auth_date` fields, and keeps everything else (including
//! fields this crate knows nothing about) for canonicalization. Duplicate keys resolve to the last occurrence.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::errors::FailureReason;

pub const HASH_FIELD: &str = "hash";
pub const AUTH_DATE_FIELD: &str = "auth_date";
pub const USER_FIELD: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInitData {
    /// Every decoded field except `hash`, ordered by key bytes.
    fields: BTreeMap<String, String>,
    hash: String,
    auth_date: i64,
}

impl ParsedInitData {
    /// Decodes a raw init-data string.
    ///
    /// Fails with [`FailureReason::MissingSignature`] if there is no non-empty `hash`, and then with
    /// [`FailureReason::InvalidAuthDate`] if `auth_date` is missing or is not a 64-bit integer.
    pub fn parse(raw: &str) -> Result<Self, FailureReason> {
        let mut fields = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect::<BTreeMap<String, String>>();
        let hash = fields.remove(HASH_FIELD).filter(|h| !h.is_empty()).ok_or(FailureReason::MissingSignature)?;
        let auth_date = fields
            .get(AUTH_DATE_FIELD)
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or(FailureReason::InvalidAuthDate)?;
        Ok(Self { fields, hash, auth_date })
    }

    pub fn hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn auth_date(&self) -> i64 {
        self.auth_date
    }

    /// The raw JSON text of the `user` field, if present.
    pub fn user_json(&self) -> Option<&str> {
        self.get(USER_FIELD)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// All fields that take part in the signature, i.e. everything but `hash`.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}
