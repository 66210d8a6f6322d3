//! Produces signed init data the same way the Telegram client does. The server never needs this; it exists for
//! tooling and tests.

use std::collections::BTreeMap;

use serde::Serialize;
use url::form_urlencoded;

use crate::{
    canonical::data_check_string,
    config::BotSecret,
    init_data::{AUTH_DATE_FIELD, HASH_FIELD, USER_FIELD},
    signature,
};

#[derive(Debug, Clone, Default)]
pub struct InitDataBuilder {
    fields: BTreeMap<String, String>,
}

impl InitDataBuilder {
    pub fn new(auth_date: i64) -> Self {
        Self::default().field(AUTH_DATE_FIELD, auth_date.to_string())
    }

    /// Sets any field. Setting `hash` has no effect, since signing replaces it.
    pub fn field<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn user_json<S: Into<String>>(self, json: S) -> Self {
        self.field(USER_FIELD, json)
    }

    pub fn user<T: Serialize>(self, user: &T) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_string(user)?;
        Ok(self.user_json(json))
    }

    pub fn hash(&self, secret: &BotSecret) -> String {
        signature::sign(secret, &data_check_string(self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))))
    }

    /// Returns the url-encoded init data, with the `hash` field appended.
    pub fn sign(&self, secret: &BotSecret) -> String {
        let hash = self.hash(secret);
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        self.fields.iter().filter(|(k, _)| k.as_str() != HASH_FIELD).for_each(|(k, v)| {
            serializer.append_pair(k, v);
        });
        serializer.append_pair(HASH_FIELD, &hash);
        serializer.finish()
    }
}
