//! The data-check string: every field except `hash`, rendered as `key=value` with the decoded value, sorted by key
//! bytes and joined with `\n`. Issuers sign exactly these bytes.

use std::collections::BTreeMap;

use crate::init_data::{ParsedInitData, HASH_FIELD};

/// Builds the data-check string from any set of decoded fields. A `hash` entry, if present, is skipped.
pub fn data_check_string<'a, I>(fields: I) -> String
where I: IntoIterator<Item = (&'a str, &'a str)> {
    // BTreeMap<&str, _> orders by byte value, which is what the issuer uses. Re-inserting also applies
    // last-one-wins to duplicate keys.
    let sorted = fields.into_iter().filter(|(k, _)| *k != HASH_FIELD).collect::<BTreeMap<&str, &str>>();
    sorted.into_iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<String>>().join("\n")
}

impl ParsedInitData {
    pub fn data_check_string(&self) -> String {
        data_check_string(self.fields().iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}
