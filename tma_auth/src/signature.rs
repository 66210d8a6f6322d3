//! # Init data signatures
//!
//! Init data is signed with a two-stage HMAC-SHA256:
//!
//! ```text
//!    secret_key = HMAC_SHA256(key = "WebAppData", message = bot_token)
//!    hash       = hex(HMAC_SHA256(key = secret_key, message = data_check_string))
//! ```
//!
//! The first stage lives in [`BotSecret`]. Verification hex-decodes the supplied hash, so upper and lower case are
//! both accepted, and then compares in constant time.

use hmac::{Hmac, Mac};
use log::trace;
use sha2::Sha256;

use crate::{config::BotSecret, errors::FailureReason};

pub(crate) type HmacSha256 = Hmac<Sha256>;

pub(crate) fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut mac = new_mac(key);
    mac.update(message);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

fn new_mac(key: &[u8]) -> HmacSha256 {
    HmacSha256::new_from_slice(key).expect("HMAC can take a key of any size")
}

/// Signs a data-check string, returning the hash as lowercase hex.
pub fn sign(secret: &BotSecret, data_check_string: &str) -> String {
    hex::encode(hmac_sha256(secret.derived_key(), data_check_string.as_bytes()))
}

/// Checks `hash` against the signature of `data_check_string`.
pub fn verify(secret: &BotSecret, data_check_string: &str, hash: &str) -> Result<(), FailureReason> {
    let Ok(expected) = hex::decode(hash) else {
        trace!("🔐️ Init data hash is not valid hex");
        return Err(FailureReason::InvalidSignature);
    };
    let mut mac = new_mac(secret.derived_key());
    mac.update(data_check_string.as_bytes());
    // verify_slice is constant time, and rejects digests of the wrong length
    mac.verify_slice(&expected).map_err(|_| FailureReason::InvalidSignature)
}
