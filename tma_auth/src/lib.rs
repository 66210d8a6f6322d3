//! # Telegram Mini App authentication
//!
//! Validates the signed init data a Telegram Mini App hands to its backend, and turns it into a trusted [`Identity`].
//! No session store is involved; the init data itself is the credential.
//!
//! ```text
//!    raw request ─▶ acquire ─▶ parse ─▶ data-check string ─▶ verify signature ─▶ check expiry ─▶ Identity
//! ```
//!
//! Every call ends in a [`ValidationResult`]: `NotAttempted` when the request carried no init data, `Success` with
//! the identity, or `Failure` with a [`FailureReason`]. Nothing is cached between calls.
//!
//! ## Usage
//! ```
//! use tma_auth::{InitDataBuilder, TmaValidator, ValidationResult, ValidatorConfig};
//!
//! let config = ValidatorConfig::new("123:ABC").unwrap().with_max_age(0);
//! let raw = InitDataBuilder::new(1_700_000_000).user_json(r#"{"id":42,"username":"bob"}"#).sign(config.secret());
//! let validator = TmaValidator::new(config);
//! match validator.validate(&raw) {
//!     ValidationResult::Success(identity) => assert_eq!(identity.username, "bob"),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

pub mod acquire;
pub mod canonical;
pub mod claims;
pub mod config;
pub mod errors;
pub mod expiry;
pub mod identity;
pub mod init_data;
pub mod signature;
pub mod signer;
pub mod validator;

pub use acquire::{
    token_from_header,
    Acquisition,
    AcquisitionHook,
    HookOutcome,
    QueryParamHook,
    RequestView,
    TokenAcquirer,
    AUTHORIZATION_HEADER,
};
pub use config::{parse_max_age, BotSecret, ValidatorConfig, DEFAULT_MAX_AGE_SECONDS};
pub use errors::{ConfigError, FailureReason};
pub use expiry::ExpiryPolicy;
pub use identity::{Identity, PLACEHOLDER_NAME};
pub use init_data::ParsedInitData;
pub use signer::InitDataBuilder;
pub use validator::{validate_init_data, TmaValidator, ValidationResult};
