//! # Init data validation
//!
//! The pipeline runs these stages in order and stops at the first one that fails:
//!
//! 1. Acquire the raw init data from the request (see [`crate::acquire`]).
//! 2. Parse it, pulling out `hash` and `auth_date`.
//! 3. Build the data-check string and verify the signature.
//! 4. Check `auth_date` against the expiry policy.
//! 5. Extract the user identity.
//!
//! Validation holds no state besides the immutable configuration, so a single [`TmaValidator`] can serve any number
//! of concurrent requests. Apart from reading the clock once per call, it has no side effects.

use chrono::Utc;
use log::{debug, warn};

use crate::{
    acquire::{Acquisition, RequestView, TokenAcquirer},
    config::ValidatorConfig,
    errors::FailureReason,
    expiry::ExpiryPolicy,
    identity::Identity,
    init_data::ParsedInitData,
    signature,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The request carried no init data.
    NotAttempted,
    Success(Identity),
    Failure(FailureReason),
}

impl ValidationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Success(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<FailureReason> {
        match self {
            Self::Failure(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<Result<Identity, FailureReason>> for ValidationResult {
    fn from(result: Result<Identity, FailureReason>) -> Self {
        match result {
            Ok(identity) => Self::Success(identity),
            Err(reason) => Self::Failure(reason),
        }
    }
}

/// Validates a bare init-data string (without the `tma ` prefix) at time `now`, given in Unix seconds.
pub fn validate_init_data(raw: &str, config: &ValidatorConfig, now: i64) -> ValidationResult {
    let result = check_init_data(raw, config, now);
    match &result {
        Ok(identity) => debug!("🔐️ Init data for user {} is valid", identity.id),
        Err(FailureReason::InvalidSignature) => warn!("🔐️ Init data with an invalid signature was rejected"),
        Err(reason) => debug!("🔐️ Init data was rejected. {reason}"),
    }
    result.into()
}

fn check_init_data(raw: &str, config: &ValidatorConfig, now: i64) -> Result<Identity, FailureReason> {
    let data = ParsedInitData::parse(raw)?;
    signature::verify(config.secret(), &data.data_check_string(), data.hash())?;
    ExpiryPolicy::new(config.max_age_seconds()).check(data.auth_date(), now)?;
    Identity::from_init_data(&data, config.allows_write_to_pm())
}

//-------------------------------------------------  TmaValidator  -----------------------------------------------------
/// Ties token acquisition and validation together for a host.
#[derive(Debug, Clone)]
pub struct TmaValidator {
    config: ValidatorConfig,
    acquirer: TokenAcquirer,
}

impl TmaValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config, acquirer: TokenAcquirer::new() }
    }

    pub fn with_acquirer(config: ValidatorConfig, acquirer: TokenAcquirer) -> Self {
        Self { config, acquirer }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates a bare init-data string against the current time.
    pub fn validate(&self, raw: &str) -> ValidationResult {
        self.validate_at(raw, Utc::now().timestamp())
    }

    pub fn validate_at(&self, raw: &str, now: i64) -> ValidationResult {
        validate_init_data(raw, &self.config, now)
    }

    /// Finds the init data in `request` and validates it against the current time.
    pub fn authenticate(&self, request: &dyn RequestView) -> ValidationResult {
        self.authenticate_at(request, Utc::now().timestamp())
    }

    pub fn authenticate_at(&self, request: &dyn RequestView, now: i64) -> ValidationResult {
        match self.acquirer.acquire(request) {
            Acquisition::NoCredential => {
                debug!("🔐️ No init data in request for {}", request.path());
                ValidationResult::NotAttempted
            },
            Acquisition::Resolved(result) => result,
            Acquisition::Token(token) => self.validate_at(&token, now),
        }
    }
}
