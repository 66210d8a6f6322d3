use log::trace;

use crate::errors::FailureReason;

/// Bounds-checks the `auth_date` of init data, given in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    max_age_seconds: i64,
}

impl ExpiryPolicy {
    /// A `max_age_seconds` of zero or less switches the age check off. Timestamps of zero or less are always rejected.
    pub fn new(max_age_seconds: i64) -> Self {
        Self { max_age_seconds }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_age_seconds > 0
    }

    pub fn check(&self, auth_date: i64, now: i64) -> Result<(), FailureReason> {
        if auth_date <= 0 {
            trace!("⏰️ auth_date {auth_date} is not a usable timestamp");
            return Err(FailureReason::InvalidAuthDate);
        }
        if self.is_enabled() && now > auth_date.saturating_add(self.max_age_seconds) {
            trace!("⏰️ Init data from {auth_date} is older than {}s", self.max_age_seconds);
            return Err(FailureReason::Expired);
        }
        Ok(())
    }
}
