//! Claim names for hosts that turn an [`Identity`](crate::Identity) into a claim set.

/// The name hosts register this authentication scheme under.
pub const AUTHENTICATION_SCHEME: &str = "TMA";

pub const ID: &str = "id";
pub const USERNAME: &str = "username";
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const LANGUAGE_CODE: &str = "language_code";
pub const IS_PREMIUM: &str = "is_premium";
pub const ALLOWS_WRITE_TO_PM: &str = "allows_write_to_pm";
