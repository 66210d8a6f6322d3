//! # Token acquisition
//!
//! Works out which raw init-data string, if any, a request carries. By default this is the `Authorization` header in
//! the form
//!
//! ```text
//!    Authorization: tma query_id=...&user=...&auth_date=...&hash=...
//! ```
//!
//! where the `tma` prefix is matched case-insensitively. An [`AcquisitionHook`] runs before the header is inspected.
//! It can leave the decision to the header, hand over a token from somewhere else, or settle the whole attempt
//! itself. [`QueryParamHook`] is the usual hook: clients that cannot set headers (web sockets, event streams) pass
//! the init data in a query parameter, on a fixed set of paths only.

use std::{fmt, sync::Arc};

use log::trace;

use crate::validator::ValidationResult;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const TOKEN_PREFIX: &str = "tma";
pub const DEFAULT_QUERY_PARAM: &str = "access_token";

/// A read-only view over whatever request type the host framework uses.
pub trait RequestView {
    fn header(&self, name: &str) -> Option<String>;
    fn path(&self) -> &str;
    /// The decoded value of a query string parameter.
    fn query_param(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Carry on with the `Authorization` header.
    NoOpinion,
    /// Validate this init data instead of looking at the header.
    Token(String),
    /// Skip validation and return this result.
    ShortCircuit(ValidationResult),
}

pub trait AcquisitionHook {
    /// Called once per attempt, before the `Authorization` header is looked at.
    fn on_message_received(&self, request: &dyn RequestView) -> HookOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// No init data was found. This is not a failure; the request simply made no attempt to authenticate.
    NoCredential,
    Token(String),
    /// The hook settled the attempt.
    Resolved(ValidationResult),
}

#[derive(Clone, Default)]
pub struct TokenAcquirer {
    hook: Option<Arc<dyn AcquisitionHook + Send + Sync>>,
}

impl fmt::Debug for TokenAcquirer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAcquirer").field("hook", &self.hook.is_some()).finish()
    }
}

impl TokenAcquirer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook<H>(hook: H) -> Self
    where H: AcquisitionHook + Send + Sync + 'static {
        Self { hook: Some(Arc::new(hook)) }
    }

    pub fn acquire(&self, request: &dyn RequestView) -> Acquisition {
        if let Some(hook) = &self.hook {
            match hook.on_message_received(request) {
                HookOutcome::NoOpinion => trace!("🔑️ Acquisition hook declined"),
                HookOutcome::Token(token) => {
                    trace!("🔑️ Acquisition hook supplied a token");
                    return Acquisition::Token(token);
                },
                HookOutcome::ShortCircuit(result) => {
                    trace!("🔑️ Acquisition hook settled the attempt");
                    return Acquisition::Resolved(result);
                },
            }
        }
        match request.header(AUTHORIZATION_HEADER).as_deref().and_then(token_from_header) {
            Some(token) => Acquisition::Token(token.to_string()),
            None => {
                trace!("🔑️ No Mini App credentials in the Authorization header");
                Acquisition::NoCredential
            },
        }
    }
}

/// Strips the `tma ` prefix (any case) from an `Authorization` header value. Returns `None` if the prefix is missing
/// or nothing follows it.
pub fn token_from_header(value: &str) -> Option<&str> {
    let scheme = value.get(..TOKEN_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(TOKEN_PREFIX) {
        return None;
    }
    value[TOKEN_PREFIX.len()..].strip_prefix(' ').filter(|token| !token.is_empty())
}

//-------------------------------------------------  QueryParamHook  ---------------------------------------------------
/// Reads init data from a query parameter, but only for requests whose path starts with one of `path_prefixes`.
#[derive(Debug, Clone)]
pub struct QueryParamHook {
    param: String,
    path_prefixes: Vec<String>,
}

impl QueryParamHook {
    pub fn new<S: Into<String>>(param: S, path_prefixes: Vec<String>) -> Self {
        Self { param: param.into(), path_prefixes }
    }

    pub fn for_paths(path_prefixes: Vec<String>) -> Self {
        Self::new(DEFAULT_QUERY_PARAM, path_prefixes)
    }

    pub fn param(&self) -> &str {
        self.param.as_str()
    }

    pub fn path_prefixes(&self) -> &[String] {
        &self.path_prefixes
    }
}

impl AcquisitionHook for QueryParamHook {
    fn on_message_received(&self, request: &dyn RequestView) -> HookOutcome {
        let path = request.path();
        if !self.path_prefixes.iter().any(|prefix| path.starts_with(prefix.as_str())) {
            return HookOutcome::NoOpinion;
        }
        match request.query_param(&self.param) {
            Some(token) if !token.is_empty() => {
                trace!("🔑️ Using init data from the {} query parameter on {path}", self.param);
                HookOutcome::Token(token)
            },
            _ => HookOutcome::NoOpinion,
        }
    }
}
