//! Glue between actix-web requests and the framework-neutral validator.

use std::ops::Deref;

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use log::warn;
use tma_auth::{Identity, RequestView};
use url::form_urlencoded;

use crate::errors::{AuthError, ServerError};

/// Lets the validator read an actix-web request.
pub struct RequestAdapter<'a> {
    req: &'a HttpRequest,
}

impl<'a> RequestAdapter<'a> {
    pub fn new(req: &'a HttpRequest) -> Self {
        Self { req }
    }
}

impl RequestView for RequestAdapter<'_> {
    fn header(&self, name: &str) -> Option<String> {
        self.req.headers().get(name).and_then(|v| v.to_str().ok()).map(String::from)
    }

    fn path(&self) -> &str {
        self.req.path()
    }

    fn query_param(&self, name: &str) -> Option<String> {
        form_urlencoded::parse(self.req.query_string().as_bytes())
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
            .last()
    }
}

/// The authenticated Mini App user. Only available on routes behind [`crate::middleware::TmaAuthMiddlewareFactory`].
#[derive(Debug, Clone)]
pub struct TmaUser(pub Identity);

impl Deref for TmaUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for TmaUser {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<Identity>().cloned();
        ready(identity.map(TmaUser).ok_or_else(|| {
            warn!("🔐️ A route that needs a Mini App user is not behind the authentication middleware");
            ServerError::AuthenticationError(AuthError::NoCredentials)
        }))
    }
}
