//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go into a separate module.
//!
//! Routes under `/api` sit behind the Mini App authentication middleware, so handlers there can take a [`TmaUser`]
//! argument and rely on it being present.
use actix_web::{get, HttpResponse, Responder};
use log::*;
use tma_auth::claims;

use crate::{auth::TmaUser, errors::ServerError};

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Identity  ----------------------------------------------------
/// Returns the authenticated user's identity as JSON.
#[get("/me")]
pub async fn my_identity(user: TmaUser) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET identity for user {}", user.id);
    Ok(HttpResponse::Ok().json(&user.0))
}

/// Returns the authenticated user's identity as a flat claim map.
#[get("/claims")]
pub async fn my_claims(user: TmaUser) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET claims for user {}", user.id);
    let claims = user
        .claims()
        .into_iter()
        .map(|(name, value)| (name.to_string(), serde_json::Value::String(value)))
        .collect::<serde_json::Map<String, serde_json::Value>>();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "scheme": claims::AUTHENTICATION_SCHEME, "claims": claims })))
}

#[get("/secure")]
pub async fn secure_data(user: TmaUser) -> impl Responder {
    debug!("💻️ GET secure data for user {}", user.id);
    HttpResponse::Ok().body(format!("Secure data accessed by user ID {} with username {}", user.id, user.username))
}

//----------------------------------------------   Premium  ----------------------------------------------------
/// Only reachable through [`crate::middleware::PremiumMiddlewareFactory`].
pub async fn premium_data(user: TmaUser) -> impl Responder {
    debug!("💻️ GET premium data for user {}", user.id);
    HttpResponse::Ok().body("This is data only for premium users.")
}
