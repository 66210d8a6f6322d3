//! # Telegram Mini App authentication server
//! An example HTTP server that authenticates Telegram Mini App users from the init data in each request. It is a
//! thin host around [`tma_auth`]: the middleware turns validation results into request identities or 401 responses.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/me`: The identity of the authenticated user.
//! * `/api/claims`: The identity of the authenticated user as claims.
//! * `/api/secure`: Any authenticated user.
//! * `/api/premium`: Telegram Premium users only.

pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
