use std::{sync::Arc, time::Duration};

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::info;
use tma_auth::TmaValidator;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    middleware::{PremiumMiddlewareFactory, TmaAuthMiddlewareFactory},
    routes::{health, my_claims, my_identity, premium_data, secure_data},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let validator = config.auth.build_validator().map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!(
        "🔐️ Init data older than {}s will be rejected (0 or less means never)",
        validator.config().max_age_seconds()
    );
    let srv = create_server_instance(config, Arc::new(validator))?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, validator: Arc<TmaValidator>) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("tma::access_log"))
            .configure(configure_routes(Arc::clone(&validator)))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers every route. Routes under `/api` require valid Mini App init data.
pub fn configure_routes(validator: Arc<TmaValidator>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let premium = web::resource("/premium").wrap(PremiumMiddlewareFactory).route(web::get().to(premium_data));
        let auth_scope = web::scope("/api")
            .wrap(TmaAuthMiddlewareFactory::new(validator))
            .service(my_identity)
            .service(my_claims)
            .service(secure_data)
            .service(premium);
        cfg.service(health).service(auth_scope);
    }
}
