use std::sync::Arc;

use actix_web::{http::StatusCode, test, test::TestRequest, App};
use chrono::Utc;
use log::debug;
use tma_auth::{BotSecret, InitDataBuilder, TmaValidator};

use crate::{config::AuthConfig, server::configure_routes};

// Test bot token. It does not belong to any real bot.
pub const BOT_TOKEN: &str = "7342037359:AAHI25ES9xCOMPokpYoz-p8XVrZUdygo2J4";

pub fn auth_config() -> AuthConfig {
    AuthConfig::new(BOT_TOKEN)
}

pub fn validator(config: &AuthConfig) -> Arc<TmaValidator> {
    Arc::new(config.build_validator().expect("Test configuration should be valid"))
}

/// Signs init data for `user_json`, dated `age` seconds ago.
pub fn init_data(user_json: &str, age: i64) -> String {
    let secret = BotSecret::new(BOT_TOKEN).unwrap();
    InitDataBuilder::new(Utc::now().timestamp() - age)
        .user_json(user_json)
        .field("query_id", "AAHdF6IQAAAAAN0XohDhrOrc")
        .sign(&secret)
}

pub fn auth_header(user_json: &str) -> String {
    format!("tma {}", init_data(user_json, 10))
}

pub async fn get_request(auth_header: &str, path: &str) -> (StatusCode, String) {
    get_request_with_config(auth_header, path, auth_config()).await
}

pub async fn get_request_with_config(auth_header: &str, path: &str, config: AuthConfig) -> (StatusCode, String) {
    let mut req = TestRequest::get().uri(path);
    if !auth_header.is_empty() {
        req = req.insert_header(("Authorization", auth_header));
    }
    let req = req.to_request();
    let app = test::init_service(App::new().configure(configure_routes(validator(&config)))).await;
    debug!("Making request");
    let res = test::call_service(&app, req).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}
