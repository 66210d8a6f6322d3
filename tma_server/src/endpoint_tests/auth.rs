use actix_web::http::StatusCode;
use log::*;
use url::form_urlencoded;

use super::helpers::*;
use crate::config::AuthConfig;

const BOB: &str = r#"{"id":42,"first_name":"Bob","username":"bob","language_code":"en","is_premium":false}"#;

#[actix_web::test]
async fn request_without_headers() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/api/me").await;
    info!("Response body: {body}");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. No Telegram Mini App credentials were provided"}"#);
}

#[actix_web::test]
async fn request_with_other_auth_scheme() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("Bearer eyJhbGciOiJIUzI1NiJ9.e30.abc", "/api/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("No Telegram Mini App credentials were provided"), "was: {body}");
}

#[actix_web::test]
async fn request_with_valid_init_data() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request(&auth_header(BOB), "/api/me").await;
    info!("Response body: {body}");
    assert_eq!(status, StatusCode::OK);
    let identity: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(identity["id"], 42);
    assert_eq!(identity["username"], "bob");
    assert_eq!(identity["first_name"], "Bob");
    assert_eq!(identity["last_name"], "Unknown");
    assert_eq!(identity["language_code"], "en");
    assert_eq!(identity["is_premium"], false);
    assert!(identity.get("allows_write_to_pm").is_none());
}

#[actix_web::test]
async fn prefix_is_case_insensitive() {
    let _ = env_logger::try_init().ok();
    let header = format!("TMA {}", init_data(BOB, 10));
    let (status, body) = get_request(&header, "/api/secure").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Secure data accessed by user ID 42 with username bob");
}

#[actix_web::test]
async fn request_with_tampered_init_data() {
    let _ = env_logger::try_init().ok();
    let header = auth_header(BOB).replace("%22id%22%3A42", "%22id%22%3A43");
    let (status, body) = get_request(&header, "/api/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. The init data signature is invalid"}"#);
}

#[actix_web::test]
async fn request_without_hash() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("tma auth_date=1700000000&user=%7B%22id%22%3A42%7D", "/api/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("The init data does not contain a signature"), "was: {body}");
}

#[actix_web::test]
async fn request_with_expired_init_data() {
    let _ = env_logger::try_init().ok();
    let header = format!("tma {}", init_data(BOB, 2 * 86_400));
    let (status, body) = get_request(&header, "/api/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("The init data has expired"), "was: {body}");

    let config = AuthConfig { max_age_seconds: 0, ..auth_config() };
    let (status, _) = get_request_with_config(&header, "/api/me", config).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn request_signed_for_another_bot() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::new("1111111111:AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
    let (status, body) = get_request_with_config(&auth_header(BOB), "/api/me", config).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("signature is invalid"), "was: {body}");
}

#[actix_web::test]
async fn allows_write_to_pm_when_enabled() {
    let _ = env_logger::try_init().ok();
    let user = r#"{"id":42,"username":"bob","allows_write_to_pm":true}"#;
    let config = AuthConfig { allows_write_to_pm: true, ..auth_config() };
    let (status, body) = get_request_with_config(&auth_header(user), "/api/me", config).await;
    assert_eq!(status, StatusCode::OK);
    let identity: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(identity["allows_write_to_pm"], true);
}

#[actix_web::test]
async fn claims_endpoint() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request(&auth_header(BOB), "/api/claims").await;
    assert_eq!(status, StatusCode::OK);
    let claims: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(claims["scheme"], "TMA");
    assert_eq!(claims["claims"]["id"], "42");
    assert_eq!(claims["claims"]["is_premium"], "false");
}

#[actix_web::test]
async fn init_data_in_query_string_on_configured_paths() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig { query_token_paths: vec!["/api/secure".into()], ..auth_config() };
    let query =
        form_urlencoded::Serializer::new(String::new()).append_pair("access_token", &init_data(BOB, 10)).finish();

    let (status, body) = get_request_with_config("", &format!("/api/secure?{query}"), config.clone()).await;
    assert_eq!(status, StatusCode::OK, "was: {body}");

    // Not accepted on other paths
    let (status, _) = get_request_with_config("", &format!("/api/me?{query}"), config).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Not accepted at all unless configured
    let (status, _) = get_request("", &format!("/api/secure?{query}")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn health_needs_no_auth() {
    let (status, _) = get_request("", "/health").await;
    assert_eq!(status, StatusCode::OK);
}
