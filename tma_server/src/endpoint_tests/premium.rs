use actix_web::http::StatusCode;

use super::helpers::*;

#[actix_web::test]
async fn premium_user_is_allowed() {
    let _ = env_logger::try_init().ok();
    let header = auth_header(r#"{"id":7,"username":"alice","is_premium":true}"#);
    let (status, body) = get_request(&header, "/api/premium").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "This is data only for premium users.");
}

#[actix_web::test]
async fn regular_user_is_forbidden() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request(&auth_header(r#"{"id":8,"username":"carol"}"#), "/api/premium").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, r#"{"error":"Insufficient Permissions. This resource is only available to Premium users"}"#);
}

#[actix_web::test]
async fn anonymous_user_is_unauthorized() {
    let _ = env_logger::try_init().ok();
    let (status, _) = get_request("", "/api/premium").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
