use crate::models::{AppConfig, AppState};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::Value;
use tower::ServiceExt;

pub const TOKEN_PATH: &str = "/oauth/token";
pub const MESSAGE_PATH: &str = "/v2/api/talk/memo/default/send";

/// Config whose token and message endpoints live under `provider_base`.
pub fn app_config(provider_base: &str) -> AppConfig {
    let token_url = format!("{}{}", provider_base, TOKEN_PATH);
    let message_url = format!("{}{}", provider_base, MESSAGE_PATH);

    AppConfig::from_lookup(|key| match key {
        "KAKAO_REST_API_KEY" => Some("rest-api-key".to_string()),
        "KAKAO_REDIRECT_URI" => Some("http://localhost:3000/auth/kakao/callback".to_string()),
        "KAKAO_TOKEN_URL" => Some(token_url.clone()),
        "KAKAO_MESSAGE_URL" => Some(message_url.clone()),
        "KAKAO_REQUEST_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn app_state(config: AppConfig) -> AppState {
    AppState::new(config).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post(app: Router, uri: &str, authorization: Option<&str>, body: &str) -> Response<Body> {
    let mut builder = Request::post(uri).header("content-type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }

    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
