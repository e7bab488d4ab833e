use crate::models::{AppConfig, AppState};
use axum::{
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use oauth2::url::Url;
use tracing::info;

pub async fn login_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let constructed_url = authorize_url(&app_state.config);

    info!("Redirecting to Kakao authorization page");
    (StatusCode::FOUND, [(LOCATION, constructed_url.to_string())])
}

pub fn authorize_url(config: &AppConfig) -> Url {
    let mut url = config.auth_url.url().clone();

    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", config.client_id.as_str())
        .append_pair("redirect_uri", config.redirect_url.as_str());

    url
}
