use crate::error::ApiError;
use crate::models::AppState;
use crate::models::message::{MessageSent, SendMessageRequest};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
    response::{IntoResponse, Json},
};
use oauth2::AccessToken;
use tracing::{error, info};

/// Forwards a text message to the caller's own KakaoTalk chat.
///
/// The body is read as raw bytes so the token check runs before any JSON
/// parsing and a missing token always wins over a malformed body.
pub async fn send_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::MissingToken)?;

    let request = SendMessageRequest::from_slice(&body).map_err(ApiError::MalformedBody)?;
    let template = request.into_template().ok_or(ApiError::MissingText)?;

    let data = app_state
        .kakao
        .send_memo(&token, &template)
        .await
        .map_err(|e| {
            error!(
                status = e.status().as_u16(),
                response = ?e.body(),
                "Message error: {}",
                e
            );
            e
        })?;

    info!("Message forwarded to Kakao");

    Ok(Json(MessageSent {
        success: true,
        data,
    }))
}

/// Extracts the credential of a `Bearer` Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<AccessToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, credential) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let credential = credential.trim();
    if credential.is_empty() {
        return None;
    }

    Some(AccessToken::new(credential.to_string()))
}
