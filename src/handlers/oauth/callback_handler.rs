use crate::error::ApiError;
use crate::models::AppState;
use crate::models::oauth::{CallbackParams, TokenIssued};
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Json},
};
use oauth2::AuthorizationCode;
use tracing::{error, info, instrument, warn};

pub async fn callback_handler(
    query: Result<Query<CallbackParams>, QueryRejection>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = query.map_err(|e| {
        warn!("Rejected callback query: {}", e);
        ApiError::MalformedQuery(e)
    })?;

    if let Some(provider_error) = params.error.as_deref() {
        warn!(
            error = provider_error,
            description = params.error_description.as_deref().unwrap_or(""),
            "Kakao redirected back with an error"
        );
    }

    let code = params.authorization_code().ok_or(ApiError::MissingCode)?;

    exchange(&app_state, code).await
}

#[instrument(skip_all)]
async fn exchange(
    app_state: &AppState,
    code: AuthorizationCode,
) -> Result<Json<TokenIssued>, ApiError> {
    let token_data = app_state.kakao.exchange_code(&code).await.map_err(|e| {
        error!(
            status = e.status().as_u16(),
            response = ?e.body(),
            "OAuth error: {}",
            e
        );
        e
    })?;

    info!("Access token issued");

    Ok(Json(TokenIssued {
        success: true,
        message: "Access token issued successfully",
        access_token: token_data.access_token.secret().to_string(),
    }))
}
