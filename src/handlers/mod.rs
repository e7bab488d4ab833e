pub mod message;
pub mod oauth;

#[cfg(test)]
pub(crate) mod test_support;

pub use message::send_handler;
pub use oauth::{callback_handler, login_handler};

use crate::models::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/kakao", get(login_handler))
        .route("/auth/kakao/callback", get(callback_handler))
        .route("/send-message", post(send_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
