use oauth2::{AccessToken, AuthorizationCode};
use serde::{Deserialize, Serialize};

/// Query string Kakao appends when redirecting back to the callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// The authorization code, treating an empty value as absent.
    pub fn authorization_code(&self) -> Option<AuthorizationCode> {
        self.code
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(|code| AuthorizationCode::new(code.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: AccessToken,
}

#[derive(Debug, Serialize)]
pub struct TokenIssued {
    pub success: bool,
    pub message: &'static str,
    pub access_token: String,
}
