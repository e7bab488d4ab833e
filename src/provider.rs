//! Outbound calls to the Kakao OAuth and messaging APIs.

use crate::error::{ConfigError, ProviderError};
use crate::models::AppConfig;
use crate::models::message::TextTemplate;
use crate::models::oauth::TokenResponse;
use oauth2::url::Url;
use oauth2::{AccessToken, AuthorizationCode, ClientId, RedirectUrl, TokenUrl};
use reqwest::{Response, header::AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Pooled HTTP client plus the provider endpoints it talks to.
#[derive(Clone, Debug)]
pub struct KakaoClient {
    http: reqwest::Client,
    client_id: ClientId,
    redirect_url: RedirectUrl,
    token_url: TokenUrl,
    message_url: Url,
}

impl KakaoClient {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            redirect_url: config.redirect_url.clone(),
            token_url: config.token_url.clone(),
            message_url: config.message_url.clone(),
        })
    }

    /// Exchanges an authorization code for an access token.
    #[instrument(skip_all, fields(token_url = %self.token_url.as_str()))]
    pub async fn exchange_code(
        &self,
        code: &AuthorizationCode,
    ) -> Result<TokenResponse, ProviderError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_url.as_str()),
            ("code", code.secret().as_str()),
        ];

        let response = self
            .http
            .post(self.token_url.as_str())
            .form(&params)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = response.status();
        let body = read_success_body(response).await?;

        serde_json::from_value::<TokenResponse>(body.clone()).map_err(|e| {
            ProviderError::UnexpectedBody {
                status,
                body,
                reason: e.to_string(),
            }
        })
    }

    /// Posts a text template to the "send to me" memo endpoint.
    #[instrument(skip_all, fields(message_url = %self.message_url))]
    pub async fn send_memo(
        &self,
        token: &AccessToken,
        template: &TextTemplate,
    ) -> Result<Value, ProviderError> {
        let template_object = template.to_template_object();

        let response = self
            .http
            .post(self.message_url.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", token.secret()))
            .form(&[("template_object", template_object.as_str())])
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        read_success_body(response).await
    }
}

/// Returns the parsed body of a 2xx response, or the provider error otherwise.
async fn read_success_body(response: Response) -> Result<Value, ProviderError> {
    let status = response.status();
    let body = match response.text().await {
        Ok(text) => parse_body(&text),
        // A non-2xx status already arrived; keep it even if the body is lost.
        Err(e) if !status.is_success() => {
            warn!(status = status.as_u16(), "Failed to read provider error body: {}", e);
            Value::Null
        }
        Err(e) => return Err(ProviderError::Transport(e)),
    };

    debug!(status = status.as_u16(), "provider responded");

    if status.is_success() {
        Ok(body)
    } else {
        Err(ProviderError::Status { status, body })
    }
}

/// Provider bodies are usually JSON; anything else is passed through as a string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }

    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
