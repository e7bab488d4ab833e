use crate::error::ConfigError;
use crate::provider::KakaoClient;
use oauth2::url::Url;
use oauth2::{AuthUrl, ClientId, RedirectUrl, TokenUrl};
use std::time::Duration;

pub const DEFAULT_AUTH_URL: &str = "https://kauth.kakao.com/oauth/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://kauth.kakao.com/oauth/token";
pub const DEFAULT_MESSAGE_URL: &str = "https://kapi.kakao.com/v2/api/talk/memo/default/send";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub client_id: ClientId,
    pub redirect_url: RedirectUrl,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub message_url: Url,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &'static str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let client_id = ClientId::new(required("KAKAO_REST_API_KEY")?);
        let redirect_url = RedirectUrl::new(required("KAKAO_REDIRECT_URI")?)
            .map_err(|source| ConfigError::InvalidUrl { key: "KAKAO_REDIRECT_URI", source })?;

        let auth_url = AuthUrl::new(
            optional("KAKAO_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
        )
        .map_err(|source| ConfigError::InvalidUrl { key: "KAKAO_AUTH_URL", source })?;
        let token_url = TokenUrl::new(
            optional("KAKAO_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
        )
        .map_err(|source| ConfigError::InvalidUrl { key: "KAKAO_TOKEN_URL", source })?;
        let message_url = Url::parse(
            &optional("KAKAO_MESSAGE_URL").unwrap_or_else(|| DEFAULT_MESSAGE_URL.to_string()),
        )
        .map_err(|source| ConfigError::InvalidUrl { key: "KAKAO_MESSAGE_URL", source })?;

        let port = match optional("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = match optional("KAKAO_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "KAKAO_REQUEST_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            client_id,
            redirect_url,
            auth_url,
            token_url,
            message_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub kakao: KakaoClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let kakao = KakaoClient::new(&config)?;

        Ok(Self { config, kakao })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            ("KAKAO_REST_API_KEY", "rest-key"),
            ("KAKAO_REDIRECT_URI", "http://localhost:3000/auth/kakao/callback"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.client_id.as_str(), "rest-key");
        assert_eq!(config.auth_url.as_str(), DEFAULT_AUTH_URL);
        assert_eq!(config.token_url.as_str(), DEFAULT_TOKEN_URL);
        assert_eq!(config.message_url.as_str(), DEFAULT_MESSAGE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_client_id() {
        let err = AppConfig::from_lookup(lookup(&[(
            "KAKAO_REDIRECT_URI",
            "http://localhost:3000/auth/kakao/callback",
        )]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing("KAKAO_REST_API_KEY")));
    }

    #[test]
    fn test_blank_redirect_uri_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup(&[
            ("KAKAO_REST_API_KEY", "rest-key"),
            ("KAKAO_REDIRECT_URI", "  "),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing("KAKAO_REDIRECT_URI")));
    }

    #[test]
    fn test_invalid_redirect_uri() {
        let err = AppConfig::from_lookup(lookup(&[
            ("KAKAO_REST_API_KEY", "rest-key"),
            ("KAKAO_REDIRECT_URI", "not a url"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidUrl { key: "KAKAO_REDIRECT_URI", .. }
        ));
    }

    #[test]
    fn test_overrides_and_bad_port() {
        let config = AppConfig::from_lookup(lookup(&[
            ("KAKAO_REST_API_KEY", "rest-key"),
            ("KAKAO_REDIRECT_URI", "http://localhost:8080/cb"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("KAKAO_TOKEN_URL", "http://127.0.0.1:9000/oauth/token"),
            ("KAKAO_REQUEST_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.token_url.as_str(), "http://127.0.0.1:9000/oauth/token");
        assert_eq!(config.request_timeout, Duration::from_secs(3));

        let err = AppConfig::from_lookup(lookup(&[
            ("KAKAO_REST_API_KEY", "rest-key"),
            ("KAKAO_REDIRECT_URI", "http://localhost:8080/cb"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("KAKAO_REST_API_KEY", "rest-key"),
            ("KAKAO_REDIRECT_URI", "http://localhost:8080/cb"),
            ("KAKAO_REQUEST_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "KAKAO_REQUEST_TIMEOUT_SECS", .. }
        ));
    }
}
