pub mod app_config;
pub mod message;
pub mod oauth;

pub use app_config::{AppConfig, AppState};
