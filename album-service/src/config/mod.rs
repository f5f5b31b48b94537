use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub token_expiry_hours: i64,
}

impl AlbumConfig {
    pub fn load() -> Result<Self, AppError> {
        // Common config handles .env and the APP__ prefix.
        let common = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(AlbumConfig {
            common,
            auth: AuthConfig {
                username: get_env("AUTH_USERNAME", Some("demo"), is_prod)?,
                password: get_env("AUTH_PASSWORD", Some("pass"), is_prod)?,
                token_expiry_hours: get_env("AUTH_TOKEN_EXPIRY_HOURS", Some("72"), is_prod)?
                    .parse()
                    .map_err(|e| {
                        AppError::Config(anyhow::anyhow!("invalid AUTH_TOKEN_EXPIRY_HOURS: {e}"))
                    })?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::Config(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::Config(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
