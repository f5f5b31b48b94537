use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::RngCore;
use service_core::error::AppError;
use subtle::ConstantTimeEq;
use validator::Validate;

use crate::config::AuthConfig;
use crate::dtos::{LoginRequest, TokenResponse};

/// The authenticated principal attached to a request after token
/// verification.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
}

struct Session {
    identity: Identity,
    expires_at: DateTime<Utc>,
}

/// Token → identity lookup table.
///
/// Tokens are opaque bearer credentials; nothing is decoded client-side, and
/// a token that was never issued here cannot verify.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, identity: Identity) -> String {
        let token = generate_token();
        self.sessions.insert(
            token.clone(),
            Session {
                identity,
                expires_at: Utc::now() + self.ttl,
            },
        );
        token
    }

    /// Expired entries are evicted on lookup.
    pub fn verify(&self, token: &str) -> Option<Identity> {
        let entry = self.sessions.get(token)?;
        if entry.expires_at <= Utc::now() {
            drop(entry);
            self.sessions.remove(token);
            return None;
        }
        Some(entry.identity.clone())
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Credential verification producing an opaque session token.
#[derive(Clone)]
pub struct AuthService {
    credentials: AuthConfig,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(credentials: AuthConfig, sessions: SessionStore) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    /// Both comparisons always run, in constant time, and any mismatch yields
    /// the same `Unauthorized`, so wrong-username and wrong-password cases are
    /// indistinguishable to the caller.
    pub fn login(&self, req: &LoginRequest) -> Result<TokenResponse, AppError> {
        req.validate()?;

        let username_ok = req
            .username
            .as_bytes()
            .ct_eq(self.credentials.username.as_bytes());
        let password_ok = req
            .password
            .as_bytes()
            .ct_eq(self.credentials.password.as_bytes());
        if !bool::from(username_ok & password_ok) {
            return Err(AppError::Unauthorized);
        }

        let identity = Identity {
            username: self.credentials.username.clone(),
        };
        let token = self.sessions.issue(identity);
        tracing::info!(username = %self.credentials.username, "login succeeded");

        Ok(TokenResponse { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_service(ttl_hours: i64) -> AuthService {
        let config = AuthConfig {
            username: "demo".to_string(),
            password: "pass".to_string(),
            token_expiry_hours: ttl_hours,
        };
        AuthService::new(config, SessionStore::new(ttl_hours))
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_credentials_yield_a_verifiable_token() {
        let store = SessionStore::new(1);
        let auth = AuthService::new(
            AuthConfig {
                username: "demo".to_string(),
                password: "pass".to_string(),
                token_expiry_hours: 1,
            },
            store.clone(),
        );

        let res = auth.login(&login_request("demo", "pass")).unwrap();
        let identity = store.verify(&res.token).expect("token should verify");
        assert_eq!("demo", identity.username);
    }

    #[test]
    fn wrong_password_and_unknown_username_fail_identically() {
        let auth = auth_service(1);

        let wrong_password = auth.login(&login_request("demo", "nope")).unwrap_err();
        let unknown_username = auth.login(&login_request("ghost", "pass")).unwrap_err();

        assert!(matches!(wrong_password, AppError::Unauthorized));
        assert!(matches!(unknown_username, AppError::Unauthorized));
        assert_eq!(
            wrong_password.classify().message,
            unknown_username.classify().message
        );
    }

    #[test]
    fn blank_credentials_fail_validation_not_auth() {
        let auth = auth_service(1);
        let err = auth.login(&login_request("", "")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn tokens_are_unique_per_login() {
        let auth = auth_service(1);
        let a = auth.login(&login_request("demo", "pass")).unwrap();
        let b = auth.login(&login_request("demo", "pass")).unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn expired_sessions_do_not_verify() {
        let store = SessionStore::new(0);
        let token = store.issue(Identity {
            username: "demo".to_string(),
        });
        assert!(store.verify(&token).is_none());
    }

    #[test]
    fn unknown_tokens_do_not_verify() {
        let store = SessionStore::new(1);
        assert!(store.verify("deadbeef").is_none());
    }
}
