//! # Coinfolio Auth Crate
//!
//! This crate is the authentication collaborator for the trading service:
//! an in-memory user registry with argon2 password hashing and HS256 access
//! tokens. The rest of the system only ever sees the resolved identity
//! string; token mechanics stay behind this crate's boundary.
//!
//! ## Public API
//!
//! - `AuthService`: registration, login (token issuance), and token validation.
//! - `AuthError`: the specific error types that can be returned from this crate.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use configuration::settings::AuthSettings;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

pub mod error;

pub use error::AuthError;

/// The claims carried by every issued access token. The subject is the
/// username, which doubles as the account identity everywhere downstream.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

/// Issues and validates access tokens for the in-memory user registry.
pub struct AuthService {
    users: RwLock<HashMap<String, String>>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(config: &AuthSettings) -> Self {
        let secret = config.jwt_secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            users: RwLock::new(HashMap::new()),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_ttl: Duration::from_secs(config.token_ttl_minutes * 60),
        }
    }

    /// Registers a new user, hashing the password before it is stored.
    /// A duplicate username is rejected rather than silently overwritten.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::InvalidInput("username must not be empty".into()));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password must not be empty".into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {e}")))?
            .to_string();

        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(AuthError::UserExists(username.to_string()));
        }
        users.insert(username.to_string(), hash);
        tracing::info!(username, "Registered new user.");
        Ok(())
    }

    /// Verifies the credentials and issues a fresh access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let users = self.users.read().await;
        // Missing users and wrong passwords are indistinguishable to the caller.
        let stored = users.get(username).ok_or(AuthError::InvalidCredentials)?;

        let parsed = PasswordHash::new(stored)
            .map_err(|e| AuthError::Internal(format!("Stored hash is malformed: {e}")))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)?;

        self.issue_token(username)
    }

    /// Validates a bearer token and returns the identity it was issued for.
    pub fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AuthError::Unauthenticated)?;
        Ok(data.claims.sub)
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: username.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }
}
