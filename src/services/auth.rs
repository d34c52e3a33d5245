//! Authentication service implementation
//!
//! Handles password hashing for registration/login and the signed tokens
//! returned to clients. Upload handlers use token decoding to attribute an
//! upload to a user when a valid bearer token is presented.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::AuthConfig;
use crate::utils::errors::{AppError, Result};

const SALT_LEN: usize = 16;
const HASH_ROUNDS: u32 = 10_000;

/// Token claims: the user id plus the standard expiry fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: i64,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Stored form is `<salt_b64>$<digest_b64>`.
    pub fn hash_password(&self, password: &str) -> String {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);

        let digest = digest_password(&salt, password);
        format!(
            "{}${}",
            STANDARD_NO_PAD.encode(salt),
            STANDARD_NO_PAD.encode(digest)
        )
    }

    /// Verify a password against a stored hash in constant time.
    pub fn verify_password(&self, password: &str, stored: &str) -> bool {
        let Some((salt_b64, digest_b64)) = stored.split_once('$') else {
            return false;
        };
        let Ok(salt) = STANDARD_NO_PAD.decode(salt_b64) else {
            return false;
        };
        let Ok(expected) = STANDARD_NO_PAD.decode(digest_b64) else {
            return false;
        };

        let actual = digest_password(&salt, password);
        constant_time_eq(&actual, &expected)
    }

    /// Issue a signed token for a user id.
    pub fn issue_token(&self, user_id: i64) -> Result<String> {
        let now = Utc::now();
        let ttl = Duration::seconds(self.config.token_ttl_seconds as i64);
        let claims = TokenClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.token_secret.as_bytes()),
        )
        .map_err(|err| AppError::Unauthorized(format!("Failed to issue token: {err}")))
    }

    /// Decode a token, returning the user id it was issued for.
    pub fn decode_token(&self, token: &str) -> Result<i64> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.token_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|err| AppError::Unauthorized(format!("Invalid token: {err}")))?;

        Ok(data.claims.sub)
    }

    /// User id from an `Authorization: Bearer ...` header value, if the
    /// token is present and valid. Anonymous callers get `None`.
    pub fn user_from_bearer(&self, header: Option<&str>) -> Option<i64> {
        let token = header?.strip_prefix("Bearer ")?;
        self.decode_token(token.trim()).ok()
    }
}

fn digest_password(salt: &[u8], password: &str) -> [u8; 32] {
    let mut digest = [0u8; 32];
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    digest.copy_from_slice(&hasher.finalize());

    for _ in 1..HASH_ROUNDS {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(digest);
        digest.copy_from_slice(&hasher.finalize());
    }

    digest
}
