//! Access tokens.
//!
//! Tokens are HS256 JWTs whose subject is the user id. They are handed out
//! by `POST /login` and checked by the bearer middleware in front of the
//! identity-scoped routes.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::ServerError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Identity carried by a verified token, inserted as a request extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Identity(pub i32);

pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl,
        }
    }

    /// Sign a token for `user_id`.
    pub fn issue(&self, user_id: i32) -> Result<String, ServerError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| ServerError::Unhandled(format!("failed to sign token: {err}")))
    }

    /// Check signature and expiry, returning the identity the token was
    /// issued for.
    pub fn verify(&self, token: &str) -> Result<Identity, ServerError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| ServerError::Unauthorized(format!("Invalid token: {err}")))?;
        data.claims
            .sub
            .parse()
            .map(Identity)
            .map_err(|_| ServerError::Unauthorized("Invalid token subject".to_string()))
    }
}
