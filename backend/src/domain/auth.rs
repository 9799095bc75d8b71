//! Token verification gate guarding the protected surface.
//!
//! Token issuance happens elsewhere; this module only verifies. A credential
//! is an HS256 JWT carrying the user id as its subject. Every call re-decodes
//! the token and re-resolves the subject — nothing is cached, so a revoked
//! user stops authenticating immediately.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::error::Error;
use super::ports::UserRepository;
use super::user::{User, UserId};

/// Claims carried by an accepted credential.
///
/// `exp` is a Unix timestamp in seconds; verification rejects expired tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Token subject: the user id as a UUID string.
    pub sub: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

/// Read-then-verify gate resolving credentials to user identities.
///
/// Failure is uniform: a missing token, a token that fails verification, and
/// a subject with no user record all produce the same unauthorized error, so
/// callers cannot probe which stage rejected them.
pub struct AuthGate {
    secret: Zeroizing<String>,
    users: Arc<dyn UserRepository>,
}

impl AuthGate {
    /// Build a gate verifying against `secret` and resolving subjects through
    /// `users`.
    pub fn new(secret: impl Into<String>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            users,
        }
    }

    /// Verify `token` and resolve it to a user record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::unauthorized`] when the token is absent, fails
    /// signature or expiry checks, is structurally malformed, or names a
    /// subject with no user record.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<User, Error> {
        let token = token.ok_or_else(|| Error::unauthorized("Authentication required"))?;
        let subject = self.decode_subject(token)?;

        let user = self
            .users
            .find_by_id(&subject)
            .await
            .map_err(|err| {
                debug!(error = %err, "user lookup failed during authentication");
                Error::unauthorized("The supplied token is invalid")
            })?
            .ok_or_else(|| Error::unauthorized("The supplied token is invalid"))?;

        Ok(user)
    }

    fn decode_subject(&self, token: &str) -> Result<UserId, Error> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let claims = decode::<TokenClaims>(token, &key, &Validation::new(Algorithm::HS256))
            .map_err(|err| {
                debug!(error = %err, "token failed verification");
                Error::unauthorized("The supplied token is invalid")
            })?
            .claims;

        let subject = Uuid::parse_str(&claims.sub).map_err(|err| {
            debug!(error = %err, "token subject is not a valid id");
            Error::unauthorized("The supplied token is invalid")
        })?;

        Ok(UserId::new(subject))
    }
}
