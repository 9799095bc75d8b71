//! Port for user lookup adapters.
//!
//! Users are created by an external signup flow, so this port is read-only:
//! the auth gate resolves token subjects through it and nothing else touches
//! user records.

use async_trait::async_trait;

use crate::domain::user::{User, UserId};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },

    /// Query failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read-only port for resolving user identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    ///
    /// Returns `None` when no user carries the id; the auth gate turns that
    /// into an authorization failure.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;
}
