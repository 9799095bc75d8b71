//! Port for contact persistence adapters.

use async_trait::async_trait;

use crate::domain::contact::{Contact, ContactId};

/// Errors raised by contact repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactRepositoryError {
    /// Repository connection could not be established.
    #[error("contact repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("contact repository query failed: {message}")]
    Query { message: String },

    /// A unique constraint rejected the write. For inserts this is almost
    /// always the `(email, campaign_id)` index deciding a duplicate signup.
    #[error("{message}")]
    Duplicate { message: String },
}

impl ContactRepositoryError {
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

    /// Create a duplicate error carrying the constraint message.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }
}

/// Port for contact storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Persist a freshly created contact.
    ///
    /// The store enforces the `(email, campaign_id)` uniqueness invariant;
    /// violations surface as [`ContactRepositoryError::Duplicate`].
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError>;

    /// List every stored contact in creation order.
    async fn list(&self) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Fetch a contact by identifier.
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Fetch a contact by its referral code.
    async fn find_by_referral_code(
        &self,
        code: &str,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Persist the current state of an already stored contact.
    async fn save(&self, contact: &Contact) -> Result<(), ContactRepositoryError>;

    /// Delete a contact by identifier.
    async fn delete(&self, id: &ContactId) -> Result<(), ContactRepositoryError>;
}
