//! Port for campaign persistence adapters.

use async_trait::async_trait;

use crate::domain::campaign::{Campaign, CampaignId};

/// Errors raised by campaign repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CampaignRepositoryError {
    /// Repository connection could not be established.
    #[error("campaign repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("campaign repository query failed: {message}")]
    Query { message: String },

    /// A unique constraint rejected the write.
    #[error("{message}")]
    Duplicate { message: String },
}

impl CampaignRepositoryError {
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

/// Port for campaign storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Persist a freshly created campaign.
    async fn insert(&self, campaign: &Campaign) -> Result<(), CampaignRepositoryError>;

    /// List every stored campaign in creation order.
    async fn list(&self) -> Result<Vec<Campaign>, CampaignRepositoryError>;

    /// Fetch a campaign by identifier.
    async fn find_by_id(
        &self,
        id: &CampaignId,
    ) -> Result<Option<Campaign>, CampaignRepositoryError>;

    /// Fetch a campaign by its public signup code.
    async fn find_by_public_code(
        &self,
        code: &str,
    ) -> Result<Option<Campaign>, CampaignRepositoryError>;

    /// Persist the current state of an already stored campaign.
    async fn save(&self, campaign: &Campaign) -> Result<(), CampaignRepositoryError>;

    /// Delete a campaign by identifier.
    ///
    /// Contacts registered under the campaign are left in place; there is no
    /// cascade.
    async fn delete(&self, id: &CampaignId) -> Result<(), CampaignRepositoryError>;
}
