//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! This adapter translates between contact rows and the domain type. The
//! unique index on `(email, campaign_id)` decides duplicate signups under
//! concurrency; its constraint detail is preserved on
//! [`ContactRepositoryError::Duplicate`] so the signup workflow can report
//! it verbatim.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::campaign::CampaignId;
use crate::domain::contact::{Contact, ContactId};
use crate::domain::ports::{ContactRepository, ContactRepositoryError};

use super::models::{ContactChangeset, ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain contact repository errors.
fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ContactRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain contact repository errors.
///
/// Unique violations keep the constraint detail from Postgres, which reads
/// like `Key (email, campaign_id)=(ada@example.com, ...) already exists.`
fn map_diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let message = info.details().unwrap_or_else(|| info.message()).to_owned();
            ContactRepositoryError::duplicate(message)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            ContactRepositoryError::connection(info.message().to_owned())
        }
        other => ContactRepositoryError::query(other.to_string()),
    }
}

/// Convert a database row to a domain contact.
fn contact_from_row(row: ContactRow) -> Contact {
    Contact {
        id: ContactId::from(row.id),
        campaign_id: CampaignId::from(row.campaign_id),
        campaign_public_code: row.campaign_public_code,
        name: row.name,
        email: row.email,
        mobile: row.mobile,
        external_id: row.external_id,
        referral_code: row.referral_code,
        referred_contacts: row.referred_contacts.into_iter().map(ContactId::from).collect(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Referral history is stored as a raw UUID array column.
fn referred_ids(contact: &Contact) -> Vec<uuid::Uuid> {
    contact
        .referred_contacts
        .iter()
        .map(|id| *id.as_uuid())
        .collect()
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids = referred_ids(contact);
        let row = NewContactRow {
            id: *contact.id.as_uuid(),
            campaign_id: *contact.campaign_id.as_uuid(),
            campaign_public_code: &contact.campaign_public_code,
            name: contact.name.as_deref(),
            email: &contact.email,
            mobile: contact.mobile.as_deref(),
            external_id: contact.external_id.as_deref(),
            referral_code: &contact.referral_code,
            referred_contacts: &ids,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        };

        diesel::insert_into(contacts::table)
            .values(row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .order(contacts::created_at.asc())
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(contact_from_row).collect())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .filter(contacts::id.eq(id.as_uuid()))
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(contact_from_row))
    }

    async fn find_by_referral_code(
        &self,
        code: &str,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .filter(contacts::referral_code.eq(code))
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(contact_from_row))
    }

    async fn save(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids = referred_ids(contact);
        let set = ContactChangeset {
            name: contact.name.as_deref(),
            email: &contact.email,
            mobile: contact.mobile.as_deref(),
            external_id: contact.external_id.as_deref(),
            referred_contacts: &ids,
            updated_at: contact.updated_at,
        };

        diesel::update(contacts::table.filter(contacts::id.eq(contact.id.as_uuid())))
            .set(set)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &ContactId) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(contacts::table.filter(contacts::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
