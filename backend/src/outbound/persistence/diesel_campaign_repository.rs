//! PostgreSQL-backed `CampaignRepository` implementation using Diesel ORM.
//!
//! This adapter translates between campaign rows and the domain type. The
//! unique index on `public_code` is the arbiter for slug collisions, which
//! surface as [`CampaignRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::campaign::{Campaign, CampaignId};
use crate::domain::ports::{CampaignRepository, CampaignRepositoryError};
use crate::domain::user::UserId;

use super::models::{CampaignChangeset, CampaignRow, NewCampaignRow};
use super::pool::{DbPool, PoolError};
use super::schema::campaigns;

/// Diesel-backed implementation of the `CampaignRepository` port.
#[derive(Clone)]
pub struct DieselCampaignRepository {
    pool: DbPool,
}

impl DieselCampaignRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain campaign repository errors.
fn map_pool_error(error: PoolError) -> CampaignRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CampaignRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain campaign repository errors.
///
/// Unique violations keep the constraint detail from Postgres so callers can
/// surface it; everything else keeps the Diesel rendering.
fn map_diesel_error(error: diesel::result::Error) -> CampaignRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let message = info.details().unwrap_or_else(|| info.message()).to_owned();
            CampaignRepositoryError::duplicate(message)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            CampaignRepositoryError::connection(info.message().to_owned())
        }
        other => CampaignRepositoryError::query(other.to_string()),
    }
}

/// Cast the domain threshold (u32) to its database column (i32).
#[expect(
    clippy::cast_possible_wrap,
    reason = "nudge thresholds are small counts, far below i32::MAX"
)]
fn threshold_for_db(threshold: u32) -> i32 {
    threshold as i32
}

/// Convert a database row to a domain campaign.
fn campaign_from_row(row: CampaignRow) -> Campaign {
    #[expect(
        clippy::cast_sign_loss,
        reason = "the column is written from u32 and is never negative"
    )]
    let nudge_threshold = row.nudge_threshold as u32;

    Campaign {
        id: CampaignId::from(row.id),
        owner: UserId::from(row.owner),
        name: row.name,
        referral_url: row.referral_url,
        public_code: row.public_code,
        signup_template_id: row.signup_template_id,
        nudge_template_id: row.nudge_template_id,
        completion_template_id: row.completion_template_id,
        nudge_threshold,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn new_row(campaign: &Campaign) -> NewCampaignRow<'_> {
    NewCampaignRow {
        id: *campaign.id.as_uuid(),
        owner: *campaign.owner.as_uuid(),
        name: &campaign.name,
        referral_url: campaign.referral_url.as_deref(),
        public_code: &campaign.public_code,
        signup_template_id: campaign.signup_template_id.as_deref(),
        nudge_template_id: campaign.nudge_template_id.as_deref(),
        completion_template_id: campaign.completion_template_id.as_deref(),
        nudge_threshold: threshold_for_db(campaign.nudge_threshold),
        created_at: campaign.created_at,
        updated_at: campaign.updated_at,
    }
}

fn changeset(campaign: &Campaign) -> CampaignChangeset<'_> {
    CampaignChangeset {
        name: &campaign.name,
        referral_url: campaign.referral_url.as_deref(),
        signup_template_id: campaign.signup_template_id.as_deref(),
        nudge_template_id: campaign.nudge_template_id.as_deref(),
        completion_template_id: campaign.completion_template_id.as_deref(),
        nudge_threshold: threshold_for_db(campaign.nudge_threshold),
        updated_at: campaign.updated_at,
    }
}

#[async_trait]
impl CampaignRepository for DieselCampaignRepository {
    async fn insert(&self, campaign: &Campaign) -> Result<(), CampaignRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(campaigns::table)
            .values(new_row(campaign))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<Campaign>, CampaignRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CampaignRow> = campaigns::table
            .order(campaigns::created_at.asc())
            .select(CampaignRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(campaign_from_row).collect())
    }

    async fn find_by_id(
        &self,
        id: &CampaignId,
    ) -> Result<Option<Campaign>, CampaignRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CampaignRow> = campaigns::table
            .filter(campaigns::id.eq(id.as_uuid()))
            .select(CampaignRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(campaign_from_row))
    }

    async fn find_by_public_code(
        &self,
        code: &str,
    ) -> Result<Option<Campaign>, CampaignRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CampaignRow> = campaigns::table
            .filter(campaigns::public_code.eq(code))
            .select(CampaignRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(campaign_from_row))
    }

    async fn save(&self, campaign: &Campaign) -> Result<(), CampaignRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(campaigns::table.filter(campaigns::id.eq(campaign.id.as_uuid())))
            .set(changeset(campaign))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &CampaignId) -> Result<(), CampaignRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(campaigns::table.filter(campaigns::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
