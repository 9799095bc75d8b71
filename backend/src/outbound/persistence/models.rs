//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{campaigns, contacts, users};

/// Row struct for reading from the users table.
///
/// The credential hash column is deliberately not selected; the domain user
/// must never carry it.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Campaign models
// ---------------------------------------------------------------------------

/// Row struct for reading from the campaigns table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = campaigns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CampaignRow {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub referral_url: Option<String>,
    pub public_code: String,
    pub signup_template_id: Option<String>,
    pub nudge_template_id: Option<String>,
    pub completion_template_id: Option<String>,
    pub nudge_threshold: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new campaign records.
///
/// Timestamps are stamped by the domain at creation, not by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = campaigns)]
pub(crate) struct NewCampaignRow<'a> {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: &'a str,
    pub referral_url: Option<&'a str>,
    pub public_code: &'a str,
    pub signup_template_id: Option<&'a str>,
    pub nudge_template_id: Option<&'a str>,
    pub completion_template_id: Option<&'a str>,
    pub nudge_threshold: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset persisting the full mutable state of a campaign row.
///
/// `treat_none_as_null` makes absent options write SQL NULL, so the row
/// always mirrors the domain value rather than skipping unset fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = campaigns)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CampaignChangeset<'a> {
    pub name: &'a str,
    pub referral_url: Option<&'a str>,
    pub signup_template_id: Option<&'a str>,
    pub nudge_template_id: Option<&'a str>,
    pub completion_template_id: Option<&'a str>,
    pub nudge_threshold: i32,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Contact models
// ---------------------------------------------------------------------------

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub campaign_public_code: String,
    pub name: Option<String>,
    pub email: String,
    pub mobile: Option<String>,
    pub external_id: Option<String>,
    pub referral_code: String,
    pub referred_contacts: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new contact records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub campaign_public_code: &'a str,
    pub name: Option<&'a str>,
    pub email: &'a str,
    pub mobile: Option<&'a str>,
    pub external_id: Option<&'a str>,
    pub referral_code: &'a str,
    pub referred_contacts: &'a [Uuid],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset persisting the full mutable state of a contact row.
///
/// Referral history flows through here when the signup workflow appends to a
/// referrer's `referred_contacts`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: &'a str,
    pub mobile: Option<&'a str>,
    pub external_id: Option<&'a str>,
    pub referred_contacts: &'a [Uuid],
    pub updated_at: DateTime<Utc>,
}
