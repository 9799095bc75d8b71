//! Campaign data model.
//!
//! A campaign is a referral programme owned by a user. Contacts sign up
//! against it, and its templates and nudge threshold drive the transactional
//! mails sent during signup.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::generate_slug;
use super::user::UserId;

/// Nudge threshold applied when a creation request does not supply one.
pub const DEFAULT_NUDGE_THRESHOLD: u32 = 5;

/// Stable campaign identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(Uuid);

impl CampaignId {
    /// Wrap an existing UUID.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CampaignId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Referral campaign owned by a user.
///
/// ## Invariants
/// - `owner` never changes after creation.
/// - `public_code` is a unique slug generated at creation and used in place
///   of the internal id on the public signup surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Stable campaign identifier.
    pub id: CampaignId,
    /// User who created the campaign.
    pub owner: UserId,
    /// Campaign name shown in dashboards and mails.
    pub name: String,
    /// Base URL referral links are built from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_url: Option<String>,
    /// Public slug identifying the campaign in signup requests.
    pub public_code: String,
    /// Mail template for the signup confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signup_template_id: Option<String>,
    /// Mail template for referral nudges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nudge_template_id: Option<String>,
    /// Mail template for campaign completion; stored but never dispatched
    /// by this service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_template_id: Option<String>,
    /// How many of a referrer's signups trigger a nudge mail; zero disables
    /// nudging entirely.
    pub nudge_threshold: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Build a campaign from a creation request, stamping the owner, a fresh
    /// id and public code, and the timestamps.
    #[must_use]
    pub fn create(draft: CampaignDraft, owner: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: CampaignId::random(),
            owner,
            name: draft.name,
            referral_url: draft.referral_url,
            public_code: generate_slug(),
            signup_template_id: draft.signup_template_id,
            nudge_template_id: draft.nudge_template_id,
            completion_template_id: draft.completion_template_id,
            nudge_threshold: draft.nudge_threshold.unwrap_or(DEFAULT_NUDGE_THRESHOLD),
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merge a patch onto the campaign and bump `updated_at`.
    ///
    /// Absent patch fields leave the record untouched; `owner`, `id`, and
    /// `public_code` are not patchable.
    pub fn apply(&mut self, patch: CampaignPatch) {
        let CampaignPatch {
            name,
            referral_url,
            signup_template_id,
            nudge_template_id,
            completion_template_id,
            nudge_threshold,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(referral_url) = referral_url {
            self.referral_url = Some(referral_url);
        }
        if let Some(signup_template_id) = signup_template_id {
            self.signup_template_id = Some(signup_template_id);
        }
        if let Some(nudge_template_id) = nudge_template_id {
            self.nudge_template_id = Some(nudge_template_id);
        }
        if let Some(completion_template_id) = completion_template_id {
            self.completion_template_id = Some(completion_template_id);
        }
        if let Some(nudge_threshold) = nudge_threshold {
            self.nudge_threshold = nudge_threshold;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields a client may supply when creating a campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CampaignDraft {
    /// Campaign name; the one required field.
    pub name: String,
    /// Base URL referral links are built from.
    pub referral_url: Option<String>,
    /// Mail template for the signup confirmation.
    pub signup_template_id: Option<String>,
    /// Mail template for referral nudges.
    pub nudge_template_id: Option<String>,
    /// Mail template for campaign completion.
    pub completion_template_id: Option<String>,
    /// Nudge threshold; defaults to [`DEFAULT_NUDGE_THRESHOLD`].
    pub nudge_threshold: Option<u32>,
}

/// Fields a client may supply when updating a campaign.
///
/// Absent fields are left untouched by [`Campaign::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CampaignPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement referral URL.
    pub referral_url: Option<String>,
    /// Replacement signup template.
    pub signup_template_id: Option<String>,
    /// Replacement nudge template.
    pub nudge_template_id: Option<String>,
    /// Replacement completion template.
    pub completion_template_id: Option<String>,
    /// Replacement nudge threshold.
    pub nudge_threshold: Option<u32>,
}
