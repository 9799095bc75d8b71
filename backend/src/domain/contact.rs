//! Contact data model.
//!
//! A contact is a person who signed up under a campaign. Each contact gets a
//! unique referral code at creation; contacts who refer others accumulate the
//! referred contacts' ids, in signup order, on their own record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::campaign::CampaignId;
use super::slug::generate_slug;

/// Stable contact identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
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

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ContactId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Optional descriptive fields captured at signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    /// Contact's name.
    pub name: Option<String>,
    /// Contact's mobile number.
    pub mobile: Option<String>,
    /// Caller-supplied correlation identifier.
    pub external_id: Option<String>,
}

/// Person signed up under a campaign.
///
/// ## Invariants
/// - `(email, campaign_id)` is unique; the store's unique index is the
///   arbiter under concurrent signups.
/// - `referral_code` is globally unique and never changes once generated.
/// - `referred_contacts` grows by appending ids in signup order and is only
///   mutated by the signup workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable contact identifier.
    pub id: ContactId,
    /// Campaign the contact signed up under.
    pub campaign_id: CampaignId,
    /// Public campaign code as supplied at signup, kept for audit.
    pub campaign_public_code: String,
    /// Contact's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Address signup and nudge mails are sent to.
    pub email: String,
    /// Contact's mobile number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// Caller-supplied correlation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Unique slug identifying this contact as a referrer.
    pub referral_code: String,
    /// Ids of contacts who signed up with this contact's referral code.
    pub referred_contacts: Vec<ContactId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Build a contact from signup input, stamping a fresh id and referral
    /// code and the timestamps.
    #[must_use]
    pub fn create(
        campaign_id: CampaignId,
        campaign_public_code: impl Into<String>,
        email: impl Into<String>,
        details: ContactDetails,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ContactId::random(),
            campaign_id,
            campaign_public_code: campaign_public_code.into(),
            name: details.name,
            email: email.into(),
            mobile: details.mobile,
            external_id: details.external_id,
            referral_code: generate_slug(),
            referred_contacts: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record that `referred` signed up with this contact's referral code,
    /// returning the running referral count.
    pub fn record_referral(&mut self, referred: ContactId) -> usize {
        self.referred_contacts.push(referred);
        self.updated_at = Utc::now();
        self.referred_contacts.len()
    }

    /// Shallow-merge a patch onto the contact and bump `updated_at`.
    ///
    /// Absent patch fields leave the record untouched; ids, codes, and the
    /// referral list are not patchable.
    pub fn apply(&mut self, patch: ContactPatch) {
        let ContactPatch {
            name,
            email,
            mobile,
            external_id,
        } = patch;

        if let Some(name) = name {
            self.name = Some(name);
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(mobile) = mobile {
            self.mobile = Some(mobile);
        }
        if let Some(external_id) = external_id {
            self.external_id = Some(external_id);
        }
        self.updated_at = Utc::now();
    }
}

/// Fields a client may supply when updating a contact.
///
/// Absent fields are left untouched by [`Contact::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement email; the `(email, campaign_id)` unique index still
    /// applies on save.
    pub email: Option<String>,
    /// Replacement mobile number.
    pub mobile: Option<String>,
    /// Replacement correlation identifier.
    pub external_id: Option<String>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::slug::is_valid_slug;
    use rstest::rstest;

    fn sample_contact() -> Contact {
        Contact::create(
            CampaignId::random(),
            "zr4peqq",
            "ada@example.com",
            ContactDetails::default(),
        )
    }

    #[rstest]
    fn create_stamps_code_and_empty_referrals() {
        let campaign_id = CampaignId::random();
        let contact = Contact::create(
            campaign_id,
            "zr4peqq",
            "ada@example.com",
            ContactDetails {
                name: Some("Ada".to_owned()),
                ..ContactDetails::default()
            },
        );

        assert_eq!(contact.campaign_id, campaign_id);
        assert_eq!(contact.campaign_public_code, "zr4peqq");
        assert!(is_valid_slug(&contact.referral_code));
        assert!(contact.referred_contacts.is_empty());
        assert_eq!(contact.created_at, contact.updated_at);
    }

    #[rstest]
    fn record_referral_appends_in_order_and_counts() {
        let mut referrer = sample_contact();
        let first = ContactId::random();
        let second = ContactId::random();

        assert_eq!(referrer.record_referral(first), 1);
        assert_eq!(referrer.record_referral(second), 2);
        assert_eq!(referrer.referred_contacts, vec![first, second]);
    }

    #[rstest]
    fn apply_merges_supplied_fields_only() {
        let mut contact = sample_contact();
        let original_code = contact.referral_code.clone();

        contact.apply(ContactPatch {
            name: Some("Ada Lovelace".to_owned()),
            mobile: Some("+44 20 7946 0000".to_owned()),
            ..ContactPatch::default()
        });

        assert_eq!(contact.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(contact.mobile.as_deref(), Some("+44 20 7946 0000"));
        assert_eq!(contact.email, "ada@example.com");
        assert_eq!(contact.referral_code, original_code);
    }

    #[rstest]
    fn fresh_contacts_receive_distinct_referral_codes() {
        let first = sample_contact();
        let second = sample_contact();
        assert_ne!(first.referral_code, second.referral_code);
    }

    #[rstest]
    fn optional_fields_are_omitted_from_the_wire() {
        let contact = sample_contact();
        let encoded = serde_json::to_value(&contact).expect("contact serialises");
        assert!(encoded.get("name").is_none());
        assert!(encoded.get("mobile").is_none());
        assert!(encoded.get("external_id").is_none());
        assert!(encoded.get("referral_code").is_some());
    }
}
