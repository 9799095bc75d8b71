//! Contact signup workflow: campaign resolution, referral chaining, and
//! nudge dispatch.
//!
//! Registration is the one write path with real logic. It resolves the
//! campaign by public code, optionally links the new contact to a referrer,
//! decides whether the referrer is owed a nudge mail, persists the contact,
//! and confirms the signup by mail. The referrer is saved before the
//! candidate on purpose: that ordering is observable (a failed candidate
//! insert leaves the referrer's appended id behind) and downstream consumers
//! rely on it staying put.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use super::campaign::Campaign;
use super::contact::{Contact, ContactDetails};
use super::error::Error;
use super::notifications::MailMessage;
use super::ports::{CampaignRepository, ContactRepository, ContactRepositoryError, Mailer};

/// Raw signup input as submitted by the public surface.
///
/// Every field is optional at this level; the workflow enforces which are
/// required and answers with unprocessable-entity errors rather than
/// deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupRequest {
    /// Public code of the campaign being signed up to.
    pub campaign_code: Option<String>,
    /// Contact address; required.
    pub email: Option<String>,
    /// Contact name.
    pub name: Option<String>,
    /// Contact mobile number.
    pub mobile: Option<String>,
    /// Caller-supplied correlation identifier.
    pub external_id: Option<String>,
    /// Referral code of the contact who referred this signup.
    pub referral_code: Option<String>,
}

/// Orchestrates contact registration against campaigns and referrers.
pub struct SignupService {
    campaigns: Arc<dyn CampaignRepository>,
    contacts: Arc<dyn ContactRepository>,
    mailer: Arc<dyn Mailer>,
}

impl SignupService {
    /// Build the workflow over its collaborators.
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        contacts: Arc<dyn ContactRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            campaigns,
            contacts,
            mailer,
        }
    }

    /// Register a contact under a campaign, chaining it to a referrer when a
    /// referral code resolves.
    ///
    /// # Errors
    ///
    /// Every failure in this workflow is an unprocessable-entity error: a
    /// missing or unresolvable campaign code, a missing email, and any
    /// persistence failure, including the `(email, campaign_id)` unique
    /// index rejecting a duplicate signup.
    pub async fn register_contact(&self, request: SignupRequest) -> Result<Contact, Error> {
        let campaign_code = request
            .campaign_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| Error::unprocessable("You need a campaign id"))?;

        let campaign = self
            .campaigns
            .find_by_public_code(campaign_code)
            .await
            .map_err(|err| Error::unprocessable(err.to_string()))?
            .ok_or_else(|| Error::unprocessable("The campaign id you have supplied is invalid"))?;

        let email = request
            .email
            .as_deref()
            .filter(|email| !email.is_empty())
            .ok_or_else(|| Error::unprocessable("The contact email is required"))?;

        let candidate = Contact::create(
            campaign.id,
            campaign_code,
            email,
            ContactDetails {
                name: request.name,
                mobile: request.mobile,
                external_id: request.external_id,
            },
        );

        if let Some(code) = request.referral_code.as_deref().filter(|code| !code.is_empty()) {
            self.link_referrer(&campaign, code, &candidate).await?;
        }

        self.contacts
            .insert(&candidate)
            .await
            .map_err(contact_signup_error)?;

        self.mailer.deliver(MailMessage::signup(&campaign, &candidate));

        Ok(candidate)
    }

    /// Append the candidate to the referrer identified by `code`, persist the
    /// referrer, and nudge it while its referral count stays within the
    /// campaign's threshold.
    ///
    /// An unknown code is silently ignored: referral linking is best-effort
    /// and an invalid code must behave exactly like no code at all.
    async fn link_referrer(
        &self,
        campaign: &Campaign,
        code: &str,
        candidate: &Contact,
    ) -> Result<(), Error> {
        let Some(mut referrer) = self
            .contacts
            .find_by_referral_code(code)
            .await
            .map_err(contact_signup_error)?
        else {
            debug!(code, "referral code matched no contact; ignoring");
            return Ok(());
        };

        let referral_count = referrer.record_referral(candidate.id);
        self.contacts
            .save(&referrer)
            .await
            .map_err(contact_signup_error)?;

        if nudge_due(campaign.nudge_threshold, referral_count) {
            self.mailer
                .deliver(MailMessage::nudge(campaign, &referrer, candidate));
        }

        Ok(())
    }
}

/// A nudge is owed for every signup while the referrer's running count stays
/// at or below the campaign threshold; a zero threshold disables nudging.
fn nudge_due(threshold: u32, referral_count: usize) -> bool {
    threshold != 0 && referral_count <= threshold as usize
}

/// Map a contact persistence failure into the workflow's client-facing error.
///
/// Constraint violations carry their message twice: as the error text and in
/// a flat `errors` list, mirroring how per-field store errors are surfaced.
fn contact_signup_error(err: ContactRepositoryError) -> Error {
    match err {
        ContactRepositoryError::Duplicate { message } => {
            let details = json!({ "errors": [message.clone()] });
            Error::unprocessable(message).with_details(details)
        }
        other => Error::unprocessable(other.to_string()),
    }
}
