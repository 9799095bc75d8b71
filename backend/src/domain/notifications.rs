//! Templated notification payloads for the signup workflow.
//!
//! The signup engine dispatches two kinds of mail: a confirmation to the new
//! contact and, when the campaign's threshold allows, a nudge to the referrer.
//! Payload shapes are part of the template contract with the mail vendor, so
//! they are built here in the domain rather than in the outbound adapter.

use serde_json::{Value, json};

use super::campaign::Campaign;
use super::contact::Contact;

/// A single templated mail awaiting dispatch.
///
/// `template_id` mirrors the campaign configuration verbatim: a campaign
/// without a configured template still produces a message, and the vendor's
/// rejection is observed by the dispatcher rather than short-circuited here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Vendor template to render, when the campaign configured one.
    pub template_id: Option<String>,
    /// Destination address.
    pub recipient: String,
    /// Template data bag.
    pub data: Value,
}

impl MailMessage {
    /// Confirmation mail sent to every newly registered contact.
    #[must_use]
    pub fn signup(campaign: &Campaign, candidate: &Contact) -> Self {
        Self {
            template_id: campaign.signup_template_id.clone(),
            recipient: candidate.email.clone(),
            data: json!({
                "referral_link": referral_link(campaign, &candidate.referral_code),
                "name": candidate.name.clone().unwrap_or_default(),
                "email": candidate.email,
                "referral_code": candidate.referral_code,
            }),
        }
    }

    /// Reminder mail sent to a referrer whose referral count is still within
    /// the campaign's nudge threshold.
    #[must_use]
    pub fn nudge(campaign: &Campaign, referrer: &Contact, candidate: &Contact) -> Self {
        Self {
            template_id: campaign.nudge_template_id.clone(),
            recipient: referrer.email.clone(),
            data: json!({
                "referral_link": referral_link(campaign, &referrer.referral_code),
                "referrers_count": referrer.referred_contacts.len(),
                "name": referrer.name.clone().unwrap_or_default(),
                "email": referrer.email,
                "referral_code": referrer.referral_code,
                "contact_name": candidate.name.clone().unwrap_or_default(),
                "contact_email": candidate.email,
                "contact_referral_code": candidate.referral_code,
            }),
        }
    }
}

/// Build the public referral link for `code` from the campaign's base URL.
///
/// A campaign without a referral URL yields a bare query string; the link is
/// template data, not something this service navigates.
fn referral_link(campaign: &Campaign, code: &str) -> String {
    let base = campaign.referral_url.as_deref().unwrap_or_default();
    format!("{base}?code={code}")
}
