//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The request was understood but fails a validation rule or constraint.
    #[schema(rename = "unprocessable_entity")]
    UnprocessableEntity,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "unprocessable_entity")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "You need a campaign id")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "6b5c1a2e-8f0d-4f11-9c94-5d7a0f3b2c61")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Authenticated user identity as echoed by the token-verification endpoint.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier, also the token subject.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Display name, when the signup flow captured one.
    #[schema(value_type = Option<String>, example = "Ada Lovelace")]
    name: Option<String>,
    /// Contact address the user signed up with.
    #[schema(example = "ada@example.com")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::Campaign`].
///
/// Referral campaign with its templates and nudge threshold.
#[derive(ToSchema)]
#[schema(as = crate::domain::Campaign)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CampaignSchema {
    /// Stable campaign identifier.
    #[schema(value_type = String, example = "7b7a2a47-3c85-44da-b0a3-7ff589d80a17")]
    id: String,
    /// User who created the campaign.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    owner: String,
    /// Campaign name shown in dashboards and mails.
    #[schema(example = "Launch wave")]
    name: String,
    /// Base URL referral links are built from.
    #[schema(value_type = Option<String>, example = "https://campaigns.example.com/join")]
    referral_url: Option<String>,
    /// Public slug identifying the campaign in signup requests.
    #[schema(example = "zr4peqq")]
    public_code: String,
    /// Mail template for the signup confirmation.
    #[schema(value_type = Option<String>)]
    signup_template_id: Option<String>,
    /// Mail template for referral nudges.
    #[schema(value_type = Option<String>)]
    nudge_template_id: Option<String>,
    /// Mail template for campaign completion; stored but never dispatched.
    #[schema(value_type = Option<String>)]
    completion_template_id: Option<String>,
    /// How many of a referrer's signups trigger a nudge mail; zero disables
    /// nudging.
    #[schema(example = 5)]
    nudge_threshold: u32,
    /// Creation timestamp.
    #[schema(value_type = String, example = "2026-08-01T09:30:00Z")]
    created_at: String,
    /// Last mutation timestamp.
    #[schema(value_type = String, example = "2026-08-01T09:30:00Z")]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Contact`].
///
/// Person signed up under a campaign, with their referral code and history.
#[derive(ToSchema)]
#[schema(as = crate::domain::Contact)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ContactSchema {
    /// Stable contact identifier.
    #[schema(value_type = String, example = "5f0c6d9c-0df0-4d5a-b7a8-40af69299a2c")]
    id: String,
    /// Campaign the contact signed up under.
    #[schema(value_type = String, example = "7b7a2a47-3c85-44da-b0a3-7ff589d80a17")]
    campaign_id: String,
    /// Public campaign code as supplied at signup.
    #[schema(example = "zr4peqq")]
    campaign_public_code: String,
    /// Contact's name.
    #[schema(value_type = Option<String>, example = "Ada Lovelace")]
    name: Option<String>,
    /// Address signup and nudge mails are sent to.
    #[schema(example = "ada@example.com")]
    email: String,
    /// Contact's mobile number.
    #[schema(value_type = Option<String>)]
    mobile: Option<String>,
    /// Caller-supplied correlation identifier.
    #[schema(value_type = Option<String>)]
    external_id: Option<String>,
    /// Unique slug identifying this contact as a referrer.
    #[schema(example = "q0duxdd")]
    referral_code: String,
    /// Ids of contacts who signed up with this contact's referral code.
    #[schema(value_type = Vec<String>)]
    referred_contacts: Vec<String>,
    /// Creation timestamp.
    #[schema(value_type = String, example = "2026-08-01T09:30:00Z")]
    created_at: String,
    /// Last mutation timestamp.
    #[schema(value_type = String, example = "2026-08-01T09:30:00Z")]
    updated_at: String,
}
