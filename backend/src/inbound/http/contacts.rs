//! Contact handlers: the public signup endpoint and the authenticated CRUD.
//!
//! ```text
//! POST   /api/v1/contacts      (no token required)
//! GET    /api/v1/contacts
//! GET    /api/v1/contacts/{id}
//! PUT    /api/v1/contacts/{id}
//! DELETE /api/v1/contacts/{id}
//! ```
//!
//! The create route is the outward-facing signup surface, so it is the one
//! route in the API that skips the auth gate. Everything else requires a
//! valid token.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::contact::{Contact, ContactId, ContactPatch};
use crate::domain::ports::ContactRepositoryError;
use crate::domain::signup::SignupRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::campaigns::SuccessEnvelope;
use crate::inbound::http::schemas::{ContactSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Request envelope for the public signup endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SignupBody {
    pub contact: Option<SignupFields>,
}

/// Signup fields as submitted by referral-link landing pages.
///
/// `campaign_id` carries the campaign's *public code*, not its internal id;
/// `code` is the referral code of the contact whose link was followed.
/// Everything is optional at the deserialization boundary so the signup
/// workflow owns every requirement failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SignupFields {
    pub campaign_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub external_id: Option<String>,
    pub code: Option<String>,
}

impl From<SignupFields> for SignupRequest {
    fn from(fields: SignupFields) -> Self {
        Self {
            campaign_code: fields.campaign_id,
            email: fields.email,
            name: fields.name,
            mobile: fields.mobile,
            external_id: fields.external_id,
            referral_code: fields.code,
        }
    }
}

/// Request envelope for contact updates.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContactBody {
    pub contact: Option<ContactFields>,
}

/// Patchable contact fields. Ids, codes, and the referral list are not
/// accepted here; unknown keys in the envelope are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub external_id: Option<String>,
}

impl From<ContactFields> for ContactPatch {
    fn from(fields: ContactFields) -> Self {
        Self {
            name: fields.name,
            email: fields.email,
            mobile: fields.mobile,
            external_id: fields.external_id,
        }
    }
}

/// Response envelope wrapping a single contact.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactEnvelope {
    #[schema(value_type = ContactSchema)]
    pub contact: Contact,
}

/// Response envelope wrapping the contact collection.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactListEnvelope {
    #[schema(value_type = Vec<ContactSchema>)]
    pub contacts: Vec<Contact>,
}

/// A malformed id and an absent record are indistinguishable to clients.
fn parse_contact_id(raw: &str) -> Result<ContactId, Error> {
    Uuid::parse_str(raw)
        .map(ContactId::new)
        .map_err(|_| contact_not_found())
}

fn contact_not_found() -> Error {
    Error::not_found("The contact does not exist")
}

fn storage_error(err: ContactRepositoryError) -> Error {
    Error::internal(err.to_string())
}

/// Updates can move a contact onto an already taken `(email, campaign_id)`
/// pair; that is the client's problem, anything else is ours.
fn write_error(err: ContactRepositoryError) -> Error {
    match err {
        ContactRepositoryError::Duplicate { message } => Error::unprocessable(message),
        other => Error::internal(other.to_string()),
    }
}

/// Register a signup, linking it to a referrer when a known code is supplied.
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    request_body = SignupBody,
    responses(
        (status = 200, description = "Registered contact", body = ContactEnvelope),
        (status = 422, description = "Missing or invalid signup fields", body = ErrorSchema)
    ),
    security([]),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    body: web::Json<SignupBody>,
) -> ApiResult<web::Json<ContactEnvelope>> {
    let fields = body.into_inner().contact.unwrap_or_default();
    let contact = state
        .signup
        .register_contact(SignupRequest::from(fields))
        .await?;
    Ok(web::Json(ContactEnvelope { contact }))
}

/// List every contact, oldest first, across all campaigns.
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    responses(
        (status = 200, description = "All contacts", body = ContactListEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    security(("token" = [])),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<ContactListEnvelope>> {
    let contacts = state.contacts.list().await.map_err(storage_error)?;
    Ok(web::Json(ContactListEnvelope { contacts }))
}

/// Fetch one contact by id.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{id}",
    params(("id" = String, Path, description = "Contact id")),
    responses(
        (status = 200, description = "The contact", body = ContactEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema)
    ),
    security(("token" = [])),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ContactEnvelope>> {
    let id = parse_contact_id(&path.into_inner())?;
    let contact = state
        .contacts
        .find_by_id(&id)
        .await
        .map_err(storage_error)?
        .ok_or_else(contact_not_found)?;
    Ok(web::Json(ContactEnvelope { contact }))
}

/// Shallow-merge submitted fields onto a contact.
#[utoipa::path(
    put,
    path = "/api/v1/contacts/{id}",
    params(("id" = String, Path, description = "Contact id")),
    request_body = ContactBody,
    responses(
        (status = 200, description = "Updated contact", body = ContactEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema),
        (status = 422, description = "Update rejected by a constraint", body = ErrorSchema)
    ),
    security(("token" = [])),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<ContactBody>,
) -> ApiResult<web::Json<ContactEnvelope>> {
    let id = parse_contact_id(&path.into_inner())?;
    let mut contact = state
        .contacts
        .find_by_id(&id)
        .await
        .map_err(storage_error)?
        .ok_or_else(contact_not_found)?;
    contact.apply(ContactPatch::from(
        body.into_inner().contact.unwrap_or_default(),
    ));
    state.contacts.save(&contact).await.map_err(write_error)?;
    Ok(web::Json(ContactEnvelope { contact }))
}

/// Delete a contact.
///
/// Referrers who listed the contact keep its id in their referral history;
/// there is no cascade.
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{id}",
    params(("id" = String, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Deleted", body = SuccessEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema)
    ),
    security(("token" = [])),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessEnvelope>> {
    let id = parse_contact_id(&path.into_inner())?;
    let contact = state
        .contacts
        .find_by_id(&id)
        .await
        .map_err(storage_error)?
        .ok_or_else(contact_not_found)?;
    state
        .contacts
        .delete(&contact.id)
        .await
        .map_err(storage_error)?;
    Ok(web::Json(SuccessEnvelope { success: true }))
}
