//! Campaign CRUD handlers.
//!
//! ```text
//! POST   /api/v1/campaigns
//! GET    /api/v1/campaigns
//! GET    /api/v1/campaigns/{id}
//! PUT    /api/v1/campaigns/{id}
//! DELETE /api/v1/campaigns/{id}
//! ```
//!
//! The whole surface requires a valid token. Any token holder may read and
//! mutate any campaign; there is no owner-equals-requester check.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::campaign::{Campaign, CampaignDraft, CampaignId, CampaignPatch};
use crate::domain::ports::CampaignRepositoryError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{CampaignSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Request envelope for campaign create and update.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CampaignBody {
    pub campaign: Option<CampaignFields>,
}

/// Campaign fields as clients submit them.
///
/// Everything is optional at the deserialization boundary so requirement
/// failures surface as 422s with a stable message instead of framework
/// deserialization errors.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CampaignFields {
    pub name: Option<String>,
    pub referral_url: Option<String>,
    pub signup_template_id: Option<String>,
    pub nudge_template_id: Option<String>,
    pub completion_template_id: Option<String>,
    pub nudge_threshold: Option<u32>,
}

impl From<CampaignFields> for CampaignPatch {
    fn from(fields: CampaignFields) -> Self {
        Self {
            name: fields.name,
            referral_url: fields.referral_url,
            signup_template_id: fields.signup_template_id,
            nudge_template_id: fields.nudge_template_id,
            completion_template_id: fields.completion_template_id,
            nudge_threshold: fields.nudge_threshold,
        }
    }
}

/// Response envelope wrapping a single campaign.
#[derive(Debug, Serialize, ToSchema)]
pub struct CampaignEnvelope {
    #[schema(value_type = CampaignSchema)]
    pub campaign: Campaign,
}

/// Response envelope wrapping the campaign collection.
#[derive(Debug, Serialize, ToSchema)]
pub struct CampaignListEnvelope {
    #[schema(value_type = Vec<CampaignSchema>)]
    pub campaigns: Vec<Campaign>,
}

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessEnvelope {
    pub success: bool,
}

fn parse_draft(body: CampaignBody) -> Result<CampaignDraft, Error> {
    let fields = body.campaign.unwrap_or_default();
    let name = fields
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| Error::unprocessable("The campaign name is required"))?;
    Ok(CampaignDraft {
        name,
        referral_url: fields.referral_url,
        signup_template_id: fields.signup_template_id,
        nudge_template_id: fields.nudge_template_id,
        completion_template_id: fields.completion_template_id,
        nudge_threshold: fields.nudge_threshold,
    })
}

/// A malformed id and an absent record are indistinguishable to clients.
fn parse_campaign_id(raw: &str) -> Result<CampaignId, Error> {
    Uuid::parse_str(raw)
        .map(CampaignId::new)
        .map_err(|_| campaign_not_found())
}

fn campaign_not_found() -> Error {
    Error::not_found("The campaign does not exist")
}

fn storage_error(err: CampaignRepositoryError) -> Error {
    Error::internal(err.to_string())
}

/// Creation failures on declared constraints are the client's problem;
/// anything else is ours.
fn insert_error(err: CampaignRepositoryError) -> Error {
    match err {
        CampaignRepositoryError::Duplicate { message } => Error::unprocessable(message),
        other => Error::internal(other.to_string()),
    }
}

/// Create a campaign owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/campaigns",
    request_body = CampaignBody,
    responses(
        (status = 200, description = "Created campaign", body = CampaignEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 422, description = "Missing name or rejected fields", body = ErrorSchema)
    ),
    security(("token" = [])),
    tags = ["campaigns"],
    operation_id = "createCampaign"
)]
#[post("/campaigns")]
pub async fn create_campaign(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    body: web::Json<CampaignBody>,
) -> ApiResult<web::Json<CampaignEnvelope>> {
    let draft = parse_draft(body.into_inner())?;
    let campaign = Campaign::create(draft, user.user().id);
    state
        .campaigns
        .insert(&campaign)
        .await
        .map_err(insert_error)?;
    Ok(web::Json(CampaignEnvelope { campaign }))
}

/// List every campaign, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns",
    responses(
        (status = 200, description = "All campaigns", body = CampaignListEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    security(("token" = [])),
    tags = ["campaigns"],
    operation_id = "listCampaigns"
)]
#[get("/campaigns")]
pub async fn list_campaigns(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<CampaignListEnvelope>> {
    let campaigns = state.campaigns.list().await.map_err(storage_error)?;
    Ok(web::Json(CampaignListEnvelope { campaigns }))
}

/// Fetch one campaign by id.
#[utoipa::path(
    get,
    path = "/api/v1/campaigns/{id}",
    params(("id" = String, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "The campaign", body = CampaignEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema)
    ),
    security(("token" = [])),
    tags = ["campaigns"],
    operation_id = "getCampaign"
)]
#[get("/campaigns/{id}")]
pub async fn get_campaign(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<CampaignEnvelope>> {
    let id = parse_campaign_id(&path.into_inner())?;
    let campaign = state
        .campaigns
        .find_by_id(&id)
        .await
        .map_err(storage_error)?
        .ok_or_else(campaign_not_found)?;
    Ok(web::Json(CampaignEnvelope { campaign }))
}

/// Shallow-merge submitted fields onto a campaign.
#[utoipa::path(
    put,
    path = "/api/v1/campaigns/{id}",
    params(("id" = String, Path, description = "Campaign id")),
    request_body = CampaignBody,
    responses(
        (status = 200, description = "Updated campaign", body = CampaignEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema)
    ),
    security(("token" = [])),
    tags = ["campaigns"],
    operation_id = "updateCampaign"
)]
#[put("/campaigns/{id}")]
pub async fn update_campaign(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<CampaignBody>,
) -> ApiResult<web::Json<CampaignEnvelope>> {
    let id = parse_campaign_id(&path.into_inner())?;
    let mut campaign = state
        .campaigns
        .find_by_id(&id)
        .await
        .map_err(storage_error)?
        .ok_or_else(campaign_not_found)?;
    campaign.apply(CampaignPatch::from(
        body.into_inner().campaign.unwrap_or_default(),
    ));
    state
        .campaigns
        .save(&campaign)
        .await
        .map_err(storage_error)?;
    Ok(web::Json(CampaignEnvelope { campaign }))
}

/// Delete a campaign. Its contacts survive; there is no cascade.
#[utoipa::path(
    delete,
    path = "/api/v1/campaigns/{id}",
    params(("id" = String, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Deleted", body = SuccessEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema)
    ),
    security(("token" = [])),
    tags = ["campaigns"],
    operation_id = "deleteCampaign"
)]
#[delete("/campaigns/{id}")]
pub async fn delete_campaign(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessEnvelope>> {
    let id = parse_campaign_id(&path.into_inner())?;
    let campaign = state
        .campaigns
        .find_by_id(&id)
        .await
        .map_err(storage_error)?
        .ok_or_else(campaign_not_found)?;
    state
        .campaigns
        .delete(&campaign.id)
        .await
        .map_err(storage_error)?;
    Ok(web::Json(SuccessEnvelope { success: true }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::user::UserId;
    use crate::inbound::http::auth::AUTH_TOKEN_HEADER;
    use crate::inbound::http::test_utils::TestHarness;

    #[rstest]
    #[case::missing_envelope(json!({}))]
    #[case::empty_campaign(json!({ "campaign": {} }))]
    #[case::blank_name(json!({ "campaign": { "name": "   " } }))]
    fn drafts_without_a_name_are_rejected(#[case] body: serde_json::Value) {
        let body: CampaignBody = serde_json::from_value(body).expect("body deserialises");
        let err = parse_draft(body).expect_err("name is required");
        assert_eq!(err.code(), ErrorCode::UnprocessableEntity);
        assert_eq!(err.message(), "The campaign name is required");
    }

    #[rstest]
    fn malformed_ids_read_as_missing_records() {
        let err = parse_campaign_id("definitely-not-a-uuid").expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[actix_web::test]
    async fn create_requires_a_token() {
        let harness = TestHarness::seeded();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state.clone()))
                .service(create_campaign),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/campaigns")
            .set_json(json!({ "campaign": { "name": "Launch wave" } }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_stamps_owner_and_public_code() {
        let harness = TestHarness::seeded();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state.clone()))
                .service(create_campaign),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/campaigns")
            .insert_header((AUTH_TOKEN_HEADER, harness.token()))
            .set_json(json!({
                "campaign": { "name": "Launch wave", "nudge_threshold": 2 }
            }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["campaign"]["name"], "Launch wave");
        assert_eq!(body["campaign"]["owner"], harness.user.id.to_string());
        assert_eq!(body["campaign"]["nudge_threshold"], 2);
        let code = body["campaign"]["public_code"]
            .as_str()
            .expect("public code");
        assert!(!code.is_empty());

        let stored = harness.campaigns.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].public_code, code);
    }

    #[actix_web::test]
    async fn create_without_a_name_is_unprocessable() {
        let harness = TestHarness::seeded();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state.clone()))
                .service(create_campaign),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/campaigns")
            .insert_header((AUTH_TOKEN_HEADER, harness.token()))
            .set_json(json!({ "campaign": {} }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "The campaign name is required");
        assert!(harness.campaigns.snapshot().is_empty());
    }

    #[actix_web::test]
    async fn list_returns_the_collection_envelope() {
        let harness = TestHarness::seeded();
        harness.campaigns.seed(Campaign::create(
            CampaignDraft {
                name: "First".to_owned(),
                ..CampaignDraft::default()
            },
            harness.user.id,
        ));
        harness.campaigns.seed(Campaign::create(
            CampaignDraft {
                name: "Second".to_owned(),
                ..CampaignDraft::default()
            },
            harness.user.id,
        ));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state.clone()))
                .service(list_campaigns),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/campaigns")
            .insert_header((AUTH_TOKEN_HEADER, harness.token()))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        let campaigns = body["campaigns"].as_array().expect("campaigns array");
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0]["name"], "First");
        assert_eq!(campaigns[1]["name"], "Second");
    }

    #[rstest]
    #[case::malformed("/campaigns/not-a-uuid")]
    #[case::unknown("/campaigns/7b7a2a47-3c85-44da-b0a3-7ff589d80a17")]
    #[actix_web::test]
    async fn get_missing_campaign_is_not_found(#[case] uri: &str) {
        let harness = TestHarness::seeded();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state.clone()))
                .service(get_campaign),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri(uri)
            .insert_header((AUTH_TOKEN_HEADER, harness.token()))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_merges_only_supplied_fields() {
        let harness = TestHarness::seeded();
        let campaign = Campaign::create(
            CampaignDraft {
                name: "Launch wave".to_owned(),
                referral_url: Some("https://campaigns.example.com/join".to_owned()),
                ..CampaignDraft::default()
            },
            harness.user.id,
        );
        harness.campaigns.seed(campaign.clone());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state.clone()))
                .service(update_campaign),
        )
        .await;

        let req = actix_test::TestRequest::put()
            .uri(&format!("/campaigns/{}", campaign.id))
            .insert_header((AUTH_TOKEN_HEADER, harness.token()))
            .set_json(json!({ "campaign": { "name": "Renamed" } }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["campaign"]["name"], "Renamed");
        assert_eq!(
            body["campaign"]["referral_url"],
            "https://campaigns.example.com/join"
        );
        assert_eq!(body["campaign"]["public_code"], campaign.public_code);

        let stored = harness.campaigns.snapshot();
        assert_eq!(stored[0].name, "Renamed");
    }

    #[actix_web::test]
    async fn any_token_holder_may_update_a_campaign_they_do_not_own() {
        let harness = TestHarness::seeded();
        let campaign = Campaign::create(
            CampaignDraft {
                name: "Someone else's".to_owned(),
                ..CampaignDraft::default()
            },
            UserId::random(),
        );
        harness.campaigns.seed(campaign.clone());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state.clone()))
                .service(update_campaign),
        )
        .await;

        let req = actix_test::TestRequest::put()
            .uri(&format!("/campaigns/{}", campaign.id))
            .insert_header((AUTH_TOKEN_HEADER, harness.token()))
            .set_json(json!({ "campaign": { "name": "Taken over" } }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let stored = harness.campaigns.snapshot();
        assert_eq!(stored[0].name, "Taken over");
        assert_eq!(stored[0].owner, campaign.owner, "owner never changes");
    }

    #[actix_web::test]
    async fn delete_acknowledges_with_success() {
        let harness = TestHarness::seeded();
        let campaign = Campaign::create(
            CampaignDraft {
                name: "Short lived".to_owned(),
                ..CampaignDraft::default()
            },
            harness.user.id,
        );
        harness.campaigns.seed(campaign.clone());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(harness.state.clone()))
                .service(delete_campaign),
        )
        .await;

        let req = actix_test::TestRequest::delete()
            .uri(&format!("/campaigns/{}", campaign.id))
            .insert_header((AUTH_TOKEN_HEADER, harness.token()))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({ "success": true }));
        assert!(harness.campaigns.snapshot().is_empty());
    }
}
