//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, campaigns,
//!   contacts, health)
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`UserSchema`], [`CampaignSchema`], [`ContactSchema`]) that provide
//!   OpenAPI definitions without coupling domain types to the utoipa framework
//! - **Security**: The `x-auth-token` header authentication scheme
//!
//! The generated specification is served by Swagger UI in debug builds.

use crate::inbound::http::schemas::{
    CampaignSchema, ContactSchema, ErrorCodeSchema, ErrorSchema, UserSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the auth token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "x-auth-token",
                "Signed token whose subject is the id of a registered user.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Referral backend API",
        description = "HTTP interface for referral campaign management, contact signups, and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("token" = [])),
    paths(
        crate::inbound::http::auth::verify,
        crate::inbound::http::campaigns::create_campaign,
        crate::inbound::http::campaigns::list_campaigns,
        crate::inbound::http::campaigns::get_campaign,
        crate::inbound::http::campaigns::update_campaign,
        crate::inbound::http::campaigns::delete_campaign,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CampaignSchema,
        ContactSchema
    )),
    tags(
        (name = "auth", description = "Token verification"),
        (name = "campaigns", description = "Referral campaign management"),
        (name = "contacts", description = "Contact signup and administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
