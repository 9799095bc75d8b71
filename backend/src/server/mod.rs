//! Server construction and middleware wiring.
//!
//! [`build_http_state`] assembles the domain gate and workflow over the
//! outbound ports, [`build_app`] mounts every route under `/api/v1`, and
//! [`create_server`] binds the listener and flips the readiness probe.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::auth::AuthGate;
use crate::domain::ports::{CampaignRepository, ContactRepository, Mailer, UserRepository};
use crate::domain::signup::SignupService;
use crate::inbound::http::auth::verify;
use crate::inbound::http::campaigns::{
    create_campaign, delete_campaign, get_campaign, list_campaigns, update_campaign,
};
use crate::inbound::http::contacts::{
    create_contact, delete_contact, get_contact, list_contacts, update_contact,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Outbound ports the HTTP surface is wired over.
pub struct ServerPorts {
    /// Lookup backing token verification.
    pub users: Arc<dyn UserRepository>,
    /// Campaign storage.
    pub campaigns: Arc<dyn CampaignRepository>,
    /// Contact storage.
    pub contacts: Arc<dyn ContactRepository>,
    /// Outbound mail delivery.
    pub mailer: Arc<dyn Mailer>,
}

/// Build the shared HTTP state from the token secret and outbound ports.
///
/// The gate and the signup workflow are constructed here so every handler
/// sees the same stores the workflow writes to.
pub fn build_http_state(token_secret: &str, ports: ServerPorts) -> web::Data<HttpState> {
    let ServerPorts {
        users,
        campaigns,
        contacts,
        mailer,
    } = ports;

    let auth = Arc::new(AuthGate::new(token_secret, users));
    let signup = Arc::new(SignupService::new(
        Arc::clone(&campaigns),
        Arc::clone(&contacts),
        mailer,
    ));

    web::Data::new(HttpState::new(auth, signup, campaigns, contacts))
}

/// Assemble the application with every route and middleware attached.
///
/// Health probes sit outside the `/api/v1` scope so orchestration can reach
/// them without credentials or versioning concerns.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(verify)
        .service(create_campaign)
        .service(list_campaigns)
        .service(get_campaign)
        .service(update_campaign)
        .service(delete_campaign)
        .service(create_contact)
        .service(list_contacts)
        .service(get_contact)
        .service(update_contact)
        .service(delete_contact);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server over the provided state.
///
/// # Parameters
/// - `health_state`: shared readiness state flipped once the listener binds.
/// - `http_state`: pre-wired handler dependencies from [`build_http_state`].
/// - `bind_addr`: socket address to listen on.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server =
        HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
            .bind(bind_addr)?
            .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::test;
    use serde_json::json;

    use super::*;
    use crate::domain::campaign::{Campaign, CampaignDraft};
    use crate::domain::user::UserId;
    use crate::inbound::http::auth::AUTH_TOKEN_HEADER;
    use crate::inbound::http::test_utils::{TEST_SECRET, TestHarness};

    fn wired_state(harness: &TestHarness) -> web::Data<HttpState> {
        build_http_state(
            TEST_SECRET,
            ServerPorts {
                users: Arc::clone(&harness.users) as Arc<dyn UserRepository>,
                campaigns: Arc::clone(&harness.campaigns) as Arc<dyn CampaignRepository>,
                contacts: Arc::clone(&harness.contacts) as Arc<dyn ContactRepository>,
                mailer: Arc::clone(&harness.mailer) as Arc<dyn Mailer>,
            },
        )
    }

    fn seeded_campaign(harness: &TestHarness) -> Campaign {
        let campaign = Campaign::create(
            CampaignDraft {
                name: "Launch wave".to_owned(),
                referral_url: Some("https://example.com/welcome".to_owned()),
                signup_template_id: None,
                nudge_template_id: None,
                completion_template_id: None,
                nudge_threshold: None,
            },
            UserId::random(),
        );
        harness.campaigns.seed(campaign.clone());
        campaign
    }

    #[actix_web::test]
    async fn api_routes_refuse_requests_without_a_token() {
        let harness = TestHarness::seeded();
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            wired_state(&harness),
        ))
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/campaigns").to_request(),
        )
        .await;

        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn signup_stays_open_and_lands_in_the_wired_store() {
        let harness = TestHarness::seeded();
        let campaign = seeded_campaign(&harness);
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            wired_state(&harness),
        ))
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/contacts")
            .set_json(json!({
                "contact": {
                    "campaign_id": campaign.public_code,
                    "email": "ada@example.com"
                }
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 200);
        assert_eq!(harness.contacts.snapshot().len(), 1);
    }

    #[actix_web::test]
    async fn authenticated_round_trip_reaches_the_same_store() {
        let harness = TestHarness::seeded();
        let campaign = seeded_campaign(&harness);
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            wired_state(&harness),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/campaigns/{}", campaign.id))
            .insert_header((AUTH_TOKEN_HEADER, harness.token()))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), 200);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["campaign"]["name"], "Launch wave");
    }

    #[actix_web::test]
    async fn responses_carry_the_trace_header() {
        let harness = TestHarness::seeded();
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            wired_state(&harness),
        ))
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;

        assert!(res.headers().contains_key("trace-id"));
    }

    #[actix_web::test]
    async fn health_probes_sit_outside_the_api_scope() {
        let harness = TestHarness::seeded();
        let health_state = web::Data::new(HealthState::new());
        let app = test::init_service(build_app(health_state.clone(), wired_state(&harness))).await;

        let live_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(live_res.status(), 200);

        let not_ready = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(not_ready.status(), 503);

        health_state.mark_ready();
        let ready_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(ready_res.status(), 200);
    }

    #[actix_rt::test]
    async fn create_server_marks_ready_once_bound() {
        let harness = TestHarness::seeded();
        let health_state = web::Data::new(HealthState::new());

        let _server = create_server(
            health_state.clone(),
            wired_state(&harness),
            SocketAddr::from(([127, 0, 0, 1], 0)),
        )
        .expect("server should bind an ephemeral port");

        assert!(health_state.is_ready());
    }
}
