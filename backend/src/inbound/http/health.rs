//! Liveness and readiness probes.
//!
//! The probes live outside `/api/v1` and outside the auth gate so
//! orchestrators and load balancers can hit them without credentials.
//! Readiness flips on once migrations have run and the adapters are wired;
//! liveness flips off when shutdown begins so drains surface early.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Process health shared with the HTTP workers.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Start not ready but alive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal that dependencies are wired and traffic may arrive.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Signal shutdown; liveness probes fail from here on.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Readiness as last marked.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Liveness as last marked.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Probe results must never be cached by intermediaries.
fn probe(ok: bool) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe; 200 once the service can take traffic, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready for traffic"),
        (status = 503, description = "Service is still starting up")
    ),
    security([]),
    tags = ["health"]
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_ready())
}

/// Liveness probe; 200 while running, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive"),
        (status = 503, description = "Service is shutting down")
    ),
    security([]),
    tags = ["health"]
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive())
}
