//! Shared HTTP adapter state.
//!
//! Handlers accept this bundle via `actix_web::web::Data`, so they depend
//! only on the domain's gate, workflow, and ports and stay testable with
//! in-memory stand-ins.

use std::sync::Arc;

use crate::domain::auth::AuthGate;
use crate::domain::ports::{CampaignRepository, ContactRepository};
use crate::domain::signup::SignupService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Token verification in front of the private surface.
    pub auth: Arc<AuthGate>,
    /// Contact registration workflow.
    pub signup: Arc<SignupService>,
    /// Campaign CRUD storage.
    pub campaigns: Arc<dyn CampaignRepository>,
    /// Contact read/update/delete storage.
    pub contacts: Arc<dyn ContactRepository>,
}

impl HttpState {
    /// Bundle the collaborators handlers need.
    pub fn new(
        auth: Arc<AuthGate>,
        signup: Arc<SignupService>,
        campaigns: Arc<dyn CampaignRepository>,
        contacts: Arc<dyn ContactRepository>,
    ) -> Self {
        Self {
            auth,
            signup,
            campaigns,
            contacts,
        }
    }
}
