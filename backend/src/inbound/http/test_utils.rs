//! Test helpers for inbound HTTP components.
//!
//! Handler tests run against a real [`HttpState`] backed by in-memory stub
//! adapters, so the full extractor, workflow, and error-mapping path is
//! exercised without a database or mail vendor.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header};

use crate::domain::auth::{AuthGate, TokenClaims};
use crate::domain::ports::{
    CampaignRepository, CampaignRepositoryError, ContactRepository, ContactRepositoryError,
    Mailer, UserRepository, UserRepositoryError,
};
use crate::domain::signup::SignupService;
use crate::domain::{Campaign, CampaignId, Contact, ContactId, MailMessage, User, UserId};
use crate::inbound::http::state::HttpState;

/// Signing secret shared by the harness gate and [`mint_token`].
pub const TEST_SECRET: &str = "handler-test-secret";

/// Mint a token for `user_id`, valid for an hour.
pub fn mint_token(user_id: &UserId) -> String {
    let claims = TokenClaims {
        sub: user_id.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token encodes")
}

/// In-memory user store for resolving seeded identities.
#[derive(Default)]
pub struct StubUserRepository {
    users: Mutex<Vec<User>>,
}

impl StubUserRepository {
    pub fn seed(&self, user: User) {
        self.users.lock().expect("user lock").push(user);
    }
}

#[async_trait]
impl UserRepository for StubUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.lock().expect("user lock");
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }
}

/// In-memory campaign store.
#[derive(Default)]
pub struct StubCampaignRepository {
    campaigns: Mutex<Vec<Campaign>>,
}

impl StubCampaignRepository {
    pub fn seed(&self, campaign: Campaign) {
        self.campaigns.lock().expect("campaign lock").push(campaign);
    }

    pub fn snapshot(&self) -> Vec<Campaign> {
        self.campaigns.lock().expect("campaign lock").clone()
    }
}

#[async_trait]
impl CampaignRepository for StubCampaignRepository {
    async fn insert(&self, campaign: &Campaign) -> Result<(), CampaignRepositoryError> {
        self.campaigns
            .lock()
            .expect("campaign lock")
            .push(campaign.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Campaign>, CampaignRepositoryError> {
        Ok(self.snapshot())
    }

    async fn find_by_id(
        &self,
        id: &CampaignId,
    ) -> Result<Option<Campaign>, CampaignRepositoryError> {
        let campaigns = self.campaigns.lock().expect("campaign lock");
        Ok(campaigns.iter().find(|c| c.id == *id).cloned())
    }

    async fn find_by_public_code(
        &self,
        code: &str,
    ) -> Result<Option<Campaign>, CampaignRepositoryError> {
        let campaigns = self.campaigns.lock().expect("campaign lock");
        Ok(campaigns.iter().find(|c| c.public_code == code).cloned())
    }

    async fn save(&self, campaign: &Campaign) -> Result<(), CampaignRepositoryError> {
        let mut campaigns = self.campaigns.lock().expect("campaign lock");
        if let Some(slot) = campaigns.iter_mut().find(|c| c.id == campaign.id) {
            *slot = campaign.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &CampaignId) -> Result<(), CampaignRepositoryError> {
        self.campaigns
            .lock()
            .expect("campaign lock")
            .retain(|c| c.id != *id);
        Ok(())
    }
}

/// In-memory contact store enforcing the `(email, campaign_id)` unique index.
#[derive(Default)]
pub struct StubContactRepository {
    contacts: Mutex<Vec<Contact>>,
}

impl StubContactRepository {
    pub fn seed(&self, contact: Contact) {
        self.contacts.lock().expect("contact lock").push(contact);
    }

    pub fn snapshot(&self) -> Vec<Contact> {
        self.contacts.lock().expect("contact lock").clone()
    }

    pub fn by_id(&self, id: ContactId) -> Option<Contact> {
        self.snapshot().into_iter().find(|c| c.id == id)
    }
}

#[async_trait]
impl ContactRepository for StubContactRepository {
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut contacts = self.contacts.lock().expect("contact lock");
        if contacts
            .iter()
            .any(|c| c.email == contact.email && c.campaign_id == contact.campaign_id)
        {
            return Err(ContactRepositoryError::duplicate(format!(
                "Key (email, campaign_id)=({}, {}) already exists.",
                contact.email, contact.campaign_id,
            )));
        }
        contacts.push(contact.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        Ok(self.by_id(*id))
    }

    async fn find_by_referral_code(
        &self,
        code: &str,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let contacts = self.contacts.lock().expect("contact lock");
        Ok(contacts.iter().find(|c| c.referral_code == code).cloned())
    }

    async fn save(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut contacts = self.contacts.lock().expect("contact lock");
        if let Some(slot) = contacts.iter_mut().find(|c| c.id == contact.id) {
            *slot = contact.clone();
        } else {
            contacts.push(contact.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: &ContactId) -> Result<(), ContactRepositoryError> {
        self.contacts
            .lock()
            .expect("contact lock")
            .retain(|c| c.id != *id);
        Ok(())
    }
}

/// Mailer that records deliveries instead of dispatching them.
#[derive(Default)]
pub struct RecordingMailer {
    messages: Mutex<Vec<MailMessage>>,
}

impl RecordingMailer {
    pub fn messages(&self) -> Vec<MailMessage> {
        self.messages.lock().expect("mailer lock").clone()
    }
}

impl Mailer for RecordingMailer {
    fn deliver(&self, message: MailMessage) {
        self.messages.lock().expect("mailer lock").push(message);
    }
}

/// Fully wired [`HttpState`] over stub adapters, with the stubs kept
/// accessible for seeding and assertions.
pub struct TestHarness {
    pub users: Arc<StubUserRepository>,
    pub campaigns: Arc<StubCampaignRepository>,
    pub contacts: Arc<StubContactRepository>,
    pub mailer: Arc<RecordingMailer>,
    pub state: HttpState,
    /// Identity seeded into the user store; [`mint_token`] on its id passes
    /// the gate.
    pub user: User,
}

impl TestHarness {
    /// Build a harness with one resolvable user.
    pub fn seeded() -> Self {
        let user = User {
            id: UserId::random(),
            name: Some("Casey".to_owned()),
            email: "casey@example.com".to_owned(),
        };
        let users = Arc::new(StubUserRepository::default());
        users.seed(user.clone());
        let campaigns = Arc::new(StubCampaignRepository::default());
        let contacts = Arc::new(StubContactRepository::default());
        let mailer = Arc::new(RecordingMailer::default());

        let auth = Arc::new(AuthGate::new(
            TEST_SECRET,
            Arc::clone(&users) as Arc<dyn UserRepository>,
        ));
        let signup = Arc::new(SignupService::new(
            Arc::clone(&campaigns) as Arc<dyn CampaignRepository>,
            Arc::clone(&contacts) as Arc<dyn ContactRepository>,
            Arc::clone(&mailer) as Arc<dyn Mailer>,
        ));
        let state = HttpState::new(
            auth,
            signup,
            Arc::clone(&campaigns) as Arc<dyn CampaignRepository>,
            Arc::clone(&contacts) as Arc<dyn ContactRepository>,
        );

        Self {
            users,
            campaigns,
            contacts,
            mailer,
            state,
            user,
        }
    }

    /// A token that passes the harness gate.
    pub fn token(&self) -> String {
        mint_token(&self.user.id)
    }
}
