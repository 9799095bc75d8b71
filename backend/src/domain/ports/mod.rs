//! Domain ports and supporting types for the hexagonal boundary.

mod campaign_repository;
mod contact_repository;
mod mailer;
mod user_repository;

#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
pub use campaign_repository::{CampaignRepository, CampaignRepositoryError};
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError};
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{FixtureMailer, Mailer};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
