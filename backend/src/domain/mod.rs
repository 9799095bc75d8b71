//! Domain model for referral campaigns.
//!
//! Purpose: hold the entities, the signup workflow, and the ports through
//! which adapters reach the outside world. Types here are serde-annotated
//! where they form wire or storage contracts, and each documents its own
//! invariants; nothing in this tree touches HTTP or SQL directly.
//!
//! Public surface:
//! - `Campaign`, `Contact`, `User` — the aggregates.
//! - `SignupService` — the registration workflow.
//! - `AuthGate` — token verification in front of the private surface.
//! - `Error` / `ErrorCode` — the client-facing error payload.
//! - `ports` — traits implemented by outbound adapters.

pub mod auth;
pub mod campaign;
pub mod contact;
pub mod error;
pub mod notifications;
pub mod ports;
pub mod signup;
pub mod slug;
pub mod trace_id;
pub mod user;

pub use self::auth::AuthGate;
pub use self::campaign::{Campaign, CampaignDraft, CampaignId, CampaignPatch};
pub use self::contact::{Contact, ContactDetails, ContactId, ContactPatch};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notifications::MailMessage;
pub use self::signup::{SignupRequest, SignupService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
