//! User identity data model.
//!
//! Users are created by an external signup flow and never mutated here; the
//! auth gate resolves token subjects to these records. The stored credential
//! hash is a persistence-layer detail and deliberately absent from this type,
//! so no adapter can leak it.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Application user as exposed to adapters.
///
/// ## Invariants
/// - Never carries the credential hash; persistence adapters must drop it
///   when converting rows into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier, also the token subject.
    pub id: UserId,
    /// Display name, when the signup flow captured one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact address the user signed up with.
    pub email: String,
}
