//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! This adapter is read-only: users are created by an external signup flow,
//! and the auth gate resolves token subjects through it. The credential hash
//! column is never selected, so it cannot leak into the domain type.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{User, UserId};

use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user repository errors.
fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain user repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            UserRepositoryError::connection(info.message().to_owned())
        }
        other => UserRepositoryError::query(other.to_string()),
    }
}

/// Convert a database row to a domain user.
fn user_from_row(row: UserRow) -> User {
    User {
        id: UserId::from(row.id),
        name: row.name,
        email: row.email,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(user_from_row))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, UserRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn stray_diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }

    #[rstest]
    fn rows_convert_without_credential_fields() {
        let id = Uuid::new_v4();
        let user = user_from_row(UserRow {
            id,
            name: Some("Ada".to_owned()),
            email: "ada@example.com".to_owned(),
        });

        assert_eq!(user.id, UserId::from(id));
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert_eq!(user.email, "ada@example.com");
    }
}
