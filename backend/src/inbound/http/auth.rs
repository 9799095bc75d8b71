//! Token authentication for the private surface.
//!
//! Handlers opt into authentication by taking [`AuthenticatedUser`] as an
//! extractor argument; extraction runs the domain gate against the
//! `x-auth-token` header and aborts the request with `401 Unauthorized`
//! before the handler body runs. The gate re-verifies and re-resolves on
//! every request; nothing about a token is cached between calls.

use actix_web::{FromRequest, HttpRequest, dev::Payload, get, web};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Name of the request header carrying the signed token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Identity resolved from the `x-auth-token` header.
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    /// Consume the extractor, yielding the resolved user.
    #[must_use]
    pub fn into_inner(self) -> User {
        self.0
    }

    /// Borrow the resolved user.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = req
            .headers()
            .get(AUTH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        Box::pin(async move {
            let Some(state) = state else {
                return Err(Error::internal("HttpState is not registered on the app").into());
            };
            let user = state.auth.authenticate(token.as_deref()).await?;
            Ok(Self(user))
        })
    }
}

/// Identity envelope returned by the verification endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    /// The resolved identity, credential hash excluded.
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Validate the presented token and echo the resolved identity.
#[utoipa::path(
    get,
    path = "/api/v1/auth",
    responses(
        (status = 200, description = "Token is valid", body = UserEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    security(("token" = [])),
    tags = ["auth"],
    operation_id = "verifyToken"
)]
#[get("/auth")]
pub async fn verify(user: AuthenticatedUser) -> ApiResult<web::Json<UserEnvelope>> {
    Ok(web::Json(UserEnvelope {
        user: user.into_inner(),
    }))
}
