//! Auth Middleware
//!
//! Bearer token authentication for protected routes.

use axum::extract::{ConnectInfo, FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::header::{extract_bearer_token, extract_client_ip};
use std::net::SocketAddr;

use crate::application::AuthenticateUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// The user resolved from the bearer token, stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}

/// Middleware that requires a valid bearer token
///
/// Missing header, wrong scheme, malformed and unknown tokens are all
/// rejected with the same 401.
pub async fn require_bearer<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let client_ip = extract_client_ip(req.headers(), direct_ip);

    let Some(token) = extract_bearer_token(req.headers()).map(str::to_owned) else {
        tracing::debug!(client_ip = ?client_ip, "Missing bearer token");
        return Err(AuthError::Unauthorized);
    };

    let user = AuthenticateUseCase::new(state.repo.clone())
        .execute(&token)
        .await?
        .ok_or(AuthError::Unauthorized)?;

    tracing::debug!(user_id = %user.user_id, client_ip = ?client_ip, "Bearer token accepted");

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}
