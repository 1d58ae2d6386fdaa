//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_router_generic(AuthAppState::new(Arc::new(repo), config))
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/sign-out", delete(handlers::sign_out::<R>))
        .route("/me", get(handlers::current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer::<R>,
        ));

    Router::new()
        .route("/sign-up", post(handlers::sign_up::<R>))
        .route("/sign-in", post(handlers::sign_in::<R>))
        .merge(protected)
        .with_state(state)
}
