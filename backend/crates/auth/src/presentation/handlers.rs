//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::extract::AuthBody;
use crate::presentation::dto::{SignInRequest, SignUpRequest, UserEnvelope, UserView};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: AuthConfig) -> Self {
        Self {
            repo,
            config: Arc::new(config),
        }
    }
}

// Manual impl: the repository itself need not be `Clone`
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /sign-up
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    AuthBody(req): AuthBody<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let credentials = req.credentials.ok_or(AuthError::BadParams)?;

    let input = SignUpInput {
        email: credentials.email,
        password: credentials.password,
        password_confirmation: credentials.password_confirmation,
    };

    let user = SignUpUseCase::new(state.repo.clone(), state.config.clone())
        .execute(input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope::from(UserView::from_user(&user))),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /sign-in
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    AuthBody(req): AuthBody<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let credentials = req.credentials.ok_or(AuthError::BadParams)?;

    let input = SignInInput {
        email: credentials.email,
        password: credentials.password,
    };

    let output = SignInUseCase::new(state.repo.clone(), state.config.clone())
        .execute(input)
        .await?;

    let view = UserView::from_user(&output.user).with_token(&output.token);
    Ok((StatusCode::CREATED, Json(UserEnvelope::from(view))))
}

// ============================================================================
// Sign Out
// ============================================================================

/// DELETE /sign-out
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
{
    SignOutUseCase::new(state.repo.clone())
        .execute(user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Current User
// ============================================================================

/// GET /me
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserEnvelope> {
    Json(UserEnvelope::from(UserView::from_user(&user)))
}
