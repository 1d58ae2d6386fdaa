//! `GET /ably-auth`

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};

use crate::config::RealtimeConfig;
use crate::error::RealtimeResult;
use crate::token_request::{TokenParams, TokenRequest};

pub fn realtime_router(config: RealtimeConfig) -> Router {
    Router::new()
        .route("/ably-auth", get(ably_auth))
        .with_state(Arc::new(config))
}

pub async fn ably_auth(
    State(config): State<Arc<RealtimeConfig>>,
) -> RealtimeResult<Json<TokenRequest>> {
    let key = config.api_key()?;
    let params = TokenParams::from_config(&config)?;

    tracing::info!(client_id = %params.client_id, "Sending signed token request");
    let token_request = TokenRequest::create(&key, &params);

    Ok(Json(token_request))
}
