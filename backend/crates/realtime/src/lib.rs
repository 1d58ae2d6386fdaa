//! Realtime Token Requests
//!
//! Signs Ably `TokenRequest`s locally so browser clients can obtain a
//! realtime token without ever seeing the API key secret.
//!
//! - `config` - API key parsing and token parameters
//! - `token_request` - canonical signing string and MAC
//! - `handler` - `GET /ably-auth`

pub mod config;
pub mod error;
pub mod handler;
pub mod token_request;

pub use config::{AblyApiKey, RealtimeConfig};
pub use error::{RealtimeError, RealtimeResult};
pub use handler::realtime_router;
pub use token_request::{TokenParams, TokenRequest};
