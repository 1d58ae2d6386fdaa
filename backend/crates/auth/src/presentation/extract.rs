//! Request body extraction
//!
//! Auth routes take either a JSON body or an
//! `application/x-www-form-urlencoded` body with bracketed nested keys
//! (`credentials[email]=...`), the encoding jQuery's `$.ajax` uses by default.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};
use serde::de::DeserializeOwned;

use crate::error::AuthError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// `credentials[email]` needs two levels
const FORM_MAX_DEPTH: usize = 5;

/// JSON or nested form body; any rejection is [`AuthError::BadParams`]
pub struct AuthBody<T>(pub T);

impl<S, T> FromRequest<S> for AuthBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_form(req.headers()) {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(reason = %rejection.body_text(), "Rejected form body");
            AuthError::BadParams
        })?;

        // Non-strict mode also accepts percent-encoded brackets (`%5B`, `%5D`)
        serde_qs::Config::new(FORM_MAX_DEPTH, false)
            .deserialize_bytes(&bytes)
            .map(Self)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Rejected form body");
                AuthError::BadParams
            })
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use crate::presentation::dto::SignUpRequest;

    fn form_request(body: &'static str, content_type: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_is_form() {
        let mut headers = HeaderMap::new();
        assert!(!is_form(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=UTF-8".parse().unwrap(),
        );
        assert!(is_form(&headers));

        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert!(!is_form(&headers));
    }

    #[tokio::test]
    async fn test_nested_form_keys() {
        let req = form_request(
            "credentials%5Bemail%5D=a%40example.com&credentials[password]=pw&credentials%5Bpassword_confirmation%5D=pw",
            FORM_CONTENT_TYPE,
        );

        let AuthBody(body) = AuthBody::<SignUpRequest>::from_request(req, &()).await.unwrap();
        let credentials = body.credentials.unwrap();
        assert_eq!(credentials.email.as_deref(), Some("a@example.com"));
        assert_eq!(credentials.password.as_deref(), Some("pw"));
        assert_eq!(credentials.password_confirmation.as_deref(), Some("pw"));
    }

    #[tokio::test]
    async fn test_form_without_credentials_parses_to_none() {
        let req = form_request("other=1", FORM_CONTENT_TYPE);
        let AuthBody(body) = AuthBody::<SignUpRequest>::from_request(req, &()).await.unwrap();
        assert!(body.credentials.is_none());
    }

    #[tokio::test]
    async fn test_unsupported_content_type_is_bad_params() {
        let req = form_request("credentials=x", "text/plain");
        let result = AuthBody::<SignUpRequest>::from_request(req, &()).await;
        assert!(matches!(result, Err(AuthError::BadParams)));
    }
}
