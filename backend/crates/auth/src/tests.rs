//! HTTP flow tests for the auth router
//!
//! Every test drives the real router with `oneshot` against the in-memory
//! repository.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::infra::memory::InMemoryUserRepository;
use crate::presentation::{AuthAppState, auth_router_generic};

const EMAIL: &str = "user@example.com";
const PASSWORD: &str = "correct horse battery staple";

fn app() -> (Router, Arc<InMemoryUserRepository>) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let state = AuthAppState::new(repo.clone(), AuthConfig::development());
    (auth_router_generic(state), repo)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// `application/x-www-form-urlencoded` with bracketed keys, as `$.ajax` sends it
fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=UTF-8",
        )
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_bearer(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn sign_up_body(email: &str, password: &str, confirmation: &str) -> Value {
    json!({
        "credentials": {
            "email": email,
            "password": password,
            "password_confirmation": confirmation,
        }
    })
}

fn sign_in_body(email: &str, password: &str) -> Value {
    json!({ "credentials": { "email": email, "password": password } })
}

async fn sign_up(app: &Router) -> Value {
    let (status, body) = send(app, post_json("/sign-up", sign_up_body(EMAIL, PASSWORD, PASSWORD))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn sign_in(app: &Router) -> String {
    let (status, body) = send(app, post_json("/sign-in", sign_in_body(EMAIL, PASSWORD))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["user"]["token"].as_str().unwrap().to_string()
}

async fn me_status(app: &Router, token: &str) -> StatusCode {
    send(app, with_bearer(Method::GET, "/me", token)).await.0
}

mod sign_up_tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_up_returns_public_view() {
        let (app, repo) = app();
        let body = sign_up(&app).await;

        assert_eq!(body["user"]["email"], EMAIL);
        assert!(body["user"]["id"].as_str().is_some());
        assert!(body["user"].get("token").is_none());
        assert!(!body.to_string().contains("hashed"));
        assert!(!body.to_string().contains("argon2"));

        let stored = repo
            .find_by_email(&Email::new(EMAIL).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash.as_phc_string(), PASSWORD);
        assert!(stored.password_hash.as_phc_string().starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_confirmation_mismatch_creates_nothing() {
        let (app, repo) = app();
        let (status, body) = send(
            &app,
            post_json("/sign-up", sign_up_body(EMAIL, PASSWORD, "something else")),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], 422);
        assert_eq!(body["name"], "BAD_PARAMS");
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (app, repo) = app();
        let first = sign_up(&app).await;

        let (status, body) = send(
            &app,
            post_json("/sign-up", sign_up_body("USER@example.com", "other", "other")),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["name"], "VALIDATION_FAILURE");
        assert_eq!(repo.len().await, 1);

        // The first account keeps its password
        let token = sign_in(&app).await;
        let (_, me) = send(&app, with_bearer(Method::GET, "/me", &token)).await;
        assert_eq!(me["user"]["id"], first["user"]["id"]);
    }

    #[tokio::test]
    async fn test_form_encoded_sign_up() {
        let (app, repo) = app();
        let (status, body) = send(
            &app,
            post_form(
                "/sign-up",
                "credentials%5Bemail%5D=form%40example.com\
                 &credentials%5Bpassword%5D=pw%20one\
                 &credentials%5Bpassword_confirmation%5D=pw%20one",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["email"], "form@example.com");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_form_encoded_mismatch_is_bad_params() {
        let (app, repo) = app();
        let (status, body) = send(
            &app,
            post_form(
                "/sign-up",
                "credentials%5Bemail%5D=form%40example.com\
                 &credentials%5Bpassword%5D=a\
                 &credentials%5Bpassword_confirmation%5D=b",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["name"], "BAD_PARAMS");
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_credentials_is_bad_params() {
        let (app, _) = app();
        let (status, body) = send(&app, post_json("/sign-up", json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["name"], "BAD_PARAMS");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_params() {
        let (app, _) = app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/sign-up")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["name"], "BAD_PARAMS");
    }
}

mod sign_in_tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_returns_hex_token() {
        let (app, _) = app();
        sign_up(&app).await;

        let (status, body) = send(&app, post_json("/sign-in", sign_in_body(EMAIL, PASSWORD))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["email"], EMAIL);

        let token = body["user"]["token"].as_str().unwrap();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn test_form_encoded_sign_in() {
        let (app, _) = app();
        sign_up(&app).await;

        let form = format!(
            "credentials%5Bemail%5D=user%40example.com&credentials%5Bpassword%5D={}",
            PASSWORD.replace(' ', "%20")
        );
        let (status, body) = send(&app, post_form("/sign-in", &form)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["email"], EMAIL);
        let token = body["user"]["token"].as_str().unwrap();
        assert_eq!(me_status(&app, token).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_form_encoded_wrong_password_is_bad_credentials() {
        let (app, _) = app();
        sign_up(&app).await;

        let (status, body) = send(
            &app,
            post_form(
                "/sign-in",
                "credentials%5Bemail%5D=user%40example.com&credentials%5Bpassword%5D=nope",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["name"], "BAD_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_second_sign_in_invalidates_first_token() {
        let (app, _) = app();
        sign_up(&app).await;

        let first = sign_in(&app).await;
        let second = sign_in(&app).await;

        assert_ne!(first, second);
        assert_eq!(me_status(&app, &first).await, StatusCode::UNAUTHORIZED);
        assert_eq!(me_status(&app, &second).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let (app, _) = app();
        sign_up(&app).await;

        let (wrong_status, wrong_body) =
            send(&app, post_json("/sign-in", sign_in_body(EMAIL, "nope"))).await;
        let (unknown_status, unknown_body) = send(
            &app,
            post_json("/sign-in", sign_in_body("nobody@example.com", PASSWORD)),
        )
        .await;

        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_body, unknown_body);
        assert_eq!(wrong_body["name"], "BAD_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_concurrent_sign_ins_last_write_wins() {
        let (app, _) = app();
        sign_up(&app).await;

        let (a, b) = tokio::join!(sign_in(&app), sign_in(&app));
        assert_ne!(a, b);

        let a_ok = me_status(&app, &a).await == StatusCode::OK;
        let b_ok = me_status(&app, &b).await == StatusCode::OK;
        assert!(a_ok ^ b_ok, "exactly one token should authenticate");
    }
}

mod sign_out_tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_out_revokes_token() {
        let (app, _) = app();
        sign_up(&app).await;
        let token = sign_in(&app).await;

        let res = app
            .clone()
            .oneshot(with_bearer(Method::DELETE, "/sign-out", &token))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());

        assert_eq!(me_status(&app, &token).await, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, with_bearer(Method::DELETE, "/sign-out", &token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["name"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_sign_out_without_header_is_unauthorized() {
        let (app, _) = app();
        let req = Request::builder()
            .method(Method::DELETE)
            .uri("/sign-out")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], 401);
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthorized() {
        let (app, _) = app();
        sign_up(&app).await;
        let token = sign_in(&app).await;

        let req = Request::builder()
            .method(Method::GET)
            .uri("/me")
            .header(header::AUTHORIZATION, format!("Basic {token}"))
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

mod round_trip_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_round_trip() {
        let (app, _) = app();
        let created = sign_up(&app).await;
        let token = sign_in(&app).await;

        let (status, me) = send(&app, with_bearer(Method::GET, "/me", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["user"]["id"], created["user"]["id"]);
        assert_eq!(me["user"]["email"], EMAIL);
        assert!(me["user"].get("token").is_none());

        let (status, _) = send(&app, with_bearer(Method::DELETE, "/sign-out", &token)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        assert_eq!(me_status(&app, &token).await, StatusCode::UNAUTHORIZED);
    }
}
