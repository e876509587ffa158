//! Admin session lifecycle: login, logout and the login gate on mutations.

mod common;

use axum::http::StatusCode;
use common::{TestApp, ADMIN_PASSWORD, ADMIN_USERNAME, SESSION_TOKEN};

#[tokio::test]
async fn health_is_ok() {
    let app = TestApp::logged_out().await;

    let resp = app.get("/health").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, r#"{"status":"ok"}"#);
}

// ===========================================================================
// Login
// ===========================================================================

#[tokio::test]
async fn login_page_renders_the_form() {
    let app = TestApp::logged_out().await;

    let resp = app.get("/login").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("action=\"/login\""));
    assert!(resp.body.contains("Continue without Logging In"));
}

#[tokio::test]
async fn login_page_shows_the_redirect_notice() {
    let app = TestApp::logged_out().await;

    let resp = app.get("/login?warning=Please+login+to+continue").await;

    assert!(resp.body.contains("Please login to continue"));
}

#[tokio::test]
async fn login_page_sends_active_sessions_home() {
    let app = TestApp::logged_in().await;

    let resp = app.get("/login").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/"));
}

#[tokio::test]
async fn login_valid_credentials() {
    let app = TestApp::logged_out().await;

    let resp = app
        .post_form(
            "/login",
            &[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)],
        )
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/?success=Logged+in"));
    assert!(app.state.auth.is_logged_in());
    assert_eq!(app.state.auth.token().as_deref(), Some(SESSION_TOKEN));
}

#[tokio::test]
async fn login_invalid_credentials() {
    let app = TestApp::logged_out().await;

    let resp = app
        .post_form("/login", &[("username", ADMIN_USERNAME), ("password", "nope")])
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(
        resp.location.as_deref(),
        Some("/login?error=Invalid+credentials")
    );
    assert!(!app.state.auth.is_logged_in());
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = TestApp::logged_out().await;

    let resp = app
        .post_form("/login", &[("username", ADMIN_USERNAME), ("password", "")])
        .await;

    assert_eq!(
        resp.location.as_deref(),
        Some("/login?error=Username+and+password+are+required")
    );
    assert!(!app.backend.called("POST /api/v1/admin/login"));
}

#[tokio::test]
async fn requests_carry_the_session_token() {
    let app = TestApp::logged_in().await;

    app.get("/reports").await;

    assert_eq!(
        app.backend.last_authorization(),
        Some(format!("Bearer {SESSION_TOKEN}"))
    );
}

// ===========================================================================
// Logout
// ===========================================================================

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::logged_in().await;

    let resp = app.post_form("/logout", &[]).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/login?success=Logged+out"));
    assert!(app.backend.called("GET /api/v1/admin/logout"));
    assert!(!app.state.auth.is_logged_in());

    let page = app.get("/").await;
    assert!(page.body.contains("<a href=\"/login\">Login</a>"));
}

#[tokio::test]
async fn logout_survives_an_api_failure() {
    let app = TestApp::logged_in().await;
    app.backend.fail("logout");

    let resp = app.post_form("/logout", &[]).await;

    assert_eq!(resp.location.as_deref(), Some("/login?success=Logged+out"));
    assert!(!app.state.auth.is_logged_in());
}
