//! Admin login, signup and sign-out flows.

use creatorum_integration_tests::{
    ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_TOKEN, MockBackend, Recorded, Reply, TestSite, location,
    reply, reply_raw,
};
use reqwest::StatusCode;
use serde_json::json;

/// A healthy backend: accepts the test credentials and serves an empty list.
fn healthy(req: &Recorded) -> Reply {
    match req.path.as_str() {
        "/admin/signup" => reply(201, json!({"ok": true})),
        "/admin/login" => reply(200, json!({"token": ADMIN_TOKEN})),
        "/admin/me" => reply(200, json!({"admin": {"email": ADMIN_EMAIL}})),
        "/admin/waitlist/count" => reply(200, json!({"count": 0})),
        "/admin/waitlist" => reply(200, json!({"entries": []})),
        _ => reply(404, json!({"error": "not found"})),
    }
}

#[tokio::test]
async fn test_login_stores_token_and_redirects_to_dashboard() {
    let backend = MockBackend::start(healthy).await;
    let site = TestSite::start(&backend.url).await;

    let response = site.login().await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/admin"));

    let sent = backend.requests_to("/admin/login");
    assert_eq!(
        sent[0].json(),
        json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})
    );

    let html = site.page("/admin").await;
    assert!(html.contains(&format!("Signed in as {ADMIN_EMAIL}")));

    let me = backend.requests_to("/admin/me");
    assert_eq!(me.len(), 1);
    assert_eq!(
        me[0].authorization.as_deref(),
        Some(format!("Bearer {ADMIN_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_login_failure_shows_error_and_keeps_email() {
    let backend =
        MockBackend::start(|_| reply(401, json!({"error": "Invalid credentials"}))).await;
    let site = TestSite::start(&backend.url).await;

    let response = site.login().await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();

    assert!(html.contains("Invalid credentials"));
    assert!(html.contains(&format!("value=\"{ADMIN_EMAIL}\"")));
    assert!(!html.contains(ADMIN_PASSWORD));

    // No token was stored
    assert!(site.page("/admin").await.contains("Please log in to continue."));
}

#[tokio::test]
async fn test_login_without_token_is_unexpected_response() {
    let backend = MockBackend::start(|_| reply(200, json!({"ok": true}))).await;
    let site = TestSite::start(&backend.url).await;

    let html = site.login().await.text().await.unwrap();
    assert!(html.contains("Unexpected response from server."));
}

#[tokio::test]
async fn test_login_status_fallback_message() {
    let backend = MockBackend::start(|_| reply_raw(500, "oops")).await;
    let site = TestSite::start(&backend.url).await;

    let html = site.login().await.text().await.unwrap();
    assert!(html.contains("Login failed (500)."));
}

#[tokio::test]
async fn test_empty_login_form_is_not_sent() {
    let backend = MockBackend::start(healthy).await;
    let site = TestSite::start(&backend.url).await;

    let response = site
        .post_form("/admin/login", &[("email", "  "), ("password", "secret")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_signup_logs_in_and_redirects_to_dashboard() {
    let backend = MockBackend::start(healthy).await;
    let site = TestSite::start(&backend.url).await;

    let response = site
        .post_form(
            "/admin/signup",
            &[
                ("email", ADMIN_EMAIL),
                ("password", ADMIN_PASSWORD),
                ("invite_code", "CREAT-2026"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/admin"));

    let signup = backend.requests_to("/admin/signup");
    assert_eq!(
        signup[0].json(),
        json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD, "inviteCode": "CREAT-2026"})
    );
    assert_eq!(backend.requests_to("/admin/login").len(), 1);
    assert!(site.page("/admin").await.contains("Signed in as"));
}

#[tokio::test]
async fn test_signup_with_failed_auto_login_redirects_to_login() {
    let backend = MockBackend::start(|req| match req.path.as_str() {
        "/admin/signup" => reply(201, json!({})),
        _ => reply(503, json!({"error": "Login temporarily disabled"})),
    })
    .await;
    let site = TestSite::start(&backend.url).await;

    let response = site
        .post_form(
            "/admin/signup",
            &[
                ("email", ADMIN_EMAIL),
                ("password", ADMIN_PASSWORD),
                ("invite_code", "CREAT-2026"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/admin/login"));
    assert!(site.page("/admin").await.contains("Please log in to continue."));
}

#[tokio::test]
async fn test_signup_failure_uses_status_fallback() {
    let backend = MockBackend::start(|_| reply_raw(403, "forbidden")).await;
    let site = TestSite::start(&backend.url).await;

    let html = site
        .post_form(
            "/admin/signup",
            &[
                ("email", ADMIN_EMAIL),
                ("password", ADMIN_PASSWORD),
                ("invite_code", "WRONG"),
            ],
        )
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("Signup failed (403)."));
    assert!(html.contains("value=\"WRONG\""));
    assert!(backend.requests_to("/admin/login").is_empty());
}

#[tokio::test]
async fn test_signup_requires_eight_character_password() {
    let backend = MockBackend::start(healthy).await;
    let site = TestSite::start(&backend.url).await;

    site.post_form(
        "/admin/signup",
        &[
            ("email", ADMIN_EMAIL),
            ("password", "short"),
            ("invite_code", "CREAT-2026"),
        ],
    )
    .await;

    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let backend = MockBackend::start(healthy).await;
    let site = TestSite::start(&backend.url).await;
    site.login().await;
    assert!(site.page("/admin").await.contains("Signed in as"));

    let response = site.post_form("/admin/logout", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/admin/login"));

    assert!(site.page("/admin").await.contains("Please log in to continue."));
}
