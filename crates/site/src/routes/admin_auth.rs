//! Admin login, signup and sign-out.
//!
//! Credentials are exchanged with the waitlist backend for a bearer token,
//! which is kept in the session via [`AdminSession`]. Failures re-render
//! the form with the backend's message; the typed email is kept, the
//! password never is.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use creatorum_core::admin::{can_submit_login, can_submit_signup};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb, clear_sentry_user};
use crate::filters;
use crate::middleware::AdminSession;
use crate::routes::{DASHBOARD_PATH, LOGIN_PATH};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub invite_code: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Admin login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
}

/// Admin signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/signup.html")]
pub struct SignupTemplate {
    pub email: String,
    pub invite_code: String,
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        email: String::new(),
        error: None,
    }
}

/// Handle login form submission.
///
/// Stores the issued token and sends the admin to the dashboard.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    admin: AdminSession,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if !can_submit_login(&form.email, &form.password, false) {
        return Ok(LoginTemplate {
            email: form.email,
            error: None,
        }
        .into_response());
    }

    let password = SecretString::from(form.password);
    match state.backend().login_admin(&form.email, &password).await {
        Ok(token) => {
            admin.store_token(&token).await?;
            add_breadcrumb("auth", "Admin signed in", None);
            tracing::info!("Admin login succeeded");
            Ok(Redirect::to(DASHBOARD_PATH).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Admin login failed");
            Ok(LoginTemplate {
                email: form.email,
                error: Some(e.to_string()),
            }
            .into_response())
        }
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page() -> impl IntoResponse {
    SignupTemplate {
        email: String::new(),
        invite_code: String::new(),
        error: None,
    }
}

/// Handle signup form submission.
///
/// On success the same credentials are used to log in straight away. If
/// that second step fails for any reason the admin lands on the login page.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn signup(
    State(state): State<AppState>,
    admin: AdminSession,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    if !can_submit_signup(&form.email, &form.password, &form.invite_code, false) {
        return Ok(SignupTemplate {
            email: form.email,
            invite_code: form.invite_code,
            error: None,
        }
        .into_response());
    }

    let password = SecretString::from(form.password);
    if let Err(e) = state
        .backend()
        .signup_admin(&form.email, &password, &form.invite_code)
        .await
    {
        tracing::warn!(error = %e, "Admin signup failed");
        return Ok(SignupTemplate {
            email: form.email,
            invite_code: form.invite_code,
            error: Some(e.to_string()),
        }
        .into_response());
    }

    add_breadcrumb("auth", "Admin account created", None);
    tracing::info!("Admin signup succeeded, signing in");

    match state.backend().login_admin(&form.email, &password).await {
        Ok(token) => {
            admin.store_token(&token).await?;
            Ok(Redirect::to(DASHBOARD_PATH).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login after signup failed");
            Ok(Redirect::to(LOGIN_PATH).into_response())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out: forget the token and the dashboard, then show the login page.
#[instrument(skip_all)]
pub async fn logout(admin: AdminSession) -> Result<Redirect> {
    admin.clear().await?;
    clear_sentry_user();
    add_breadcrumb("auth", "Admin signed out", None);
    Ok(Redirect::to(LOGIN_PATH))
}
