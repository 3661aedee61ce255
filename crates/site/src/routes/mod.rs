//! HTTP route handlers for the Creatorum site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Landing page (?waitlist=open opens the modal)
//! POST /waitlist           - Waitlist modal submission
//!
//! # Admin
//! GET  /admin              - Dashboard (?q= filter, ?refresh=1 reload)
//! POST /admin/load-more    - Append the next page of entries
//! GET  /admin/login        - Login page
//! POST /admin/login        - Login action
//! GET  /admin/signup       - Signup page
//! POST /admin/signup       - Signup action
//! POST /admin/logout       - Sign out
//! ```

pub mod admin_auth;
pub mod dashboard;
pub mod home;
pub mod waitlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Where signed-out admins are sent.
pub const LOGIN_PATH: &str = "/admin/login";

/// The dashboard page.
pub const DASHBOARD_PATH: &str = "/admin";

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(DASHBOARD_PATH, get(dashboard::show))
        .route("/admin/load-more", post(dashboard::load_more))
        .route(
            LOGIN_PATH,
            get(admin_auth::login_page).post(admin_auth::login),
        )
        .route(
            "/admin/signup",
            get(admin_auth::signup_page).post(admin_auth::signup),
        )
        .route("/admin/logout", post(admin_auth::logout))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/waitlist", post(waitlist::submit))
        .merge(admin_routes())
}
