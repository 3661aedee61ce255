//! Admin session extractor.
//!
//! The admin bearer token issued by the backend is the only credential this
//! site holds. It lives in the tower-sessions session under a fixed key and
//! is handed to handlers as an explicit [`AdminSession`] rather than read
//! from the session ad hoc.

use axum::{extract::FromRequestParts, http::request::Parts};
use creatorum_core::dashboard::DashboardView;
use secrecy::{ExposeSecret, SecretString};
use tower_sessions::Session;

use crate::error::AppError;

/// Session keys for admin state.
pub mod session_keys {
    /// Key for the backend-issued admin bearer token.
    pub const ADMIN_TOKEN: &str = "creat_admin_token";

    /// Key for the mounted dashboard view (entries, offset, count).
    pub const DASHBOARD_VIEW: &str = "creat_admin_dashboard";
}

/// Handle to the admin's token and dashboard state.
///
/// Extracting it never fails for a signed-out visitor; use
/// [`AdminSession::token`] to find out whether anyone is signed in.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(admin: AdminSession) -> Result<impl IntoResponse> {
///     match admin.token().await? {
///         Some(token) => { /* call the backend */ }
///         None => { /* show the login prompt */ }
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AdminSession {
    session: Session,
}

impl AdminSession {
    /// Wrap an existing session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// The stored bearer token, if an admin is signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn token(&self) -> Result<Option<SecretString>, AppError> {
        let token: Option<String> = self.session.get(session_keys::ADMIN_TOKEN).await?;
        Ok(token.map(SecretString::from))
    }

    /// Persist a freshly issued token, replacing any previous admin state.
    ///
    /// The session id is rotated so a pre-login cookie cannot be reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn store_token(&self, token: &SecretString) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.clear_view().await?;
        self.session
            .insert(session_keys::ADMIN_TOKEN, token.expose_secret())
            .await?;
        Ok(())
    }

    /// Forget the token and the dashboard view (sign-out or rejected token).
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.session
            .remove::<String>(session_keys::ADMIN_TOKEN)
            .await?;
        self.clear_view().await
    }

    /// The mounted dashboard view, if the dashboard has loaded before.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn view(&self) -> Result<Option<DashboardView>, AppError> {
        Ok(self.session.get(session_keys::DASHBOARD_VIEW).await?)
    }

    /// Save the dashboard view for the next request.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn store_view(&self, view: &DashboardView) -> Result<(), AppError> {
        self.session
            .insert(session_keys::DASHBOARD_VIEW, view)
            .await?;
        Ok(())
    }

    /// Drop the dashboard view so the next visit reloads from the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn clear_view(&self) -> Result<(), AppError> {
        self.session
            .remove::<DashboardView>(session_keys::DASHBOARD_VIEW)
            .await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        Ok(Self::new(session))
    }
}
