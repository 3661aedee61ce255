//! Waitlist backend API client.
//!
//! Thin JSON-over-HTTP wrapper around the external waitlist service:
//!
//! ```text
//! POST /waitlist               {fullName, email, role, goals[]}
//! POST /admin/signup           {email, password, inviteCode}
//! POST /admin/login            {email, password} -> {token}
//! GET  /admin/me               Bearer -> {admin: {email}}
//! GET  /admin/waitlist/count   Bearer -> {count}
//! GET  /admin/waitlist         Bearer, ?limit=&offset= -> {entries}
//! ```
//!
//! Error bodies are `{error: string}` when the backend manages to produce
//! one. Bodies that are not JSON are tolerated: the message then falls back
//! to one naming the HTTP status. Nothing is retried. Transport errors are
//! logged here in full; callers only see [`ApiError::Network`]'s generic text.

mod error;

pub use error::ApiError;

use creatorum_core::WaitlistEntry;
use creatorum_core::dashboard::WaitlistPage;
use creatorum_core::waitlist::WaitlistSubmission;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::instrument;

use crate::config::ApiConfig;

/// Client for the waitlist backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("creatorum-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Absolute URL for an API path (`path` starts with `/`).
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Submit a waitlist signup.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for any non-2xx response.
    #[instrument(skip(self, submission), fields(role = %submission.role))]
    pub async fn join_waitlist(&self, submission: &WaitlistSubmission) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("/waitlist"))
            .json(submission)
            .send()
            .await
            .map_err(unreachable_backend)?;

        check(response, "Request").await?;
        tracing::debug!("Waitlist signup accepted");
        Ok(())
    }

    /// Create an admin account. The invite code is passed through untouched.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for any non-2xx response.
    #[instrument(skip(self, password, invite_code))]
    pub async fn signup_admin(
        &self,
        email: &str,
        password: &SecretString,
        invite_code: &str,
    ) -> Result<(), ApiError> {
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
            "inviteCode": invite_code,
        });

        let response = self
            .client
            .post(self.endpoint("/admin/signup"))
            .json(&body)
            .send()
            .await
            .map_err(unreachable_backend)?;

        check(response, "Signup").await?;
        Ok(())
    }

    /// Exchange admin credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for a non-2xx response and
    /// `ApiError::UnexpectedResponse` when the body has no string `token`.
    #[instrument(skip(self, password))]
    pub async fn login_admin(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<SecretString, ApiError> {
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let response = self
            .client
            .post(self.endpoint("/admin/login"))
            .json(&body)
            .send()
            .await
            .map_err(unreachable_backend)?;

        let body = check(response, "Login").await?;
        token_from(body.as_ref()).ok_or(ApiError::UnexpectedResponse)
    }

    /// Identity check. Returns the admin's email when the backend reports one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for any non-2xx response.
    #[instrument(skip_all)]
    pub async fn current_admin(&self, token: &SecretString) -> Result<Option<String>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/admin/me"))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(unreachable_backend)?;

        if !response.status().is_success() {
            tracing::info!(status = response.status().as_u16(), "Admin token rejected");
            return Err(ApiError::Unauthorized);
        }

        let body = read_json(response).await;
        Ok(admin_email_from(body.as_ref()))
    }

    /// Total number of waitlist entries. `None` when the body has no number.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for any non-2xx response.
    #[instrument(skip_all)]
    pub async fn waitlist_count(&self, token: &SecretString) -> Result<Option<u64>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/admin/waitlist/count"))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(unreachable_backend)?;

        let body = check(response, "Count").await?;
        Ok(count_from(body.as_ref()))
    }

    /// One page of waitlist entries, newest first as the backend orders them.
    ///
    /// Rows that fail to decode are left out of `entries` but still counted
    /// in `received`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for any non-2xx response.
    #[instrument(skip(self, token))]
    pub async fn waitlist_page(
        &self,
        token: &SecretString,
        limit: u32,
        offset: usize,
    ) -> Result<WaitlistPage, ApiError> {
        let url = format!(
            "{}?limit={limit}&offset={offset}",
            self.endpoint("/admin/waitlist")
        );

        let response = self
            .client
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(unreachable_backend)?;

        let body = check(response, "Load").await?;
        let page = page_from(body);
        tracing::debug!(
            received = page.received,
            decoded = page.entries.len(),
            "Loaded waitlist page"
        );
        Ok(page)
    }
}

// =============================================================================
// Response Handling
// =============================================================================

/// Log a transport failure with its full text before it is hidden behind
/// the generic user-facing message.
fn unreachable_backend(error: reqwest::Error) -> ApiError {
    tracing::warn!(error = %error, "Backend unreachable");
    ApiError::Network(error)
}

/// Read a body as JSON, `None` if it is empty or not JSON.
async fn read_json(response: reqwest::Response) -> Option<Value> {
    let bytes = response.bytes().await.ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Turn a non-2xx response into `ApiError::Status`, otherwise hand back the
/// parsed body.
///
/// `action` names the failed call in the fallback message, e.g.
/// `"Login"` gives `Login failed (500).`
async fn check(response: reqwest::Response, action: &str) -> Result<Option<Value>, ApiError> {
    let status = response.status();
    let body = read_json(response).await;

    if status.is_success() {
        return Ok(body);
    }

    let message = error_message(body.as_ref(), action, status.as_u16());
    tracing::warn!(status = status.as_u16(), %message, "Backend request failed");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// The body's string `error` field, or a message naming the status code.
fn error_message(body: Option<&Value>, action: &str, status: u16) -> String {
    body.and_then(|b| b.get("error"))
        .and_then(Value::as_str)
        .map_or_else(|| format!("{action} failed ({status})."), ToString::to_string)
}

fn token_from(body: Option<&Value>) -> Option<SecretString> {
    body.and_then(|b| b.get("token"))
        .and_then(Value::as_str)
        .map(|t| SecretString::from(t.to_string()))
}

fn admin_email_from(body: Option<&Value>) -> Option<String> {
    body.and_then(|b| b.get("admin"))
        .and_then(|a| a.get("email"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

fn count_from(body: Option<&Value>) -> Option<u64> {
    body.and_then(|b| b.get("count")).and_then(Value::as_u64)
}

/// Decode `entries`, skipping rows that do not look like waitlist entries.
///
/// `received` is the length of the raw array, skipped rows included.
fn page_from(body: Option<Value>) -> WaitlistPage {
    let Some(Value::Array(rows)) = body.and_then(|mut b| b.get_mut("entries").map(Value::take))
    else {
        return WaitlistPage::default();
    };

    let received = rows.len();
    let entries = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<WaitlistEntry>(row) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed waitlist entry");
                None
            }
        })
        .collect();

    WaitlistPage { entries, received }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let client = BackendClient::new(&ApiConfig {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(
            client.endpoint("/admin/waitlist/count"),
            "http://localhost:3000/admin/waitlist/count"
        );
    }

    #[test]
    fn test_error_message_prefers_backend_error() {
        let body = json!({"error": "Email already on the waitlist"});
        assert_eq!(
            error_message(Some(&body), "Request", 409),
            "Email already on the waitlist"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(error_message(None, "Request", 502), "Request failed (502).");

        // A non-string error field is not shown
        let body = json!({"error": {"code": 7}});
        assert_eq!(error_message(Some(&body), "Login", 400), "Login failed (400).");
    }

    #[test]
    fn test_token_from() {
        let token = token_from(Some(&json!({"token": "abc"}))).unwrap();
        assert_eq!(token.expose_secret(), "abc");
        assert!(token_from(Some(&json!({"token": 5}))).is_none());
        assert!(token_from(None).is_none());
    }

    #[test]
    fn test_admin_email_from() {
        let body = json!({"admin": {"email": "ops@creatorum.app"}});
        assert_eq!(admin_email_from(Some(&body)).as_deref(), Some("ops@creatorum.app"));
        assert!(admin_email_from(Some(&json!({"admin": {}}))).is_none());
    }

    #[test]
    fn test_count_from() {
        assert_eq!(count_from(Some(&json!({"count": 1234}))), Some(1234));
        assert_eq!(count_from(Some(&json!({"count": "1234"}))), None);
        assert_eq!(count_from(None), None);
    }

    #[test]
    fn test_page_from_keeps_sparse_rows() {
        let body = json!({
            "entries": [
                {"id": "1", "created_at": "2026-10-19T10:00:00Z", "full_name": "Ada",
                 "email": "ada@example.com", "role": "Creator", "goals": ["find brand deals"]},
                {"id": "2", "full_name": null},
                {"id": 3, "created_at": "2026-10-18T10:00:00Z", "full_name": "Grace",
                 "email": "grace@example.com", "role": "Brand", "goals": null},
            ]
        });
        let page = page_from(Some(body));
        assert_eq!(page.received, 3);
        assert_eq!(page.entries.len(), 3);
        assert_eq!(page.entries[1].full_name, "");
        assert_eq!(page.entries[2].id, "3");
        assert!(page.entries[2].goals.is_empty());
    }

    #[test]
    fn test_page_from_counts_skipped_rows() {
        let body = json!({
            "entries": [
                {"id": "1", "full_name": "Ada"},
                "not an object",
                {"id": "3", "goals": "find brand deals"},
            ]
        });
        let page = page_from(Some(body));
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.received, 3);
    }

    #[test]
    fn test_page_from_missing_array() {
        assert_eq!(page_from(Some(json!({"entries": "nope"}))), WaitlistPage::default());
        assert_eq!(page_from(Some(json!({}))), WaitlistPage::default());
        assert_eq!(page_from(None).received, 0);
    }
}
