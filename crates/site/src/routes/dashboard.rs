//! Admin dashboard: waitlist analytics over the loaded entries.
//!
//! The first visit with a token "mounts" the dashboard: identity check,
//! then the total count and the first page fetched together. The result is
//! kept in the session as a [`DashboardView`] so later renders (filtering,
//! reloads) don't hit the backend. "Load more" appends the next page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Local;
use creatorum_core::aggregates::{DashboardAggregates, filter_entries};
use creatorum_core::dashboard::{DashboardView, PAGE_SIZE};
use creatorum_core::{Role, WaitlistEntry};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;
use url::form_urlencoded;

use crate::api::ApiError;
use crate::components::{BarRow, Sparkline};
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::AdminSession;
use crate::routes::{DASHBOARD_PATH, LOGIN_PATH};
use crate::state::AppState;

// =============================================================================
// Query / Form Types
// =============================================================================

/// Query parameters for the dashboard.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    /// Local filter over name, email and role.
    pub q: String,
    /// `1` discards the mounted view and loads from the backend again.
    pub refresh: Option<String>,
}

impl DashboardQuery {
    fn wants_refresh(&self) -> bool {
        self.refresh.as_deref() == Some("1")
    }
}

/// "Load more" form data; carries the active filter through the redirect.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoadMoreForm {
    pub q: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Metric tiles in the momentum card.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub total: Option<u64>,
    pub creators: usize,
    pub brands: usize,
    pub average_goals: f64,
    pub average_per_day: f64,
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub admin_email: Option<String>,
    pub loaded_label: String,
    pub metrics: DashboardMetrics,
    pub sparkline: Sparkline,
    pub role_bars: Vec<BarRow>,
    pub goal_bars: Vec<BarRow>,
    /// Entries after the local filter.
    pub entries: Vec<WaitlistEntry>,
    pub query: String,
    pub error: Option<String>,
}

impl DashboardTemplate {
    /// Build the page for `view`, aggregated as of the server's local today.
    #[must_use]
    pub fn new(view: &DashboardView, query: &str, error: Option<String>) -> Self {
        let today = Local::now().date_naive();
        let aggregates = DashboardAggregates::compute(&view.entries, today, &Local);

        Self {
            admin_email: view.admin_email.clone(),
            loaded_label: view.loaded_label(),
            metrics: DashboardMetrics {
                total: view.count,
                creators: aggregates.role_count(Role::Creator),
                brands: aggregates.role_count(Role::Brand),
                average_goals: aggregates.average_goals,
                average_per_day: aggregates.average_per_day,
            },
            sparkline: Sparkline::new(&aggregates.daily_points()),
            role_bars: BarRow::from_counts(&aggregates.role_counts, aggregates.max_role_count()),
            goal_bars: BarRow::from_counts(&aggregates.goal_counts, aggregates.max_goal_count()),
            entries: filter_entries(&view.entries, query)
                .into_iter()
                .cloned()
                .collect(),
            query: query.to_string(),
            error,
        }
    }
}

/// Shown instead of the dashboard when no token is stored.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login_prompt.html")]
pub struct LoginPromptTemplate;

// =============================================================================
// Handlers
// =============================================================================

/// Display the dashboard.
#[instrument(skip(state, admin))]
pub async fn show(
    State(state): State<AppState>,
    admin: AdminSession,
    Query(query): Query<DashboardQuery>,
) -> Result<Response> {
    let Some(token) = admin.token().await? else {
        return Ok(LoginPromptTemplate.into_response());
    };

    if query.wants_refresh() {
        admin.clear_view().await?;
    }

    let view = if let Some(view) = admin.view().await? {
        view
    } else {
        match mount(&state, &token).await {
            Mount::Ready(view) => {
                admin.store_view(&view).await?;
                view
            }
            Mount::Rejected => {
                admin.clear().await?;
                clear_sentry_user();
                return Ok(Redirect::to(LOGIN_PATH).into_response());
            }
            Mount::Failed { view, error } => {
                return Ok(DashboardTemplate::new(&view, &query.q, Some(error)).into_response());
            }
        }
    };

    if let Some(email) = &view.admin_email {
        set_sentry_user(email);
    }

    Ok(DashboardTemplate::new(&view, &query.q, None).into_response())
}

/// Fetch the next page at the current offset and append it.
///
/// A failure leaves the loaded entries untouched and shows the error.
#[instrument(skip(state, admin))]
pub async fn load_more(
    State(state): State<AppState>,
    admin: AdminSession,
    Form(form): Form<LoadMoreForm>,
) -> Result<Response> {
    let Some(token) = admin.token().await? else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };

    let mut view = admin.view().await?.unwrap_or_default();

    match state
        .backend()
        .waitlist_page(&token, PAGE_SIZE, view.offset)
        .await
    {
        Ok(page) => {
            let received = view.append_page(page);
            admin.store_view(&view).await?;
            tracing::debug!(received, offset = view.offset, "Loaded more entries");
            Ok(Redirect::to(&dashboard_url(&form.q)).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, status = ?e.status(), "Load more failed");
            Ok(DashboardTemplate::new(&view, &form.q, Some(e.to_string())).into_response())
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Outcome of the initial dashboard load.
enum Mount {
    Ready(DashboardView),
    /// The identity check refused the token.
    Rejected,
    /// A later request failed; `view` holds whatever loaded before it.
    Failed { view: DashboardView, error: String },
}

/// Identity check first, then count and first page concurrently.
async fn mount(state: &AppState, token: &SecretString) -> Mount {
    let backend = state.backend();

    let admin_email = match backend.current_admin(token).await {
        Ok(email) => email,
        Err(ApiError::Unauthorized) => return Mount::Rejected,
        Err(e) => {
            return Mount::Failed {
                view: DashboardView::default(),
                error: e.to_string(),
            };
        }
    };

    match tokio::try_join!(
        backend.waitlist_count(token),
        backend.waitlist_page(token, PAGE_SIZE, 0)
    ) {
        Ok((count, page)) => {
            tracing::debug!(loaded = page.entries.len(), ?count, "Dashboard mounted");
            Mount::Ready(DashboardView::mounted(admin_email, count, page))
        }
        Err(e) => {
            tracing::warn!(error = %e, status = ?e.status(), "Dashboard load failed");
            Mount::Failed {
                view: DashboardView {
                    admin_email,
                    ..DashboardView::default()
                },
                error: e.to_string(),
            }
        }
    }
}

/// The dashboard URL with the filter preserved.
fn dashboard_url(query: &str) -> String {
    if query.trim().is_empty() {
        return DASHBOARD_PATH.to_string();
    }
    let encoded = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query)
        .finish();
    format!("{DASHBOARD_PATH}?{encoded}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, role: &str, goals: &[&str]) -> WaitlistEntry {
        WaitlistEntry {
            id: id.to_string(),
            created_at: Local::now().to_rfc3339(),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: role.to_string(),
            goals: goals.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_dashboard_url_encodes_filter() {
        assert_eq!(dashboard_url(""), "/admin");
        assert_eq!(dashboard_url("   "), "/admin");
        assert_eq!(dashboard_url("ada lovelace"), "/admin?q=ada+lovelace");
        assert_eq!(dashboard_url("a&b"), "/admin?q=a%26b");
    }

    #[test]
    fn test_refresh_flag() {
        let query = DashboardQuery {
            refresh: Some("1".to_string()),
            ..DashboardQuery::default()
        };
        assert!(query.wants_refresh());
        assert!(!DashboardQuery::default().wants_refresh());
    }

    #[test]
    fn test_template_metrics_and_filter() {
        let view = DashboardView::mounted(
            Some("ops@creatorum.app".to_string()),
            Some(10),
            vec![
                entry("1", "Ada", "Creator", &["find brand deals", "discovering creators"]),
                entry("2", "Grace", "Brand", &["discovering creators"]),
                entry("3", "Linus", "Creator", &[]),
            ]
            .into(),
        );

        let page = DashboardTemplate::new(&view, "CREATOR", None);

        assert_eq!(page.loaded_label, "3 of 10");
        assert_eq!(page.metrics.total, Some(10));
        assert_eq!(page.metrics.creators, 2);
        assert_eq!(page.metrics.brands, 1);
        assert!((page.metrics.average_goals - 1.0).abs() < f64::EPSILON);
        assert_eq!(page.role_bars[0].label, "Creator");
        assert_eq!(page.role_bars[0].width, 100);
        assert_eq!(page.role_bars[1].width, 50);
        assert_eq!(page.goal_bars[0].label, "discovering creators");
        // Filter narrows the table only
        assert_eq!(page.entries.len(), 2);
        assert!(page.entries.iter().all(|e| e.role == "Creator"));
    }

    #[test]
    fn test_template_renders_empty_state() {
        let page = DashboardTemplate::new(&DashboardView::default(), "", Some("Load failed (500).".to_string()));
        assert!(page.role_bars.is_empty());
        assert!(page.goal_bars.is_empty());

        let html = page.render().unwrap();
        assert!(html.contains("No data yet."));
        assert!(html.contains("Load failed (500)."));
    }
}
