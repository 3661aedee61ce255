//! Landing page and the waitlist modal's view model.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use creatorum_core::waitlist::{Notice, WaitlistModal};
use creatorum_core::{Goal, Role};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;

/// Query parameters for the landing page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// `open` renders the page with the signup modal showing.
    pub waitlist: Option<String>,
}

impl HomeQuery {
    fn opens_modal(&self) -> bool {
        self.waitlist.as_deref() == Some("open")
    }
}

/// A `<option>` in the role select.
#[derive(Debug, Clone)]
pub struct RoleOption {
    pub value: &'static str,
    pub selected: bool,
}

/// A goal checkbox.
#[derive(Debug, Clone)]
pub struct GoalOption {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// Everything the modal markup needs, flattened from [`WaitlistModal`].
#[derive(Debug, Clone)]
pub struct ModalView {
    pub open: bool,
    pub submitting: bool,
    pub can_submit: bool,
    pub full_name: String,
    pub email: String,
    pub roles: Vec<RoleOption>,
    pub goals: Vec<GoalOption>,
    pub success: Option<String>,
    pub error: Option<String>,
}

impl From<&WaitlistModal> for ModalView {
    fn from(modal: &WaitlistModal) -> Self {
        let form = modal.form();
        let (success, error) = match modal.notice() {
            Some(Notice::Success(message)) => (Some(message.clone()), None),
            Some(Notice::Error(message)) => (None, Some(message.clone())),
            None => (None, None),
        };

        Self {
            open: modal.is_open(),
            submitting: modal.is_submitting(),
            can_submit: modal.can_submit(),
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            roles: Role::ALL
                .iter()
                .map(|role| RoleOption {
                    value: role.as_str(),
                    selected: *role == form.role,
                })
                .collect(),
            goals: Goal::ALL
                .iter()
                .map(|goal| GoalOption {
                    value: goal.as_str(),
                    label: goal.label(),
                    checked: form.has_goal(*goal),
                })
                .collect(),
            success,
            error,
        }
    }
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub modal: ModalView,
}

impl HomeTemplate {
    #[must_use]
    pub fn new(modal: &WaitlistModal) -> Self {
        Self {
            modal: ModalView::from(modal),
        }
    }
}

/// Display the landing page.
#[instrument]
pub async fn home(Query(query): Query<HomeQuery>) -> impl IntoResponse {
    let mut modal = WaitlistModal::default();
    if query.opens_modal() {
        modal.open();
    }
    HomeTemplate::new(&modal)
}

#[cfg(test)]
mod tests {
    use creatorum_core::waitlist::WaitlistForm;

    use super::*;

    #[test]
    fn test_closed_modal_view() {
        let view = ModalView::from(&WaitlistModal::default());
        assert!(!view.open);
        assert!(!view.can_submit);
    }

    #[test]
    fn test_open_modal_view_shows_defaults() {
        let mut modal = WaitlistModal::default();
        modal.open();
        let view = ModalView::from(&modal);

        assert!(view.open);
        assert!(view.full_name.is_empty());
        let selected: Vec<_> = view.roles.iter().filter(|r| r.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "Creator");
        let checked: Vec<_> = view.goals.iter().filter(|g| g.checked).collect();
        assert_eq!(checked.len(), 1);
        assert_eq!(checked[0].value, "find brand deals");
        assert_eq!(checked[0].label, "Find brand deals");
    }

    #[test]
    fn test_modal_view_carries_error_notice() {
        let mut modal = WaitlistModal::with_form(WaitlistForm {
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..WaitlistForm::default()
        });
        assert!(modal.begin_submit().is_some());
        modal.finish_submit(Err("Email already on the waitlist".to_string()));

        let view = ModalView::from(&modal);
        assert_eq!(view.error.as_deref(), Some("Email already on the waitlist"));
        assert!(view.success.is_none());
        assert_eq!(view.email, "ada@example.com");
        assert!(view.can_submit);
    }

    #[test]
    fn test_query_opens_modal_only_for_open() {
        let open = HomeQuery {
            waitlist: Some("open".to_string()),
        };
        assert!(open.opens_modal());
        assert!(!HomeQuery::default().opens_modal());
        assert!(
            !HomeQuery {
                waitlist: Some("1".to_string())
            }
            .opens_modal()
        );
    }
}
