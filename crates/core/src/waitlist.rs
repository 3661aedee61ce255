//! Waitlist signup form and modal state machine.
//!
//! The modal moves `Closed -> Open -> Submitting -> Open`. Success and error
//! are notices laid over the open form; they never close the modal.
//!
//! ```text
//!            open()              begin_submit()
//!  Closed ----------> Open ----------------------> Submitting
//!    ^                 |  ^                            |
//!    |     close()     |  |  finish_submit(Ok | Err)   |
//!    +-----------------+  +----------------------------+
//! ```

use serde::Serialize;

use crate::types::{Goal, Role, TagError};

/// Confirmation shown after a successful signup.
pub const SUCCESS_MESSAGE: &str = "You\u{2019}re on the waitlist. We\u{2019}ll reach out soon.";

/// Values typed into the signup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistForm {
    pub full_name: String,
    pub email: String,
    pub role: Role,
    /// Selected goals in selection order, without duplicates.
    pub goals: Vec<Goal>,
}

impl Default for WaitlistForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            role: Role::Creator,
            goals: vec![Goal::FindBrandDeals],
        }
    }
}

impl WaitlistForm {
    /// Build a form from decoded `application/x-www-form-urlencoded` pairs.
    ///
    /// Checkbox goals arrive as repeated `goals` fields. An absent `role`
    /// keeps the default; unknown field names are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TagError` if the role or any goal is not a known value.
    pub fn from_fields<I, K, V>(fields: I) -> Result<Self, TagError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut form = Self {
            goals: Vec::new(),
            ..Self::default()
        };

        for (key, value) in fields {
            let value = value.as_ref();
            match key.as_ref() {
                "full_name" => value.clone_into(&mut form.full_name),
                "email" => value.clone_into(&mut form.email),
                "role" => form.role = value.parse()?,
                "goals" => {
                    let goal: Goal = value.parse()?;
                    if !form.goals.contains(&goal) {
                        form.goals.push(goal);
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Select `goal` if it is not selected, otherwise deselect it.
    pub fn toggle_goal(&mut self, goal: Goal) {
        if let Some(pos) = self.goals.iter().position(|g| *g == goal) {
            self.goals.remove(pos);
        } else {
            self.goals.push(goal);
        }
    }

    /// Whether `goal` is currently checked.
    #[must_use]
    pub fn has_goal(&self, goal: Goal) -> bool {
        self.goals.contains(&goal)
    }

    /// Name and email are non-blank and at least one goal is picked.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty() && !self.email.trim().is_empty() && !self.goals.is_empty()
    }

    /// The JSON body for `POST /waitlist`.
    #[must_use]
    pub fn submission(&self) -> WaitlistSubmission {
        WaitlistSubmission {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role: self.role,
            goals: self.goals.clone(),
        }
    }
}

/// Request body for `POST /waitlist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistSubmission {
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub goals: Vec<Goal>,
}

/// Where the modal is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Open,
    Submitting,
}

/// Transient outcome shown inside the open modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// The signup modal: phase, form values and the current notice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WaitlistModal {
    phase: ModalPhase,
    form: WaitlistForm,
    notice: Option<Notice>,
}

impl WaitlistModal {
    /// An open modal holding `form`, as re-rendered after a form post.
    #[must_use]
    pub fn with_form(form: WaitlistForm) -> Self {
        Self {
            phase: ModalPhase::Open,
            form,
            notice: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> ModalPhase {
        self.phase
    }

    #[must_use]
    pub const fn form(&self) -> &WaitlistForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut WaitlistForm {
        &mut self.form
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    /// Cancel and submit are disabled while a request is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == ModalPhase::Submitting
    }

    /// Open the modal, clearing any previous success or error.
    pub fn open(&mut self) {
        self.phase = ModalPhase::Open;
        self.notice = None;
    }

    /// Close the modal. Allowed in every phase; an in-flight request is not
    /// cancelled.
    pub fn close(&mut self) {
        self.phase = ModalPhase::Closed;
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == ModalPhase::Open && self.form.is_complete()
    }

    /// Enter `Submitting` and hand back the request body, or `None` when the
    /// submit action is disabled.
    pub fn begin_submit(&mut self) -> Option<WaitlistSubmission> {
        if !self.can_submit() {
            return None;
        }
        self.phase = ModalPhase::Submitting;
        self.notice = None;
        Some(self.form.submission())
    }

    /// Apply the backend outcome. `Err` carries the message to display.
    ///
    /// Success resets the form to its defaults; failure keeps what was typed.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) {
        if self.phase == ModalPhase::Submitting {
            self.phase = ModalPhase::Open;
        }
        match outcome {
            Ok(()) => {
                self.form = WaitlistForm::default();
                self.notice = Some(Notice::Success(SUCCESS_MESSAGE.to_string()));
            }
            Err(message) => self.notice = Some(Notice::Error(message)),
        }
    }
}
