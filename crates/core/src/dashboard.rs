//! The mounted admin dashboard: loaded entries plus pagination offset.

use serde::{Deserialize, Serialize};

use crate::types::WaitlistEntry;

/// Entries requested per page from `GET /admin/waitlist`.
pub const PAGE_SIZE: u32 = 200;

/// One page from `GET /admin/waitlist`.
///
/// `received` counts every row the backend returned, including rows that
/// could not be decoded into `entries`. The next page starts after all of
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitlistPage {
    pub entries: Vec<WaitlistEntry>,
    pub received: usize,
}

impl From<Vec<WaitlistEntry>> for WaitlistPage {
    fn from(entries: Vec<WaitlistEntry>) -> Self {
        Self {
            received: entries.len(),
            entries,
        }
    }
}

/// Dashboard state that outlives a single request.
///
/// Created by the initial load, grown by "load more", dropped on sign-out
/// or when the token is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Email reported by `/admin/me`, if any.
    pub admin_email: Option<String>,
    /// Total signups reported by the backend; `None` when it sent no number.
    pub count: Option<u64>,
    pub entries: Vec<WaitlistEntry>,
    /// Offset for the next page request.
    pub offset: usize,
}

impl DashboardView {
    /// State after a successful initial load.
    #[must_use]
    pub fn mounted(admin_email: Option<String>, count: Option<u64>, page: WaitlistPage) -> Self {
        Self {
            admin_email,
            count,
            entries: page.entries,
            offset: page.received,
        }
    }

    /// Append a freshly fetched page and advance the offset by the number
    /// of rows the backend returned.
    ///
    /// Returns that number.
    pub fn append_page(&mut self, page: WaitlistPage) -> usize {
        self.entries.extend(page.entries);
        self.offset += page.received;
        page.received
    }

    /// "Loaded N of M" text for the momentum card pill.
    #[must_use]
    pub fn loaded_label(&self) -> String {
        match self.count {
            Some(total) => format!("{} of {total}", self.entries.len()),
            None => self.entries.len().to_string(),
        }
    }
}
