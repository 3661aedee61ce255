//! Core types for Creatorum.
//!
//! Waitlist vocabulary shared by the signup modal and the admin dashboard.

pub mod entry;
pub mod role;

pub use entry::WaitlistEntry;
pub use role::{Goal, Role, TagError};
