//! Creatorum Core - Shared waitlist types and view logic.
//!
//! This crate provides the pieces of the Creatorum front end that do not
//! touch the network:
//! - [`types`] - Roles, goals and waitlist entries as the backend sends them
//! - [`waitlist`] - The signup modal's form and state machine
//! - [`admin`] - Submit guards for the admin login and signup forms
//! - [`aggregates`] - Role mix, goal mix and daily series for the dashboard
//! - [`dashboard`] - The mounted dashboard view and its pagination
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no sessions. The `site` crate wires these to axum handlers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod aggregates;
pub mod dashboard;
pub mod types;
pub mod waitlist;

pub use types::*;
