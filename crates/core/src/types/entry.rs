//! Waitlist entry as returned by the admin API.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use super::role::Role;

/// A single waitlist signup, read back through `GET /admin/waitlist`.
///
/// Decoding is loose: role and goals stay raw strings so rows with values
/// this build does not know about still render, a `null` or missing field
/// becomes empty, and a numeric `id` is accepted. Only rows with a field of
/// the wrong JSON type are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: Vec<String>,
}

impl WaitlistEntry {
    /// Parsed creation time, `None` when the backend sent something other
    /// than RFC 3339.
    #[must_use]
    pub fn created_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }

    /// The role as a known enum value, if it is one.
    #[must_use]
    pub fn known_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    /// Goals joined for display (`"a, b"`).
    #[must_use]
    pub fn goals_display(&self) -> String {
        self.goals.join(", ")
    }

    /// Case-insensitive substring match against name, email or role.
    ///
    /// `needle` must already be trimmed and lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.email.to_lowercase().contains(needle)
            || self.full_name.to_lowercase().contains(needle)
            || self.role.to_lowercase().contains(needle)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
