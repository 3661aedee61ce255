//! Dashboard aggregates over the currently loaded waitlist entries.
//!
//! Everything here works on whatever page(s) the dashboard has loaded, not
//! on the backend's full dataset. The UI labels these numbers "loaded"
//! for that reason.

use chrono::{Days, NaiveDate, TimeZone};
use serde::Serialize;

use crate::types::{Role, WaitlistEntry};

/// Length of the trailing daily signup window.
pub const SERIES_DAYS: usize = 14;

/// How many goals the "Top goals" card shows.
pub const TOP_GOALS: usize = 4;

/// Window for the average-signups-per-day metric.
pub const TRAILING_AVERAGE_DAYS: usize = 7;

/// A label with its tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub label: String,
    pub count: usize,
}

/// Signups on one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Tally values, first-seen order, then stable sort by count descending.
fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<CountRow> {
    let mut rows: Vec<CountRow> = Vec::new();
    for value in values {
        if let Some(row) = rows.iter_mut().find(|r| r.label == value) {
            row.count += 1;
        } else {
            rows.push(CountRow {
                label: value.to_string(),
                count: 1,
            });
        }
    }
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Entries per role, most common first.
#[must_use]
pub fn role_counts(entries: &[WaitlistEntry]) -> Vec<CountRow> {
    tally(entries.iter().map(|e| e.role.as_str()))
}

/// Goal mentions across all entries, most common first, top [`TOP_GOALS`].
#[must_use]
pub fn goal_counts(entries: &[WaitlistEntry]) -> Vec<CountRow> {
    let mut rows = tally(entries.iter().flat_map(|e| e.goals.iter().map(String::as_str)));
    rows.truncate(TOP_GOALS);
    rows
}

/// Daily signups for the [`SERIES_DAYS`] days ending on `today`, oldest first.
///
/// Creation instants are converted to `tz` before taking the calendar date.
/// Entries outside the window or with an unparseable timestamp are skipped;
/// days without signups are zero.
#[must_use]
pub fn daily_series<Tz: TimeZone>(
    entries: &[WaitlistEntry],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DayCount> {
    let start = today
        .checked_sub_days(Days::new(SERIES_DAYS as u64 - 1))
        .unwrap_or(NaiveDate::MIN);

    let mut series: Vec<DayCount> = start
        .iter_days()
        .take(SERIES_DAYS)
        .map(|date| DayCount { date, count: 0 })
        .collect();

    for entry in entries {
        let Some(created) = entry.created_at_parsed() else {
            continue;
        };
        let day = created.with_timezone(tz).date_naive();
        let Ok(index) = usize::try_from((day - start).num_days()) else {
            continue;
        };
        if let Some(bucket) = series.get_mut(index) {
            bucket.count += 1;
        }
    }

    series
}

/// Mean number of goals per entry; zero when nothing is loaded.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Entry counts never approach 2^52
pub fn average_goals(entries: &[WaitlistEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let total: usize = entries.iter().map(|e| e.goals.len()).sum();
    total as f64 / entries.len() as f64
}

/// Mean signups per day over the last `days` buckets of `series`.
///
/// Always divides by `days`, so a short series reads as zero-filled.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Day counts never approach 2^52
pub fn average_per_day(series: &[DayCount], days: usize) -> f64 {
    if days == 0 {
        return 0.0;
    }
    let skip = series.len().saturating_sub(days);
    let sum: usize = series.iter().skip(skip).map(|d| d.count).sum();
    sum as f64 / days as f64
}

/// Entries whose name, email or role contains `query`, ignoring case.
///
/// A blank query returns every entry.
#[must_use]
pub fn filter_entries<'a>(entries: &'a [WaitlistEntry], query: &str) -> Vec<&'a WaitlistEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries.iter().filter(|e| e.matches(&needle)).collect()
}

/// Everything the dashboard cards need, computed in one pass per render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardAggregates {
    pub role_counts: Vec<CountRow>,
    pub goal_counts: Vec<CountRow>,
    pub daily: Vec<DayCount>,
    pub average_goals: f64,
    pub average_per_day: f64,
}

impl DashboardAggregates {
    /// Compute all aggregates for `entries` as of `today` in `tz`.
    #[must_use]
    pub fn compute<Tz: TimeZone>(entries: &[WaitlistEntry], today: NaiveDate, tz: &Tz) -> Self {
        let daily = daily_series(entries, today, tz);
        let average_per_day = average_per_day(&daily, TRAILING_AVERAGE_DAYS);
        Self {
            role_counts: role_counts(entries),
            goal_counts: goal_counts(entries),
            daily,
            average_goals: average_goals(entries),
            average_per_day,
        }
    }

    /// Loaded entries with exactly this role.
    #[must_use]
    pub fn role_count(&self, role: Role) -> usize {
        self.role_counts
            .iter()
            .find(|r| r.label == role.as_str())
            .map_or(0, |r| r.count)
    }

    #[must_use]
    pub fn max_role_count(&self) -> usize {
        self.role_counts.iter().map(|r| r.count).max().unwrap_or(0)
    }

    #[must_use]
    pub fn max_goal_count(&self) -> usize {
        self.goal_counts.iter().map(|r| r.count).max().unwrap_or(0)
    }

    /// Daily counts without their dates, oldest first.
    #[must_use]
    pub fn daily_points(&self) -> Vec<usize> {
        self.daily.iter().map(|d| d.count).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    fn entry(id: &str, created_at: &str, role: &str, goals: &[&str]) -> WaitlistEntry {
        WaitlistEntry {
            id: id.to_string(),
            created_at: created_at.to_string(),
            full_name: format!("Person {id}"),
            email: format!("{id}@example.com"),
            role: role.to_string(),
            goals: goals.iter().map(ToString::to_string).collect(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_role_counts_sorted_descending() {
        let entries = vec![
            entry("1", "", "Brand", &[]),
            entry("2", "", "Creator", &[]),
            entry("3", "", "Creator", &[]),
            entry("4", "", "Seller", &[]),
        ];
        let counts = role_counts(&entries);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0], CountRow { label: "Creator".to_string(), count: 2 });
        // Ties keep first-seen order
        assert_eq!(counts[1].label, "Brand");
        assert_eq!(counts[2].label, "Seller");
    }

    #[test]
    fn test_goal_counts_capped_at_four() {
        let entries = vec![
            entry("1", "", "Creator", &["a", "b", "c"]),
            entry("2", "", "Creator", &["a", "d", "e"]),
            entry("3", "", "Creator", &["a", "b"]),
        ];
        let counts = goal_counts(&entries);
        assert_eq!(counts.len(), TOP_GOALS);
        assert_eq!(counts[0], CountRow { label: "a".to_string(), count: 3 });
        assert_eq!(counts[1], CountRow { label: "b".to_string(), count: 2 });
    }

    #[test]
    fn test_goal_counts_tolerate_empty_goal_lists() {
        let entries = vec![entry("1", "", "Creator", &[]), entry("2", "", "Brand", &["x"])];
        assert_eq!(goal_counts(&entries), vec![CountRow { label: "x".to_string(), count: 1 }]);
    }

    #[test]
    fn test_daily_series_over_twenty_days() {
        let today = date("2026-10-19");
        // One entry per day for 20 days ending today, plus an extra today
        let mut entries: Vec<WaitlistEntry> = (0..20u64)
            .map(|back| {
                let day = today.checked_sub_days(Days::new(back)).unwrap();
                entry(&back.to_string(), &format!("{day}T12:00:00Z"), "Creator", &[])
            })
            .collect();
        entries.push(entry("extra", "2026-10-19T08:00:00Z", "Brand", &[]));

        let series = daily_series(&entries, today, &Utc);

        assert_eq!(series.len(), SERIES_DAYS);
        assert_eq!(series.first().unwrap().date, date("2026-10-06"));
        assert_eq!(series.last().unwrap().date, today);
        assert_eq!(series.last().unwrap().count, 2);
        assert!(series.iter().take(13).all(|d| d.count == 1));
        let total: usize = series.iter().map(|d| d.count).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn test_daily_series_zero_fills_missing_days() {
        let today = date("2026-10-19");
        let entries = vec![
            entry("1", "2026-10-10T10:00:00Z", "Creator", &[]),
            entry("2", "garbage", "Creator", &[]),
            entry("3", "2026-10-21T10:00:00Z", "Creator", &[]),
        ];
        let series = daily_series(&entries, today, &Utc);
        assert_eq!(series.len(), SERIES_DAYS);
        let nonzero: Vec<_> = series.iter().filter(|d| d.count > 0).collect();
        assert_eq!(nonzero.len(), 1);
        assert_eq!(nonzero[0].date, date("2026-10-10"));
    }

    #[test]
    fn test_daily_series_uses_local_calendar_day() {
        let today = date("2026-10-19");
        // 23:30 UTC on the 18th is already the 19th at UTC+2
        let entries = vec![entry("1", "2026-10-18T23:30:00Z", "Creator", &[])];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let utc = daily_series(&entries, today, &Utc);
        let local = daily_series(&entries, today, &plus_two);

        assert_eq!(utc[12].count, 1);
        assert_eq!(local[13].count, 1);
        assert_eq!(local[12].count, 0);
    }

    #[test]
    fn test_average_goals() {
        assert!((average_goals(&[]) - 0.0).abs() < f64::EPSILON);
        let entries = vec![
            entry("1", "", "Creator", &["a", "b"]),
            entry("2", "", "Creator", &[]),
            entry("3", "", "Creator", &["a"]),
            entry("4", "", "Creator", &["a", "b", "c", "d"]),
        ];
        assert!((average_goals(&entries) - 1.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_per_day_uses_trailing_window() {
        let today = date("2026-10-19");
        let series: Vec<DayCount> = today
            .checked_sub_days(Days::new(13))
            .unwrap()
            .iter_days()
            .take(14)
            .zip([7, 7, 7, 7, 7, 7, 7, 1, 0, 2, 0, 3, 0, 1])
            .map(|(date, count)| DayCount { date, count })
            .collect();
        assert!((average_per_day(&series, 7) - 1.0).abs() < f64::EPSILON);
        assert!((average_per_day(&series, 0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_filter_entries() {
        let entries = vec![
            entry("ada", "", "Creator", &[]),
            entry("grace", "", "Brand", &[]),
            entry("linus", "", "Seller", &[]),
        ];
        let hits = filter_entries(&entries, "  BRAND ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "grace");

        let by_email = filter_entries(&entries, "linus@");
        assert_eq!(by_email.len(), 1);

        let by_name = filter_entries(&entries, "person ada");
        assert_eq!(by_name.len(), 1);

        assert_eq!(filter_entries(&entries, "   ").len(), 3);
        assert!(filter_entries(&entries, "nobody").is_empty());
    }

    #[test]
    fn test_compute_role_helpers() {
        let entries = vec![
            entry("1", "2026-10-19T10:00:00Z", "Creator", &["a"]),
            entry("2", "2026-10-19T11:00:00Z", "Creator", &["a", "b"]),
            entry("3", "2026-10-18T11:00:00Z", "Brand", &["b"]),
        ];
        let agg = DashboardAggregates::compute(&entries, date("2026-10-19"), &Utc);
        assert_eq!(agg.role_count(Role::Creator), 2);
        assert_eq!(agg.role_count(Role::Brand), 1);
        assert_eq!(agg.role_count(Role::Seller), 0);
        assert_eq!(agg.max_role_count(), 2);
        assert_eq!(agg.max_goal_count(), 2);
        assert_eq!(agg.daily_points().len(), SERIES_DAYS);
        assert!((agg.average_per_day - 3.0 / 7.0).abs() < 1e-9);
    }
}
