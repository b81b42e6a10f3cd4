use chrono::NaiveDate;

use serde::Serialize;

use crate::model::Subscription;

use super::due_date::next_due_date;

/// Lifecycle phase of a subscription on a given day.
///
/// Mutually exclusive, assigned in priority order: a term that has not
/// started yet wins over everything, an overdue one-shot deadline wins over
/// threshold checks, and the threshold check wins over the plain
/// recurring/normal split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    NotStarted,
    Expired,
    DueSoon,
    Recurring,
    Normal,
}

/// The computed view of a record on a given day — derived, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    /// Resolved next occurrence; equals the anchor date for non-recurring
    /// records
    pub due_date: NaiveDate,
    /// Days until the due date, negative once overdue. For a term that has
    /// not started this counts down to the start date instead.
    pub remaining_days: i64,
    pub phase: Phase,
    /// Elapsed fraction of the current term, clamped to [0, 1]
    pub progress: f64,
}

impl Status {
    pub fn of(sub: &Subscription, today: NaiveDate) -> Self {
        let due_date = next_due_date(sub, today);
        let remaining_days = (due_date - today).num_days();
        let threshold = i64::from(sub.effective_notify_days());

        if today < sub.start_date {
            return Self {
                due_date,
                remaining_days: (sub.start_date - today).num_days(),
                phase: Phase::NotStarted,
                progress: 0.0,
            };
        }

        // A recurring record's resolved due date is never behind today, so
        // only one-shot deadlines can expire.
        if remaining_days < 0 && !sub.repeat.is_recurring() {
            return Self {
                due_date,
                remaining_days,
                phase: Phase::Expired,
                progress: 1.0,
            };
        }

        let phase = if remaining_days <= threshold {
            Phase::DueSoon
        } else if sub.repeat.is_recurring() {
            Phase::Recurring
        } else {
            Phase::Normal
        };

        Self {
            due_date,
            remaining_days,
            phase,
            progress: term_progress(sub.start_date, due_date, today),
        }
    }
}

/// Elapsed fraction of the term `[start, due]` as of `today`. A zero or
/// negative length term counts as fully elapsed.
fn term_progress(start: NaiveDate, due: NaiveDate, today: NaiveDate) -> f64 {
    let total = (due - start).num_days();
    if total <= 0 {
        return 1.0;
    }
    let elapsed = (today - start).num_days();
    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}
