use chrono::{Datelike, NaiveDate};

use crate::model::Subscription;

use super::Repeat;

/// Defensive bound on recurrence stepping. The smallest step is one day, so
/// this covers roughly 27 years of drift between anchor and today; the loop
/// cannot legitimately reach it with the fixed step table.
const MAX_STEPS: u32 = 10_000;

/// Resolve the next effective due date on or after `today`.
///
/// Non-recurring records, and records whose anchor date is already on or
/// after `today`, pass the anchor through unchanged. Recurring records
/// advance one step at a time from the anchor until the working date is no
/// longer strictly before `today`. Each step moves forward by at least one
/// day, so the loop terminates.
pub fn next_due_date(sub: &Subscription, today: NaiveDate) -> NaiveDate {
    let mut next = sub.expire_date;
    if !sub.repeat.is_recurring() || next >= today {
        return next;
    }

    for _ in 0..MAX_STEPS {
        if next >= today {
            return next;
        }
        match sub.repeat.step(next) {
            Some(date) => next = date,
            None => return next,
        }
    }

    tracing::error!(
        "Recurrence stepping exceeded {} iterations (id: {}, anchor: {})",
        MAX_STEPS,
        sub.id,
        sub.expire_date
    );
    next
}

/// Whether `candidate` belongs to the record's recurrence date set.
///
/// This is a calendar-membership check for "mark this date" queries, not
/// due-date resolution: it compares calendar fields of `candidate` against
/// the anchor date instead of stepping. Non-recurring records and dates
/// before the start of the term are never members.
pub fn occurs_on(sub: &Subscription, candidate: NaiveDate) -> bool {
    if !sub.repeat.is_recurring() || candidate < sub.start_date {
        return false;
    }

    let anchor = sub.expire_date;
    match sub.repeat {
        Repeat::Daily => true,
        Repeat::Weekly => candidate.weekday() == anchor.weekday(),
        Repeat::Monthly => candidate.day() == anchor.day(),
        Repeat::Yearly => candidate.month() == anchor.month() && candidate.day() == anchor.day(),
        Repeat::Never | Repeat::Custom => false,
    }
}
