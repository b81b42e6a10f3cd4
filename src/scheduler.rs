use std::sync::Arc;

use chrono::NaiveDate;

use crate::client::{reminder_message, TelegramClient};
use crate::clock::Clock;
use crate::domain::Status;
use crate::error::Result;
use crate::model::Subscription;
use crate::repo::SubscriptionStore;

/// Outcome counts for one reminder cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub evaluated: usize,
    pub eligible: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Whether a record is owed a reminder today.
///
/// Eligibility is measured against the resolved due date, not the reported
/// remaining count: a term that has not started yet but whose first due date
/// sits within threshold still gets a reminder. Overdue records (negative
/// days) are excluded; re-raising those is a manual-push concern.
pub fn reminder_due(status: &Status, today: NaiveDate, notify_days: u32) -> bool {
    let days_until_due = (status.due_date - today).num_days();
    (0..=i64::from(notify_days)).contains(&days_until_due)
}

/// Drives one read-evaluate-notify pass per invocation.
///
/// The automated cycle deliberately skips `is_notified` dedup: an eligible
/// record is re-notified every day it stays within threshold, and at most
/// once within a single pass.
pub struct ReminderScheduler<S> {
    store: S,
    notifier: TelegramClient,
    clock: Arc<dyn Clock>,
}

impl<S: SubscriptionStore> ReminderScheduler<S> {
    pub fn new(store: S, notifier: TelegramClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            notifier,
            clock,
        }
    }

    /// Run one reminder cycle over a snapshot of the store.
    ///
    /// A store load failure aborts the cycle. A delivery failure does not:
    /// the record is skipped for this cycle and the pass continues, since
    /// tomorrow's re-evaluation naturally retries anything still eligible.
    #[tracing::instrument(name = "Reminder cycle", skip(self))]
    pub async fn run_cycle(&self) -> Result<CycleSummary> {
        let subscriptions = self.store.load().await?;
        let today = self.clock.today();

        let mut summary = CycleSummary::default();
        for sub in &subscriptions {
            summary.evaluated += 1;

            let status = Status::of(sub, today);
            if !reminder_due(&status, today, sub.effective_notify_days()) {
                continue;
            }
            summary.eligible += 1;

            match self.notifier.send(&reminder_message(sub, &status)).await {
                Ok(()) => {
                    summary.delivered += 1;
                    tracing::info!(
                        "Reminder delivered (id: {}, name: {}, due: {})",
                        sub.id,
                        sub.name,
                        status.due_date
                    );
                }
                Err(error) => {
                    summary.failed += 1;
                    tracing::warn!(
                        error.cause_chain = ?error,
                        "Skipping reminder delivery (id: {}, name: {})",
                        sub.id,
                        sub.name
                    );
                }
            }
        }

        tracing::info!(
            "Cycle complete: {} evaluated, {} eligible, {} delivered, {} failed",
            summary.evaluated,
            summary.eligible,
            summary.delivered,
            summary.failed
        );
        Ok(summary)
    }

    /// Push the detail message for a single record, regardless of
    /// eligibility.
    #[tracing::instrument(name = "Manual push", skip(self, sub), fields(id = %sub.id))]
    pub async fn push_record(&self, sub: &Subscription) -> Result<()> {
        let status = Status::of(sub, self.clock.today());
        self.notifier.send(&reminder_message(sub, &status)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::domain::{Repeat, Status};
    use crate::model::{NewSubscription, Subscription};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(expire: NaiveDate, repeat: Repeat, notify_days: u32) -> Subscription {
        Subscription::new(NewSubscription {
            name: "Test Service".parse().unwrap(),
            kind: None,
            note: None,
            url: None,
            icon_url: None,
            start_date: date(2024, 1, 1),
            expire_date: expire,
            repeat,
            notify_days: Some(notify_days),
        })
    }

    #[test]
    fn record_at_threshold_is_eligible() {
        let today = date(2024, 6, 1);
        let sub = record(date(2024, 6, 8), Repeat::Never, 7);
        let status = Status::of(&sub, today);

        assert!(reminder_due(&status, today, sub.effective_notify_days()));
    }

    #[test]
    fn record_one_day_past_threshold_is_not_eligible() {
        let today = date(2024, 6, 1);
        let sub = record(date(2024, 6, 9), Repeat::Never, 7);
        let status = Status::of(&sub, today);

        assert!(!reminder_due(&status, today, sub.effective_notify_days()));
    }

    #[test]
    fn due_today_is_eligible() {
        let today = date(2024, 6, 1);
        let sub = record(date(2024, 6, 1), Repeat::Never, 7);
        let status = Status::of(&sub, today);

        assert!(reminder_due(&status, today, sub.effective_notify_days()));
    }

    #[test]
    fn overdue_one_shot_is_not_re_notified() {
        let today = date(2024, 6, 5);
        let sub = record(date(2024, 6, 1), Repeat::Never, 7);
        let status = Status::of(&sub, today);

        assert!(!reminder_due(&status, today, sub.effective_notify_days()));
    }

    #[test]
    fn recurring_record_near_next_occurrence_is_eligible() {
        let today = date(2024, 4, 7);
        let sub = record(date(2024, 1, 10), Repeat::Monthly, 5);
        let status = Status::of(&sub, today);

        assert_eq!(status.due_date, date(2024, 4, 10));
        assert!(reminder_due(&status, today, sub.effective_notify_days()));
    }

    #[test]
    fn not_started_term_with_near_due_date_is_eligible() {
        // The cycle keys off the resolved due date alone; the start date
        // only affects the displayed phase.
        let today = date(2024, 5, 28);
        let mut sub = record(date(2024, 6, 1), Repeat::Never, 7);
        sub.start_date = date(2024, 6, 1);
        let status = Status::of(&sub, today);

        assert_eq!(status.phase, crate::domain::Phase::NotStarted);
        assert!(reminder_due(&status, today, sub.effective_notify_days()));
    }
}
