use chrono::{Months, NaiveDate};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::domain::{Repeat, ServiceName};

/// Threshold applied when `notifyDays` is absent or zero.
pub const DEFAULT_NOTIFY_DAYS: u32 = 7;

/// New subscription request
#[derive(Debug)]
pub struct NewSubscription {
    pub name: ServiceName,
    pub kind: Option<String>,
    pub note: Option<String>,
    pub url: Option<String>,
    pub icon_url: Option<String>,
    pub start_date: NaiveDate,
    pub expire_date: NaiveDate,
    pub repeat: Repeat,
    pub notify_days: Option<u32>,
}

/// Stored subscription record
///
/// Field names serialize in the store's camelCase format. Dates are plain
/// calendar days; all comparisons happen at day granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// ID of the subscription, immutable once created
    pub id: Uuid,
    /// User supplied data
    /// TODO: Should this be parsed back into domain objects?
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    /// First day of the subscription term
    pub start_date: NaiveDate,
    /// Anchor date from which recurrence is computed; the literal due date
    /// for non-recurring records
    pub expire_date: NaiveDate,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub notify_days: Option<u32>,
    #[serde(default)]
    pub is_notified: bool,
}

impl Subscription {
    pub fn new(new: NewSubscription) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name.as_ref().to_string(),
            kind: new.kind.unwrap_or_else(|| "uncategorized".into()),
            note: new.note,
            url: new.url,
            icon_url: new.icon_url,
            start_date: new.start_date,
            expire_date: new.expire_date,
            repeat: new.repeat,
            notify_days: new.notify_days,
            is_notified: false,
        }
    }

    /// The reminder threshold resolved to a concrete value: absent or zero
    /// falls back to [`DEFAULT_NOTIFY_DAYS`].
    pub fn effective_notify_days(&self) -> u32 {
        self.notify_days
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_NOTIFY_DAYS)
    }

    /// Apply a user edit.
    ///
    /// The notified flag resets when the expire date or the reminder
    /// threshold changes, so the next eligible cycle fires again.
    pub fn apply_edit(&mut self, edit: SubscriptionEdit) {
        let threshold_changed = edit.notify_days != self.notify_days;
        let expire_changed = edit.expire_date != self.expire_date;

        self.name = edit.name.as_ref().to_string();
        if let Some(kind) = edit.kind {
            self.kind = kind;
        }
        self.note = edit.note;
        self.url = edit.url;
        self.icon_url = edit.icon_url;
        self.start_date = edit.start_date;
        self.expire_date = edit.expire_date;
        self.notify_days = edit.notify_days;
        if let Some(repeat) = edit.repeat {
            self.repeat = repeat;
        }

        if expire_changed || threshold_changed {
            self.is_notified = false;
        }
    }

    /// Renew the term.
    ///
    /// An explicit new expire date wins; otherwise the current expire date
    /// advances by `years` (default 1) under clamping calendar arithmetic.
    /// Renewal always resets the notified flag.
    pub fn renew(&mut self, renewal: Renewal) {
        self.expire_date = match renewal.new_expire_date {
            Some(date) => date,
            None => {
                let years = renewal.years.unwrap_or(1);
                self.expire_date
                    .checked_add_months(Months::new(years * 12))
                    .unwrap_or(self.expire_date)
            }
        };
        if let Some(start) = renewal.new_start_date {
            self.start_date = start;
        }
        self.is_notified = false;
    }
}

/// Full-record edit payload
#[derive(Debug)]
pub struct SubscriptionEdit {
    pub name: ServiceName,
    /// `None` keeps the current kind
    pub kind: Option<String>,
    pub note: Option<String>,
    pub url: Option<String>,
    pub icon_url: Option<String>,
    pub start_date: NaiveDate,
    pub expire_date: NaiveDate,
    /// `None` keeps the current rule
    pub repeat: Option<Repeat>,
    pub notify_days: Option<u32>,
}

/// Renewal request
#[derive(Debug, Default)]
pub struct Renewal {
    pub new_expire_date: Option<NaiveDate>,
    pub new_start_date: Option<NaiveDate>,
    pub years: Option<u32>,
}

#[cfg(test)]
mod tests {
    use claims::assert_some_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record() -> Subscription {
        Subscription::new(NewSubscription {
            name: "Netflix".parse().unwrap(),
            kind: Some("streaming".into()),
            note: None,
            url: Some("https://netflix.com".into()),
            icon_url: None,
            start_date: date(2024, 1, 1),
            expire_date: date(2024, 12, 31),
            repeat: Repeat::Yearly,
            notify_days: Some(3),
        })
    }

    fn edit_of(sub: &Subscription) -> SubscriptionEdit {
        SubscriptionEdit {
            name: sub.name.parse().unwrap(),
            kind: Some(sub.kind.clone()),
            note: sub.note.clone(),
            url: sub.url.clone(),
            icon_url: sub.icon_url.clone(),
            start_date: sub.start_date,
            expire_date: sub.expire_date,
            repeat: Some(sub.repeat),
            notify_days: sub.notify_days,
        }
    }

    #[test]
    fn default_threshold_applies_when_absent_or_zero() {
        let mut sub = record();
        sub.notify_days = None;
        assert_eq!(sub.effective_notify_days(), DEFAULT_NOTIFY_DAYS);
        sub.notify_days = Some(0);
        assert_eq!(sub.effective_notify_days(), DEFAULT_NOTIFY_DAYS);
        sub.notify_days = Some(14);
        assert_eq!(sub.effective_notify_days(), 14);
    }

    #[test]
    fn edit_resets_notified_flag_when_expire_date_changes() {
        let mut sub = record();
        sub.is_notified = true;

        let mut edit = edit_of(&sub);
        edit.expire_date = date(2025, 12, 31);
        sub.apply_edit(edit);

        assert!(!sub.is_notified);
    }

    #[test]
    fn edit_resets_notified_flag_when_threshold_changes() {
        let mut sub = record();
        sub.is_notified = true;

        let mut edit = edit_of(&sub);
        edit.notify_days = Some(10);
        sub.apply_edit(edit);

        assert!(!sub.is_notified);
    }

    #[test]
    fn cosmetic_edit_keeps_notified_flag() {
        let mut sub = record();
        sub.is_notified = true;

        let mut edit = edit_of(&sub);
        edit.note = Some("shared with family".into());
        sub.apply_edit(edit);

        assert!(sub.is_notified);
    }

    #[test]
    fn renew_defaults_to_one_year() {
        let mut sub = record();
        sub.is_notified = true;

        sub.renew(Renewal::default());

        assert_eq!(sub.expire_date, date(2025, 12, 31));
        assert!(!sub.is_notified);
    }

    #[test]
    fn renew_with_explicit_date_wins() {
        let mut sub = record();
        sub.renew(Renewal {
            new_expire_date: Some(date(2026, 6, 30)),
            new_start_date: Some(date(2025, 7, 1)),
            years: Some(3),
        });

        assert_eq!(sub.expire_date, date(2026, 6, 30));
        assert_eq!(sub.start_date, date(2025, 7, 1));
    }

    #[test]
    fn store_format_round_trips_camel_case() {
        let json = r#"{
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "name": "Домен example.com",
            "type": "domain",
            "startDate": "2024-06-01",
            "expireDate": "2025-06-01",
            "notifyDays": 7,
            "repeat": "yearly",
            "isNotified": false
        }"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.kind, "domain");
        assert_eq!(sub.start_date, date(2024, 6, 1));
        assert_eq!(sub.repeat, Repeat::Yearly);
        assert_some_eq!(sub.notify_days, 7);

        let back = serde_json::to_value(&sub).unwrap();
        assert_eq!(back["expireDate"], "2025-06-01");
        assert_eq!(back["type"], "domain");
    }
}
