use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};

use serde::{Deserialize, Serialize};

/// Recurrence rule for a subscription term.
///
/// `Custom` is accepted in stored data but carries no advancement rule: it
/// behaves like `Never` everywhere except serialization, where it survives
/// round-trips. Unknown strings deserialize to `Never`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Repeat {
    #[default]
    Never,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom,
}

impl Repeat {
    /// Whether this rule ever advances the due date.
    pub fn is_recurring(self) -> bool {
        !matches!(self, Repeat::Never | Repeat::Custom)
    }

    /// One recurrence step forward from `date`.
    ///
    /// Month and year steps use chrono's clamping arithmetic: Jan 31 plus
    /// one month is Feb 29 in a leap year (Feb 28 otherwise), and Feb 29
    /// plus one year is Feb 28. Returns `None` for non-advancing rules and
    /// on calendar overflow.
    pub fn step(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Repeat::Never | Repeat::Custom => None,
            Repeat::Daily => date.checked_add_days(Days::new(1)),
            Repeat::Weekly => date.checked_add_days(Days::new(7)),
            Repeat::Monthly => date.checked_add_months(Months::new(1)),
            Repeat::Yearly => date.checked_add_months(Months::new(12)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Repeat::Never => "never",
            Repeat::Daily => "daily",
            Repeat::Weekly => "weekly",
            Repeat::Monthly => "monthly",
            Repeat::Yearly => "yearly",
            Repeat::Custom => "custom",
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Repeat {
    type Err = std::convert::Infallible;

    /// Unrecognized values fall back to `Never` rather than erroring.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "daily" => Repeat::Daily,
            "weekly" => Repeat::Weekly,
            "monthly" => Repeat::Monthly,
            "yearly" => Repeat::Yearly,
            "custom" => Repeat::Custom,
            _ => Repeat::Never,
        })
    }
}

impl From<String> for Repeat {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}
