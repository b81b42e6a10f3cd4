use crate::domain::Status;
use crate::model::Subscription;

/// Build the reminder body for one record.
///
/// The same text serves the scheduled cycle and the manual push: a compact
/// card with the display fields, the resolved due date and the remaining-day
/// count, marked by urgency.
pub fn reminder_message(sub: &Subscription, status: &Status) -> String {
    let threshold = i64::from(sub.effective_notify_days());
    let marker = if status.remaining_days < 0 {
        "❌"
    } else if status.remaining_days <= threshold {
        "⚠️"
    } else {
        "✅"
    };

    [
        "📢 *Subscription reminder*".to_string(),
        "------------------".to_string(),
        format!("📌 *Name*: {}", sub.name),
        format!("🏷 *Type*: {}", sub.kind),
        format!("🔗 *Link*: {}", sub.url.as_deref().unwrap_or("none")),
        format!("📅 *Due*: {}", status.due_date),
        format!("{} *Remaining*: {} day(s)", marker, status.remaining_days),
        format!("📝 *Note*: {}", sub.note.as_deref().unwrap_or("none")),
    ]
    .join("\n")
}
