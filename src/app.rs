use std::sync::Arc;

use anyhow::Context;

use crate::client::TelegramClient;
use crate::clock::SystemClock;
use crate::repo::JsonFileStore;
use crate::scheduler::ReminderScheduler;
use crate::settings::Settings;

/// Build the scheduler from settings.
///
/// All collaborators are resolved here, once, and injected; nothing inside
/// the core reads ambient process state afterwards.
pub fn build_scheduler(settings: &Settings) -> anyhow::Result<ReminderScheduler<JsonFileStore>> {
    let store = JsonFileStore::new(settings.store.path());

    let notifier = TelegramClient::new(
        settings.telegram.api_base_url(),
        settings.telegram.bot_token(),
        settings.telegram.chat_id().to_string(),
        settings.telegram.api_timeout(),
    )
    .context("Failed to build Telegram client")?;

    Ok(ReminderScheduler::new(store, notifier, Arc::new(SystemClock)))
}

/// Run the reminder daemon.
///
/// The first tick fires immediately, so a freshly started daemon evaluates
/// the store right away; subsequent cycles follow the configured interval.
/// A failed cycle is logged and the loop keeps going.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let scheduler = build_scheduler(&settings)?;

    let mut interval = tokio::time::interval(settings.app.cycle_interval());
    loop {
        interval.tick().await;

        if let Err(error) = scheduler.run_cycle().await {
            tracing::error!(error.cause_chain = ?error, "Reminder cycle aborted");
        }
    }
}
