use std::convert::Infallible;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use reqwest::Client;

use serde::Serialize;

use secrecy::Secret;

use url::Url;

use crate::error;

/// Client for the Telegram Bot API `sendMessage` endpoint.
///
/// The bot token, target chat and timeout are resolved once at construction
/// and injected; nothing is read from ambient process state at send time.
#[derive(Debug)]
pub struct TelegramClient {
    client: Client,
    chat_id: String,

    api_send_message_url: Url,
}

impl TelegramClient {
    pub fn new(
        api_base_url: Url,
        bot_token: TelegramBotToken,
        chat_id: String,
        api_timeout: Duration,
    ) -> anyhow::Result<Self> {
        use secrecy::ExposeSecret;

        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        // The Bot API scopes endpoints under a "bot<token>" path segment.
        // Tokens contain ':', so the segment is pushed rather than joined
        // (Url::join would read "bot123:..." as a scheme).
        let mut api_send_message_url = api_base_url;
        api_send_message_url
            .path_segments_mut()
            .map_err(|()| anyhow::anyhow!("Telegram API base URL cannot be a base"))?
            .pop_if_empty()
            .push(&format!("bot{}", bot_token.expose_secret()))
            .push("sendMessage");

        Ok(Self {
            client,
            chat_id,
            api_send_message_url,
        })
    }

    /// Deliver one text message to the configured chat.
    #[tracing::instrument(name = "Send Telegram message", skip(self, text))]
    pub async fn send(&self, text: &str) -> error::Result<()> {
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        };

        self.client
            .post(self.api_send_message_url.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Canned connectivity-check message for verifying the channel setup.
    pub async fn send_test(&self) -> error::Result<()> {
        self.send("🔔 *Reminder channel test*\n\nYour Telegram notification setup works.")
            .await
    }
}

#[derive(Debug)]
pub struct TelegramBotToken(Secret<String>);

impl FromStr for TelegramBotToken {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Infallible> {
        let value = value.to_string();
        let value = Secret::new(value);

        Ok(Self(value))
    }
}

impl From<Secret<String>> for TelegramBotToken {
    fn from(value: Secret<String>) -> Self {
        Self(value)
    }
}

impl secrecy::ExposeSecret<String> for TelegramBotToken {
    fn expose_secret(&self) -> &String {
        use secrecy::ExposeSecret;
        self.0.expose_secret()
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}
