mod message;
mod telegram;

pub use message::reminder_message;
pub use telegram::{TelegramBotToken, TelegramClient};
