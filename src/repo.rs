mod subscriptions;

pub use subscriptions::{JsonFileStore, SubscriptionStore};
