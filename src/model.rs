mod subscriptions;

pub use subscriptions::{NewSubscription, Renewal, Subscription, SubscriptionEdit};
