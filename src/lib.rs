/// Daemon wiring and run loop
pub mod app;
/// REST clients for outside services
pub mod client;
/// Calendar-day clock capability
pub mod clock;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Record types
pub mod model;
/// Repositories
pub mod repo;
/// Reminder evaluation cycle
pub mod scheduler;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
