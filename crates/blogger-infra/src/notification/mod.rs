//! Notifier implementations.

mod log;

pub use log::LogNotifier;

#[cfg(feature = "webhook")]
mod webhook;
#[cfg(feature = "webhook")]
pub use webhook::WebhookNotifier;
