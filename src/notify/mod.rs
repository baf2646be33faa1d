//! Alert formatting and publishing
//!
//! Publishing is best effort: a failed delivery is logged and reported as
//! `false`, never as an error.

pub mod console;
pub mod formatter;
pub mod oauth;
pub mod webhook;
pub mod x;

pub use console::ConsolePublisher;
pub use formatter::{format_swap_message, XMR_DISPLAY_PLACES};
pub use oauth::OAuthCredentials;
pub use webhook::WebhookPublisher;
pub use x::XPublisher;

use crate::config::NotifyConfig;
use crate::errors::AppResult;
use async_trait::async_trait;

/// A channel alerts can be delivered to
#[async_trait]
pub trait Publisher: Send + Sync {
    fn name(&self) -> &str;

    /// Deliver one alert; `true` on success
    async fn send(&self, title: &str, message: &str) -> bool;
}

/// Publishers implied by the notify configuration
///
/// The primary publisher is the console in dry-run mode and X in live mode;
/// live mode without complete X credentials is a configuration error.
/// Webhook targets are added as secondary publishers in either mode.
pub fn publishers_from_config(
    config: &NotifyConfig,
    timeout_seconds: u64,
) -> AppResult<Vec<Box<dyn Publisher>>> {
    let mut publishers: Vec<Box<dyn Publisher>> = Vec::new();

    if config.dry_run {
        publishers.push(Box::new(ConsolePublisher));
    } else {
        publishers.push(Box::new(XPublisher::from_config(&config.x, timeout_seconds)?));
    }

    if !config.webhook_targets.is_empty() {
        publishers.push(Box::new(WebhookPublisher::new(
            config.webhook_targets.clone(),
            timeout_seconds,
        )?));
    }

    Ok(publishers)
}
