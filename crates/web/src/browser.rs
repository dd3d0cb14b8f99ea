//! Alerts, confirm prompts and redirects

use std::time::Duration;

use crumb::actions::{Navigator, Notifier};
use leptos::prelude::set_timeout;
use tracing::warn;

/// Window alerts and confirm prompts.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BrowserNotifier;

impl BrowserNotifier {
    fn alert(message: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };

        if let Err(error) = window.alert_with_message(message) {
            warn!(?error, "alert failed");
        }
    }
}

impl Notifier for BrowserNotifier {
    fn success(&self, message: &str) {
        Self::alert(message);
    }

    fn error(&self, message: &str) {
        Self::alert(message);
    }

    fn confirm(&self, question: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(question).ok())
            .unwrap_or(false)
    }
}

/// Navigates by setting `window.location.href` after a timeout.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, target: &str, delay: Duration) {
        let target = target.to_string();

        set_timeout(
            move || {
                let Some(window) = web_sys::window() else {
                    return;
                };

                if let Err(error) = window.location().set_href(&target) {
                    warn!(?error, href = %target, "redirect failed");
                }
            },
            delay,
        );
    }
}
