//! Terminal alerts. Implements AlertPort.
//!
//! Alerts are queued while an action runs and shown once it settles, so they never interleave
//! with the progress spinner.

use crate::ports::AlertPort;
use crossterm::style::Stylize;
use inquire::Select;
use std::sync::Mutex;
use tracing::warn;

#[derive(Default)]
pub struct QueuedAlerts {
    pending: Mutex<Vec<String>>,
}

impl QueuedAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued alerts, oldest first.
    pub fn drain(&self) -> Vec<String> {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        std::mem::take(&mut *pending)
    }

    /// Show every queued alert as a blocking notice acknowledged with OK.
    pub fn show_pending(&self) {
        for message in self.drain() {
            let prompt = format!("{} {}", "!".red().bold(), message);
            if let Err(e) = Select::new(&prompt, vec!["OK"]).prompt() {
                warn!(error = %e, "alert dismissed");
            }
        }
    }
}

impl AlertPort for QueuedAlerts {
    fn alert(&self, message: &str) {
        self.pending
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_alerts_in_order_once() {
        let alerts = QueuedAlerts::new();
        alerts.alert("Please upload a file.");
        alerts.alert("Error processing file.");

        assert_eq!(
            alerts.drain(),
            vec![
                "Please upload a file.".to_string(),
                "Error processing file.".to_string()
            ]
        );
        assert!(alerts.drain().is_empty());
    }
}
