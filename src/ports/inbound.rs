//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: an interactive front end driving the form controller.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the form until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
