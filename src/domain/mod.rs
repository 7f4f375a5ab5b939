//! Core domain layer. No external I/O dependencies.
//!
//! Form state and the analysis data the service returns.

pub mod entities;
pub mod errors;

pub use entities::{AnalysisResult, FormState, Language, ReadabilityScore, SelectedFile};
pub use errors::DomainError;
