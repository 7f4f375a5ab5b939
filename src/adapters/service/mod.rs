//! Analysis service adapters. Implement AnalysisPort.
//!
//! HTTP client for the real service and a mock for running without it.

pub mod http_adapter;
pub mod mock_adapter;

pub use http_adapter::{DEFAULT_SERVICE_URL, HttpAnalysisAdapter};
pub use mock_adapter::MockAnalysisAdapter;
