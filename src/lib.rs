//! doc-summarizer: terminal client for a legal document summarization and Q&A service.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
