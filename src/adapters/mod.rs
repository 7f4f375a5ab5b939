//! Infrastructure adapters. Implement ports.
//!
//! Analysis service client, filesystem, terminal UI. Map errors to DomainError.

pub mod files;
pub mod service;
pub mod ui;
