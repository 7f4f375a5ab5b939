//! Application use cases. Orchestrate domain logic via ports.

pub mod form_controller;

pub use form_controller::FormController;
