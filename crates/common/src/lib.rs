//! Shared utilities, configuration, and error handling for Castrelay
//!
//! This crate provides common functionality used across the relay:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Form extraction with validation

pub mod config;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use error::{Error, Result, GENERIC_ERROR_MESSAGE};
pub use extractors::ValidatedForm;
