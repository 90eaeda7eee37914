//! API endpoint integration tests
//!
//! Drives the fully composed router against a mocked authentication API:
//! session resolution, login, signup, logout, and cross-cutting invariants.

#![allow(dead_code)]

mod common;
mod credentials;
mod invariants;
mod logout;
mod session;
