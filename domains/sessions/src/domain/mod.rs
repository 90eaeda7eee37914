//! Domain layer: credential input rules and the per-request flow state machine

pub mod state;
pub mod validation;
