//! Sessions domain: login, signup, and logout credential flows

pub mod api;
pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::state::{
    CredentialFlow, FlowEvent, FlowKind, FlowState, FlowStateMachine, StateError,
};
pub use domain::validation::{LoginForm, SignupForm};

// Re-export API types
pub use api::handlers::{FlowError, FormPage, ANONYMOUS_LANDING, AUTHENTICATED_LANDING};
pub use api::routes;
pub use api::SessionsState;
