//! State machine for credential flows
//!
//! One flow runs per login, signup, or logout request:
//!
//! ```text
//! Idle -> ValidatingInput -> CallingBackend -> RelayingCookie -> Redirecting
//!              |                  |     |             |
//!              v                  v     v             v
//!          Rejected          Rejected  Errored     Errored
//! ```
//!
//! `Rejected`, `Errored`, and `Redirecting` are terminal. There are no
//! retries: a failed backend call ends the flow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot apply {event} in state {from}")]
    InvalidTransition { from: String, event: String },

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

impl From<StateError> for castrelay_common::Error {
    fn from(error: StateError) -> Self {
        castrelay_common::Error::Internal(error.to_string())
    }
}

/// Which credential flow is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Login,
    Signup,
    Logout,
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Signup => write!(f, "signup"),
            Self::Logout => write!(f, "logout"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Idle,
    ValidatingInput,
    CallingBackend,
    RelayingCookie,
    /// Input or credentials refused; the form is shown again with an error
    Rejected,
    /// Something failed on our side or the backend's; generic error shown
    Errored,
    Redirecting,
}

impl FlowState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Errored | Self::Redirecting)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [FlowState] {
        match self {
            Self::Idle => &[Self::ValidatingInput],
            Self::ValidatingInput => &[Self::CallingBackend, Self::Rejected],
            Self::CallingBackend => &[Self::RelayingCookie, Self::Rejected, Self::Errored],
            Self::RelayingCookie => &[Self::Redirecting, Self::Errored],
            Self::Rejected => &[],
            Self::Errored => &[],
            Self::Redirecting => &[],
        }
    }
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::ValidatingInput => write!(f, "validating_input"),
            Self::CallingBackend => write!(f, "calling_backend"),
            Self::RelayingCookie => write!(f, "relaying_cookie"),
            Self::Rejected => write!(f, "rejected"),
            Self::Errored => write!(f, "errored"),
            Self::Redirecting => write!(f, "redirecting"),
        }
    }
}

/// Events that trigger flow state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowEvent {
    /// Form submitted
    Submit,
    /// Input failed the local shape checks
    InputInvalid,
    /// Input passed; the backend will be called
    InputAccepted,
    /// Backend answered with a non-success status
    BackendRejected,
    /// Backend unreachable, timed out, or answered unintelligibly
    BackendFailed,
    /// Backend call finished in a way the flow can relay (success, or any
    /// outcome for logout)
    BackendSettled,
    /// Browser-facing cookie prepared
    CookieRelayed,
    /// Backend reported success but no usable session cookie came back
    CookieUnavailable,
}

impl std::fmt::Display for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submit => write!(f, "submit"),
            Self::InputInvalid => write!(f, "input_invalid"),
            Self::InputAccepted => write!(f, "input_accepted"),
            Self::BackendRejected => write!(f, "backend_rejected"),
            Self::BackendFailed => write!(f, "backend_failed"),
            Self::BackendSettled => write!(f, "backend_settled"),
            Self::CookieRelayed => write!(f, "cookie_relayed"),
            Self::CookieUnavailable => write!(f, "cookie_unavailable"),
        }
    }
}

/// Credential flow state machine
pub struct FlowStateMachine;

impl FlowStateMachine {
    /// Attempt a state transition
    pub fn transition(current: FlowState, event: FlowEvent) -> Result<FlowState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (current, event) {
            (FlowState::Idle, FlowEvent::Submit) => FlowState::ValidatingInput,
            (FlowState::ValidatingInput, FlowEvent::InputInvalid) => FlowState::Rejected,
            (FlowState::ValidatingInput, FlowEvent::InputAccepted) => FlowState::CallingBackend,
            (FlowState::CallingBackend, FlowEvent::BackendRejected) => FlowState::Rejected,
            (FlowState::CallingBackend, FlowEvent::BackendFailed) => FlowState::Errored,
            (FlowState::CallingBackend, FlowEvent::BackendSettled) => FlowState::RelayingCookie,
            (FlowState::RelayingCookie, FlowEvent::CookieRelayed) => FlowState::Redirecting,
            (FlowState::RelayingCookie, FlowEvent::CookieUnavailable) => FlowState::Errored,
            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                })
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: FlowState, event: FlowEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}

/// One running credential flow, tracking its current state
#[derive(Debug, Clone)]
pub struct CredentialFlow {
    kind: FlowKind,
    state: FlowState,
}

impl CredentialFlow {
    pub fn start(kind: FlowKind) -> Self {
        Self {
            kind,
            state: FlowState::Idle,
        }
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Apply `event`, logging when the flow reaches a terminal state
    pub fn advance(&mut self, event: FlowEvent) -> Result<FlowState, StateError> {
        let next = FlowStateMachine::transition(self.state, event)?;
        self.state = next;

        if next.is_terminal() {
            tracing::debug!(flow = %self.kind, state = %next, "Credential flow finished");
        }

        Ok(next)
    }
}
