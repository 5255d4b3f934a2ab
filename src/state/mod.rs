// ============================================================================
// STATE MODULE - Session state, reducers and request guards
// ============================================================================

pub mod reactivity;
pub mod request_guard;
pub mod admin_state;
pub mod parent_state;

pub use reactivity::ReactiveState;
pub use request_guard::{InFlight, InFlightToken, SessionGeneration};
pub use admin_state::{AdminAction, AdminPhase, AdminSessionState};
pub use parent_state::{ParentAction, ParentPhase, ParentSessionState};
