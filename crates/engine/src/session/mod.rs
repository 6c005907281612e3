mod controller;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{SessionController, StudyMode};
pub use view::{ItemView, SessionPhase, SessionView};
pub use workflow::SessionWorkflow;
