// Interaction state and its orchestration.
// `state` holds the transition functions; `controller` drives them against a backend.

pub mod controller;
pub mod state;

pub use controller::{ExportFormat, Planner};
pub use state::{ActionState, Session};
