// Terminal front-end: command parsing, panel rendering and the interactive loop.
// Holds no state of its own; everything lives in the `Planner`'s session.

pub mod commands;
pub mod interactive;
pub mod render;

pub use interactive::run_interactive;
