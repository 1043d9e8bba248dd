//! Copilot facade: one entry point wiring transport, services and
//! agents together.

mod builder;
mod copilot;

pub use builder::AtamCopilotBuilder;
pub use copilot::AtamCopilot;
