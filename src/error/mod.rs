//! Error types for the ATAM copilot core.

mod categories;
mod mapper;
mod types;

pub use categories::*;
pub use mapper::*;
pub use types::*;
