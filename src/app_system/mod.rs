//! System orchestration, startup, and shutdown logic.

pub mod market_system;
pub mod tracing;

pub use market_system::*;
pub use tracing::*;
