//! Startup configuration and logging.
//!
//! - [`config`]: per-session settings (`SessionConfig`, `SyncPolicy`)
//! - [`logging`]: tracing subscriber installation for the binary

pub mod config;
pub mod logging;

pub use config::{SessionConfig, SyncPolicy};
pub use logging::init_tracing;
