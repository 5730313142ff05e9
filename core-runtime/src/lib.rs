//! # Core Runtime
//!
//! Shared runtime infrastructure for the streaming core: logging/tracing
//! bootstrap and the runtime error type. Host applications call
//! [`logging::init_logging`] once at startup; every other crate in the
//! workspace just emits through the `tracing` macros.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
