//! # Observability
//!
//! The library reports through `tracing` events:
//!
//! | Level | Event |
//! |---|---|
//! | `debug` | resampler and bank construction, one-shot runs, config loading |
//! | `trace` | every `apply` call with input/output counts and phase |
//! | `warn` | output buffer rejected as too small |
//!
//! Applications install a subscriber with [`init_logging`].

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
