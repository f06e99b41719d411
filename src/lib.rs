#![cfg_attr(docsrs, feature(doc_cfg))]

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
//! <br><br>
//!
//! ## You're probably looking for:
//! * [`log_error!`](log_error)
//! * [`log_print!`](log_print)
//! * [`log_debug!`](log_debug)
//! * [`set_threshold`](set_threshold)

pub mod prelude;
pub mod error;
pub(crate) mod levels;
pub(crate) mod sync;
mod macros;

pub use prelude::{
    dropped_lines, emit, set_threshold, set_threshold_from_env, threshold,
    LogLevel, LoggerError, Record, THRESHOLD_ENV_VAR
};
