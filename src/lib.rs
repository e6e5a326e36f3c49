//! Button press-count pattern detector for embedded Linux.
//!
//! A GPIO line is debounced, presses are counted in bursts separated by a
//! trailing inactivity window, and the burst size is matched against a list
//! of target counts. The binary exits with the matched count so that a caller
//! can pick the system action from the exit status.

pub mod config;
pub mod error;
pub mod hardware;
pub mod logging;
pub mod pipeline;

pub use error::{Error, Result};
