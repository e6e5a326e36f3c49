use core::future::Future;

use crate::error::{Error, Result};

/// What a raw edge source reports to the debouncer.
#[derive(Debug)]
pub enum EdgeEvent {
    /// The line transitioned. The new level is not carried; read it on demand.
    Edge,
    /// No further edges will arrive. Carries the read error, if any.
    Closed(Option<Error>),
}

/// A GPIO line that delivers edge notifications and can be sampled.
pub trait EdgeLine {
    /// Waits for the next edge notification.
    ///
    /// The returned future is dropped when a debounce deadline expires, so
    /// dropping it must not lose a notification.
    fn next_edge(&mut self) -> impl Future<Output = EdgeEvent>;

    /// Reads the instantaneous logic level of the line.
    fn is_high(&self) -> Result<bool>;
}

pub trait Led {
    /// Solid off.
    fn off(&mut self) -> Result<()>;

    /// Blink with the given on and off periods in milliseconds.
    fn blink(&mut self, on_ms: u16, off_ms: u16) -> Result<()>;
}
