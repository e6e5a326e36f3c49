use std::fmt;

use embassy_time::Instant;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Milliseconds since the monotonic clock started, zero padded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{:010}]", Instant::now().as_millis())
    }
}

/// Installs the stdout subscriber. `RUST_LOG` overrides the default filter.
///
/// Lines read `[timestamp] LEVEL target: message`, where the target is the
/// module of the stage that logged.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Uptime)
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .try_init()
        .ok();
}
