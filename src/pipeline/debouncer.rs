//! Quiet-period filter between raw edges and debounced line states.

use embassy_time::{Duration, Instant, TimeoutError, with_deadline};
use tracing::{error, info, trace, warn};

use super::LineState;
use super::link::LinkSender;
use crate::config::Config;
use crate::error::Result;
use crate::hardware::traits::{EdgeEvent, EdgeLine};

/// Debounce state of one line.
///
/// Steady until an edge arrives; every edge pushes the deadline to
/// `now + quiet`. Once the deadline passes without another edge the level
/// sampled at that moment is accepted, exactly once.
#[derive(Debug, Clone)]
pub struct Debouncer {
    line: u32,
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(line: u32, quiet: Duration) -> Self {
        Self {
            line,
            quiet,
            deadline: None,
        }
    }

    pub fn is_steady(&self) -> bool {
        self.deadline.is_none()
    }

    /// When the current quiet period ends, if one is running.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Records a raw edge seen at `now`, restarting the quiet period.
    pub fn edge(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Accepts `level` if the quiet period has elapsed at `now`.
    pub fn settle(&mut self, now: Instant, level: bool) -> Option<LineState> {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                Some(LineState {
                    line: self.line,
                    active: level,
                })
            }
            _ => None,
        }
    }
}

/// Debouncer stage.
///
/// Opens the line, then emits a [`LineState`] on `output` every time the
/// level settles. Closes `output` when the line cannot be opened, reaches end
/// of stream, or fails to read.
pub async fn run<L, F>(config: &Config, open: F, output: LinkSender<'_, LineState>)
where
    L: EdgeLine,
    F: FnOnce() -> Result<L>,
{
    info!("Starting debouncer ({})", config.line);

    // Acquire the line; a failure behaves like an empty edge stream
    match open() {
        Ok(mut line) => {
            info!("Entering debouncer loop");
            let debouncer = Debouncer::new(config.line, config.debounce);
            if let Err(e) = debounce(&mut line, debouncer, &output).await {
                error!("{e}");
            }
        }
        Err(e) => error!("{e}"),
    }

    warn!("Exiting");
    output.close().await;
}

async fn debounce<L: EdgeLine>(
    line: &mut L,
    mut debouncer: Debouncer,
    output: &LinkSender<'_, LineState>,
) -> Result<()> {
    loop {
        // Steady: wait for an edge. Bouncing: wait for an edge or the quiet deadline
        let waited = match debouncer.deadline() {
            None => Ok(line.next_edge().await),
            Some(at) => with_deadline(at, line.next_edge()).await,
        };

        match waited {
            // Another edge restarts the quiet period
            Ok(EdgeEvent::Edge) => debouncer.edge(Instant::now()),
            Ok(EdgeEvent::Closed(None)) => return Ok(()),
            Ok(EdgeEvent::Closed(Some(e))) => return Err(e),
            // Quiet period over, sample the level once
            Err(TimeoutError) => {
                let level = line.is_high()?;
                if let Some(state) = debouncer.settle(Instant::now(), level) {
                    trace!("Line {} settled at {}", state.line, state.active);
                    output.send(state).await; // waits while the counter is busy
                }
            }
        }
    }
}
