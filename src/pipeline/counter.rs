//! Burst counting over debounced line states.

use core::mem;

use embassy_time::{Duration, Instant, TimeoutError};
use tracing::{debug, info, warn};

use super::link::{LinkReceiver, LinkSender};
use super::{CountSummary, LineState};
use crate::config::Config;

/// Press counter with a trailing inactivity window.
///
/// Only states matching the active level count. Each one bumps the count and
/// moves the deadline to `now + window`; other states are ignored outright.
#[derive(Debug, Clone)]
pub struct Counter {
    line: u32,
    active_level: bool,
    window: Duration,
    count: u32,
    deadline: Option<Instant>,
}

impl Counter {
    pub fn new(line: u32, active_level: bool, window: Duration) -> Self {
        Self {
            line,
            active_level,
            window,
            count: 0,
            deadline: None,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// When the running burst closes, if one is running.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn observe(&mut self, state: LineState, now: Instant) {
        if state.active != self.active_level {
            return;
        }
        self.count = self.count.saturating_add(1);
        self.deadline = Some(now + self.window);
    }

    /// Closes the burst if its window has elapsed at `now`.
    pub fn expire(&mut self, now: Instant) -> Option<CountSummary> {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                Some(CountSummary {
                    line: self.line,
                    count: mem::take(&mut self.count),
                })
            }
            _ => None,
        }
    }
}

/// Counter stage.
///
/// Emits one [`CountSummary`] per burst on `output` and closes it once
/// `input` ends. A burst still open at that point is dropped.
pub async fn run(
    config: &Config,
    mut input: LinkReceiver<'_, LineState>,
    output: LinkSender<'_, CountSummary>,
) {
    info!("Starting counter ({})", config.line);

    let mut counter = Counter::new(config.line, config.active_level, config.window);
    loop {
        // Idle: wait for a state. In a burst: wait for a state or the window end
        let received = match counter.deadline() {
            None => Ok(input.recv().await),
            Some(at) => input.recv_until(at).await,
        };

        match received {
            Ok(Some(state)) => {
                counter.observe(state, Instant::now());
                debug!(
                    "Line {} active {} count {}",
                    state.line,
                    state.active,
                    counter.count()
                );
            }
            // Debouncer gone; an unfinished burst is dropped
            Ok(None) => break,
            // No press for a whole window, the burst is complete
            Err(TimeoutError) => {
                if let Some(summary) = counter.expire(Instant::now()) {
                    output.send(summary).await;
                }
            }
        }
    }

    warn!("Exiting");
    output.close().await;
}
