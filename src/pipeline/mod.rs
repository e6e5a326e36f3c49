//! Three-stage press counting pipeline.
//!
//! ```text
//! edge source -> debouncer -> counter -> matcher
//!                LineState    CountSummary
//! ```
//!
//! Stages are futures interleaved on the calling task. Each link holds at
//! most one value; a stage that stops closes its output link, and the next
//! stage sees end of stream and stops in turn.

pub mod counter;
pub mod debouncer;
pub mod link;
pub mod matcher;

use core::convert::Infallible;
use core::future::pending;

use embassy_futures::join::join;
use embassy_futures::select::{Either, select};

use crate::config::Config;
use crate::error::Result;
use crate::hardware::traits::{EdgeLine, Led};

pub use counter::Counter;
pub use debouncer::Debouncer;
pub use link::{Link, LinkReceiver, LinkSender};
pub use matcher::{BlinkPattern, Match, Matcher, Outcome};

/// Debounced level of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineState {
    pub line: u32,
    pub active: bool,
}

/// Number of presses in one completed burst. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSummary {
    pub line: u32,
    pub count: u32,
}

/// Runs the pipeline until the matcher stops, then tears it down.
///
/// `open` is called by the debouncer to acquire the line; if it fails the
/// pipeline drains and the outcome is [`Outcome::Closed`].
pub async fn run<L, F, D>(config: &Config, open: F, led: &mut D) -> Outcome
where
    L: EdgeLine,
    F: FnOnce() -> Result<L>,
    D: Led,
{
    // debouncer -> counter and counter -> matcher
    let states = Link::new();
    let summaries = Link::new();
    let (state_tx, state_rx) = states.split();
    let (summary_tx, summary_rx) = summaries.split();

    let background = async {
        join(
            debouncer::run(config, open, state_tx),
            counter::run(config, state_rx, summary_tx),
        )
        .await;
        // stopped stages wait here for the matcher to finish
        pending::<Infallible>().await
    };

    let outcome = match select(background, matcher::run(config, summary_rx, led)).await {
        Either::First(never) => match never {},
        Either::Second(outcome) => outcome,
    };

    // Stages were dropped with the select above; links go last, newest first.
    drop(summaries);
    drop(states);
    outcome
}
