//! Pattern matching over burst counts; the pipeline's control loop.

use tracing::{debug, error, info, warn};

use super::CountSummary;
use super::link::LinkReceiver;
use crate::config::Config;
use crate::error::Result;
use crate::hardware::traits::Led;

/// LED cue shown on a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPattern {
    /// 20 ms on, 20 ms off.
    Fast,
    /// 200 ms on, 200 ms off.
    Slow,
    Off,
}

impl BlinkPattern {
    /// Cue for the target at `index`: the first two targets get their own
    /// blink, the rest switch the LED off.
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => BlinkPattern::Fast,
            1 => BlinkPattern::Slow,
            _ => BlinkPattern::Off,
        }
    }

    /// On and off periods in milliseconds, `None` for solid off.
    pub fn periods(self) -> Option<(u16, u16)> {
        match self {
            BlinkPattern::Fast => Some((20, 20)),
            BlinkPattern::Slow => Some((200, 200)),
            BlinkPattern::Off => None,
        }
    }

    pub fn apply(self, led: &mut impl Led) -> Result<()> {
        match self.periods() {
            Some((on_ms, off_ms)) => led.blink(on_ms, off_ms),
            None => led.off(),
        }
    }
}

/// A count that hit one of the targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Position of the target in the configured order.
    pub index: usize,
    pub count: u32,
}

impl Match {
    pub fn pattern(&self) -> BlinkPattern {
        BlinkPattern::for_index(self.index)
    }
}

/// How the pipeline ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched(Match),
    /// Upstream ended before any match.
    Closed,
}

impl Outcome {
    /// Process exit status: the matched count, or 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Matched(found) => i32::try_from(found.count).unwrap_or(i32::MAX),
            Outcome::Closed => 0,
        }
    }
}

pub struct Matcher<'a> {
    line: u32,
    targets: &'a [u32],
}

impl<'a> Matcher<'a> {
    pub fn new(line: u32, targets: &'a [u32]) -> Self {
        Self { line, targets }
    }

    /// First target equal to the summary's count, in configured order.
    pub fn observe(&self, summary: CountSummary) -> Option<Match> {
        if summary.line != self.line {
            warn!("Ignoring count for line {}", summary.line);
            return None;
        }
        self.targets
            .iter()
            .position(|&target| target == summary.count)
            .map(|index| Match {
                index,
                count: summary.count,
            })
    }
}

/// Matcher stage.
///
/// Discards counts that match no target. On the first match applies the LED
/// cue and returns; returns [`Outcome::Closed`] if `input` ends first. LED
/// failures are logged and do not change the outcome.
pub async fn run<D: Led>(
    config: &Config,
    mut input: LinkReceiver<'_, CountSummary>,
    led: &mut D,
) -> Outcome {
    let matcher = Matcher::new(config.line, &config.targets);

    while let Some(summary) = input.recv().await {
        debug!("GPIO: {} count: {}", summary.line, summary.count);

        // Counts matching no target are dropped and the next burst awaited
        let Some(found) = matcher.observe(summary) else {
            continue;
        };

        info!("Recognized count number: {}", found.count);
        // LED cue is best effort; the match stands either way
        if let Err(e) = found.pattern().apply(led) {
            error!("{e}");
        }
        return Outcome::Matched(found);
    }

    warn!("Counter closed before a match");
    Outcome::Closed
}
