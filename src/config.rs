//! Startup configuration.
//!
//! Everything here is decided once, before the pipeline is started, and is
//! passed by reference into each stage afterwards.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use embassy_time::Duration;

use crate::error::{Error, Result};

/// Upper bound on the number of target counts accepted on the command line.
pub const MAX_TARGETS: usize = 16;

/// Quiet period a level must hold before it is accepted.
pub const DEBOUNCE_TIME: Duration = Duration::from_millis(50);

/// Inactivity window that closes a burst of presses.
pub const COUNT_TIME_WINDOW: Duration = Duration::from_millis(1000);

/// Time the LED cue is left visible before the process exits.
pub const SLEEP_BEFORE_EXIT: Duration = Duration::from_millis(1000);

#[derive(Debug, Parser, Clone)]
#[command(name = "powerbutton", version)]
#[command(about = "Exit with the press count once a configured pattern is seen on a GPIO button")]
pub struct Cli {
    /// GPIO line offset of the button.
    pub line: String,

    /// Press counts to recognise, in priority order.
    #[arg(required = true, num_args = 1..)]
    pub counts: Vec<String>,

    /// GPIO character device the line belongs to.
    #[arg(long, default_value = "/dev/gpiochip0")]
    pub chip: PathBuf,

    /// Sysfs directory of the LED used for the match cue.
    #[arg(long, default_value = "/sys/class/leds/led1")]
    pub led: PathBuf,

    /// Consumer label registered with the GPIO line.
    #[arg(long, default_value = "powerbutton")]
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub chip: PathBuf,
    pub line: u32,
    pub label: String,
    pub led: PathBuf,
    /// Ordered target counts; the position of a match selects the LED cue.
    pub targets: heapless::Vec<u32, MAX_TARGETS>,
    /// Debounced level that counts as a press.
    pub active_level: bool,
    pub debounce: Duration,
    pub window: Duration,
    pub linger: Duration,
}

impl Config {
    /// Parses `args` (program name first) into a configuration.
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Self::from_cli(cli)
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let line = parse_number(&cli.line).ok_or_else(|| Error::Line(cli.line.clone()))?;

        let mut targets = heapless::Vec::new();
        for raw in &cli.counts {
            let count = parse_number(raw).ok_or_else(|| Error::Count(raw.clone()))?;
            targets.push(count).map_err(|_| Error::TooManyCounts)?;
        }

        Ok(Self {
            chip: cli.chip,
            line,
            label: cli.label,
            led: cli.led,
            targets,
            active_level: true,
            debounce: DEBOUNCE_TIME,
            window: COUNT_TIME_WINDOW,
            linger: SLEEP_BEFORE_EXIT,
        })
    }
}

/// Reads a non-zero unsigned number with C-style radix prefixes: `0x` for
/// hex, a leading `0` for octal, decimal otherwise.
///
/// Returns `None` for zero and for anything that is not entirely a number.
pub fn parse_number(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let (digits, radix) = if let Some(hex) = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
    {
        (hex, 16)
    } else if raw.len() > 1 && raw.starts_with('0') {
        (&raw[1..], 8)
    } else {
        (raw, 10)
    };

    if digits.starts_with(['+', '-']) {
        return None;
    }

    match u32::from_str_radix(digits, radix) {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_radix_prefixes() {
        assert_eq!(parse_number("17"), Some(17));
        assert_eq!(parse_number("0x11"), Some(17));
        assert_eq!(parse_number("0X11"), Some(17));
        assert_eq!(parse_number("021"), Some(17));
        assert_eq!(parse_number(" 3 "), Some(3));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        for raw in ["0", "00", "0x0", "", "abc", "12abc", "-1", "+4", "0x", "09"] {
            assert_eq!(parse_number(raw), None, "{raw:?}");
        }
    }
}
