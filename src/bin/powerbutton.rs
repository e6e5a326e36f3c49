//! Power Button Press Pattern Detector
//! =============================================================================================
//!
//! Watches one GPIO line for bursts of button presses and exits once a burst
//! matches one of the configured press counts.
//!
//! Usage:
//!   powerbutton <LINE> <COUNT>... [--chip /dev/gpiochip0] [--led /sys/class/leds/led1]
//!
//! Pipeline:
//!   gpio-edges thread -> debouncer (50 ms) -> counter (1000 ms window) -> matcher
//!
//! Exit status:
//!   - the matched count on success
//!   - 0 on bad arguments, or when the line stops delivering edges
//!
//! LED cue on a match (kernel LED class, timer trigger):
//!   - first count:  20 ms on / 20 ms off
//!   - second count: 200 ms on / 200 ms off
//!   - any other:    off

use std::process;

use embassy_executor::Spawner;
use embassy_time::Timer;
use static_cell::StaticCell;
use tracing::{error, warn};

use powerbutton::Error;
use powerbutton::config::Config;
use powerbutton::hardware::{GpioLine, SysfsLed};
use powerbutton::logging;
use powerbutton::pipeline::{self, Outcome};

// Built once from the command line, read by the detector task until exit
static CONFIG: StaticCell<Config> = StaticCell::new();

/// Main application entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    logging::init();

    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        // --help and --version
        Err(Error::Usage(err)) if !err.use_stderr() => {
            let _ = err.print();
            process::exit(0);
        }
        Err(err) => {
            error!("{err}");
            process::exit(0);
        }
    };
    let config: &'static Config = CONFIG.init(config);

    // Spawn press detection task; it ends the process itself
    if let Err(err) = spawner.spawn(detector(config)) {
        error!("Failed to spawn detector: {err:?}");
        process::exit(0);
    }
}

/// Press Detection Task
///
/// Responsibilities:
/// 1. Run the debouncer, counter and matcher stages on the configured line
/// 2. Keep the LED cue visible for a moment after a match
/// 3. Exit with the matched count, or 0 once the line is gone
#[embassy_executor::task]
async fn detector(config: &'static Config) {
    let mut led = SysfsLed::new(&config.led);
    let open = || GpioLine::open(&config.chip, config.line, &config.label);

    let outcome = pipeline::run(config, open, &mut led).await;

    // Leave the LED cue visible before the process goes away
    if let Outcome::Matched(_) = outcome {
        Timer::after(config.linger).await;
    }

    warn!("Exiting");
    process::exit(outcome.exit_code());
}
