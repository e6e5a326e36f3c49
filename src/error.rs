use std::io;
use std::path::PathBuf;

use gpio_cdev::errors::Error as GpioError;
use thiserror::Error;

use crate::config::MAX_TARGETS;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Wrong GPIO number - {0}")]
    Line(String),

    #[error("Wrong count - {0}")]
    Count(String),

    #[error("Too many counts, at most {} are supported", MAX_TARGETS)]
    TooManyCounts,

    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("Failed to request line {line} on {}: {source}", .chip.display())]
    Open {
        chip: PathBuf,
        line: u32,
        #[source]
        source: GpioError,
    },

    #[error("Failed to read line value: {0}")]
    Level(#[source] GpioError),

    #[error("Failed to read edge event: {0}")]
    EdgeRead(#[source] io::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Led {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
