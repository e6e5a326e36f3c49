use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use super::traits::Led;
use crate::error::{Error, Result};

/// LED driven through the kernel LED class (`/sys/class/leds/<name>`).
pub struct SysfsLed {
    dir: PathBuf,
}

impl SysfsLed {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write(&self, attribute: &str, value: &str) -> Result<()> {
        let path = self.dir.join(attribute);
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .and_then(|mut file| file.write_all(value.as_bytes()))
            .map_err(|source| Error::Led { path, source })
    }
}

impl Led for SysfsLed {
    fn off(&mut self) -> Result<()> {
        self.write("trigger", "none")
    }

    // delay_on/delay_off only exist once the timer trigger is selected
    fn blink(&mut self, on_ms: u16, off_ms: u16) -> Result<()> {
        self.write("trigger", "timer")?;
        self.write("delay_on", &on_ms.to_string())?;
        self.write("delay_off", &off_ms.to_string())
    }
}
