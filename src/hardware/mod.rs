pub mod gpio_line;
pub mod sysfs_led;
pub mod traits;

pub use gpio_line::GpioLine;
pub use sysfs_led::SysfsLed;
pub use traits::{EdgeEvent, EdgeLine, Led};
