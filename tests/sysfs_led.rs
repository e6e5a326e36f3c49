use std::fs;
use std::path::Path;

use powerbutton::Error;
use powerbutton::hardware::{Led, SysfsLed};
use powerbutton::pipeline::BlinkPattern;

fn led_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for attribute in ["trigger", "delay_on", "delay_off"] {
        fs::write(dir.path().join(attribute), "").unwrap();
    }
    dir
}

fn read(dir: &Path, attribute: &str) -> String {
    fs::read_to_string(dir.join(attribute)).unwrap()
}

#[test]
fn blink_selects_timer_trigger_and_periods() {
    let dir = led_dir();
    let mut led = SysfsLed::new(dir.path());

    led.blink(200, 150).unwrap();

    assert_eq!(read(dir.path(), "trigger"), "timer");
    assert_eq!(read(dir.path(), "delay_on"), "200");
    assert_eq!(read(dir.path(), "delay_off"), "150");
}

#[test]
fn off_selects_no_trigger() {
    let dir = led_dir();
    let mut led = SysfsLed::new(dir.path());

    led.off().unwrap();

    assert_eq!(read(dir.path(), "trigger"), "none");
    assert_eq!(read(dir.path(), "delay_on"), "");
}

#[test]
fn patterns_drive_the_led() {
    let dir = led_dir();
    let mut led = SysfsLed::new(dir.path());

    BlinkPattern::for_index(0).apply(&mut led).unwrap();
    assert_eq!(read(dir.path(), "delay_on"), "20");
    assert_eq!(read(dir.path(), "delay_off"), "20");

    BlinkPattern::for_index(1).apply(&mut led).unwrap();
    assert_eq!(read(dir.path(), "delay_on"), "200");

    BlinkPattern::for_index(5).apply(&mut led).unwrap();
    assert_eq!(read(dir.path(), "trigger"), "none");
}

#[test]
fn missing_led_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut led = SysfsLed::new(dir.path().join("nope"));

    match led.off() {
        Err(Error::Led { path, .. }) => assert!(path.ends_with("nope/trigger")),
        other => panic!("unexpected {other:?}"),
    }
}
