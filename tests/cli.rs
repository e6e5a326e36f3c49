use powerbutton::Error;
use powerbutton::config::{COUNT_TIME_WINDOW, Config, DEBOUNCE_TIME, MAX_TARGETS};

fn parse(args: &[&str]) -> Result<Config, Error> {
    Config::from_args(std::iter::once("powerbutton").chain(args.iter().copied()))
}

#[test]
fn line_and_ordered_targets() {
    let config = parse(&["17", "3", "0x7", "010"]).unwrap();

    assert_eq!(config.line, 17);
    assert_eq!(config.targets.as_slice(), &[3, 7, 8]);
    assert!(config.active_level);
    assert_eq!(config.debounce, DEBOUNCE_TIME);
    assert_eq!(config.window, COUNT_TIME_WINDOW);
    assert_eq!(config.chip.to_str(), Some("/dev/gpiochip0"));
    assert_eq!(config.led.to_str(), Some("/sys/class/leds/led1"));
    assert_eq!(config.label, "powerbutton");
}

#[test]
fn device_paths_can_be_overridden() {
    let config = parse(&[
        "--chip",
        "/dev/gpiochip2",
        "--led",
        "/sys/class/leds/status",
        "--label",
        "lid",
        "5",
        "2",
    ])
    .unwrap();

    assert_eq!(config.chip.to_str(), Some("/dev/gpiochip2"));
    assert_eq!(config.led.to_str(), Some("/sys/class/leds/status"));
    assert_eq!(config.label, "lid");
    assert_eq!(config.line, 5);
}

#[test]
fn zero_line_is_rejected() {
    assert!(matches!(parse(&["0", "3"]), Err(Error::Line(raw)) if raw == "0"));
    assert!(matches!(parse(&["gpio5", "3"]), Err(Error::Line(_))));
}

#[test]
fn zero_or_garbage_count_is_rejected() {
    assert!(matches!(parse(&["17", "3", "0"]), Err(Error::Count(raw)) if raw == "0"));
    assert!(matches!(parse(&["17", "three"]), Err(Error::Count(_))));
}

#[test]
fn at_least_one_count_is_required() {
    assert!(matches!(parse(&["17"]), Err(Error::Usage(_))));
    assert!(matches!(parse(&[]), Err(Error::Usage(_))));
}

#[test]
fn too_many_counts_is_rejected() {
    let counts: Vec<String> = (1..=MAX_TARGETS + 1).map(|n| n.to_string()).collect();
    let mut args = vec!["17"];
    args.extend(counts.iter().map(String::as_str));

    assert!(matches!(parse(&args), Err(Error::TooManyCounts)));
    assert!(parse(&args[..=MAX_TARGETS]).is_ok());
}
