use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! dlog {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Timestamp layout used by the mobile API, always in UTC.
pub const WIRE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Initialize colorful logging.
///
/// Default level is INFO.
/// - `-v` => DEBUG
/// - `-vv` => TRACE
/// - `-q` => WARN
/// - `-qq` => ERROR
///
/// `RUST_LOG` overrides everything (e.g. `RUST_LOG=trace`).
pub fn init_logging(verbose: u8, quiet: u8) {
    let net = i16::from(verbose) - i16::from(quiet);
    let level = match net {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i16::MAX => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,endoapi={level}")));

    let show_src = matches!(level, "debug" | "trace");

    fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}

pub fn to_wire_time(t: DateTime<Utc>) -> String {
    t.format(WIRE_TIME_FORMAT).to_string()
}

/// Round up to a whole second; the wire layout has no sub-second part.
pub fn ceil_to_second(t: DateTime<Utc>) -> DateTime<Utc> {
    match t.with_nanosecond(0) {
        Some(whole) if whole != t => whole + Duration::seconds(1),
        _ => t,
    }
}

pub fn from_wire_time(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), WIRE_TIME_FORMAT)
        .ok()
        .map(|n| n.and_utc())
}

pub fn format_duration(d: Duration) -> String {
    let secs = d.num_seconds().unsigned_abs();
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

pub fn format_distance(metres: Option<u64>) -> String {
    metres.map_or_else(|| "-".to_string(), |m| format!("{m}m"))
}
