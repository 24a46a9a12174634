use crate::config::{
    DEFAULT_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
};
use crate::utils::from_wire_time;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "endoapi",
    about = "Fetch your workout history from the Endomondo mobile API"
)]
pub struct Cli {
    /// Account email. Ignored when a token is given.
    #[arg(long, env = "ENDOMONDO_EMAIL")]
    pub email: Option<String>,

    /// Account password. Ignored when a token is given.
    #[arg(long, env = "ENDOMONDO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Reuse a session token from an earlier login.
    #[arg(long, env = "ENDOMONDO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Stop after this many workouts.
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Only workouts that started before this time (RFC 3339, `YYYY-MM-DD` or
    /// `YYYY-MM-DD HH:MM:SS UTC`).
    ///
    /// When earlier than `--after`, everything outside the window is fetched.
    #[arg(long, value_parser = parse_time)]
    pub before: Option<DateTime<Utc>>,

    /// Only workouts that started after this time.
    #[arg(long, value_parser = parse_time)]
    pub after: Option<DateTime<Utc>>,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Upper bound on listing calls per time window.
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Print workouts as a JSON array.
    #[arg(long)]
    pub json: bool,

    /// Include point counts and comments in the table output.
    #[arg(long)]
    pub details: bool,

    /// Print the session token to stderr so later runs can pass `--token`.
    #[arg(long)]
    pub print_token: bool,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

pub fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Some(t) = from_wire_time(s) {
        return Ok(t);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc())
        .ok_or_else(|| format!("unrecognised time: {s:?}"))
}
