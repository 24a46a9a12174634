use crate::error::ParseError;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    pub id: String,
    pub start_time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_seconds")]
    pub duration: Duration,
    /// Whole metres.
    pub distance: Option<u64>,
    pub sport_code: i64,
    pub sport: &'static str,
    pub calories: Option<f64>,
    pub comment: Option<String>,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub time: DateTime<Utc>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub hr: Option<f64>,
    pub alt: Option<f64>,
    pub cad: Option<f64>,
    /// Kilometres from the start, as reported.
    pub dist: Option<f64>,
    pub speed: Option<f64>,
}

/// Fetch window. Both bounds are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub before: Option<DateTime<Utc>>,
    pub after: Option<DateTime<Utc>>,
}

impl Cursor {
    pub const fn new(before: Option<DateTime<Utc>>, after: Option<DateTime<Utc>>) -> Self {
        Self { before, after }
    }
}

/// What a [`Skipped`] entry dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipScope {
    Workout,
    /// The track was unreadable; the workout was kept without points.
    Track,
    Point(usize),
}

/// A record, track or point dropped during parsing, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub workout_id: Option<String>,
    pub scope: SkipScope,
    pub reason: ParseError,
}

#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub workouts: Vec<Workout>,
    pub skipped: Vec<Skipped>,
}

impl FetchOutcome {
    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub(crate) fn append(&mut self, other: Self) {
        self.workouts.extend(other.workouts);
        self.skipped.extend(other.skipped);
    }
}

fn serialize_seconds<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(d.num_seconds())
}
