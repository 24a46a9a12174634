#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use endoapi::parse::record_start_time;
use endoapi::utils::to_wire_time;
use endoapi::{Cursor, Error, PageSource};
use serde_json::{Value as JsonValue, json};
use std::cell::RefCell;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap()
}

/// Start time of the `i`-th newest workout: one hour apart.
pub fn start_of(i: usize) -> DateTime<Utc> {
    t0() - Duration::hours(i64::try_from(i).unwrap())
}

pub fn record(i: usize) -> JsonValue {
    json!({
        "id": format!("w{i}"),
        "start_time": to_wire_time(start_of(i)),
        "duration": 1800,
        "distance": 5.0,
        "sport": 0,
        "points": [{"time": to_wire_time(start_of(i)), "lat": 1.0, "lng": 2.0}]
    })
}

/// In-memory listing endpoint over a newest-first record list.
pub struct FakeServer {
    pub records: Vec<JsonValue>,
    pub inclusive_before: bool,
    pub calls: RefCell<Vec<Cursor>>,
}

impl FakeServer {
    pub fn with_records(n: usize) -> Self {
        Self::from_records((0..n).map(record).collect())
    }

    pub fn from_records(records: Vec<JsonValue>) -> Self {
        Self {
            records,
            inclusive_before: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn in_window(&self, raw: &JsonValue, cursor: &Cursor) -> bool {
        let Some(t) = record_start_time(raw) else {
            return true;
        };
        let below = cursor.before.is_none_or(|b| {
            if self.inclusive_before { t <= b } else { t < b }
        });
        let above = cursor.after.is_none_or(|a| t > a);
        below && above
    }
}

impl PageSource for FakeServer {
    fn fetch_page(&self, cursor: &Cursor, page_size: usize) -> Result<Vec<JsonValue>, Error> {
        self.calls.borrow_mut().push(*cursor);
        Ok(self
            .records
            .iter()
            .filter(|r| self.in_window(r, cursor))
            .take(page_size)
            .cloned()
            .collect())
    }
}

pub fn ids(workouts: &[endoapi::Workout]) -> Vec<String> {
    workouts.iter().map(|w| w.id.clone()).collect()
}
