//! Defensive conversion of raw listing records into [`Workout`] and [`Point`].
//!
//! Mandatory fields fail the record with a [`ParseError`]. Optional numeric
//! fields are permissive: absent, `null` or `""` read as `None`, while a value
//! that is present but unreadable still fails. A bad point, or a `points`
//! value that is not a list, is skipped and reported; it never takes the
//! rest of its workout down with it.

use crate::error::ParseError;
use crate::sports::sport_label;
use crate::types::{Point, SkipScope, Skipped, Workout};
use crate::utils::from_wire_time;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value as JsonValue};

type Object = Map<String, JsonValue>;

/// Parse one workout, dropping unreadable points silently apart from a log line.
pub fn parse_workout(raw: &JsonValue) -> Result<Workout, ParseError> {
    parse_workout_collecting(raw, &mut Vec::new())
}

/// Parse one workout, appending every skipped point or track to `skipped`.
pub fn parse_workout_collecting(
    raw: &JsonValue,
    skipped: &mut Vec<Skipped>,
) -> Result<Workout, ParseError> {
    let obj = as_object(raw, "workout")?;

    let id = record_id(raw).ok_or_else(|| match obj.get("id") {
        None | Some(JsonValue::Null) => ParseError::missing("id"),
        Some(other) => ParseError::invalid("id", format!("unexpected value {other}")),
    })?;

    let start_time = required_time(obj, "start_time")?;

    let duration_s = required_number(obj, "duration")?;
    if duration_s < 0.0 {
        return Err(ParseError::invalid("duration", "negative"));
    }
    #[allow(clippy::cast_possible_truncation)]
    let duration = Duration::milliseconds((duration_s * 1000.0).round() as i64);

    let sport_code = integer(required_number(obj, "sport")?, "sport")?;

    let distance = match optional_number(obj, "distance")? {
        Some(km) if km < 0.0 => return Err(ParseError::invalid("distance", "negative")),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(km) => Some((km * 1000.0) as u64),
        None => None,
    };

    let calories = optional_number(obj, "calories")?;
    let comment = comment(obj, &id);

    let mut points = Vec::new();
    match obj.get("points") {
        None | Some(JsonValue::Null) => {}
        Some(JsonValue::Array(items)) => {
            points.reserve(items.len());
            for (idx, item) in items.iter().enumerate() {
                match parse_point(item) {
                    Ok(p) => points.push(p),
                    Err(reason) => {
                        tracing::warn!(workout = %id, point = idx, %reason, "skipping point");
                        skipped.push(Skipped {
                            workout_id: Some(id.clone()),
                            scope: SkipScope::Point(idx),
                            reason,
                        });
                    }
                }
            }
        }
        Some(other) => {
            let reason = ParseError::invalid("points", format!("expected an array, got {other}"));
            tracing::warn!(workout = %id, %reason, "unreadable track; keeping workout without points");
            skipped.push(Skipped {
                workout_id: Some(id.clone()),
                scope: SkipScope::Track,
                reason,
            });
        }
    }

    Ok(Workout {
        sport: sport_label(sport_code),
        id,
        start_time,
        duration,
        distance,
        sport_code,
        calories,
        comment,
        points,
    })
}

pub fn parse_point(raw: &JsonValue) -> Result<Point, ParseError> {
    let obj = as_object(raw, "point")?;
    let time = required_time(obj, "time")?;

    let lon = match optional_number(obj, "lng")? {
        Some(v) => Some(v),
        None => optional_number(obj, "lon")?,
    };

    Ok(Point {
        time,
        lat: optional_number(obj, "lat")?,
        lon,
        hr: optional_number(obj, "hr")?,
        alt: optional_number(obj, "alt")?,
        cad: optional_number(obj, "cad")?,
        dist: optional_number(obj, "dist")?,
        speed: optional_number(obj, "speed")?,
    })
}

/// Identifier of a raw record, if it has a usable one.
///
/// Numeric and string ids are both accepted; they are opaque either way.
pub fn record_id(raw: &JsonValue) -> Option<String> {
    match raw.get("id")? {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

/// Start time of a raw record, used to move the pagination cursor.
pub fn record_start_time(raw: &JsonValue) -> Option<DateTime<Utc>> {
    raw.get("start_time")?.as_str().and_then(from_wire_time)
}

/// Points from the legacy semicolon-delimited track body.
///
/// The first line is a header. Field positions: 0 time, 2 lat, 3 lon,
/// 4 dist, 5 speed, 6 alt, 7 hr, 8 cad.
pub fn parse_legacy_track(body: &str, workout_id: &str) -> (Vec<Point>, Vec<Skipped>) {
    let mut points = Vec::new();
    let mut skipped = Vec::new();

    let rows = body
        .lines()
        .skip(1)
        .map(str::trim_end)
        .filter(|l| !l.is_empty());

    for (idx, line) in rows.enumerate() {
        match parse_legacy_line(line) {
            Ok(p) => points.push(p),
            Err(reason) => {
                tracing::warn!(workout = %workout_id, point = idx, %reason, "skipping track line");
                skipped.push(Skipped {
                    workout_id: Some(workout_id.to_string()),
                    scope: SkipScope::Point(idx),
                    reason,
                });
            }
        }
    }

    (points, skipped)
}

fn parse_legacy_line(line: &str) -> Result<Point, ParseError> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    let col = |i: usize, name: &'static str| text_number(fields.get(i).copied(), name);

    let time = match fields.first() {
        None | Some(&"") => return Err(ParseError::missing("time")),
        Some(s) => from_wire_time(s).ok_or_else(|| ParseError::invalid("time", *s))?,
    };

    Ok(Point {
        time,
        lat: col(2, "lat")?,
        lon: col(3, "lon")?,
        dist: col(4, "dist")?,
        speed: col(5, "speed")?,
        alt: col(6, "alt")?,
        hr: col(7, "hr")?,
        cad: col(8, "cad")?,
    })
}

fn as_object<'a>(raw: &'a JsonValue, what: &'static str) -> Result<&'a Object, ParseError> {
    raw.as_object()
        .ok_or_else(|| ParseError::invalid(what, "expected an object"))
}

fn required_time(obj: &Object, field: &'static str) -> Result<DateTime<Utc>, ParseError> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => Err(ParseError::missing(field)),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Err(ParseError::missing(field)),
        Some(JsonValue::String(s)) => {
            from_wire_time(s).ok_or_else(|| ParseError::invalid(field, format!("bad time {s:?}")))
        }
        Some(other) => Err(ParseError::invalid(field, format!("unexpected value {other}"))),
    }
}

fn required_number(obj: &Object, field: &'static str) -> Result<f64, ParseError> {
    optional_number(obj, field)?.ok_or_else(|| ParseError::missing(field))
}

fn optional_number(obj: &Object, field: &'static str) -> Result<Option<f64>, ParseError> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| ParseError::invalid(field, format!("unrepresentable number {n}"))),
        Some(JsonValue::String(s)) => text_number(Some(s.as_str()), field),
        Some(other) => Err(ParseError::invalid(field, format!("unexpected value {other}"))),
    }
}

fn text_number(raw: Option<&str>, field: &'static str) -> Result<Option<f64>, ParseError> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ParseError::invalid(field, format!("not a number: {s:?}"))),
    }
}

/// Free-text `message`; anything but a non-empty string reads as no comment.
fn comment(obj: &Object, id: &str) -> Option<String> {
    match obj.get("message") {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) if s.is_empty() => None,
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(other) => {
            tracing::warn!(workout = %id, value = %other, "ignoring non-text message");
            None
        }
    }
}

fn integer(v: f64, field: &'static str) -> Result<i64, ParseError> {
    if v.fract() != 0.0 || v.abs() > 9.0e15 {
        return Err(ParseError::invalid(field, format!("not an integer: {v}")));
    }
    #[allow(clippy::cast_possible_truncation)]
    let n = v as i64;
    Ok(n)
}
