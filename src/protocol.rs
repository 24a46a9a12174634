use crate::error::Error;
use crate::parse::parse_legacy_track;
use crate::transport::Transport;
use crate::types::{Cursor, Point, Skipped};
use crate::utils::{ceil_to_second, to_wire_time};
use serde_json::Value as JsonValue;

pub const LIST_COMMAND: &str = "api/workout/list";
pub const LIST_FIELDS: &str = "device,simple,basic,interval,points";
pub const LEGACY_TRACK_COMMAND: &str = "readTrack";

/// One bounded listing call: at most `page_size` raw records, newest first,
/// strictly inside the cursor window.
pub trait PageSource {
    fn fetch_page(&self, cursor: &Cursor, page_size: usize) -> Result<Vec<JsonValue>, Error>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn fetch_page(&self, cursor: &Cursor, page_size: usize) -> Result<Vec<JsonValue>, Error> {
        (**self).fetch_page(cursor, page_size)
    }
}

/// Listing endpoint client bound to one session token.
pub struct ChunkFetcher<T> {
    transport: T,
    token: String,
}

impl<T: Transport> ChunkFetcher<T> {
    pub fn new(transport: T, token: impl Into<String>) -> Self {
        Self {
            transport,
            token: token.into(),
        }
    }

    /// Query for one listing call. Built fresh every time.
    pub fn list_params(&self, cursor: &Cursor, page_size: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("maxResults", page_size.to_string()),
            ("fields", LIST_FIELDS.to_string()),
        ];
        if let Some(after) = cursor.after {
            params.push(("after", to_wire_time(after)));
        }
        // `before` is exclusive: rounding down would hide a workout at the whole second.
        if let Some(before) = cursor.before {
            params.push(("before", to_wire_time(ceil_to_second(before))));
        }
        params.push(("authToken", self.token.clone()));
        params.push(("language", "EN".to_string()));
        params
    }

    /// Track points from the older semicolon-delimited endpoint.
    pub fn fetch_legacy_track(&self, workout_id: &str) -> Result<(Vec<Point>, Vec<Skipped>), Error> {
        let params = [
            ("trackId", workout_id.to_string()),
            ("authToken", self.token.clone()),
            ("language", "EN".to_string()),
        ];
        let body = self.transport.get(LEGACY_TRACK_COMMAND, &params)?;
        if body.trim().is_empty() {
            return Err(Error::protocol(LEGACY_TRACK_COMMAND, "empty track response"));
        }
        Ok(parse_legacy_track(&body, workout_id))
    }
}

impl<T: Transport> PageSource for ChunkFetcher<T> {
    fn fetch_page(&self, cursor: &Cursor, page_size: usize) -> Result<Vec<JsonValue>, Error> {
        let params = self.list_params(cursor, page_size);
        let body = self.transport.get(LIST_COMMAND, &params)?;
        let records = decode_envelope(&body, LIST_COMMAND)?;
        crate::dlog!(
            "page records={} before={:?} after={:?}",
            records.len(),
            cursor.before,
            cursor.after
        );
        Ok(records)
    }
}

/// Pull the `data` array out of a `{"data": [...]}` envelope.
pub fn decode_envelope(body: &str, url: &str) -> Result<Vec<JsonValue>, Error> {
    let mut envelope: JsonValue = serde_json::from_str(body)
        .map_err(|e| Error::protocol(url, format!("invalid JSON: {e}")))?;

    match envelope.get_mut("data").map(JsonValue::take) {
        Some(JsonValue::Array(records)) => Ok(records),
        Some(JsonValue::Null) | None => Err(Error::protocol(url, "missing `data` field")),
        Some(_) => Err(Error::protocol(url, "`data` is not an array")),
    }
}
