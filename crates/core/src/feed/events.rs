use std::collections::BTreeMap;

use airgrid_protocol::{Broadcast, DaySchedule, FeedFormat, RowKind, TimetableMeta};
use serde::Deserialize;
use thiserror::Error;

use super::time;

#[derive(Debug, Error)]
pub enum EventFeedError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid feed date: {0}")]
    BadDate(String),
}

#[derive(Deserialize)]
struct RawFeed {
    date: String,
    events: Vec<RawEvent>,
}

#[derive(Deserialize)]
struct RawEvent {
    event_unit_code: Option<String>,
    event_unit_name: Option<String>,
    discipline: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    venue: Option<String>,
    #[serde(default)]
    medal_flag: bool,
    status: Option<String>,
}

/// Parse the per-discipline competition schedule:
/// `{ "date": "YYYY-MM-DD", "events": [event unit…] }`.
///
/// Rows are keyed by discipline name; units without one land under
/// "Unknown". Medal sessions keep their flag so the grid can accent
/// them.
pub fn parse_event_feed(data: &[u8]) -> Result<DaySchedule, EventFeedError> {
    let raw: RawFeed = serde_json::from_slice(data)?;
    let bucket =
        time::parse_date(&raw.date).ok_or_else(|| EventFeedError::BadDate(raw.date.clone()))?;

    let mut rows: BTreeMap<String, Vec<Broadcast>> = BTreeMap::new();
    for event in raw.events {
        let Some(id) = event.event_unit_code else {
            continue;
        };
        let Some(start_str) = event.start_time else {
            continue;
        };
        let Some(start_min) = time::minutes_from_bucket(&start_str, bucket) else {
            continue;
        };
        let end_min = event
            .end_time
            .as_deref()
            .and_then(|s| time::minutes_from_bucket(s, bucket))
            .unwrap_or(start_min);

        let row_key = event.discipline.unwrap_or_else(|| "Unknown".to_string());
        let is_live = event.status.as_deref() == Some("RUNNING");

        rows.entry(row_key.clone()).or_default().push(Broadcast {
            id,
            row_key,
            title: event.event_unit_name.unwrap_or_default(),
            short_title: None,
            start_min,
            end_min,
            day_part: None,
            summary: event.venue,
            is_live,
            is_replay: false,
            is_medal_session: event.medal_flag,
        });
    }
    for row in rows.values_mut() {
        row.sort_by(|a, b| (a.start_min, a.id.as_str()).cmp(&(b.start_min, b.id.as_str())));
    }

    Ok(DaySchedule {
        meta: TimetableMeta {
            name: None,
            source_format: FeedFormat::EventSchedule,
            row_kind: RowKind::Discipline,
            timezone_label: None,
        },
        date: raw.date,
        rows,
    })
}
