use std::collections::BTreeMap;

use airgrid_protocol::{Broadcast, DaySchedule, FeedFormat, RowKind, TimetableMeta};
use serde::Deserialize;
use thiserror::Error;

use super::time;

#[derive(Debug, Error)]
pub enum EuroFeedError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid feed date: {0}")]
    BadDate(String),
}

#[derive(Deserialize)]
struct RawFeed {
    date: String,
    #[serde(default)]
    timezone: Option<String>,
    channels: BTreeMap<String, Vec<RawBroadcast>>,
}

#[derive(Deserialize)]
struct RawBroadcast {
    broadcast_id: Option<String>,
    channel_name: Option<String>,
    title_original: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    duration_minutes: Option<i64>,
    #[serde(default)]
    is_live: bool,
    #[serde(default)]
    is_replay: bool,
}

/// EPG sources don't always carry a stable id; synthesize one from the
/// fields that identify an airing, so the id survives refetches.
fn synthesize_id(channel: &str, start: &str, title: &str) -> String {
    // FNV-1a over "channel|start|title".
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in channel
        .bytes()
        .chain([b'|'])
        .chain(start.bytes())
        .chain([b'|'])
        .chain(title.bytes())
    {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    format!("{channel}-{hash:016x}")
}

/// Parse the European EPG feed:
/// `{ "date": "YYYY-MM-DD", "channels": { code: [broadcast…] } }`.
///
/// Rows are keyed by the channel's display name when present, falling
/// back to the channel code. End times may arrive as an explicit
/// timestamp or as `duration_minutes`; with neither, the record is
/// zero-width.
pub fn parse_euro_feed(data: &[u8]) -> Result<DaySchedule, EuroFeedError> {
    let raw: RawFeed = serde_json::from_slice(data)?;
    let bucket =
        time::parse_date(&raw.date).ok_or_else(|| EuroFeedError::BadDate(raw.date.clone()))?;

    let mut rows: BTreeMap<String, Vec<Broadcast>> = BTreeMap::new();
    for (code, entries) in raw.channels {
        for entry in entries {
            let Some(start_str) = entry.start_time else {
                continue;
            };
            let Some(start_min) = time::minutes_from_bucket(&start_str, bucket) else {
                continue;
            };
            let end_min = match (&entry.end_time, entry.duration_minutes) {
                (Some(end), _) => {
                    time::minutes_from_bucket(end, bucket).unwrap_or(start_min)
                }
                (None, Some(duration)) => start_min + duration.max(0),
                (None, None) => start_min,
            };

            let row_key = entry
                .channel_name
                .clone()
                .unwrap_or_else(|| code.clone());
            let title = entry.title_original.unwrap_or_default();
            let id = entry
                .broadcast_id
                .unwrap_or_else(|| synthesize_id(&code, &start_str, &title));

            rows.entry(row_key.clone()).or_default().push(Broadcast {
                id,
                row_key,
                title,
                short_title: None,
                start_min,
                end_min,
                day_part: None,
                summary: None,
                is_live: entry.is_live,
                is_replay: entry.is_replay,
                is_medal_session: false,
            });
        }
    }
    for row in rows.values_mut() {
        row.sort_by(|a, b| (a.start_min, a.id.as_str()).cmp(&(b.start_min, b.id.as_str())));
    }

    Ok(DaySchedule {
        meta: TimetableMeta {
            name: None,
            source_format: FeedFormat::EuroEpg,
            row_kind: RowKind::Network,
            timezone_label: raw.timezone,
        },
        date: raw.date,
        rows,
    })
}
