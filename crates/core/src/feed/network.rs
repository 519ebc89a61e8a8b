use std::collections::BTreeMap;

use airgrid_protocol::{Broadcast, DaySchedule, FeedFormat, RowKind, TimetableMeta};
use serde::Deserialize;
use thiserror::Error;

use super::time;

#[derive(Debug, Error)]
pub enum NetworkFeedError {
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
    networks: BTreeMap<String, Vec<RawBroadcast>>,
}

#[derive(Deserialize)]
struct RawBroadcast {
    drupal_id: Option<String>,
    title: Option<String>,
    short_title: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    day_part: Option<String>,
    summary: Option<String>,
    #[serde(default)]
    is_replay: Option<bool>,
    #[serde(default)]
    is_medal_session: bool,
}

/// Title keywords marking a re-aired broadcast when the feed omits the
/// explicit flag.
const REPLAY_KEYWORDS: &[&str] = &["re-air", "encore", "replay"];

fn title_marks_replay(title: &str) -> bool {
    let lower = title.to_lowercase();
    REPLAY_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Parse the US network schedule feed:
/// `{ "date": "YYYY-MM-DD", "networks": { name: [broadcast…] } }`.
///
/// Records missing an id or a start time are skipped — one bad record
/// must not abort the whole day. A missing end time makes the record
/// zero-width rather than dropping it. Unattributed streaming items
/// arrive under an empty network name and are grouped as "Peacock".
pub fn parse_network_feed(data: &[u8]) -> Result<DaySchedule, NetworkFeedError> {
    let raw: RawFeed = serde_json::from_slice(data)?;
    let bucket = time::parse_date(&raw.date)
        .ok_or_else(|| NetworkFeedError::BadDate(raw.date.clone()))?;

    let mut rows: BTreeMap<String, Vec<Broadcast>> = BTreeMap::new();
    for (network, entries) in raw.networks {
        let row_key = if network.trim().is_empty() {
            "Peacock".to_string()
        } else {
            network
        };
        let row = rows.entry(row_key.clone()).or_default();
        for entry in entries {
            let Some(id) = entry.drupal_id else { continue };
            let Some(start_str) = entry.start_time else {
                continue;
            };
            let Some(start_min) = time::minutes_from_bucket(&start_str, bucket) else {
                continue;
            };
            let end_min = entry
                .end_time
                .as_deref()
                .and_then(|s| time::minutes_from_bucket(s, bucket))
                .unwrap_or(start_min);

            let title = entry.title.unwrap_or_default();
            let is_replay = entry
                .is_replay
                .unwrap_or_else(|| title_marks_replay(&title));

            row.push(Broadcast {
                id,
                row_key: row_key.clone(),
                title,
                short_title: entry.short_title,
                start_min,
                end_min,
                day_part: entry.day_part,
                summary: entry.summary,
                is_live: false,
                is_replay,
                is_medal_session: entry.is_medal_session,
            });
        }
        row.sort_by(|a, b| (a.start_min, a.id.as_str()).cmp(&(b.start_min, b.id.as_str())));
    }

    Ok(DaySchedule {
        meta: TimetableMeta {
            name: None,
            source_format: FeedFormat::NetworkFeed,
            row_kind: RowKind::Network,
            timezone_label: raw.timezone,
        },
        date: raw.date,
        rows,
    })
}
