use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The canonical one-day schedule IR that every feed format compiles into.
///
/// This is the single intermediate representation between format-specific
/// feed parsers and format-agnostic layout / view transforms.
///
/// ```text
///   NBC feed  ─┐
///   Euro EPG  ─┼─▶ DaySchedule ──▶ Layout Engine ──▶ RenderCommand[] ──▶ Renderer
///   Events    ─┘     (this)        (lanes, row         (DrawRect,        (terminal,
///                                   heights)            DrawText…)        canvas…)
/// ```
///
/// # Design principles
///
/// 1. **Format-agnostic** — No NBC-isms, no EPG-isms. Any per-day schedule
///    feed can be normalized into this representation.
/// 2. **Timezone-naive** — All instants are minutes from midnight of the
///    day bucket in the feed's fixed reference timezone. Bucketing and
///    timezone conversion are the feed's job; layout never converts.
/// 3. **Serializable** — Can be cached to disk or passed over process
///    boundaries as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub meta: TimetableMeta,
    /// Day bucket, ISO `YYYY-MM-DD` in the feed's reference timezone.
    pub date: String,
    /// Broadcasts grouped by row-key (network or discipline name),
    /// ordered for deterministic iteration.
    pub rows: BTreeMap<String, Vec<Broadcast>>,
}

impl DaySchedule {
    /// Broadcasts for one row-key, empty if the row has none that day.
    pub fn row(&self, key: &str) -> &[Broadcast] {
        self.rows.get(key).map_or(&[], Vec::as_slice)
    }

    /// Total number of broadcasts across all rows.
    pub fn broadcast_count(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    /// Iterate all broadcasts across all rows.
    pub fn all_broadcasts(&self) -> impl Iterator<Item = &Broadcast> {
        self.rows.values().flatten()
    }

    /// Look up a broadcast by id, searching all rows.
    pub fn broadcast(&self, id: &str) -> Option<&Broadcast> {
        self.all_broadcasts().find(|b| b.id == id)
    }
}

/// Top-level metadata about a parsed schedule day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableMeta {
    /// Human-readable name (filename, feed name, etc.).
    pub name: Option<String>,
    /// Source format (for display, not for branching logic).
    pub source_format: FeedFormat,
    /// What the row-keys represent.
    pub row_kind: RowKind,
    /// Label of the feed's reference timezone, if it declared one.
    /// Informational only — instants are already localized.
    pub timezone_label: Option<String>,
}

/// The original feed format — informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedFormat {
    NetworkFeed,
    EuroEpg,
    EventSchedule,
    Unknown,
}

impl std::fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkFeed => write!(f, "Network Feed"),
            Self::EuroEpg => write!(f, "European EPG"),
            Self::EventSchedule => write!(f, "Event Schedule"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// The grouping dimension rows represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// Broadcast networks / channels (NBC, USA Network, Eurosport 1…).
    Network,
    /// Sport disciplines (Alpine Skiing, Curling…).
    Discipline,
}

impl RowKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "Network",
            Self::Discipline => "Discipline",
        }
    }
}

/// A single time-bounded schedule item — the atomic unit of the grid.
///
/// `start_min` / `end_min` are minutes from midnight of the owning day
/// bucket; a broadcast spilling past midnight keeps its bucket and has
/// `end_min > 1440`. `end_min >= start_min` holds for well-formed data;
/// the layout engine clamps inverted spans to zero width rather than
/// rejecting them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    /// Stable identifier, unique within the feed (drupal id, EPG id,
    /// or a synthesized hash). Lane assignment ties on it, so it must
    /// not change across refetches.
    pub id: String,
    /// Row-key this broadcast belongs to (network or discipline name).
    pub row_key: String,
    /// Display title.
    pub title: String,
    /// Shorter title for narrow boxes, if the feed supplies one.
    pub short_title: Option<String>,
    /// Minutes from midnight of the day bucket.
    pub start_min: i64,
    /// Minutes from midnight of the day bucket; may exceed 1440.
    pub end_min: i64,
    /// Feed's day-part tag ("Primetime", "Late Night"…), if any.
    pub day_part: Option<String>,
    /// Free-form description, not inspected by layout.
    pub summary: Option<String>,
    pub is_live: bool,
    pub is_replay: bool,
    pub is_medal_session: bool,
}

impl Broadcast {
    /// Duration in minutes; never negative even for inverted spans.
    pub fn duration_min(&self) -> i64 {
        (self.end_min - self.start_min).max(0)
    }

    /// Title preferred for narrow display.
    pub fn display_title(&self) -> &str {
        self.short_title.as_deref().unwrap_or(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(id: &str, start: i64, end: i64) -> Broadcast {
        Broadcast {
            id: id.into(),
            row_key: "NBC".into(),
            title: format!("Broadcast {id}"),
            short_title: None,
            start_min: start,
            end_min: end,
            day_part: None,
            summary: None,
            is_live: false,
            is_replay: false,
            is_medal_session: false,
        }
    }

    fn sample_day() -> DaySchedule {
        let mut rows = BTreeMap::new();
        rows.insert(
            "NBC".to_string(),
            vec![minimal("b1", 540, 600), minimal("b2", 600, 660)],
        );
        rows.insert("Peacock".to_string(), vec![minimal("b3", 0, 1500)]);
        DaySchedule {
            meta: TimetableMeta {
                name: Some("test".into()),
                source_format: FeedFormat::NetworkFeed,
                row_kind: RowKind::Network,
                timezone_label: Some("America/New_York".into()),
            },
            date: "2026-02-08".to_string(),
            rows,
        }
    }

    #[test]
    fn broadcast_count_across_rows() {
        assert_eq!(sample_day().broadcast_count(), 3);
    }

    #[test]
    fn row_lookup() {
        let day = sample_day();
        assert_eq!(day.row("NBC").len(), 2);
        assert!(day.row("CNBC").is_empty());
    }

    #[test]
    fn broadcast_lookup_by_id() {
        let day = sample_day();
        assert_eq!(day.broadcast("b3").map(|b| b.end_min), Some(1500));
        assert!(day.broadcast("nope").is_none());
    }

    #[test]
    fn duration_clamps_inverted_span() {
        let b = minimal("x", 600, 540);
        assert_eq!(b.duration_min(), 0);
    }

    #[test]
    fn display_title_prefers_short() {
        let mut b = minimal("x", 0, 60);
        assert_eq!(b.display_title(), "Broadcast x");
        b.short_title = Some("Short".into());
        assert_eq!(b.display_title(), "Short");
    }

    #[test]
    fn feed_format_display() {
        assert_eq!(FeedFormat::NetworkFeed.to_string(), "Network Feed");
        assert_eq!(FeedFormat::EuroEpg.to_string(), "European EPG");
    }

    #[test]
    fn serialization_roundtrip() {
        let day = sample_day();
        let json = serde_json::to_string(&day).expect("serialize");
        let day2: DaySchedule = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(day2.broadcast_count(), 3);
        assert_eq!(day2.meta.source_format, FeedFormat::NetworkFeed);
        assert_eq!(day2.date, "2026-02-08");
    }
}
