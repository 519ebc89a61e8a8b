use airgrid_protocol::{DaySchedule, RowKind, TimetableMeta};
use serde::{Deserialize, Serialize};

use crate::model::RowCatalog;

/// Multi-day timetable container.
///
/// Holds one `DaySchedule` per day bucket, kept in date order. Adding
/// a day that already exists replaces it — that is the refresh path,
/// and the reason lane assignment downstream has to be deterministic:
/// a refetch with identical content must not move anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    days: Vec<DaySchedule>,
}

impl Timetable {
    /// Create a new empty timetable.
    pub fn new() -> Self {
        Self { days: Vec::new() }
    }

    /// Create a timetable from a single day (most common case).
    pub fn from_day(day: DaySchedule) -> Self {
        let mut timetable = Self::new();
        timetable.add_day(day);
        timetable
    }

    /// Add a day bucket, replacing any existing bucket with the same
    /// date. Days stay sorted by date.
    pub fn add_day(&mut self, day: DaySchedule) {
        match self.days.iter().position(|d| d.date == day.date) {
            Some(idx) => self.days[idx] = day,
            None => {
                let idx = self
                    .days
                    .partition_point(|d| d.date.as_str() < day.date.as_str());
                self.days.insert(idx, day);
            }
        }
    }

    /// All day buckets in date order.
    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    /// Look up one day bucket by date.
    pub fn day(&self, date: &str) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_date(&self) -> Option<&str> {
        self.days.first().map(|d| d.date.as_str())
    }

    pub fn last_date(&self) -> Option<&str> {
        self.days.last().map(|d| d.date.as_str())
    }

    /// Metadata of the earliest day, if any. Feeds of the same source
    /// carry identical meta per day.
    pub fn meta(&self) -> Option<&TimetableMeta> {
        self.days.first().map(|d| &d.meta)
    }

    pub fn row_kind(&self) -> RowKind {
        self.meta().map_or(RowKind::Network, |m| m.row_kind)
    }

    /// Derive the display catalog: the union of row-keys across all
    /// days, so a network that only airs on one day still gets a row
    /// on every day.
    pub fn row_catalog(&self) -> RowCatalog {
        let keys: Vec<String> = self
            .days
            .iter()
            .flat_map(|d| d.rows.keys().cloned())
            .collect();
        RowCatalog::from_keys(self.row_kind(), keys)
    }
}

impl Default for Timetable {
    fn default() -> Self {
        Self::new()
    }
}
