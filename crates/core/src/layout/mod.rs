pub mod concurrency;
pub mod lanes;

pub use concurrency::{concurrency_at, peak_concurrency};
pub use lanes::{LaneSlot, assign_lanes, lanes_used};

use airgrid_protocol::Broadcast;
use serde::{Deserialize, Serialize};

use crate::model::{RowCatalog, Timetable};

/// Maximum lanes a row displays before broadcasts start sharing lane 0.
pub const DEFAULT_LANE_CAP: usize = 5;

/// A broadcast's occupied span with inverted input clamped to zero
/// width. Shared by lane assignment and concurrency counting so the
/// two can never disagree on what a span covers.
pub(crate) fn clamped_span(broadcast: &Broadcast) -> (i64, i64) {
    let start = broadcast.start_min;
    (start, broadcast.end_min.max(start))
}

/// Lane assignments and row height for one (row-key, day) cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellLayout {
    /// Lane-tagged broadcasts, sorted by `(start_min, id)`.
    pub slots: Vec<LaneSlot>,
    /// Peak concurrency for the cell, clamped to the lane cap.
    pub peak: usize,
    /// Display height in lanes: `max(peak, 1)` so empty rows stay
    /// visible and selectable.
    pub lanes: usize,
    /// True when the bucket exceeded capacity and lane 0 carries
    /// deliberate overlap.
    pub overflow: bool,
}

impl CellLayout {
    fn build(broadcasts: &[Broadcast], cap: usize) -> Self {
        let slots = assign_lanes(broadcasts, cap);
        let true_peak = peak_concurrency(broadcasts);
        let peak = true_peak.min(cap.max(1));
        Self {
            slots,
            peak,
            lanes: peak.max(1),
            overflow: true_peak > cap.max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// One display row across all days of the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowLayout {
    pub row_key: String,
    /// One cell per day, parallel to `GridLayout::days`.
    pub cells: Vec<CellLayout>,
}

/// The full renderer contract: lane-tagged broadcasts and row heights
/// for every (row-key, day) pair of a timetable.
///
/// Built once, wholesale, whenever the underlying timetable changes —
/// never per visible sub-window. Recomputing lanes against a windowed
/// slice makes the same broadcast land on different lanes depending on
/// scroll position, which is exactly the rendering bug this type's
/// lifecycle rules out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridLayout {
    /// Day buckets in date order.
    pub days: Vec<String>,
    /// Rows in catalog order; every catalog key appears even when it
    /// has no broadcasts anywhere.
    pub rows: Vec<RowLayout>,
    pub lane_cap: usize,
}

impl GridLayout {
    /// Lay out every (row-key, day) bucket of `timetable` against the
    /// fixed row catalog. Each bucket is computed independently; lanes
    /// and peaks never cross day boundaries.
    pub fn build(timetable: &Timetable, catalog: &RowCatalog, cap: usize) -> Self {
        let cap = cap.max(1);
        let days: Vec<String> = timetable.days().iter().map(|d| d.date.clone()).collect();

        let rows = catalog
            .keys()
            .iter()
            .map(|key| RowLayout {
                row_key: key.clone(),
                cells: timetable
                    .days()
                    .iter()
                    .map(|day| CellLayout::build(day.row(key), cap))
                    .collect(),
            })
            .collect();

        Self {
            days,
            rows,
            lane_cap: cap,
        }
    }

    pub fn day_index(&self, date: &str) -> Option<usize> {
        self.days.iter().position(|d| d == date)
    }

    pub fn cell(&self, row_key: &str, date: &str) -> Option<&CellLayout> {
        let day_idx = self.day_index(date)?;
        self.rows
            .iter()
            .find(|r| r.row_key == row_key)
            .and_then(|r| r.cells.get(day_idx))
    }

    /// Total height of one day's grid, in lanes.
    pub fn day_height_lanes(&self, day_idx: usize) -> usize {
        self.rows
            .iter()
            .filter_map(|r| r.cells.get(day_idx))
            .map(|c| c.lanes)
            .sum()
    }

    /// Vertical offset of a row within one day's grid, in lanes.
    pub fn row_offset_lanes(&self, row_idx: usize, day_idx: usize) -> usize {
        self.rows[..row_idx.min(self.rows.len())]
            .iter()
            .filter_map(|r| r.cells.get(day_idx))
            .map(|c| c.lanes)
            .sum()
    }
}
