use airgrid_protocol::Broadcast;
use serde::{Deserialize, Serialize};

use super::clamped_span;

/// A broadcast with its assigned display lane within a row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneSlot {
    /// Lane index in `[0, cap)`. Lane 0 doubles as the overflow lane
    /// once a row exceeds its capacity.
    pub lane: usize,
    pub broadcast: Broadcast,
}

/// Assign every broadcast of one (row-key, day) bucket a lane such that
/// no two broadcasts sharing a lane overlap, using at most `cap` lanes.
///
/// Greedy earliest-available-lane (interval partitioning): broadcasts
/// are taken in `(start_min, id)` order and placed on the lowest lane
/// whose last occupant has already ended. Overlap is half-open — a
/// broadcast ending at 9:30 frees its lane for one starting at 9:30.
/// This is optimal (lane count equals peak concurrency) as long as the
/// bucket stays within `cap`.
///
/// Once `cap` lanes are busy, further broadcasts are forced onto lane 0
/// and render as a visible overlap — the accepted degradation, since
/// growing the row without bound is worse for the grid. The overflow
/// lane keeps the later of the two end times so it is not freed while
/// an earlier, longer occupant is still on air.
///
/// Deterministic: any permutation of the same input yields the same
/// assignment, so lanes never jump across refetches. The tie-break on
/// `id` is what guarantees this for equal start times.
///
/// Zero-width spans (including clamped inverted ones) cover no instant
/// and overlap nothing, so they sit on lane 0 without reserving it —
/// they must never open a lane the peak does not justify. Output is
/// sorted by `(start_min, id)`.
pub fn assign_lanes(broadcasts: &[Broadcast], cap: usize) -> Vec<LaneSlot> {
    let cap = cap.max(1);

    let mut ordered: Vec<&Broadcast> = broadcasts.iter().collect();
    ordered.sort_by(|a, b| {
        (a.start_min, a.id.as_str()).cmp(&(b.start_min, b.id.as_str()))
    });

    // End time of the latest occupant per lane.
    let mut lane_ends: Vec<i64> = Vec::new();
    let mut slots = Vec::with_capacity(ordered.len());

    for broadcast in ordered {
        let (start, end) = clamped_span(broadcast);

        // An empty span conflicts with nothing: lane 0 is always valid
        // for it, and it must not bump a lane's end or the row would
        // grow past its true peak.
        if end <= start {
            slots.push(LaneSlot {
                lane: 0,
                broadcast: broadcast.clone(),
            });
            continue;
        }

        let mut lane = None;
        for (idx, lane_end) in lane_ends.iter_mut().enumerate() {
            if *lane_end <= start {
                *lane_end = end;
                lane = Some(idx);
                break;
            }
        }

        let lane = match lane {
            Some(idx) => idx,
            None if lane_ends.len() < cap => {
                lane_ends.push(end);
                lane_ends.len() - 1
            }
            None => {
                // Overflow: double up on lane 0. Keep the later end time
                // so the lane is not freed under a still-running occupant.
                lane_ends[0] = lane_ends[0].max(end);
                0
            }
        };

        slots.push(LaneSlot {
            lane,
            broadcast: broadcast.clone(),
        });
    }

    slots
}

/// Number of distinct lanes an assignment occupies (at least 1 for a
/// non-empty assignment).
pub fn lanes_used(slots: &[LaneSlot]) -> usize {
    slots.iter().map(|s| s.lane + 1).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DEFAULT_LANE_CAP;

    fn broadcast(id: &str, start: i64, end: i64) -> Broadcast {
        Broadcast {
            id: id.into(),
            row_key: "NBC".into(),
            title: id.to_uppercase(),
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

    fn lane_of(slots: &[LaneSlot], id: &str) -> usize {
        slots
            .iter()
            .find(|s| s.broadcast.id == id)
            .map(|s| s.lane)
            .unwrap_or(usize::MAX)
    }

    #[test]
    fn packs_morning_block_into_two_lanes() {
        // 9:00–10:00, 9:00–9:30, 9:30–10:30, 10:00–11:00
        let input = vec![
            broadcast("a", 540, 600),
            broadcast("b", 540, 570),
            broadcast("c", 570, 630),
            broadcast("d", 600, 660),
        ];
        let slots = assign_lanes(&input, DEFAULT_LANE_CAP);

        // "a" sorts before "b" at 9:00, so it takes lane 0.
        assert_eq!(lane_of(&slots, "a"), 0);
        assert_eq!(lane_of(&slots, "b"), 1);
        // "b" ends exactly when "c" starts, freeing lane 1.
        assert_eq!(lane_of(&slots, "c"), 1);
        // "a" ends exactly when "d" starts, freeing lane 0.
        assert_eq!(lane_of(&slots, "d"), 0);
        assert_eq!(lanes_used(&slots), 2);
    }

    #[test]
    fn deterministic_under_input_permutation() {
        let mut input = vec![
            broadcast("a", 540, 600),
            broadcast("b", 540, 570),
            broadcast("c", 570, 630),
            broadcast("d", 600, 660),
        ];
        let baseline = assign_lanes(&input, DEFAULT_LANE_CAP);

        input.reverse();
        let reversed = assign_lanes(&input, DEFAULT_LANE_CAP);
        input.swap(0, 2);
        let shuffled = assign_lanes(&input, DEFAULT_LANE_CAP);

        for slots in [&reversed, &shuffled] {
            assert_eq!(slots.len(), baseline.len());
            for (a, b) in baseline.iter().zip(slots.iter()) {
                assert_eq!(a.broadcast.id, b.broadcast.id);
                assert_eq!(a.lane, b.lane);
            }
        }
    }

    #[test]
    fn output_sorted_by_start_then_id() {
        let input = vec![
            broadcast("z", 540, 600),
            broadcast("a", 540, 600),
            broadcast("m", 500, 520),
        ];
        let slots = assign_lanes(&input, DEFAULT_LANE_CAP);
        let ids: Vec<&str> = slots.iter().map(|s| s.broadcast.id.as_str()).collect();
        assert_eq!(ids, vec!["m", "a", "z"]);
    }

    #[test]
    fn overflow_lands_on_lane_zero() {
        // Six broadcasts all covering 12:00–13:00 with cap 5.
        let input: Vec<Broadcast> = (0..6)
            .map(|i| broadcast(&format!("b{i}"), 720, 780))
            .collect();
        let slots = assign_lanes(&input, DEFAULT_LANE_CAP);

        assert_eq!(lanes_used(&slots), DEFAULT_LANE_CAP);
        let on_lane_zero = slots.iter().filter(|s| s.lane == 0).count();
        assert_eq!(on_lane_zero, 2);
    }

    #[test]
    fn overflow_lane_keeps_later_end_time() {
        // Five long broadcasts fill the row; a short sixth overflows onto
        // lane 0 but must not free it for the seventh, which still
        // conflicts with the long occupant.
        let mut input: Vec<Broadcast> = (0..5)
            .map(|i| broadcast(&format!("long{i}"), 600, 720))
            .collect();
        input.push(broadcast("short", 610, 620));
        input.push(broadcast("late", 630, 700));
        let slots = assign_lanes(&input, DEFAULT_LANE_CAP);

        assert_eq!(lane_of(&slots, "short"), 0);
        assert_eq!(lane_of(&slots, "late"), 0);
    }

    #[test]
    fn no_same_lane_overlap_within_capacity() {
        let input = vec![
            broadcast("a", 0, 120),
            broadcast("b", 30, 60),
            broadcast("c", 60, 180),
            broadcast("d", 90, 150),
            broadcast("e", 120, 240),
        ];
        let slots = assign_lanes(&input, DEFAULT_LANE_CAP);
        for (i, a) in slots.iter().enumerate() {
            for b in &slots[i + 1..] {
                if a.lane == b.lane {
                    let disjoint = a.broadcast.end_min <= b.broadcast.start_min
                        || b.broadcast.end_min <= a.broadcast.start_min;
                    assert!(disjoint, "{} and {} overlap on lane {}",
                        a.broadcast.id, b.broadcast.id, a.lane);
                }
            }
        }
    }

    #[test]
    fn lane_count_is_minimal() {
        // Peak concurrency is 3 (at minute 90), so exactly 3 lanes.
        let input = vec![
            broadcast("a", 0, 100),
            broadcast("b", 50, 150),
            broadcast("c", 80, 120),
            broadcast("d", 100, 200),
            broadcast("e", 150, 250),
        ];
        let slots = assign_lanes(&input, DEFAULT_LANE_CAP);
        assert_eq!(lanes_used(&slots), 3);
    }

    #[test]
    fn zero_width_broadcast_gets_a_lane() {
        let input = vec![broadcast("z", 540, 540)];
        let slots = assign_lanes(&input, DEFAULT_LANE_CAP);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].lane, 0);
    }

    #[test]
    fn zero_width_span_amid_busy_lanes_does_not_open_one() {
        // Two broadcasts keep lanes 0 and 1 busy across the marker's
        // instant; the marker stays on lane 0 instead of growing the
        // row to three lanes, so it always lands inside the height
        // band the peak sizes.
        let input = vec![
            broadcast("a", 0, 100),
            broadcast("b", 0, 100),
            broadcast("z", 50, 50),
        ];
        let slots = assign_lanes(&input, DEFAULT_LANE_CAP);
        assert_eq!(lane_of(&slots, "z"), 0);
        assert_eq!(lanes_used(&slots), 2);
    }

    #[test]
    fn zero_width_span_does_not_block_its_lane() {
        // The marker at 9:00 must not reserve lane 0 against the real
        // broadcast starting at the same instant.
        let input = vec![broadcast("m", 540, 540), broadcast("a", 540, 600)];
        let slots = assign_lanes(&input, DEFAULT_LANE_CAP);
        assert_eq!(lane_of(&slots, "a"), 0);
        assert_eq!(lane_of(&slots, "m"), 0);
        assert_eq!(lanes_used(&slots), 1);
    }

    #[test]
    fn inverted_span_is_clamped_not_dropped() {
        // end < start is treated as zero width; it shares lane 0 with a
        // broadcast that starts at the same instant without blocking it.
        let input = vec![broadcast("inv", 600, 540), broadcast("ok", 600, 660)];
        let slots = assign_lanes(&input, DEFAULT_LANE_CAP);
        assert_eq!(slots.len(), 2);
        assert_eq!(lane_of(&slots, "inv"), 0);
        assert_eq!(lane_of(&slots, "ok"), 0);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(assign_lanes(&[], DEFAULT_LANE_CAP).is_empty());
        assert_eq!(lanes_used(&[]), 0);
    }
}
