use airgrid_protocol::Broadcast;

use super::clamped_span;

/// Peak number of broadcasts simultaneously on air at any instant
/// within one (row-key, day) bucket. Uncapped — callers size rows by
/// clamping this to the lane capacity.
///
/// Classic sweep: +1/-1 events at each span's start/end, sorted with
/// ends before starts at equal instants so that touching broadcasts
/// never count as concurrent. This is the same half-open convention
/// `assign_lanes` uses; the two must agree or row heights and lane
/// counts drift apart visibly.
///
/// Zero-width spans (including clamped inverted ones) cover no instant
/// and contribute nothing to the peak.
pub fn peak_concurrency(broadcasts: &[Broadcast]) -> usize {
    let mut events: Vec<(i64, i8)> = Vec::with_capacity(broadcasts.len() * 2);
    for broadcast in broadcasts {
        let (start, end) = clamped_span(broadcast);
        if end <= start {
            continue;
        }
        events.push((start, 1));
        events.push((end, -1));
    }

    // -1 sorts before +1, so an end at instant t is processed before a
    // start at t.
    events.sort_unstable();

    let mut running: i64 = 0;
    let mut peak: i64 = 0;
    for (_, delta) in events {
        running += i64::from(delta);
        peak = peak.max(running);
    }
    peak as usize
}

/// Number of broadcasts covering one instant, under the same half-open
/// convention: a broadcast covers `[start_min, end_min)`.
pub fn concurrency_at(broadcasts: &[Broadcast], minute: i64) -> usize {
    broadcasts
        .iter()
        .filter(|b| {
            let (start, end) = clamped_span(b);
            start <= minute && minute < end
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn morning_block_peaks_at_two() {
        let input = vec![
            broadcast("a", 540, 600),
            broadcast("b", 540, 570),
            broadcast("c", 570, 630),
            broadcast("d", 600, 660),
        ];
        assert_eq!(peak_concurrency(&input), 2);
    }

    #[test]
    fn touching_broadcasts_are_not_concurrent() {
        let input = vec![broadcast("a", 540, 600), broadcast("b", 600, 660)];
        assert_eq!(peak_concurrency(&input), 1);
        assert_eq!(concurrency_at(&input, 599), 1);
        assert_eq!(concurrency_at(&input, 600), 1);
    }

    #[test]
    fn six_way_pileup() {
        let input: Vec<Broadcast> = (0..6)
            .map(|i| broadcast(&format!("b{i}"), 720, 780))
            .collect();
        assert_eq!(peak_concurrency(&input), 6);
    }

    #[test]
    fn zero_width_covers_no_instant() {
        let input = vec![broadcast("z", 540, 540)];
        assert_eq!(peak_concurrency(&input), 0);
        assert_eq!(concurrency_at(&input, 540), 0);
        assert_eq!(concurrency_at(&input, 541), 0);
    }

    #[test]
    fn inverted_span_counts_as_zero_width() {
        let input = vec![broadcast("inv", 600, 540), broadcast("a", 540, 660)];
        assert_eq!(peak_concurrency(&input), 1);
    }

    #[test]
    fn empty_bucket_has_zero_peak() {
        assert_eq!(peak_concurrency(&[]), 0);
    }

    #[test]
    fn peak_matches_pointwise_maximum() {
        let input = vec![
            broadcast("a", 0, 100),
            broadcast("b", 50, 150),
            broadcast("c", 80, 120),
            broadcast("d", 100, 200),
            broadcast("e", 150, 250),
        ];
        let sweep = peak_concurrency(&input);
        let pointwise = (0..=250)
            .map(|m| concurrency_at(&input, m))
            .max()
            .unwrap_or(0);
        assert_eq!(sweep, pointwise);
        assert_eq!(sweep, 3);
    }
}
