//! Naive local-time parsing for feed timestamps.
//!
//! Feeds deliver timestamps already localized to their fixed reference
//! timezone, so there is nothing to convert — only to parse and to
//! anchor against the day bucket. A trailing UTC offset or `Z` is
//! accepted and ignored.

/// Days since 1970-01-01 for a proleptic Gregorian civil date.
pub(crate) fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// Parse `YYYY-MM-DD` into days since the epoch.
pub(crate) fn parse_date(s: &str) -> Option<i64> {
    let bytes = s.as_bytes();
    if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let year: i64 = s.get(0..4)?.parse().ok()?;
    let month: i64 = s.get(5..7)?.parse().ok()?;
    let day: i64 = s.get(8..10)?.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(days_from_civil(year, month, day))
}

/// Parse a local `YYYY-MM-DD[THH:MM[:SS]]` timestamp into
/// (days since epoch, minutes from that day's midnight). Seconds and
/// any trailing offset are discarded.
pub(crate) fn parse_local_datetime(s: &str) -> Option<(i64, i64)> {
    let days = parse_date(s)?;
    let rest = &s[10..];
    if rest.is_empty() {
        return Some((days, 0));
    }
    if !rest.starts_with('T') && !rest.starts_with(' ') {
        return None;
    }
    let clock = &rest[1..];
    if clock.len() < 5 || clock.as_bytes()[2] != b':' {
        return None;
    }
    let hour: i64 = clock.get(0..2)?.parse().ok()?;
    let minute: i64 = clock.get(3..5)?.parse().ok()?;
    if hour >= 24 || minute >= 60 {
        return None;
    }
    Some((days, hour * 60 + minute))
}

/// Minutes from midnight of the `bucket` day (days since epoch) for a
/// local timestamp. Timestamps on the following day land past 1440,
/// keeping a past-midnight broadcast in its original bucket.
pub(crate) fn minutes_from_bucket(s: &str, bucket: i64) -> Option<i64> {
    let (days, minute) = parse_local_datetime(s)?;
    Some((days - bucket) * 1440 + minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_days() {
        assert_eq!(parse_date("1970-01-01"), Some(0));
        assert_eq!(parse_date("1970-01-02"), Some(1));
        assert_eq!(parse_date("1969-12-31"), Some(-1));
    }

    #[test]
    fn leap_year_arithmetic() {
        // 2000 is a leap year: Jan (31) + Feb (29) days before Mar 1.
        let jan1 = days_from_civil(2000, 1, 1);
        assert_eq!(days_from_civil(2000, 3, 1), jan1 + 60);
        // 2026 is not.
        let jan1 = days_from_civil(2026, 1, 1);
        assert_eq!(days_from_civil(2026, 3, 1), jan1 + 59);
    }

    #[test]
    fn consecutive_dates_differ_by_one() {
        let d8 = parse_date("2026-02-08").unwrap();
        let d9 = parse_date("2026-02-09").unwrap();
        assert_eq!(d9 - d8, 1);
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_eq!(parse_date("2026/02/08"), None);
        assert_eq!(parse_date("2026-13-01"), None);
        assert_eq!(parse_date("02-08"), None);
    }

    #[test]
    fn parses_clock_time() {
        let (days, minute) = parse_local_datetime("2026-02-08T09:30:00").unwrap();
        assert_eq!(days, parse_date("2026-02-08").unwrap());
        assert_eq!(minute, 570);

        // Offset suffixes are ignored, not interpreted.
        let (_, minute) = parse_local_datetime("2026-02-08T20:00:00-05:00").unwrap();
        assert_eq!(minute, 1200);

        // Date-only means midnight.
        let (_, minute) = parse_local_datetime("2026-02-08").unwrap();
        assert_eq!(minute, 0);
    }

    #[test]
    fn rejects_out_of_range_clock() {
        assert_eq!(parse_local_datetime("2026-02-08T24:00:00"), None);
        assert_eq!(parse_local_datetime("2026-02-08T12:61:00"), None);
    }

    #[test]
    fn past_midnight_stays_in_bucket() {
        let bucket = parse_date("2026-02-08").unwrap();
        assert_eq!(
            minutes_from_bucket("2026-02-09T00:30:00", bucket),
            Some(1470)
        );
        assert_eq!(
            minutes_from_bucket("2026-02-08T23:30:00", bucket),
            Some(1410)
        );
    }
}
