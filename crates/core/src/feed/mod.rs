pub mod euro;
pub mod events;
pub mod network;
mod time;

use airgrid_protocol::DaySchedule;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network: {0}")]
    Network(#[from] network::NetworkFeedError),
    #[error("euro: {0}")]
    Euro(#[from] euro::EuroFeedError),
    #[error("events: {0}")]
    Events(#[from] events::EventFeedError),
    #[error("unable to detect feed format")]
    UnknownFormat,
}

/// Auto-detect the feed format and parse one day.
///
/// Detection keys on the top-level grouping field:
/// - `"networks"` — US network schedule feed
/// - `"channels"` — European EPG feed
/// - `"events"` — per-discipline competition schedule
pub fn parse_auto(data: &[u8]) -> Result<DaySchedule, FeedError> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data)
        && let Some(obj) = value.as_object()
    {
        if obj.contains_key("networks") {
            return Ok(network::parse_network_feed(data)?);
        }
        if obj.contains_key("channels") {
            return Ok(euro::parse_euro_feed(data)?);
        }
        if obj.contains_key("events") {
            return Ok(events::parse_event_feed(data)?);
        }
    }
    Err(FeedError::UnknownFormat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use airgrid_protocol::FeedFormat;

    #[test]
    fn detects_network_feed() {
        let data = br#"{"date": "2026-02-08", "networks": {}}"#;
        let day = parse_auto(data).unwrap();
        assert_eq!(day.meta.source_format, FeedFormat::NetworkFeed);
    }

    #[test]
    fn detects_euro_feed() {
        let data = br#"{"date": "2026-02-08", "channels": {}}"#;
        let day = parse_auto(data).unwrap();
        assert_eq!(day.meta.source_format, FeedFormat::EuroEpg);
    }

    #[test]
    fn detects_event_feed() {
        let data = br#"{"date": "2026-02-08", "events": []}"#;
        let day = parse_auto(data).unwrap();
        assert_eq!(day.meta.source_format, FeedFormat::EventSchedule);
    }

    #[test]
    fn unknown_shape_errors() {
        assert!(matches!(
            parse_auto(br#"{"date": "2026-02-08"}"#),
            Err(FeedError::UnknownFormat)
        ));
        assert!(matches!(
            parse_auto(b"not json at all"),
            Err(FeedError::UnknownFormat)
        ));
    }
}
