use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::SpaceStatus;

/// The evaluation instant together with the zone the backend writes its
/// offset-less timestamps in.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    pub now: DateTime<Utc>,
    pub zone: FixedOffset,
}

impl Clock {
    pub fn new(zone: FixedOffset) -> Self {
        Self::at(Utc::now(), zone)
    }

    pub fn at(now: DateTime<Utc>, zone: FixedOffset) -> Self {
        Self { now, zone }
    }
}

/// Parses a backend timestamp into `zone`. Values without an offset are
/// wall-clock times in `zone`; values with one are converted.
pub fn parse_timestamp(raw: &str, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&zone));
    }
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    zone.from_local_datetime(&naive).single()
}

/// A space is expired iff its window end parses to a time strictly before
/// `clock.now`. Missing or unparseable ends never count as expired.
pub fn is_expired(available_to: Option<&str>, clock: Clock) -> bool {
    available_to
        .and_then(|raw| parse_timestamp(raw, clock.zone))
        .is_some_and(|end| end.with_timezone(&Utc) < clock.now)
}

/// `Expired` for an approved space whose window has passed, otherwise the
/// stored status unchanged.
pub fn display_status(status: &SpaceStatus, expired: bool) -> String {
    if expired && *status == SpaceStatus::Approved {
        "Expired".to_string()
    } else {
        status.to_string()
    }
}

/// CSS badge class matching [`display_status`].
pub fn status_badge(status: &SpaceStatus, expired: bool) -> String {
    if expired && *status == SpaceStatus::Approved {
        "expired".to_string()
    } else {
        status.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    // 12:00 UTC is 17:30 in the backend's zone.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn clock() -> Clock {
        Clock::at(now(), ist())
    }

    #[test]
    fn strictly_past_end_is_expired() {
        assert!(is_expired(Some("2025-06-01T11:59:59Z"), clock()));
        assert!(!is_expired(Some("2025-06-01T12:00:00Z"), clock()));
        assert!(!is_expired(Some("2025-06-01T12:00:01Z"), clock()));
    }

    #[test]
    fn naive_timestamps_are_backend_wall_clock() {
        // 14:00 at +05:30 is 08:30 UTC
        assert!(is_expired(Some("2025-06-01T14:00:00"), clock()));
        assert!(is_expired(Some("2025-06-01T17:29:59.123456"), clock()));
        assert!(!is_expired(Some("2025-06-01T17:30:00"), clock()));
        assert!(!is_expired(Some("2025-06-01T18:00"), clock()));
        assert!(is_expired(Some("2025-06-01"), clock()));
    }

    #[test]
    fn zone_is_configurable() {
        let clock = Clock::at(now(), utc());
        assert!(!is_expired(Some("2025-06-01T14:00:00"), clock));
        assert!(is_expired(Some("2025-06-01T11:00:00"), clock));
    }

    #[test]
    fn offsets_are_respected() {
        // 17:00 at +05:30 is 11:30 UTC, whatever zone naive values use
        assert!(is_expired(Some("2025-06-01T17:00:00+05:30"), Clock::at(now(), utc())));
        assert!(!is_expired(Some("2025-06-01T13:00:00+00:00"), clock()));
    }

    #[test]
    fn missing_or_garbage_end_is_not_expired() {
        assert!(!is_expired(None, clock()));
        assert!(!is_expired(Some("soon"), clock()));
        assert!(!is_expired(Some(""), clock()));
    }

    #[test]
    fn approved_and_expired_displays_expired() {
        let end = (now() - Duration::hours(1)).to_rfc3339();
        let expired = is_expired(Some(&end), clock());
        assert_eq!(display_status(&SpaceStatus::Approved, expired), "Expired");
        assert_eq!(status_badge(&SpaceStatus::Approved, expired), "expired");
    }

    #[test]
    fn other_statuses_display_verbatim_even_when_expired() {
        for status in [
            SpaceStatus::Pending,
            SpaceStatus::Rejected,
            SpaceStatus::Available,
            SpaceStatus::Occupied,
            SpaceStatus::Other("archived".to_string()),
        ] {
            assert_eq!(display_status(&status, true), status.as_str());
            assert_eq!(display_status(&status, false), status.as_str());
        }
        assert_eq!(display_status(&SpaceStatus::Approved, false), "approved");
    }
}
