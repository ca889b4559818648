#[cfg(test)]
mod tests {
    use crate::logic::{build_calendar_event, validate_booking_request, BookingRequest};
    use chrono::{DateTime, Duration, SecondsFormat, Utc};
    use chrono_tz::America::Los_Angeles;
    use proptest::prelude::*;
    use serde_json::json;

    // 2000-01-01 .. 2100-01-01
    fn start_strategy() -> impl Strategy<Value = DateTime<Utc>> {
        (946_684_800i64..4_102_444_800i64)
            .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap())
    }

    proptest! {
        #[test]
        fn end_is_start_plus_duration(
            start in start_strategy(),
            duration in 1i64..=(60 * 24 * 30),
        ) {
            let request = BookingRequest {
                date_time: Some(start.to_rfc3339_opts(SecondsFormat::Secs, true)),
                name: Some("Ann".to_string()),
                email: Some("ann@example.com".to_string()),
                duration: Some(json!(duration)),
                title: Some("Consult".to_string()),
            };
            let booking = validate_booking_request(request, Los_Angeles).unwrap();
            let event = build_calendar_event(&booking, "America/Los_Angeles", "booking-p".into());

            let event_start = event.start.and_then(|s| s.date_time).unwrap();
            let event_end = event.end.and_then(|e| e.date_time).unwrap();
            prop_assert_eq!(event_start, start);
            prop_assert_eq!(event_end, start + Duration::minutes(duration));
            prop_assert_eq!((event_end - event_start).num_milliseconds(), duration * 60_000);
        }

        #[test]
        fn non_positive_durations_are_rejected(duration in i64::MIN..=0i64) {
            let request = BookingRequest {
                date_time: Some("2025-03-01T10:00:00Z".to_string()),
                name: Some("Ann".to_string()),
                email: Some("ann@example.com".to_string()),
                duration: Some(json!(duration)),
                title: Some("Consult".to_string()),
            };
            prop_assert!(validate_booking_request(request, Los_Angeles).is_err());
        }
    }
}
