use super::Codec;
use crate::GlyphsError;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a `+HHMM` / `-HHMM` offset.
fn parse_offset(zone: &str) -> Option<FixedOffset> {
    let (sign, digits) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Timestamps look like `2017-01-12 10:00:00 +0000`. They are always
/// written normalized to UTC.
impl Codec for DateTime<FixedOffset> {
    fn decode(text: &str) -> Result<Self, GlyphsError> {
        let invalid = || GlyphsError::invalid("timestamp", text);
        let (stamp, zone) = text.trim().rsplit_once(' ').ok_or_else(invalid)?;
        let naive = NaiveDateTime::parse_from_str(stamp, FORMAT).map_err(|_| invalid())?;
        let offset = parse_offset(zone).ok_or_else(invalid)?;
        offset.from_local_datetime(&naive).single().ok_or_else(invalid)
    }

    fn encode(&self) -> String {
        format!("\"{} +0000\"", self.naive_utc().format(FORMAT))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn utc_round_trip() {
        let stamp = DateTime::<FixedOffset>::decode("2017-01-12 10:00:00 +0000").unwrap();
        assert_eq!(stamp.encode(), "\"2017-01-12 10:00:00 +0000\"");
    }

    #[test]
    fn offsets_are_normalized() {
        let stamp = DateTime::<FixedOffset>::decode("2017-01-12 10:00:00 +0130").unwrap();
        assert_eq!(stamp.encode(), "\"2017-01-12 08:30:00 +0000\"");
        let west = DateTime::<FixedOffset>::decode("2017-01-12 23:00:00 -0200").unwrap();
        assert_eq!(west.encode(), "\"2017-01-13 01:00:00 +0000\"");
        assert_eq!(stamp.offset().local_minus_utc(), 5400);
    }

    #[test]
    fn rejects_garbage() {
        for text in ["yesterday", "2017-01-12 10:00:00", "2017-01-12 10:00:00 UTC"] {
            assert!(matches!(
                DateTime::<FixedOffset>::decode(text),
                Err(GlyphsError::InvalidLiteral { codec: "timestamp", .. })
            ));
        }
    }
}
