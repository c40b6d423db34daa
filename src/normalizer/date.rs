//! Publication-date parsing over a fixed, ordered list of layouts.
//!
//! Every layout accepts optional fractional seconds after the seconds field.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Accepted date layouts, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Mon, 02 Jan 2006 15:04:05 -0700`
    Rfc1123Offset,
    /// `Mon, 02 Jan 2006 15:04:05 MST`
    Rfc1123Zone,
    /// `Mon, 02 Jan 2006 15:04:05 GMT`
    Rfc1123Gmt,
    /// `2006-01-02T15:04:05-07:00`
    Rfc3339Offset,
    /// `2006-01-02T15:04:05Z`
    Rfc3339Utc,
    /// `2006-01-02 15:04:05`
    Plain,
    /// `Jan 02, 2006 15:04:05`
    MonthDayYear,
}

pub const DATE_FORMATS: [DateFormat; 7] = [
    DateFormat::Rfc1123Offset,
    DateFormat::Rfc1123Zone,
    DateFormat::Rfc1123Gmt,
    DateFormat::Rfc3339Offset,
    DateFormat::Rfc3339Utc,
    DateFormat::Plain,
    DateFormat::MonthDayYear,
];

impl DateFormat {
    pub fn parse(self, s: &str) -> Option<DateTime<Utc>> {
        match self {
            DateFormat::Rfc1123Offset => {
                let rest = strip_weekday(s)?;
                DateTime::parse_from_str(rest, "%d %b %Y %H:%M:%S%.f %z")
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }
            DateFormat::Rfc1123Zone => {
                let rest = strip_weekday(s)?;
                let (stamp, zone) = rest.rsplit_once(' ')?;
                let offset = zone_offset(zone)?;
                NaiveDateTime::parse_from_str(stamp, "%d %b %Y %H:%M:%S%.f")
                    .ok()?
                    .and_local_timezone(offset)
                    .single()
                    .map(|dt| dt.with_timezone(&Utc))
            }
            DateFormat::Rfc1123Gmt => {
                let stamp = strip_weekday(s)?.strip_suffix(" GMT")?;
                naive_utc(stamp, "%d %b %Y %H:%M:%S%.f")
            }
            DateFormat::Rfc3339Offset => DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%:z")
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            DateFormat::Rfc3339Utc => naive_utc(s, "%Y-%m-%dT%H:%M:%S%.fZ"),
            DateFormat::Plain => naive_utc(s, "%Y-%m-%d %H:%M:%S%.f"),
            DateFormat::MonthDayYear => naive_utc(s, "%b %d, %Y %H:%M:%S%.f"),
        }
    }
}

/// First layout that accepts `s`, with the instant it produced.
pub fn parse_pub_date_with_format(s: &str) -> Option<(DateTime<Utc>, DateFormat)> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| format.parse(s).map(|dt| (dt, *format)))
}

/// Parse a publication date, substituting `now` when no layout matches.
pub fn parse_pub_date(s: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    match parse_pub_date_with_format(s) {
        Some((dt, _)) => dt,
        None => {
            tracing::warn!("Could not parse date '{}', using current time", s);
            now
        }
    }
}

fn naive_utc(s: &str, layout: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, layout)
        .ok()
        .map(|naive| naive.and_utc())
}

// The weekday is checked for shape only, never against the date.
fn strip_weekday(s: &str) -> Option<&str> {
    const DAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];
    let (day, rest) = s.split_once(", ")?;
    DAYS.contains(&day.to_ascii_lowercase().as_str())
        .then_some(rest)
}

fn zone_offset(zone: &str) -> Option<FixedOffset> {
    if !(3..=5).contains(&zone.len()) || !zone.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    let hours = match zone {
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        // GMT, UTC and unknown abbreviations
        _ => 0,
    };
    FixedOffset::east_opt(hours * 3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Run `f` with a subscriber that records formatted events.
    fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        (out, buffer.contents())
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_rfc1123_numeric_offset() {
        let (dt, format) =
            parse_pub_date_with_format("Mon, 02 Jan 2006 15:04:05 -0700").unwrap();
        assert_eq!(format, DateFormat::Rfc1123Offset);
        assert_eq!(dt, utc(2006, 1, 2, 22, 4, 5));
    }

    #[test]
    fn test_rfc1123_named_zone() {
        let (dt, format) = parse_pub_date_with_format("Mon, 02 Jan 2006 15:04:05 PST").unwrap();
        assert_eq!(format, DateFormat::Rfc1123Zone);
        assert_eq!(dt, utc(2006, 1, 2, 23, 4, 5));
    }

    #[test]
    fn test_unknown_zone_reads_as_utc() {
        let (dt, _) = parse_pub_date_with_format("Mon, 02 Jan 2006 15:04:05 XYZ").unwrap();
        assert_eq!(dt, utc(2006, 1, 2, 15, 4, 5));
    }

    #[test]
    fn test_gmt_string_takes_earlier_named_zone_layout() {
        let (dt, format) = parse_pub_date_with_format("Mon, 02 Jan 2006 15:04:05 GMT").unwrap();
        assert_eq!(format, DateFormat::Rfc1123Zone);
        assert_eq!(dt, utc(2006, 1, 2, 15, 4, 5));
        // the later layout would also accept it
        assert_eq!(
            DateFormat::Rfc1123Gmt.parse("Mon, 02 Jan 2006 15:04:05 GMT"),
            Some(dt)
        );
    }

    #[test]
    fn test_weekday_checked_for_shape_only() {
        // 03 Jan 2006 was a Tuesday
        let (dt, _) = parse_pub_date_with_format("Mon, 03 Jan 2006 15:04:05 +0000").unwrap();
        assert_eq!(dt, utc(2006, 1, 3, 15, 4, 5));
        assert!(parse_pub_date_with_format("Xyz, 03 Jan 2006 15:04:05 +0000").is_none());
    }

    #[test]
    fn test_rfc3339_forms() {
        let (dt, format) = parse_pub_date_with_format("2006-01-02T15:04:05-07:00").unwrap();
        assert_eq!(format, DateFormat::Rfc3339Offset);
        assert_eq!(dt, utc(2006, 1, 2, 22, 4, 5));

        let (dt, format) = parse_pub_date_with_format("2006-01-02T15:04:05Z").unwrap();
        assert_eq!(format, DateFormat::Rfc3339Utc);
        assert_eq!(dt, utc(2006, 1, 2, 15, 4, 5));
    }

    #[test]
    fn test_fractional_seconds() {
        let (dt, _) = parse_pub_date_with_format("2006-01-02T15:04:05.250Z").unwrap();
        assert_eq!(dt, utc(2006, 1, 2, 15, 4, 5) + Duration::milliseconds(250));
    }

    #[test]
    fn test_fractional_seconds_in_every_layout() {
        let base = utc(2006, 1, 2, 15, 4, 5) + Duration::milliseconds(123);
        let cases = [
            ("Mon, 02 Jan 2006 15:04:05.123 +0000", DateFormat::Rfc1123Offset),
            ("Mon, 02 Jan 2006 15:04:05.123 GMT", DateFormat::Rfc1123Zone),
            ("2006-01-02T15:04:05.123+00:00", DateFormat::Rfc3339Offset),
            ("2006-01-02 15:04:05.123", DateFormat::Plain),
            ("Jan 02, 2006 15:04:05.123", DateFormat::MonthDayYear),
        ];
        for (input, expected) in cases {
            let (dt, format) = parse_pub_date_with_format(input).unwrap();
            assert_eq!(format, expected, "{}", input);
            assert_eq!(dt, base, "{}", input);
        }
        assert_eq!(
            DateFormat::Rfc1123Gmt.parse("Mon, 02 Jan 2006 15:04:05.123 GMT"),
            Some(base)
        );
    }

    #[test]
    fn test_plain_and_month_day_year() {
        let (dt, format) = parse_pub_date_with_format("2006-01-02 15:04:05").unwrap();
        assert_eq!(format, DateFormat::Plain);
        assert_eq!(dt, utc(2006, 1, 2, 15, 4, 5));

        let (dt, format) = parse_pub_date_with_format("Jan 02, 2006 15:04:05").unwrap();
        assert_eq!(format, DateFormat::MonthDayYear);
        assert_eq!(dt, utc(2006, 1, 2, 15, 4, 5));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(parse_pub_date_with_format("  2006-01-02 15:04:05\n").is_some());
    }

    #[test]
    fn test_parseable_date_does_not_fall_back() {
        let now = utc(2030, 6, 1, 0, 0, 0);
        let dt = parse_pub_date("Mon, 02 Jan 2006 15:04:05 GMT", now);
        assert_ne!(dt, now);
        assert_eq!(dt, utc(2006, 1, 2, 15, 4, 5));
    }

    #[test]
    fn test_unparseable_date_falls_back_to_now() {
        let now = utc(2030, 6, 1, 0, 0, 0);
        assert!(parse_pub_date_with_format("not-a-date").is_none());
        assert_eq!(parse_pub_date("not-a-date", now), now);
        assert_eq!(parse_pub_date("", now), now);
    }

    #[test]
    fn test_unparseable_date_logs_warning() {
        let now = utc(2030, 6, 1, 0, 0, 0);
        let (dt, logs) = capture_logs(|| parse_pub_date("sometime last week", now));
        assert_eq!(dt, now);
        assert!(logs.contains("WARN"), "{}", logs);
        assert!(logs.contains("Could not parse date 'sometime last week'"), "{}", logs);
    }

    #[test]
    fn test_parseable_date_logs_nothing() {
        let now = utc(2030, 6, 1, 0, 0, 0);
        let (_, logs) = capture_logs(|| parse_pub_date("2006-01-02T15:04:05Z", now));
        assert!(logs.is_empty(), "{}", logs);
    }
}
