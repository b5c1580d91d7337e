use std::fmt::Display;

use chrono::{DateTime, Datelike, TimeZone};

/// Formats the "Generated on" stamp of the not-found page, e.g.
/// `Saturday, October 17th, 2026 03:04:05 PM`.
pub fn format_generated_at<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let day = at.day();
    format!(
        "{}, {} {:02}{}, {}",
        at.format("%A"),
        at.format("%B"),
        day,
        ordinal_suffix(day),
        at.format("%Y %I:%M:%S %p"),
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_afternoon_timestamp() {
        assert_eq!(
            format_generated_at(&at(2026, 10, 17, 15, 4, 5)),
            "Saturday, October 17th, 2026 03:04:05 PM"
        );
    }

    #[test]
    fn test_single_digit_day_is_zero_padded() {
        assert_eq!(
            format_generated_at(&at(2007, 8, 1, 0, 30, 0)),
            "Wednesday, August 01st, 2007 12:30:00 AM"
        );
    }

    #[test]
    fn test_ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (30, "th"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {day}");
        }
    }
}
