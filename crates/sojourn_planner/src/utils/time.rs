use jiff::civil::Time;

/// Short weekday names, indexed by the Google day convention (0 = Sunday).
pub const DAY_ABBREVS: &[&str] = &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn format_hhmm(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

pub fn parse_hhmm(raw: &str) -> Option<Time> {
    let (hour, minute) = raw.split_once(':')?;
    let hour: i8 = hour.parse().ok()?;
    let minute: i8 = minute.parse().ok()?;

    Time::new(hour, minute, 0, 0).ok()
}

/// Inclusive on both ends.
pub fn in_window(time: Time, start: Time, end: Time) -> bool {
    start <= time && time <= end
}

/// Like [`in_window`], but a close before the open wraps past midnight.
pub fn in_window_wrapping(time: Time, open: Time, close: Time) -> bool {
    if close < open {
        time >= open || time <= close
    } else {
        in_window(time, open, close)
    }
}

/// Serde codec for `Time` as an `"HH:MM"` string.
pub mod hhmm {
    use jiff::civil::Time;
    use serde::Deserialize;

    pub fn serialize<S: serde::Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid HH:MM time: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use super::*;

    #[test]
    fn formats_with_leading_zeros() {
        assert_eq!(format_hhmm(time(9, 5, 0, 0)), "09:05");
        assert_eq!(format_hhmm(time(21, 0, 0, 0)), "21:00");
    }

    #[test]
    fn parses_hhmm_strings() {
        assert_eq!(parse_hhmm("09:30"), Some(time(9, 30, 0, 0)));
        assert_eq!(parse_hhmm("0:05"), Some(time(0, 5, 0, 0)));
        assert_eq!(parse_hhmm("25:00"), None);
        assert_eq!(parse_hhmm("noon"), None);
    }

    #[test]
    fn windows_are_inclusive() {
        let start = time(12, 0, 0, 0);
        let end = time(14, 30, 0, 0);

        assert!(in_window(start, start, end));
        assert!(in_window(end, start, end));
        assert!(!in_window(time(14, 31, 0, 0), start, end));
    }

    #[test]
    fn overnight_windows_wrap() {
        let open = time(22, 0, 0, 0);
        let close = time(2, 0, 0, 0);

        assert!(in_window_wrapping(time(23, 30, 0, 0), open, close));
        assert!(in_window_wrapping(time(1, 0, 0, 0), open, close));
        assert!(!in_window_wrapping(time(12, 0, 0, 0), open, close));
    }
}
