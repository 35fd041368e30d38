use jiff::civil::Time;
use smallvec::SmallVec;

use crate::itinerary::day_plan::{Activity, Itinerary};
use crate::quality::report::MetricResult;
use crate::utils::time::{DAY_ABBREVS, format_hhmm, in_window_wrapping};

use super::evaluator::EvaluateMetric;

pub const NAME: &str = "Opening Hours";

type TimeWindows = SmallVec<[(Time, Time); 2]>;

/// What the display strings say about one specific day.
enum DayHours {
    Windows(TimeWindows),
    Closed,
    Unknown,
}

enum HoursCheck {
    Valid,
    Unknown,
    Closed { issue: String, suggestion: String },
}

/// Checks each visit against the place's published hours. Places with no
/// hours data get the benefit of the doubt.
pub struct OpeningHoursEvaluator {
    pub weight: f64,
}

impl EvaluateMetric for OpeningHoursEvaluator {
    fn evaluate(&self, itinerary: &Itinerary) -> anyhow::Result<MetricResult> {
        if itinerary.days.is_empty() {
            return Ok(MetricResult::new(NAME, self.weight, 100.0));
        }

        let mut checked = 0;
        let mut passed = 0;
        let mut valid = 0;
        let mut closed = 0;
        let mut unknown = 0;
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        for day in &itinerary.days {
            let weekday = day.date.weekday().to_sunday_zero_offset();
            let day_abbrev = DAY_ABBREVS[weekday as usize];

            for activity in &day.activities {
                checked += 1;
                match check_activity(activity, day_abbrev) {
                    HoursCheck::Valid => {
                        passed += 1;
                        valid += 1;
                    }
                    HoursCheck::Unknown => {
                        passed += 1;
                        unknown += 1;
                    }
                    HoursCheck::Closed { issue, suggestion } => {
                        closed += 1;
                        issues.push(issue);
                        suggestions.push(suggestion);
                    }
                }
            }
        }

        let score = if checked == 0 {
            100.0
        } else {
            f64::from(passed) / f64::from(checked) * 100.0
        };

        let mut result = MetricResult::new(NAME, self.weight, score);
        result.issues = issues;
        result.suggestions = suggestions;
        result.details.insert("activities_checked", f64::from(checked));
        result.details.insert("activities_valid", f64::from(valid));
        result.details.insert("activities_closed", f64::from(closed));
        result.details.insert("activities_unknown", f64::from(unknown));

        Ok(result)
    }
}

fn check_activity(activity: &Activity, day_abbrev: &str) -> HoursCheck {
    if activity.place.opening_hours.is_empty() {
        return HoursCheck::Unknown;
    }

    match find_day_hours(&activity.place.opening_hours, day_abbrev) {
        DayHours::Unknown => HoursCheck::Unknown,
        DayHours::Closed => HoursCheck::Closed {
            issue: format!("'{}' is closed on {day_abbrev}", activity.place.name),
            suggestion: format!(
                "Reschedule '{}' to a different day",
                activity.place.name
            ),
        },
        DayHours::Windows(windows) => {
            let open_now = windows
                .iter()
                .any(|(open, close)| in_window_wrapping(activity.time_start, *open, *close));

            if open_now {
                HoursCheck::Valid
            } else {
                let rendered: Vec<String> = windows
                    .iter()
                    .map(|(open, close)| format!("{}-{}", format_hhmm(*open), format_hhmm(*close)))
                    .collect();

                HoursCheck::Closed {
                    issue: format!(
                        "'{}' scheduled at {} but opens {}",
                        activity.place.name,
                        format_hhmm(activity.time_start),
                        rendered.join(", ")
                    ),
                    suggestion: format!(
                        "Adjust timing for '{}' to match opening hours",
                        activity.place.name
                    ),
                }
            }
        }
    }
}

fn find_day_hours(opening_hours: &[String], day_abbrev: &str) -> DayHours {
    let abbrev_lower = day_abbrev.to_lowercase();
    let mut windows = TimeWindows::new();
    let mut is_closed = false;

    for line in opening_hours {
        let line_lower = line.to_lowercase();
        if !line_lower.contains(&abbrev_lower) {
            continue;
        }

        if line_lower.contains("closed") {
            is_closed = true;
            continue;
        }

        // One "open - close" range per line, either 24h or am/pm style.
        if let Some((open_raw, close_raw)) = line.split_once(['-', '\u{2013}']) {
            if let Some(open) = parse_clock(open_raw) {
                if let Some(close) = parse_clock(close_raw) {
                    windows.push((open, close));
                }
            }
        }
    }

    if !windows.is_empty() {
        DayHours::Windows(windows)
    } else if is_closed {
        DayHours::Closed
    } else {
        DayHours::Unknown
    }
}

/// Pulls the first clock reading out of text like "Sat: 10:00" or
/// "9:00 AM". Returns `None` when there is no parseable time.
fn parse_clock(raw: &str) -> Option<Time> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let raw = &raw[start..];

    let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
    let mut hour: i8 = digits.parse().ok()?;
    let mut rest = &raw[digits.len()..];

    let mut minute: i8 = 0;
    if let Some(stripped) = rest.strip_prefix(':') {
        let mins: String = stripped.chars().take_while(char::is_ascii_digit).collect();
        minute = mins.parse().ok()?;
        rest = &stripped[mins.len()..];
    }

    let suffix = rest.trim_start().to_ascii_lowercase();
    if suffix.starts_with("pm") && hour < 12 {
        hour += 12;
    } else if suffix.starts_with("am") && hour == 12 {
        hour = 0;
    }

    Time::new(hour, minute, 0, 0).ok()
}
