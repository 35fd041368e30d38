use fxhash::{FxHashMap, FxHashSet};
use jiff::{
    SignedDuration,
    civil::{Date, Time},
};
use sojourn_routing_providers::route::Route;
use tracing::{debug, warn};

use crate::{
    config::{DEFAULT_ACTIVITY_MINUTES, DURATION_BY_TYPE, SchedulingConfig},
    itinerary::{pace::Pace, place::PlaceCandidate},
    utils::time::format_hhmm,
};

/// Place types that count as a meal stop.
pub const DINING_TYPES: &[&str] = &["restaurant", "cafe", "bakery", "bar", "food"];

/// One time-slotted visit, before it becomes an itinerary activity.
#[derive(Debug, Clone)]
pub struct ScheduledActivity {
    pub place: PlaceCandidate,
    pub start: Time,
    pub end: Time,
    pub duration_minutes: i64,
    pub is_meal: bool,
}

enum MealSlot {
    Lunch,
    Dinner,
    Casual,
}

/// Turns an ordered list of places into non-overlapping time slots.
///
/// The builder never fails: places that cannot fit the day are dropped
/// with a warning and everything else keeps its slot.
pub struct ScheduleBuilder {
    config: SchedulingConfig,
    durations: FxHashMap<&'static str, i64>,
    dining: FxHashSet<&'static str>,
}

impl ScheduleBuilder {
    pub fn new() -> Self {
        Self::with_config(SchedulingConfig::default())
    }

    pub fn with_config(config: SchedulingConfig) -> Self {
        Self {
            config,
            durations: DURATION_BY_TYPE.iter().copied().collect(),
            dining: DINING_TYPES.iter().copied().collect(),
        }
    }

    /// Single forward pass over `places` in their visiting order.
    ///
    /// `routes[i]` is the leg from place `i` to place `i + 1`; its minutes
    /// plus the transition buffer separate consecutive slots. The cursor
    /// only ever moves forward.
    pub fn build_schedule(
        &self,
        places: &[PlaceCandidate],
        routes: &[Route],
        date: Date,
        pace: Pace,
    ) -> Vec<ScheduledActivity> {
        let mut schedule = Vec::with_capacity(places.len());
        let mut cursor = date.to_datetime(self.config.day_start);
        let day_end = date.to_datetime(self.config.day_end);
        let weekday = date.weekday().to_sunday_zero_offset();

        let mut has_lunch = false;
        let mut has_dinner = false;
        let mut meals_seen: usize = 0;

        for (i, place) in places.iter().enumerate() {
            let mut duration = self.activity_duration_minutes(place, pace);

            // Hold for opening, never rewind.
            if let Some(period) = place.hours_for_day(weekday) {
                let opens = date.to_datetime(period.open);
                if cursor < opens {
                    debug!(
                        "{} opens at {}, holding from {}",
                        place.name(),
                        format_hhmm(period.open),
                        format_hhmm(cursor.time())
                    );
                    cursor = opens;
                }
            }

            let is_meal = self.is_dining(place);
            if is_meal {
                meals_seen += 1;
                match self.classify_meal(meals_seen, cursor.time()) {
                    MealSlot::Lunch if !has_lunch => {
                        if cursor.time() < self.config.lunch_window_start {
                            debug!(
                                "Holding {} for the lunch window: {} -> {}",
                                place.name(),
                                format_hhmm(cursor.time()),
                                format_hhmm(self.config.lunch_target)
                            );
                            cursor = date.to_datetime(self.config.lunch_target);
                        }
                        has_lunch = true;
                    }
                    MealSlot::Dinner if !has_dinner => {
                        if cursor.time() < self.config.dinner_window_start {
                            debug!(
                                "Holding {} for the dinner window: {} -> {}",
                                place.name(),
                                format_hhmm(cursor.time()),
                                format_hhmm(self.config.dinner_target)
                            );
                            cursor = date.to_datetime(self.config.dinner_target);
                        }
                        has_dinner = true;
                    }
                    _ => {}
                }
            }

            let mut end = cursor + SignedDuration::from_mins(duration);
            if end > day_end {
                if cursor >= day_end {
                    warn!("Dropping {}: the day is already over", place.name());
                    continue;
                }

                let available = day_end.duration_since(cursor).as_mins();
                if available < self.config.min_activity_duration_minutes {
                    warn!(
                        "Dropping {}: only {available} min left before day end",
                        place.name()
                    );
                    continue;
                }

                warn!(
                    "Shrinking {} to {available} min to fit the day",
                    place.name()
                );
                duration = available;
                end = day_end;
            }

            schedule.push(ScheduledActivity {
                place: place.clone(),
                start: cursor.time(),
                end: end.time(),
                duration_minutes: duration,
                is_meal,
            });

            let travel_minutes = routes.get(i).map_or(0, |route| route.duration_minutes());
            cursor = end
                + SignedDuration::from_mins(travel_minutes + self.config.transition_buffer_minutes);
        }

        schedule
    }

    /// Suggested length if the enrichment step set one, otherwise the type
    /// table, scaled by pace and rounded to the nearest quarter hour.
    pub fn activity_duration_minutes(&self, place: &PlaceCandidate, pace: Pace) -> i64 {
        let base = place.suggested_duration_minutes().unwrap_or_else(|| {
            place
                .types()
                .iter()
                .find_map(|t| self.durations.get(t.as_str()).copied())
                .unwrap_or(DEFAULT_ACTIVITY_MINUTES)
        });

        let adjusted = (base as f64 * pace.duration_multiplier()) as i64;
        ((adjusted + 7) / 15) * 15
    }

    pub fn is_dining(&self, place: &PlaceCandidate) -> bool {
        place
            .types()
            .iter()
            .any(|t| self.dining.contains(t.as_str()))
    }

    fn classify_meal(&self, meals_seen: usize, at: Time) -> MealSlot {
        if meals_seen == 1 && at < self.config.dinner_window_start {
            MealSlot::Lunch
        } else if meals_seen <= 2 {
            MealSlot::Dinner
        } else {
            MealSlot::Casual
        }
    }

    /// Post-hoc sanity warnings. The schedule is returned as built; these
    /// are for logs and debugging, not control flow.
    pub fn validate_schedule(&self, schedule: &[ScheduledActivity], date: Date) -> Vec<String> {
        let mut warnings = Vec::new();
        let weekday = date.weekday().to_sunday_zero_offset();

        for (i, activity) in schedule.iter().enumerate() {
            if i > 0 && activity.start < schedule[i - 1].end {
                warnings.push(format!(
                    "Overlap: {} ends after {} starts",
                    schedule[i - 1].place.name(),
                    activity.place.name()
                ));
            }

            if let Some(period) = activity.place.hours_for_day(weekday) {
                // Overnight spans cannot be exceeded by a same-day visit.
                if period.open <= period.close && activity.end > period.close {
                    warnings.push(format!(
                        "{} may close at {} before the visit ends",
                        activity.place.name(),
                        format_hhmm(period.close)
                    ));
                }
            }
        }

        warnings
    }
}
