use anyhow::bail;
use jiff::civil::Date;
use sojourn_routing_providers::{route_client::RouteClient, route_provider::RouteProvider};
use tracing::{info, warn};

use crate::itinerary::day_plan::DayPlan;
use crate::itinerary::pace::Pace;
use crate::itinerary::place::PlaceCandidate;
use crate::optimizer::route_optimizer::RouteOptimizer;
use crate::schedule::builder::ScheduleBuilder;

/// One day's worth of planning input.
#[derive(Debug, Clone)]
pub struct DayPlanRequest {
    pub places: Vec<PlaceCandidate>,
    pub date: Date,
    pub day_number: u32,
    pub theme: String,
    pub pace: Pace,

    /// Keep the caller's ordering instead of optimizing it.
    pub preserve_order: bool,
}

/// Runs the full pipeline for one day: order the stops, fetch the legs
/// between them, lay the visits out on a clock.
pub struct DayPlanner {
    optimizer: RouteOptimizer,
    scheduler: ScheduleBuilder,
    client: RouteClient,
    provider: RouteProvider,
}

impl DayPlanner {
    pub fn new(client: RouteClient, provider: RouteProvider) -> Self {
        Self {
            optimizer: RouteOptimizer::new(client.clone()),
            scheduler: ScheduleBuilder::new(),
            client,
            provider,
        }
    }

    pub async fn plan_day(&self, request: DayPlanRequest) -> anyhow::Result<DayPlan> {
        if request.places.is_empty() {
            bail!("cannot plan a day with no places");
        }

        info!(
            "Planning day {} ({}): {} place(s) at a {} pace",
            request.day_number,
            request.date,
            request.places.len(),
            request.pace
        );

        let optimized = self
            .optimizer
            .optimize_day(request.places, &self.provider, request.preserve_order)
            .await;

        let points: Vec<geo::Point> = optimized
            .places
            .iter()
            .map(|place| place.location().into())
            .collect();
        let routes = self.client.fetch_routes_batch(&points, &self.provider).await;

        let scheduled =
            self.scheduler
                .build_schedule(&optimized.places, &routes, request.date, request.pace);

        for warning in self.scheduler.validate_schedule(&scheduled, request.date) {
            warn!("Day {}: {warning}", request.day_number);
        }

        Ok(DayPlan::assemble(
            request.day_number,
            request.date,
            request.theme,
            scheduled,
            &routes,
        ))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use crate::test_utils::{first_day, sample_places};

    use super::*;

    fn planner() -> DayPlanner {
        DayPlanner::new(
            RouteClient::new(None),
            RouteProvider::AsTheCrowFlies { speed_kmh: 25.0 },
        )
    }

    fn request(places: Vec<PlaceCandidate>) -> DayPlanRequest {
        DayPlanRequest {
            places,
            date: first_day(),
            day_number: 1,
            theme: "Old City".to_string(),
            pace: Pace::Moderate,
            preserve_order: false,
        }
    }

    #[tokio::test]
    async fn planning_a_day_produces_a_timed_day_plan() {
        let day = planner().plan_day(request(sample_places(5))).await.unwrap();

        assert_eq!(day.day_number, 1);
        assert_eq!(day.activities.len(), 5);

        // Slots come out in clock order with no overlap.
        for pair in day.activities.windows(2) {
            assert!(pair[0].time_end <= pair[1].time_start);
        }

        // Every activity except the last carries its outgoing leg.
        let last = day.activities.len() - 1;
        for (i, activity) in day.activities.iter().enumerate() {
            assert_eq!(activity.route_to_next.is_some(), i < last);
        }
    }

    #[tokio::test]
    async fn the_dining_stop_lands_in_the_lunch_window() {
        // sample_places(5) reaches its restaurant before noon, so the
        // builder holds it for lunch.
        let day = planner().plan_day(request(sample_places(5))).await.unwrap();

        let lunch = day
            .activities
            .iter()
            .find(|a| a.place.category == "restaurant")
            .unwrap();
        assert_eq!(lunch.time_start, time(12, 30, 0, 0));
    }

    #[tokio::test]
    async fn preserve_order_keeps_the_caller_sequence() {
        let mut req = request(sample_places(4));
        req.preserve_order = true;

        let day = planner().plan_day(req).await.unwrap();

        let names: Vec<&str> = day.activities.iter().map(|a| a.place.name.as_str()).collect();
        assert_eq!(names, vec!["Place 1", "Place 2", "Place 3", "Place 4"]);
    }

    #[tokio::test]
    async fn planning_an_empty_day_is_an_error() {
        let error = planner().plan_day(request(Vec::new())).await.unwrap_err();
        assert!(error.to_string().contains("no places"));
    }
}
