use jiff::SignedDuration;
use sojourn_routing_providers::{route_client::RouteClient, route_provider::RouteProvider};
use tracing::{debug, warn};

use crate::itinerary::place::PlaceCandidate;

use super::{tour, travel_cost_matrix::TravelCostMatrix};

/// Substituted when the single pairwise lookup for a two-stop day fails.
const PAIR_FALLBACK_DISTANCE_METERS: f64 = 1000.0;
const PAIR_FALLBACK_DURATION: SignedDuration = SignedDuration::from_secs(720);

/// Substituted per leg when measuring a caller-fixed order.
const LEG_FALLBACK_DISTANCE_METERS: f64 = 1000.0;
const LEG_FALLBACK_DURATION_SECS: i64 = 600;

/// Rough per-stop totals reported when the matrix fetch fails outright.
const DEGRADED_DISTANCE_METERS_PER_STOP: f64 = 500.0;
const DEGRADED_DURATION_SECS_PER_STOP: i64 = 360;

/// A day's stops in visiting order with their travel totals.
///
/// `places` is always a permutation of the input, whatever the provider
/// did or failed to do.
#[derive(Debug, Clone)]
pub struct OptimizedDay {
    pub places: Vec<PlaceCandidate>,
    pub total_duration: SignedDuration,
    pub total_distance_meters: f64,
}

/// Orders the stops of one day to cut walking back and forth.
pub struct RouteOptimizer {
    client: RouteClient,
}

impl RouteOptimizer {
    pub fn new(client: RouteClient) -> Self {
        Self { client }
    }

    /// Orders `places` for minimal travel, or measures them as given when
    /// `preserve_order` is set.
    ///
    /// Provider failures degrade instead of erroring: the input order is
    /// kept and totals fall back to rough estimates.
    pub async fn optimize_day(
        &self,
        places: Vec<PlaceCandidate>,
        provider: &RouteProvider,
        preserve_order: bool,
    ) -> OptimizedDay {
        match places.len() {
            0 | 1 => OptimizedDay {
                places,
                total_duration: SignedDuration::ZERO,
                total_distance_meters: 0.0,
            },
            2 => self.measure_pair(places, provider).await,
            _ if preserve_order => self.measure_in_order(places, provider).await,
            _ => self.optimize_tour(places, provider).await,
        }
    }

    async fn measure_pair(
        &self,
        places: Vec<PlaceCandidate>,
        provider: &RouteProvider,
    ) -> OptimizedDay {
        let from = places[0].location().into();
        let to = places[1].location().into();

        let (total_duration, total_distance_meters) =
            match self.client.fetch_route(from, to, provider).await {
                Ok(route) => (
                    SignedDuration::from_secs(route.duration_seconds),
                    route.distance_meters,
                ),
                Err(e) => {
                    warn!("Pair lookup failed, using fallback totals: {e}");
                    (PAIR_FALLBACK_DURATION, PAIR_FALLBACK_DISTANCE_METERS)
                }
            };

        OptimizedDay {
            places,
            total_duration,
            total_distance_meters,
        }
    }

    async fn measure_in_order(
        &self,
        places: Vec<PlaceCandidate>,
        provider: &RouteProvider,
    ) -> OptimizedDay {
        let mut duration_secs: i64 = 0;
        let mut distance_meters: f64 = 0.0;

        for pair in places.windows(2) {
            let from = pair[0].location().into();
            let to = pair[1].location().into();

            match self.client.fetch_route(from, to, provider).await {
                Ok(route) => {
                    duration_secs += route.duration_seconds;
                    distance_meters += route.distance_meters;
                }
                Err(e) => {
                    warn!(
                        "Leg {} -> {} failed, using fallback: {e}",
                        pair[0].name(),
                        pair[1].name()
                    );
                    duration_secs += LEG_FALLBACK_DURATION_SECS;
                    distance_meters += LEG_FALLBACK_DISTANCE_METERS;
                }
            }
        }

        OptimizedDay {
            places,
            total_duration: SignedDuration::from_secs(duration_secs),
            total_distance_meters: distance_meters,
        }
    }

    async fn optimize_tour(
        &self,
        places: Vec<PlaceCandidate>,
        provider: &RouteProvider,
    ) -> OptimizedDay {
        let num_places = places.len();
        let points: Vec<geo::Point> = places.iter().map(|place| place.location().into()).collect();

        let matrices = match self.client.fetch_matrices(&points, provider).await {
            Ok(matrices) => matrices,
            Err(e) => {
                warn!("Matrix fetch failed, keeping input order: {e}");
                return OptimizedDay {
                    places,
                    total_duration: SignedDuration::from_secs(
                        num_places as i64 * DEGRADED_DURATION_SECS_PER_STOP,
                    ),
                    total_distance_meters: num_places as f64 * DEGRADED_DISTANCE_METERS_PER_STOP,
                };
            }
        };

        let matrix = TravelCostMatrix::from_matrices(matrices);
        let mut order = tour::nearest_neighbor(&matrix, 0);
        tour::two_opt(&mut order, &matrix);

        let (total_duration, total_distance_meters) = tour::tour_totals(&order, &matrix);
        debug!(
            "Ordered {num_places} stops: {:.1} min travel",
            total_duration.as_secs_f64() / 60.0
        );

        let places = order.into_iter().map(|i| places[i].clone()).collect();

        OptimizedDay {
            places,
            total_duration,
            total_distance_meters,
        }
    }
}
