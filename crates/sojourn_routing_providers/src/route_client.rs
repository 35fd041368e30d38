use futures::future::join_all;
use tracing::warn;

use crate::{
    as_the_crow_flies::{as_the_crow_flies_matrices, haversine_distance, travel_seconds},
    google_routes_api::{
        GoogleRoutesClient, GoogleRoutesClientParams, GoogleRoutesError, duration_text,
    },
    route::Route,
    route_provider::RouteProvider,
    travel_matrices::TravelMatrices,
    travel_mode::TravelMode,
};

/// Facade over the configured routing backends.
#[derive(Clone)]
pub struct RouteClient {
    google_client: Option<GoogleRoutesClient>,
}

impl RouteClient {
    /// Reads `GOOGLE_ROUTES_API_KEY`. Without it only the offline
    /// providers are usable.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GOOGLE_ROUTES_API_KEY").ok())
    }

    pub fn new(api_key: Option<String>) -> Self {
        Self {
            google_client: api_key
                .map(|api_key| GoogleRoutesClient::new(GoogleRoutesClientParams { api_key })),
        }
    }

    fn google_client(&self) -> Result<&GoogleRoutesClient, GoogleRoutesError> {
        self.google_client
            .as_ref()
            .ok_or(GoogleRoutesError::MissingApiKey)
    }

    /// All-to-all duration and distance matrices over the given points.
    pub async fn fetch_matrices(
        &self,
        points: &[geo_types::Point],
        provider: &RouteProvider,
    ) -> anyhow::Result<TravelMatrices> {
        match provider {
            RouteProvider::GoogleRoutesApi { travel_mode } => Ok(self
                .google_client()?
                .compute_route_matrix(points, *travel_mode)
                .await?),
            RouteProvider::AsTheCrowFlies { speed_kmh } => {
                Ok(as_the_crow_flies_matrices(points, *speed_kmh))
            }
            RouteProvider::Custom { matrices } => Ok(matrices.clone()),
        }
    }

    /// One leg between two points.
    pub async fn fetch_route(
        &self,
        from: geo_types::Point,
        to: geo_types::Point,
        provider: &RouteProvider,
    ) -> anyhow::Result<Route> {
        match provider {
            RouteProvider::GoogleRoutesApi { travel_mode } => Ok(self
                .google_client()?
                .compute_route(from, to, *travel_mode)
                .await?),
            RouteProvider::AsTheCrowFlies { speed_kmh } => {
                let distance_meters = haversine_distance(from, to);
                let duration_seconds = travel_seconds(distance_meters, *speed_kmh) as i64;

                Ok(Route {
                    distance_meters,
                    duration_seconds,
                    duration_text: duration_text(duration_seconds),
                    travel_mode: TravelMode::default(),
                    polyline: String::new(),
                })
            }
            RouteProvider::Custom { .. } => Err(anyhow::anyhow!(
                "custom matrices carry no per-leg routes"
            )),
        }
    }

    /// One leg per consecutive pair of stops, fetched concurrently.
    ///
    /// A failed leg is replaced by [`Route::fallback`] so one bad lookup
    /// never sinks the whole day.
    pub async fn fetch_routes_batch(
        &self,
        stops: &[geo_types::Point],
        provider: &RouteProvider,
    ) -> Vec<Route> {
        if stops.len() < 2 {
            return Vec::new();
        }

        let legs = stops
            .windows(2)
            .map(|pair| self.fetch_route(pair[0], pair[1], provider));

        join_all(legs)
            .await
            .into_iter()
            .enumerate()
            .map(|(i, result)| match result {
                Ok(route) => route,
                Err(e) => {
                    warn!("Leg {i} failed, substituting fallback: {e}");
                    Route::fallback(provider.travel_mode().unwrap_or_default())
                }
            })
            .collect()
    }
}
