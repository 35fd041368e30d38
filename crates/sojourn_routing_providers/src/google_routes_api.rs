use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;
use thiserror::Error;

use crate::{route::Route, travel_matrices::TravelMatrices, travel_mode::TravelMode};

pub const GOOGLE_COMPUTE_ROUTES_API_URL: &str =
    "https://routes.googleapis.com/directions/v2:computeRoutes";
pub const GOOGLE_ROUTE_MATRIX_API_URL: &str =
    "https://routes.googleapis.com/distanceMatrix/v2:computeRouteMatrix";

const ROUTES_FIELD_MASK: &str =
    "routes.distanceMeters,routes.duration,routes.polyline.encodedPolyline";
const MATRIX_FIELD_MASK: &str = "originIndex,destinationIndex,duration,distanceMeters";

#[derive(Debug, Error)]
pub enum GoogleRoutesError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("No route returned for the requested leg")]
    NoRoute,

    #[error("Malformed duration string: {0}")]
    Duration(String),

    #[error("GOOGLE_ROUTES_API_KEY is not set")]
    MissingApiKey,

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct WaypointLocation {
    lat_lng: LatLng,
}

#[derive(Debug, Clone, Serialize)]
struct Waypoint {
    location: WaypointLocation,
}

impl Waypoint {
    fn new(point: geo_types::Point) -> Self {
        Self {
            location: WaypointLocation {
                lat_lng: LatLng {
                    latitude: point.y(),
                    longitude: point.x(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteModifiers {
    avoid_tolls: bool,
    avoid_highways: bool,
    avoid_ferries: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesBody {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: &'static str,
    compute_alternative_routes: bool,
    route_modifiers: RouteModifiers,
    language_code: &'static str,
    units: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct MatrixWaypoint {
    waypoint: Waypoint,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteMatrixBody {
    origins: Vec<MatrixWaypoint>,
    destinations: Vec<MatrixWaypoint>,
    travel_mode: &'static str,
}

#[derive(Deserialize)]
struct ComputeRoutesResponse {
    #[serde(default)]
    routes: Vec<RouteElement>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteElement {
    #[serde(default)]
    distance_meters: f64,
    duration: Option<String>,
    polyline: Option<Polyline>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Polyline {
    encoded_polyline: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteMatrixElement {
    origin_index: Option<usize>,
    destination_index: Option<usize>,
    duration: Option<String>,
    #[serde(default)]
    distance_meters: f64,
}

/// Parses the wire duration format `"{seconds}s"`.
pub fn parse_duration_seconds(raw: &str) -> Result<i64, GoogleRoutesError> {
    raw.strip_suffix('s')
        .and_then(|seconds| seconds.parse::<i64>().ok())
        .ok_or_else(|| GoogleRoutesError::Duration(raw.to_string()))
}

/// Compact human label for a leg duration.
pub fn duration_text(duration_seconds: i64) -> String {
    if duration_seconds < 60 {
        format!("{duration_seconds} sec")
    } else if duration_seconds < 3600 {
        format!("{} min", duration_seconds / 60)
    } else {
        let hours = duration_seconds / 3600;
        let minutes = (duration_seconds % 3600) / 60;
        format!("{hours}h {minutes}min")
    }
}

pub struct GoogleRoutesClientParams {
    pub api_key: String,
}

#[derive(Clone)]
pub struct GoogleRoutesClient {
    api_key: String,
    client: reqwest::Client,
}

impl GoogleRoutesClient {
    pub fn new(params: GoogleRoutesClientParams) -> Self {
        Self {
            api_key: params.api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Single leg between two points.
    pub async fn compute_route(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
        travel_mode: TravelMode,
    ) -> Result<Route, GoogleRoutesError> {
        let body = ComputeRoutesBody {
            origin: Waypoint::new(origin),
            destination: Waypoint::new(destination),
            travel_mode: travel_mode.google_name(),
            compute_alternative_routes: false,
            route_modifiers: RouteModifiers {
                avoid_tolls: false,
                avoid_highways: false,
                avoid_ferries: false,
            },
            language_code: "en-US",
            units: "METRIC",
        };

        let response = self
            .client
            .post(GOOGLE_COMPUTE_ROUTES_API_URL)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", ROUTES_FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let parsed: ComputeRoutesResponse = handle_response(response).await?;
        let route = parsed.routes.into_iter().next().ok_or(GoogleRoutesError::NoRoute)?;
        let duration_seconds = match route.duration {
            Some(raw) => parse_duration_seconds(&raw)?,
            None => return Err(GoogleRoutesError::NoRoute),
        };

        Ok(Route {
            distance_meters: route.distance_meters,
            duration_seconds,
            duration_text: duration_text(duration_seconds),
            travel_mode,
            polyline: route
                .polyline
                .and_then(|polyline| polyline.encoded_polyline)
                .unwrap_or_default(),
        })
    }

    /// All-to-all matrices over a set of points.
    ///
    /// Elements the API omits or cannot route stay at zero rather than
    /// failing the whole matrix.
    pub async fn compute_route_matrix(
        &self,
        points: &[geo_types::Point],
        travel_mode: TravelMode,
    ) -> Result<TravelMatrices, GoogleRoutesError> {
        let waypoints: Vec<MatrixWaypoint> = points
            .iter()
            .map(|point| MatrixWaypoint {
                waypoint: Waypoint::new(*point),
            })
            .collect();

        let body = RouteMatrixBody {
            origins: waypoints.clone(),
            destinations: waypoints,
            travel_mode: travel_mode.google_name(),
        };

        let response = self
            .client
            .post(GOOGLE_ROUTE_MATRIX_API_URL)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", MATRIX_FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let elements: Vec<RouteMatrixElement> = handle_response(response).await?;
        debug!("GoogleRoutesApi: matrix returned {} elements", elements.len());

        let num_points = points.len();
        let mut durations = vec![0.0; num_points * num_points];
        let mut distances = vec![0.0; num_points * num_points];

        for element in elements {
            let (Some(from), Some(to)) = (element.origin_index, element.destination_index) else {
                continue;
            };
            if from >= num_points || to >= num_points {
                continue;
            }

            let index = from * num_points + to;
            distances[index] = element.distance_meters;
            durations[index] = element
                .duration
                .as_deref()
                .and_then(|raw| parse_duration_seconds(raw).ok())
                .unwrap_or(0) as f64;
        }

        Ok(TravelMatrices::new(durations, distances, num_points))
    }
}

async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GoogleRoutesError> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(GoogleRoutesError::Api { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_durations() {
        assert_eq!(parse_duration_seconds("300s").unwrap(), 300);
        assert_eq!(parse_duration_seconds("0s").unwrap(), 0);
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(parse_duration_seconds("300").is_err());
        assert!(parse_duration_seconds("fast").is_err());
        assert!(parse_duration_seconds("12m").is_err());
    }

    #[test]
    fn duration_text_thresholds() {
        assert_eq!(duration_text(45), "45 sec");
        assert_eq!(duration_text(60), "1 min");
        assert_eq!(duration_text(720), "12 min");
        assert_eq!(duration_text(3599), "59 min");
        assert_eq!(duration_text(3900), "1h 5min");
    }

    #[test]
    fn request_bodies_use_camel_case() {
        let body = ComputeRoutesBody {
            origin: Waypoint::new(geo_types::Point::new(78.47, 17.36)),
            destination: Waypoint::new(geo_types::Point::new(78.50, 17.40)),
            travel_mode: TravelMode::Walk.google_name(),
            compute_alternative_routes: false,
            route_modifiers: RouteModifiers {
                avoid_tolls: false,
                avoid_highways: false,
                avoid_ferries: false,
            },
            language_code: "en-US",
            units: "METRIC",
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["travelMode"], "WALK");
        assert_eq!(value["origin"]["location"]["latLng"]["latitude"], 17.36);
        assert_eq!(value["routeModifiers"]["avoidTolls"], false);
    }
}
