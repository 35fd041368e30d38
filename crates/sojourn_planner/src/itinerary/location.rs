use geo::{Distance, Haversine};
use serde::{Deserialize, Serialize};

/// A validated geographic coordinate.
///
/// Construction panics on out-of-range values: a bad coordinate reaching
/// the planner is a programming error, not an input condition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Location {
    point: geo::Point,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        if !(-90.0..=90.0).contains(&lat) {
            panic!("Location: latitude {lat} out of range");
        }
        if !(-180.0..=180.0).contains(&lng) {
            panic!("Location: longitude {lng} out of range");
        }

        Self {
            point: geo::Point::new(lng, lat),
        }
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lng(&self) -> f64 {
        self.point.x()
    }

    /// Great-circle distance in meters.
    pub fn haversine_distance(&self, to: &Location) -> f64 {
        let haversine = Haversine;

        haversine.distance(self.point, to.point)
    }
}

impl From<&Location> for geo::Point<f64> {
    fn from(location: &Location) -> Self {
        location.point
    }
}

#[derive(Serialize, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl Serialize for Location {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        LatLng {
            lat: self.lat(),
            lng: self.lng(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = LatLng::deserialize(deserializer)?;
        if !(-90.0..=90.0).contains(&raw.lat) {
            return Err(serde::de::Error::custom(format!(
                "latitude {} out of range",
                raw.lat
            )));
        }
        if !(-180.0..=180.0).contains(&raw.lng) {
            return Err(serde::de::Error::custom(format!(
                "longitude {} out of range",
                raw.lng
            )));
        }

        Ok(Location::new(raw.lat, raw.lng))
    }
}
