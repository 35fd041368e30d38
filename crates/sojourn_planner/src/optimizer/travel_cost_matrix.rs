use std::sync::Arc;

use jiff::SignedDuration;

use crate::itinerary::location::Location;

pub type Distance = f64;
pub type Seconds = f64;

/// Flat travel matrices between the stops of one day.
///
/// Tours are optimized on durations; distances ride along so totals can
/// be reported without a second provider call. The index for a pair is
/// `from * num_locations + to`.
pub struct TravelCostMatrix {
    durations: Arc<Vec<Seconds>>,
    distances: Arc<Vec<Distance>>,
    num_locations: usize,
}

impl TravelCostMatrix {
    pub fn from_matrices(
        matrices: sojourn_routing_providers::travel_matrices::TravelMatrices,
    ) -> Self {
        Self {
            durations: Arc::new(matrices.durations),
            distances: Arc::new(matrices.distances),
            num_locations: matrices.num_locations,
        }
    }

    /// Straight-line matrices at an assumed speed, used when no provider
    /// is reachable.
    pub fn from_haversine(locations: &[Location], speed_kmh: f64) -> Self {
        let num_locations = locations.len();
        let mut distances: Vec<Distance> = vec![0.0; num_locations * num_locations];
        let mut durations: Vec<Seconds> = vec![0.0; num_locations * num_locations];

        let speed = speed_kmh / 3.6;
        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                let distance = from.haversine_distance(to);
                distances[i * num_locations + j] = distance;
                durations[i * num_locations + j] = distance / speed;
            }
        }

        Self {
            durations: Arc::new(durations),
            distances: Arc::new(distances),
            num_locations,
        }
    }

    #[cfg(test)]
    pub fn from_constant(num_locations: usize, duration_secs: f64, distance_meters: f64) -> Self {
        Self {
            durations: Arc::new(vec![duration_secs; num_locations * num_locations]),
            distances: Arc::new(vec![distance_meters; num_locations * num_locations]),
            num_locations,
        }
    }

    #[inline(always)]
    fn index(&self, from: usize, to: usize) -> usize {
        from * self.num_locations + to
    }

    #[inline(always)]
    pub fn duration_seconds(&self, from: usize, to: usize) -> Seconds {
        if from == to {
            return 0.0;
        }

        self.durations[self.index(from, to)]
    }

    #[inline(always)]
    pub fn duration(&self, from: usize, to: usize) -> SignedDuration {
        SignedDuration::from_secs_f64(self.duration_seconds(from, to))
    }

    #[inline(always)]
    pub fn distance_meters(&self, from: usize, to: usize) -> Distance {
        if from == to {
            return 0.0;
        }

        self.distances[self.index(from, to)]
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }
}
