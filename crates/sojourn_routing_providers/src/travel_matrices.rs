use serde::{Deserialize, Serialize};

/// Flat row-major n x n travel matrices between a set of stops.
///
/// Durations are in seconds, distances in meters. The element for
/// `(from, to)` lives at `from * num_locations + to`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TravelMatrices {
    pub durations: Vec<f64>,
    pub distances: Vec<f64>,
    pub num_locations: usize,
}

impl TravelMatrices {
    pub fn new(durations: Vec<f64>, distances: Vec<f64>, num_locations: usize) -> Self {
        debug_assert_eq!(durations.len(), num_locations * num_locations);
        debug_assert_eq!(distances.len(), num_locations * num_locations);

        Self {
            durations,
            distances,
            num_locations,
        }
    }

    #[inline(always)]
    pub fn index(&self, from: usize, to: usize) -> usize {
        from * self.num_locations + to
    }

    pub fn duration_seconds(&self, from: usize, to: usize) -> f64 {
        self.durations[self.index(from, to)]
    }

    pub fn distance_meters(&self, from: usize, to: usize) -> f64 {
        self.distances[self.index(from, to)]
    }
}
