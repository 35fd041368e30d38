use fixedbitset::FixedBitSet;
use jiff::SignedDuration;
use tracing::debug;

use super::travel_cost_matrix::TravelCostMatrix;

/// Passes over the whole tour before 2-opt gives up on convergence.
pub const MAX_TWO_OPT_PASSES: usize = 100;

/// Greedy nearest-neighbor construction.
///
/// Starts at `start` and repeatedly appends the unvisited stop with the
/// smallest travel duration. Ties go to the lowest index, which keeps
/// the construction deterministic.
pub fn nearest_neighbor(matrix: &TravelCostMatrix, start: usize) -> Vec<usize> {
    let num_locations = matrix.num_locations();
    let mut tour = Vec::with_capacity(num_locations);
    let mut visited = FixedBitSet::with_capacity(num_locations);

    visited.insert(start);
    tour.push(start);
    let mut current = start;

    while tour.len() < num_locations {
        let mut nearest = None;
        let mut nearest_duration = f64::INFINITY;

        for candidate in 0..num_locations {
            if visited.contains(candidate) {
                continue;
            }

            let duration = matrix.duration_seconds(current, candidate);
            if duration < nearest_duration {
                nearest = Some(candidate);
                nearest_duration = duration;
            }
        }

        let next = nearest.expect("an unvisited stop must remain while the tour is incomplete");
        visited.insert(next);
        tour.push(next);
        current = next;
    }

    tour
}

/// 2-opt local search over an open tour.
///
/// Reverses the segment between two edges whenever the swap shortens the
/// tour. The closing edge wraps to the start for gain computation only;
/// totals are still measured over the open path.
///
/// ```text
/// BEFORE:
///    [a] --x--> [b] -> ... -> [c] --x--> [d]
///
/// AFTER (segment b..=c reversed):
///    [a] -----> [c] -> ... -> [b] -----> [d]
/// ```
///
/// Returns the number of passes until no improving swap remains.
pub fn two_opt(tour: &mut [usize], matrix: &TravelCostMatrix) -> usize {
    let len = tour.len();
    if len < 3 {
        return 0;
    }

    let mut passes = 0;
    let mut improved = true;

    while improved && passes < MAX_TWO_OPT_PASSES {
        improved = false;
        passes += 1;

        for i in 0..len - 1 {
            for j in i + 2..len {
                let a = tour[i];
                let b = tour[i + 1];
                let c = tour[j];
                let d = tour[(j + 1) % len];

                let current = matrix.duration_seconds(a, b) + matrix.duration_seconds(c, d);
                let swapped = matrix.duration_seconds(a, c) + matrix.duration_seconds(b, d);

                if current - swapped > 0.0 {
                    tour[i + 1..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    debug!("2-opt settled after {passes} passes");
    passes
}

/// Open-path totals over both matrices.
pub fn tour_totals(tour: &[usize], matrix: &TravelCostMatrix) -> (SignedDuration, f64) {
    let mut duration_secs = 0.0;
    let mut distance_meters = 0.0;

    for pair in tour.windows(2) {
        duration_secs += matrix.duration_seconds(pair[0], pair[1]);
        distance_meters += matrix.distance_meters(pair[0], pair[1]);
    }

    (
        SignedDuration::from_secs_f64(duration_secs),
        distance_meters,
    )
}

#[cfg(test)]
mod tests {
    use crate::itinerary::location::Location;

    use super::*;

    // Four corners of a small block, roughly 850m x 1100m.
    fn block_corners() -> Vec<Location> {
        vec![
            Location::new(40.00, -3.01),
            Location::new(40.00, -3.00),
            Location::new(40.01, -3.01),
            Location::new(40.01, -3.00),
        ]
    }

    #[test]
    fn nearest_neighbor_visits_every_stop_once() {
        let matrix = TravelCostMatrix::from_haversine(&block_corners(), 20.0);
        let mut tour = nearest_neighbor(&matrix, 0);

        assert_eq!(tour.len(), 4);
        tour.sort_unstable();
        assert_eq!(tour, vec![0, 1, 2, 3]);
    }

    #[test]
    fn nearest_neighbor_breaks_ties_toward_the_lowest_index() {
        // All pairs cost the same, so the tour must come out in index order.
        let matrix = TravelCostMatrix::from_constant(5, 60.0, 100.0);
        let tour = nearest_neighbor(&matrix, 0);

        assert_eq!(tour, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn two_opt_uncrosses_a_crossing_tour() {
        let corners = block_corners();
        let matrix = TravelCostMatrix::from_haversine(&corners, 20.0);

        // 0 -> 3 -> 1 -> 2 crosses the block twice on the diagonals.
        let mut tour = vec![0, 3, 1, 2];
        let (before, _) = tour_totals(&tour, &matrix);

        two_opt(&mut tour, &matrix);
        let (after, _) = tour_totals(&tour, &matrix);

        assert_eq!(tour, vec![0, 1, 3, 2]);
        assert!(after < before);
    }

    #[test]
    fn two_opt_is_idempotent_once_settled() {
        let corners = block_corners();
        let matrix = TravelCostMatrix::from_haversine(&corners, 20.0);

        let mut tour = vec![0, 3, 1, 2];
        two_opt(&mut tour, &matrix);
        let settled = tour.clone();

        two_opt(&mut tour, &matrix);
        assert_eq!(tour, settled);
    }

    #[test]
    fn tiny_tours_are_left_alone() {
        let matrix = TravelCostMatrix::from_constant(2, 60.0, 100.0);
        let mut tour = vec![0, 1];

        assert_eq!(two_opt(&mut tour, &matrix), 0);
        assert_eq!(tour, vec![0, 1]);
    }

    #[test]
    fn totals_cover_the_open_path_only() {
        let matrix = TravelCostMatrix::from_constant(4, 60.0, 500.0);
        let (duration, distance) = tour_totals(&[0, 1, 2, 3], &matrix);

        // Three legs, not four: the tour does not close back on itself.
        assert_eq!(duration, SignedDuration::from_secs(180));
        assert_eq!(distance, 1500.0);
    }
}
