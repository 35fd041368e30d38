pub mod config;
pub mod itinerary;
pub mod optimizer;
pub mod planner;
pub mod quality;
pub mod schedule;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
