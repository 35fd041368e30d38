//! Itinerary quality scoring: seven weighted metrics folded into one
//! graded report.

pub mod evaluators;
pub mod grade;
pub mod report;
pub mod scorer;
