pub mod day_plan;
pub mod location;
pub mod pace;
pub mod place;
