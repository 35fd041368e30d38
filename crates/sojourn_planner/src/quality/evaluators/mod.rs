pub mod duration;
pub mod evaluator;
pub mod geographic;
pub mod meal_timing;
pub mod opening_hours;
pub mod theme_alignment;
pub mod travel_efficiency;
pub mod variety;
