pub mod route_optimizer;
pub mod tour;
pub mod travel_cost_matrix;
