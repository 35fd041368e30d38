pub mod as_the_crow_flies;
pub mod google_routes_api;
pub mod route;
pub mod route_client;
pub mod route_provider;
pub mod travel_matrices;
pub mod travel_mode;
