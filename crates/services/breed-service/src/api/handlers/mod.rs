//! Request handlers.

pub mod breed_handler;
pub mod health_handler;

pub use breed_handler::breed_routes;
pub use health_handler::health_routes;
