//! Route configuration for the HTTP API.

pub mod routes;

pub use routes::create_routes;
