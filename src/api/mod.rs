// API module
//
// This module contains the HTTP interface of a node: the routes served to
// clients and peers, and the request/response bodies they exchange

pub mod handlers;
pub mod routes;
pub mod schema;

// Re-export main components for easier access
pub use routes::configure_routes;
