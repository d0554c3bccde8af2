//! HTTP surface for the dashboard.
//!
//! Serves the view model as JSON and accepts selection changes from
//! the charting UI; every accepted change triggers a refresh.

pub mod handlers;
pub mod routes;

pub use routes::configure;
