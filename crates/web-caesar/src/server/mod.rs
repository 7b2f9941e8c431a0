//! REST API module for the Web Caesar service
//!
//! Provides the HTTP endpoints around the `caesar` library. Uses axum for
//! routing and schemars for request schema documentation.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod startup;
pub mod state;
pub mod types;
