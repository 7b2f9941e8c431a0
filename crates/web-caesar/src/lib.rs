//! Web Caesar - HTTP service around the `caesar` cipher library

pub mod config;
pub mod jokes;
pub mod server;

pub use config::Config;
pub use server::routing::create_router;
pub use server::startup::{build_state, start_server};
