//! track-core: shared infrastructure for the AIIMTrack services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
