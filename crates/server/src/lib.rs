//! HTTP server for the vidrail backend.
//!
//! Exposed as a library so integration tests can assemble the router with
//! mock dependencies; the `vidrail` binary lives in `main.rs`.

pub mod api;
pub mod metrics;
pub mod state;
