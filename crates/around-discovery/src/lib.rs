//! Around Discovery - Proximity discovery and post ingest coordination
//!
//! This crate implements the use cases: turning device location or map
//! viewport state into nearby-content queries, tracking their lifecycle, and
//! publishing new geo-tagged posts.

pub mod coordinator;
pub mod ingest;
pub mod probe;
pub mod viewport;

pub use coordinator::DiscoveryCoordinator;
pub use ingest::PostIngestCoordinator;
pub use probe::{StaticProbe, UnsupportedProbe};
pub use viewport::StaticViewport;
