//! Around Geo - Spherical distance and positional jitter
//!
//! This crate holds the pure numeric derivations used by the coordinators:
//! search radius from a map viewport and privacy jitter for new posts.

pub mod jitter;
pub mod radius;

pub use jitter::{apply_jitter, jitter_coordinate};
pub use radius::{distance_meters, radius_km, viewport_radius_km};
