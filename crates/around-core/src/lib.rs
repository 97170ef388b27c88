//! Around Core - Domain models, ports, and configuration
//!
//! This crate contains the domain types and port definitions shared by the
//! discovery and ingest coordinators and their adapters.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{AroundError, Result};
