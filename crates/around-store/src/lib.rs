//! Around Store - Location persistence adapters
//!
//! This crate provides `LocationStore` adapters: an in-memory slot for tests
//! and embedding, and a JSON key/value file that survives across sessions.

pub mod file;
pub mod memory;

pub use file::{FileStore, POS_KEY, TOKEN_KEY};
pub use memory::MemoryLocationStore;
