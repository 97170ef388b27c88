//! In-memory location store for development and testing.
//!
//! The slot is guarded by an `RwLock`; a poisoned lock still holds a valid
//! `Option<GeoPosition>`, so it is recovered rather than propagated.

use async_trait::async_trait;
use around_core::error::Result;
use around_core::models::GeoPosition;
use around_core::ports::LocationStore;
use std::sync::{Arc, PoisonError, RwLock};

/// In-memory implementation of LocationStore
#[derive(Debug, Clone, Default)]
pub struct MemoryLocationStore {
    position: Arc<RwLock<Option<GeoPosition>>>,
}

impl MemoryLocationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already knows a position
    pub fn with_position(position: GeoPosition) -> Self {
        Self { position: Arc::new(RwLock::new(Some(position))) }
    }
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn load_position(&self) -> Result<Option<GeoPosition>> {
        let position = self.position.read().unwrap_or_else(PoisonError::into_inner);
        Ok(*position)
    }

    async fn save_position(&self, position: GeoPosition) -> Result<()> {
        let mut slot = self.position.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(position);
        Ok(())
    }
}
