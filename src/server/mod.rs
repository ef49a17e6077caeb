//! HTTP surface: the cached state document, the ZIP list and static media.
//!
//! The cache instance is owned by [`AppState`] and handed to the router
//! explicitly; nothing here is process-global.

pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use crate::app::{cache::StateCache, settings::RuntimeSettings};

pub use router::create_router;

/// Shared state passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<RuntimeSettings>,
    pub cache: Arc<StateCache>,
}

impl AppState {
    pub fn new(settings: RuntimeSettings, cache: StateCache) -> Self {
        Self {
            settings: Arc::new(settings),
            cache: Arc::new(cache),
        }
    }
}
