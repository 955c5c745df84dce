//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::FamilyService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FamilyStore, JsonFileStore};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Document store for family aggregates
    pub store: Arc<dyn FamilyStore>,

    /// Family/forest use cases
    pub families: FamilyService,
}

impl ServiceContainer {
    /// Create a container backed by the JSON file store from settings.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        let store: Arc<dyn FamilyStore> = Arc::new(JsonFileStore::open(&settings.store_dir)?);
        Ok(Self::with_deps(settings, store))
    }

    /// Create a container with a custom store (for testing).
    pub fn with_deps(settings: Settings, store: Arc<dyn FamilyStore>) -> Self {
        let settings = Arc::new(settings);
        let families = FamilyService::new(Arc::clone(&store));

        Self {
            settings,
            store,
            families,
        }
    }
}
