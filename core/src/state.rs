//! Application state
//!
//! Explicit state container handed to the Mini App surfaces instead of an
//! ambient global: every screen receives `&mut AppState` (or a narrower
//! borrow) and expresses mutations through the named store operations.

use crate::catalog::ExerciseCatalog;
use crate::coaching::CoachingRequestStore;
use crate::config::AppConfig;
use crate::gateway::{PersistenceGateway, SupabaseGateway};
use crate::notify::{NoopRelay, NotificationRelay, TelegramRelay};
use crate::store::DomainStore;
use std::sync::Arc;

pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: DomainStore,
    pub coaching: CoachingRequestStore,
}

impl AppState {
    /// Build the state with real collaborators derived from the config
    ///
    /// Starts from the seed catalog; the shell then calls
    /// `store.reload_from_remote()` to pull the roster.
    pub fn new(config: AppConfig) -> Self {
        let gateway: Arc<dyn PersistenceGateway> = Arc::new(SupabaseGateway::new(&config.supabase));
        let relay: Arc<dyn NotificationRelay> = if config.telegram.enabled {
            Arc::new(TelegramRelay::new(&config.telegram))
        } else {
            Arc::new(NoopRelay)
        };
        Self::with_collaborators(config, Arc::new(ExerciseCatalog::seed()), gateway, relay)
    }

    /// Build the state with injected collaborators (tests, offline mode)
    pub fn with_collaborators(
        config: AppConfig,
        catalog: Arc<ExerciseCatalog>,
        gateway: Arc<dyn PersistenceGateway>,
        relay: Arc<dyn NotificationRelay>,
    ) -> Self {
        let store = DomainStore::new(catalog, Arc::clone(&gateway), relay);
        let coaching = CoachingRequestStore::new(gateway);
        Self {
            config: Arc::new(config),
            store,
            coaching,
        }
    }
}
