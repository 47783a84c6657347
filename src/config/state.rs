// Application state module
// Owns the process-wide collections served by the request handlers

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::types::Config;
use crate::logger;
use crate::model::{
    default_alchemy_items, default_bestiary, default_contracts, default_profile, AlchemyItem,
    Contract, Monster, Profile,
};
use crate::store::{BestiaryStore, ReviewStore};

/// Application state
///
/// Initialized once at startup. The profile, alchemy and contract
/// collections are read-only for the process lifetime; the bestiary is
/// mutated only by the admin console operations, which run with
/// exclusive access in their own process.
pub struct AppState {
    pub config: Config,
    pub profile: Profile,
    pub alchemy_items: Vec<AlchemyItem>,
    pub contracts: Vec<Contract>,
    pub bestiary: Vec<Monster>,
    pub bestiary_store: BestiaryStore,
    pub reviews: ReviewStore,

    // Cached config value for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    /// Create `AppState` from loaded configuration
    pub fn new(config: Config) -> Self {
        let bestiary_store = BestiaryStore::new(&config.storage.data_dir);
        let reviews = ReviewStore::new(&config.storage.data_dir);

        // The bestiary file is read at startup, but the built-in list
        // takes precedence over whatever it contains. The file only
        // matters as the write target of the admin operations.
        let persisted = bestiary_store.load();
        if !persisted.is_empty() {
            logger::log_warning(&format!(
                "Bestiary file {} holds {} entries; using the built-in bestiary",
                bestiary_store.path().display(),
                persisted.len()
            ));
        }
        let bestiary = default_bestiary();

        let cached_access_log = Arc::new(AtomicBool::new(config.logging.access_log));

        Self {
            config,
            profile: default_profile(),
            alchemy_items: default_alchemy_items(),
            contracts: default_contracts(),
            bestiary,
            bestiary_store,
            reviews,
            cached_access_log,
        }
    }
}
