use std::sync::Arc;

use crate::config::Config;
use crate::db::{AccountStore, Store};
use crate::services::{AccountService, DefaultAccountService};

/// Process-wide dependencies, constructed once at startup and injected into
/// the HTTP layer.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub accounts: Arc<dyn AccountService>,
}

impl SharedState {
    /// Connects to the database (with retries) and wires the account service.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::connect(&config.database).await?;
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let account_store = Arc::new(store.clone()) as Arc<dyn AccountStore>;
        let accounts = Arc::new(DefaultAccountService::from_config(
            account_store,
            &config.security,
        )?) as Arc<dyn AccountService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            accounts,
        })
    }
}
