use std::sync::Arc;

use tracing::info;

use super::config::Settings;
use crate::libs::storage::database::storage_sqlite::SqliteStore;
use crate::libs::storage::letter_files::LettersDir;
use crate::libs::storage::lib_sqlite_impl::init_database;
use crate::libs::storage::storage_traits::StoreError;

pub struct State {
    pub config: Settings,
    pub store: SqliteStore,
    pub letters: LettersDir,
}

impl State {
    pub fn new(config: Settings) -> Result<Arc<Self>, StoreError> {
        info!("Opening database at {}", config.database_path);
        let store = init_database(&config.database_path)?;
        let letters = LettersDir::new(&config.letters_dir);

        Ok(Arc::new(Self {
            config,
            store,
            letters,
        }))
    }
}
