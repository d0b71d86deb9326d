use tracing::info;

use crate::libs::storage::database::storage_sqlite::{SqliteStore, SqliteTransaction};
use crate::libs::storage::storage_traits::{StoreError, Transactional};

/// Column order shared by every `SELECT` on `mails`.
pub const MAIL_COLUMNS: &str = "id, senderFirst, senderLast, senderMiddle, senderAddress, \
     recipientFirst, recipientLast, recipientMiddle, recipientAddress, fileName";

/// Creates the `mails` table if the database file does not have it yet.
pub fn db_migration(store: &SqliteStore) -> Result<(), StoreError> {
    let mut connection = store.new_connection()?;
    let sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    sqlite_transaction.inner().execute(
        "CREATE TABLE IF NOT EXISTS mails (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            senderFirst TEXT,
            senderLast TEXT,
            senderMiddle TEXT,
            senderAddress TEXT,
            recipientFirst TEXT,
            recipientLast TEXT,
            recipientMiddle TEXT,
            recipientAddress TEXT,
            fileName TEXT
        );",
        [],
    )?;

    sqlite_transaction.commit()?;
    info!("Database schema ready");
    Ok(())
}
