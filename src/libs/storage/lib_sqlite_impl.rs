use tracing::error;

use crate::libs::core::models::LetterFileName;
use crate::libs::storage::database::migration::db_migration;
use crate::libs::storage::database::storage_sqlite::{SqliteStore, SqliteTransaction};
use crate::libs::storage::letter_files::LettersDir;
use crate::libs::storage::records::{Letter, MailRecord};
use crate::libs::storage::storage_traits::{MailStore, StoreError, Transactional};

pub fn init_database(path: &str) -> Result<SqliteStore, StoreError> {
    let store = SqliteStore::new(path)?;
    db_migration(&store)?;
    Ok(store)
}

/// Writes the body file, then inserts the row. The two steps are not atomic:
/// when the insert fails the body file stays on disk.
pub fn save_letter(
    store: &SqliteStore,
    letters: &LettersDir,
    letter: Letter,
) -> Result<MailRecord, StoreError> {
    let file_name = letters.write_letter(&letter.body)?;

    let insert = || -> Result<MailRecord, StoreError> {
        let mut connection = store.new_connection()?;
        let mut sqlite_transaction = SqliteTransaction::new(&mut connection)?;
        let record = sqlite_transaction.store_mail(letter.record, &file_name)?;
        sqlite_transaction.commit()?;
        Ok(record)
    };

    insert().inspect_err(|err| {
        error!(
            "Letter body left orphaned at {}: {err}",
            letters.path_of(&file_name).display()
        );
    })
}

pub fn load_letters(store: &SqliteStore) -> Result<Vec<MailRecord>, StoreError> {
    let mut connection = store.new_connection()?;
    let mut sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    let mails = sqlite_transaction.load_mails()?;

    sqlite_transaction.commit()?;
    Ok(mails)
}

pub fn load_letter_by_file_name(
    store: &SqliteStore,
    file_name: &LetterFileName,
) -> Result<Option<MailRecord>, StoreError> {
    let mut connection = store.new_connection()?;
    let mut sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    let mail = sqlite_transaction.load_mail_by_file_name(file_name)?;

    sqlite_transaction.commit()?;
    Ok(mail)
}
