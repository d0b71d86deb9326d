use std::path::PathBuf;

use thiserror::Error;

use crate::libs::core::models::LetterFileName;
use crate::libs::storage::records::{MailRecord, NewMailRecord};

pub trait Transactional {
    fn commit(self) -> Result<(), StoreError>;
    fn rollback(self) -> Result<(), StoreError>;
}

pub trait MailStore {
    fn store_mail(
        &mut self,
        record: NewMailRecord,
        file_name: &LetterFileName,
    ) -> Result<MailRecord, StoreError>;

    /// Every row in insertion order.
    fn load_mails(&mut self) -> Result<Vec<MailRecord>, StoreError>;

    fn load_mail_by_file_name(
        &mut self,
        file_name: &LetterFileName,
    ) -> Result<Option<MailRecord>, StoreError>;
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Sqlite Error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("ConnectionPool Error: {0}")]
    ConnectionPool(#[from] r2d2::Error),
    #[error("Letter file Error at {path}: {source}")]
    LetterFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
