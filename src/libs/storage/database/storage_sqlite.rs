use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Transaction};

use crate::libs::core::models::LetterFileName;
use crate::libs::storage::database::migration::MAIL_COLUMNS;
use crate::libs::storage::records::{MailRecord, NewMailRecord};
use crate::libs::storage::storage_traits::{MailStore, StoreError, Transactional};

pub struct SqliteTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SqliteTransaction<'conn> {
    pub fn new(
        conn: &'conn mut PooledConnection<SqliteConnectionManager>,
    ) -> Result<Self, StoreError> {
        let trans = conn.transaction()?;
        Ok(Self { tx: trans })
    }

    pub fn inner(&self) -> &Transaction<'conn> {
        &self.tx
    }
}

impl Transactional for SqliteTransaction<'_> {
    fn commit(self) -> Result<(), StoreError> {
        Ok(self.tx.commit()?)
    }

    fn rollback(self) -> Result<(), StoreError> {
        Ok(self.tx.rollback()?)
    }
}

#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn_pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::new(manager)?;
        Ok(Self { conn_pool: pool })
    }

    pub fn new_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.conn_pool.get()?)
    }
}

impl MailStore for SqliteTransaction<'_> {
    fn store_mail(
        &mut self,
        record: NewMailRecord,
        file_name: &LetterFileName,
    ) -> Result<MailRecord, StoreError> {
        self.tx.execute(
            "INSERT INTO mails
                (senderFirst, senderLast, senderMiddle, senderAddress,
                 recipientFirst, recipientLast, recipientMiddle, recipientAddress, fileName)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.sender_first,
                record.sender_last,
                record.sender_middle,
                record.sender_address,
                record.recipient_first,
                record.recipient_last,
                record.recipient_middle,
                record.recipient_address,
                file_name,
            ],
        )?;
        let id = self.tx.last_insert_rowid();
        Ok(MailRecord::from_db(id, record, file_name.clone()))
    }

    fn load_mails(&mut self) -> Result<Vec<MailRecord>, StoreError> {
        let mut stmt = self
            .tx
            .prepare(&format!("SELECT {MAIL_COLUMNS} FROM mails ORDER BY id"))?;
        let mails = stmt
            .query_map([], MailRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(mails)
    }

    fn load_mail_by_file_name(
        &mut self,
        file_name: &LetterFileName,
    ) -> Result<Option<MailRecord>, StoreError> {
        let mail = self
            .tx
            .query_row(
                &format!("SELECT {MAIL_COLUMNS} FROM mails WHERE fileName = ?1"),
                params![file_name],
                MailRecord::from_row,
            )
            .optional()?;
        Ok(mail)
    }
}
