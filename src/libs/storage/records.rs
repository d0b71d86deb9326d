use rusqlite::Row;
use serde::Serialize;

use crate::libs::core::models::LetterFileName;

/// Validated metadata of a letter that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMailRecord {
    pub sender_first: String,
    pub sender_last: String,
    pub sender_middle: String,
    pub sender_address: String,
    pub recipient_first: String,
    pub recipient_last: String,
    pub recipient_middle: String,
    pub recipient_address: String,
}

/// A submission that passed validation: the row to insert and the body to
/// write to the letters directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Letter {
    pub record: NewMailRecord,
    pub body: String,
}

/// One row of the `mails` table, serialised with the column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailRecord {
    pub id: i64,
    pub sender_first: String,
    pub sender_last: String,
    pub sender_middle: String,
    pub sender_address: String,
    pub recipient_first: String,
    pub recipient_last: String,
    pub recipient_middle: String,
    pub recipient_address: String,
    pub file_name: LetterFileName,
}

impl MailRecord {
    pub fn from_db(id: i64, record: NewMailRecord, file_name: LetterFileName) -> Self {
        Self {
            id,
            sender_first: record.sender_first,
            sender_last: record.sender_last,
            sender_middle: record.sender_middle,
            sender_address: record.sender_address,
            recipient_first: record.recipient_first,
            recipient_last: record.recipient_last,
            recipient_middle: record.recipient_middle,
            recipient_address: record.recipient_address,
            file_name,
        }
    }

    /// Maps a row selected with [`MAIL_COLUMNS`](crate::libs::storage::database::migration::MAIL_COLUMNS).
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            sender_first: row.get(1)?,
            sender_last: row.get(2)?,
            sender_middle: row.get(3)?,
            sender_address: row.get(4)?,
            recipient_first: row.get(5)?,
            recipient_last: row.get(6)?,
            recipient_middle: row.get(7)?,
            recipient_address: row.get(8)?,
            file_name: row.get(9)?,
        })
    }
}
