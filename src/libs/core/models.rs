use std::fmt;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

pub const LETTER_FILE_PREFIX: &str = "letter_";
pub const LETTER_FILE_EXTENSION: &str = ".txt";

/// Name of a stored letter body, `letter_<unix millis>.txt`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterFileName(String);

impl LetterFileName {
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("{LETTER_FILE_PREFIX}{millis}{LETTER_FILE_EXTENSION}"))
    }

    /// Accepts only names following the letter pattern, so a name read back
    /// from the table can never point outside the letters directory. The
    /// stamp must be written the way `from_millis` writes it.
    pub fn parse(name: &str) -> Option<Self> {
        let stamp = name
            .strip_prefix(LETTER_FILE_PREFIX)?
            .strip_suffix(LETTER_FILE_EXTENSION)?;
        let parsed = Self::from_millis(stamp.parse::<i64>().ok()?);
        (parsed.as_str() == name).then_some(parsed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LetterFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ToSql for LetterFileName {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for LetterFileName {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let name = value.as_str()?;
        LetterFileName::parse(name).ok_or_else(|| {
            FromSqlError::Other(format!("not a letter file name: {name}").into())
        })
    }
}
