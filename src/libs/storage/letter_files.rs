//! Plain-text storage of letter bodies, one file per letter.
use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::libs::core::models::LetterFileName;
use crate::libs::storage::storage_traits::StoreError;

#[derive(Debug, Clone)]
pub struct LettersDir {
    root: PathBuf,
}

impl LettersDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, file_name: &LetterFileName) -> PathBuf {
        self.root.join(file_name.as_str())
    }

    /// Writes `body` verbatim to a fresh `letter_<millis>.txt`, creating the
    /// directory first if needed. Existing files are never overwritten: a
    /// taken name moves the stamp forward by one millisecond.
    pub fn write_letter(&self, body: &str) -> Result<LetterFileName, StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::LetterFile {
            path: self.root.clone(),
            source,
        })?;

        let mut millis = Utc::now().timestamp_millis();
        loop {
            let file_name = LetterFileName::from_millis(millis);
            let path = self.path_of(&file_name);
            match File::create_new(&path) {
                Ok(mut file) => {
                    file.write_all(body.as_bytes())
                        .map_err(|source| StoreError::LetterFile { path, source })?;
                    return Ok(file_name);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => millis += 1,
                Err(source) => return Err(StoreError::LetterFile { path, source }),
            }
        }
    }

    pub fn read_letter(&self, file_name: &LetterFileName) -> Result<String, StoreError> {
        let path = self.path_of(file_name);
        fs::read_to_string(&path).map_err(|source| StoreError::LetterFile { path, source })
    }
}
