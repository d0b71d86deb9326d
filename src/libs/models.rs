//! JSON shapes exchanged between the wizard client and the letter store.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::libs::core::models::LetterFileName;
use crate::libs::storage::records::{Letter, NewMailRecord};

pub const MAIL_SAVED_MESSAGE: &str = "Письмо сохранено";
pub const MISSING_FIELDS_MESSAGE: &str = "Не все поля заполнены";
pub const SERVER_ERROR_MESSAGE: &str = "Ошибка сервера";

/// Body of `POST /api/mails`. Every field is optional on the wire so that a
/// missing field is reported as a validation error rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailSubmission {
    pub sender_first: Option<String>,
    pub sender_last: Option<String>,
    pub sender_middle: Option<String>,
    pub sender_address: Option<String>,
    pub recipient_first: Option<String>,
    pub recipient_last: Option<String>,
    pub recipient_middle: Option<String>,
    pub recipient_address: Option<String>,
    pub body: Option<String>,
}

#[derive(Error, Debug, PartialEq)]
#[error("missing required fields: {}", .0.join(", "))]
pub struct ValidationError(pub Vec<&'static str>);

impl MailSubmission {
    /// Checks required fields and fills absent middle names with `""`.
    pub fn into_letter(self) -> Result<Letter, ValidationError> {
        let mut missing = Vec::new();
        let mut required = |value: Option<String>, name: &'static str| match value {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let sender_first = required(self.sender_first, "senderFirst");
        let sender_last = required(self.sender_last, "senderLast");
        let sender_address = required(self.sender_address, "senderAddress");
        let recipient_first = required(self.recipient_first, "recipientFirst");
        let recipient_last = required(self.recipient_last, "recipientLast");
        let recipient_address = required(self.recipient_address, "recipientAddress");
        let body = required(self.body, "body");

        if !missing.is_empty() {
            return Err(ValidationError(missing));
        }

        Ok(Letter {
            record: NewMailRecord {
                sender_first,
                sender_last,
                sender_middle: self.sender_middle.unwrap_or_default(),
                sender_address,
                recipient_first,
                recipient_last,
                recipient_middle: self.recipient_middle.unwrap_or_default(),
                recipient_address,
            },
            body,
        })
    }
}

/// `200` reply to a stored letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailSaved {
    pub message: String,
    pub file: LetterFileName,
}

impl MailSaved {
    pub fn new(file: LetterFileName) -> Self {
        Self {
            message: MAIL_SAVED_MESSAGE.to_string(),
            file,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
