use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State as AxumState},
    Json,
};
use tokio::task::spawn_blocking;
use tracing::info;

use super::{error::AppError, state::State};
use crate::libs::models::{MailSaved, MailSubmission};
use crate::libs::storage::lib_sqlite_impl::{load_letters, save_letter};
use crate::libs::storage::records::MailRecord;

pub async fn submit_mail_handler(
    AxumState(state): AxumState<Arc<State>>,
    payload: Result<Json<MailSubmission>, JsonRejection>,
) -> Result<Json<MailSaved>, AppError> {
    let Json(submission) = payload.map_err(|err| AppError::MalformedPayload(err.body_text()))?;
    info!(?submission, "Received letter");

    let letter = submission.into_letter()?;

    let record =
        spawn_blocking(move || save_letter(&state.store, &state.letters, letter)).await??;

    info!(id = record.id, file = %record.file_name, "Letter stored");
    Ok(Json(MailSaved::new(record.file_name)))
}

pub async fn list_mails_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<Json<Vec<MailRecord>>, AppError> {
    let mails = spawn_blocking(move || load_letters(&state.store)).await??;
    Ok(Json(mails))
}
