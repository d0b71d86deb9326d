use std::future::Future;

use thiserror::Error;

use crate::libs::models::{ErrorBody, MailSaved, MailSubmission};

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Ошибка сохранения письма")]
    Rejected { status: u16, error: Option<String> },
    #[error("Request Error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Where the payment page sends a finished letter.
pub trait MailApi {
    fn submit_mail(
        &self,
        submission: &MailSubmission,
    ) -> impl Future<Output = Result<MailSaved, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpMailApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMailApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn mails_url(&self) -> String {
        format!("{}/api/mails", self.base_url)
    }
}

impl Default for HttpMailApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MailApi for HttpMailApi {
    async fn submit_mail(&self, submission: &MailSubmission) -> Result<MailSaved, ClientError> {
        let response = self
            .client
            .post(self.mails_url())
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = response.json::<ErrorBody>().await.ok().map(|body| body.error);
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                error,
            });
        }

        Ok(response.json::<MailSaved>().await?)
    }
}
