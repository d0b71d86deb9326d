//! Page flow of the letter wizard: Login → (Register) → Compose → Payment →
//! Compose. The draft only lives in the `Payment` page value, so it is gone
//! as soon as the wizard leaves that page.
use tracing::{info, warn};

use super::api::MailApi;
use super::auth::{Auth, AuthError, RegistrationForm, SessionUser};
use super::kv_store::KeyValueStore;
use crate::libs::models::MailSubmission;

pub const PAYMENT_CONFIRMED: &str = "Оплата прошла";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Compose,
    Payment,
    Profile,
}

impl Route {
    /// Unknown paths fall back to the login page.
    pub fn from_path(path: &str) -> Self {
        match path {
            "/register" => Route::Register,
            "/compose" => Route::Compose,
            "/payment" => Route::Payment,
            "/profile" => Route::Profile,
            _ => Route::Login,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    pub first: String,
    pub last: String,
    pub middle: String,
    pub address: String,
}

impl Party {
    /// The compose form asks for every field, the middle name included.
    pub fn is_complete(&self) -> bool {
        [&self.first, &self.last, &self.middle, &self.address]
            .iter()
            .all(|field| !field.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterDraft {
    pub from: Party,
    pub to: Party,
    pub body: String,
    /// Shown as attached; never uploaded.
    pub image_name: String,
}

impl LetterDraft {
    pub fn is_complete(&self) -> bool {
        self.from.is_complete() && self.to.is_complete() && !self.body.trim().is_empty()
    }

    pub fn to_submission(&self) -> MailSubmission {
        MailSubmission {
            sender_first: Some(self.from.first.clone()),
            sender_last: Some(self.from.last.clone()),
            sender_middle: Some(self.from.middle.clone()),
            sender_address: Some(self.from.address.clone()),
            recipient_first: Some(self.to.first.clone()),
            recipient_last: Some(self.to.last.clone()),
            recipient_middle: Some(self.to.middle.clone()),
            recipient_address: Some(self.to.address.clone()),
            body: Some(self.body.clone()),
        }
    }
}

/// Card details are only checked for presence; nothing is charged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub holder: String,
}

impl PaymentForm {
    pub fn is_complete(&self) -> bool {
        [&self.card_number, &self.expiry, &self.cvv, &self.holder]
            .iter()
            .all(|field| !field.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Compose,
    Payment(LetterDraft),
    Profile,
}

impl Page {
    pub fn route(&self) -> Route {
        match self {
            Page::Login => Route::Login,
            Page::Register => Route::Register,
            Page::Compose => Route::Compose,
            Page::Payment(_) => Route::Payment,
            Page::Profile => Route::Profile,
        }
    }
}

/// Message rendered under the current form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Confirmation(String),
}

pub struct Wizard<S, A> {
    auth: Auth<S>,
    api: A,
    page: Page,
    notice: Option<Notice>,
}

impl<S: KeyValueStore, A: MailApi> Wizard<S, A> {
    pub fn new(auth: Auth<S>, api: A) -> Self {
        Self {
            auth,
            api,
            page: Page::Login,
            notice: None,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.auth.user()
    }

    pub fn auth(&self) -> &Auth<S> {
        &self.auth
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Name for the profile page, `None` without a session.
    pub fn profile_name(&self) -> Option<&str> {
        self.auth.user().map(SessionUser::display_name)
    }

    /// Direct navigation. Pages behind the session redirect to Login, and
    /// Payment without a draft goes back to Compose.
    pub fn open(&mut self, path: &str) {
        self.notice = None;
        self.page = match Route::from_path(path) {
            Route::Login => Page::Login,
            Route::Register => Page::Register,
            Route::Compose | Route::Payment if self.auth.user().is_none() => Page::Login,
            Route::Profile if self.auth.user().is_none() => Page::Login,
            Route::Compose | Route::Payment => Page::Compose,
            Route::Profile => Page::Profile,
        };
    }

    pub fn login(&mut self, login: &str, password: &str) {
        self.notice = None;
        if login.trim().is_empty() || password.trim().is_empty() {
            return;
        }
        match self.auth.login(login, password) {
            Ok(_) => self.page = Page::Compose,
            Err(err) => self.fail(err),
        }
    }

    pub fn register(&mut self, form: RegistrationForm) {
        self.notice = None;
        if !form.is_complete() {
            return;
        }
        match self.auth.register(form) {
            Ok(_) => self.page = Page::Compose,
            Err(err) => self.fail(err),
        }
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.auth.logout() {
            warn!("Failed to clear session: {err}");
        }
        self.notice = None;
        self.page = Page::Login;
    }

    /// Moves a complete draft to the payment page; returns whether it did.
    pub fn proceed_to_payment(&mut self, draft: LetterDraft) -> bool {
        if self.page != Page::Compose || !draft.is_complete() {
            return false;
        }
        self.notice = None;
        self.page = Page::Payment(draft);
        true
    }

    /// Sends the draft to the letter store. Success returns to Compose with
    /// a confirmation; failure stays on Payment with the error inline.
    pub async fn pay(&mut self, form: &PaymentForm) {
        let Page::Payment(draft) = &self.page else {
            return;
        };
        if !form.is_complete() {
            return;
        }

        let submission = draft.to_submission();
        match self.api.submit_mail(&submission).await {
            Ok(saved) => {
                info!(file = %saved.file, "Letter paid and stored");
                self.page = Page::Compose;
                self.notice = Some(Notice::Confirmation(PAYMENT_CONFIRMED.to_string()));
            }
            Err(err) => {
                warn!("Letter submission failed: {err}");
                self.notice = Some(Notice::Error(format!("Ошибка: {err}")));
            }
        }
    }

    fn fail(&mut self, err: AuthError) {
        if let AuthError::Storage(storage) = &err {
            warn!("Client storage failure: {storage}");
        }
        self.notice = Some(Notice::Error(err.to_string()));
    }
}
