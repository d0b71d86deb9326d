//! Local accounts and the active session. Nothing here talks to the server:
//! passwords are compared in plain text against the local user list.
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::kv_store::{get_json, set_json, KeyValueStore, KvError};

pub const USERS_KEY: &str = "po_users";
pub const SESSION_KEY: &str = "po_session";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Логин уже занят")]
    LoginTaken,
    #[error("Неверный логин или пароль")]
    InvalidCredentials,
    #[error("Заполните все поля")]
    IncompleteForm,
    #[error("Storage Error: {0}")]
    Storage(#[from] KvError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUser {
    pub login: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub login: String,
    pub name: String,
}

impl SessionUser {
    /// Name shown on the profile page.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.login
        } else {
            &self.name
        }
    }
}

impl From<&LocalUser> for SessionUser {
    fn from(user: &LocalUser) -> Self {
        Self {
            login: user.login.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub login: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.login, &self.password]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

pub struct Auth<S> {
    store: S,
    user: Option<SessionUser>,
}

impl<S: KeyValueStore> Auth<S> {
    /// Rehydrates the session left in `store` by a previous run.
    pub fn new(store: S) -> Result<Self, AuthError> {
        let user = get_json(&store, SESSION_KEY)?;
        Ok(Self { store, user })
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn users(&self) -> Result<Vec<LocalUser>, AuthError> {
        Ok(get_json(&self.store, USERS_KEY)?.unwrap_or_default())
    }

    /// Inputs are trimmed before comparison. A failed attempt leaves the
    /// current session untouched.
    pub fn login(&mut self, login: &str, password: &str) -> Result<&SessionUser, AuthError> {
        let (login, password) = (login.trim(), password.trim());
        let users = self.users()?;
        let found = users
            .iter()
            .find(|user| user.login == login && user.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        debug!(login, "Logged in");
        self.set_session(SessionUser::from(found))
    }

    pub fn register(&mut self, form: RegistrationForm) -> Result<&SessionUser, AuthError> {
        if !form.is_complete() {
            return Err(AuthError::IncompleteForm);
        }

        let mut users = self.users()?;
        if users.iter().any(|user| user.login == form.login) {
            return Err(AuthError::LoginTaken);
        }

        let user = LocalUser {
            login: form.login,
            name: form.name,
            password: form.password,
        };
        let session = SessionUser::from(&user);
        users.push(user);
        set_json(&mut self.store, USERS_KEY, &users)?;

        debug!(login = %session.login, "Registered");
        self.set_session(session)
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.store.clear(SESSION_KEY)?;
        self.user = None;
        Ok(())
    }

    fn set_session(&mut self, session: SessionUser) -> Result<&SessionUser, AuthError> {
        set_json(&mut self.store, SESSION_KEY, &session)?;
        Ok(self.user.insert(session))
    }
}
