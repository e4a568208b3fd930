//! Session store accessor over client storage.
//!
//! The session lives in three independent storage keys. It is only valid when
//! all three are present and `currentUser` decodes; a decode failure wipes every
//! session key so the corrupted payload is never read twice.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::role::Role;
use crate::storage::{ClientStorage, StorageError};

pub const IS_AUTHENTICATED_KEY: &str = "isAuthenticated";
pub const TOKEN_KEY: &str = "token";
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Written at login by older front-ends; cleared with the session but never read.
pub const LEGACY_ROLE_KEY: &str = "userRole";

pub const SESSION_KEYS: [&str; 4] = [
    IS_AUTHENTICATED_KEY,
    TOKEN_KEY,
    CURRENT_USER_KEY,
    LEGACY_ROLE_KEY,
];

/// Minimal identity record stored under `currentUser`.
///
/// The role is kept as the raw stored string so unrecognised values survive;
/// every other field is opaque to the access layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl User {
    pub fn new(role: Role) -> Self {
        Self {
            role: Some(role.as_str().to_owned()),
            profile: Map::new(),
        }
    }

    /// Adds an opaque profile field. A `role` key replaces the role itself,
    /// keeping it out of the flattened map; non-string values clear it.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "role" {
            self.role = match value {
                Value::String(role) => Some(role),
                _ => None,
            };
        } else {
            self.profile.insert(key, value);
        }
        self
    }

    /// The user's role, if present and recognised.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|raw| raw.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub authenticated: bool,
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            authenticated: true,
            token: token.into(),
            user,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session key `{0}` is missing")]
    Missing(&'static str),
    #[error("stored user record is corrupted: {0}")]
    Corrupted(#[source] serde_json::Error),
}

/// Read/clear access to the current session.
pub trait SessionProvider: Send + Sync {
    fn read(&self) -> Result<Session, SessionError>;
    fn clear(&self) -> Result<(), StorageError>;
}

impl<T: SessionProvider + ?Sized> SessionProvider for std::sync::Arc<T> {
    fn read(&self) -> Result<Session, SessionError> {
        (**self).read()
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// Session provider backed by a [`ClientStorage`].
#[derive(Debug)]
pub struct StoredSession<S> {
    storage: S,
}

impl<S: ClientStorage> StoredSession<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persists a freshly issued session (login).
    pub fn store(&self, session: &Session) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&session.user)?;
        let authenticated = if session.authenticated { "true" } else { "false" };

        self.storage.set_item(IS_AUTHENTICATED_KEY, authenticated)?;
        self.storage.set_item(TOKEN_KEY, &session.token)?;
        self.storage.set_item(CURRENT_USER_KEY, &encoded)?;
        match session.user.role.as_deref() {
            Some(role) => self.storage.set_item(LEGACY_ROLE_KEY, role)?,
            None => self.storage.remove_item(LEGACY_ROLE_KEY)?,
        }

        debug!(role = ?session.user.role, "session stored");
        Ok(())
    }

    fn required(&self, key: &'static str) -> Result<String, SessionError> {
        self.storage
            .get_item(key)
            .filter(|value| !value.is_empty())
            .ok_or(SessionError::Missing(key))
    }
}

impl<S: ClientStorage> SessionProvider for StoredSession<S> {
    fn read(&self) -> Result<Session, SessionError> {
        let authenticated = self.required(IS_AUTHENTICATED_KEY)?;
        let token = self.required(TOKEN_KEY)?;
        let raw_user = self.required(CURRENT_USER_KEY)?;

        let user = match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => user,
            Err(source) => {
                warn!(error = %source, "discarding corrupted session");
                if let Err(clear_error) = self.clear() {
                    error!(error = %clear_error, "failed to clear corrupted session");
                }
                return Err(SessionError::Corrupted(source));
            }
        };

        Ok(Session {
            authenticated: authenticated == "true",
            token,
            user,
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        for key in SESSION_KEYS {
            self.storage.remove_item(key)?;
        }
        debug!("session cleared");
        Ok(())
    }
}
