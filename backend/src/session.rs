//! Session persistence: the bearer token and the logged-in user.
//!
//! The dashboard keeps these two values in a small key-value table so a
//! restart does not force a new login.

use crate::error::StoreError;
use common::model::session::CurrentUser;
use common::requests::SessionView;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const TOKEN_KEY: &str = "token";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// String key-value store.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

pub struct SqliteSessionStore {
    conn: Mutex<Connection>,
}

impl SqliteSessionStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS session (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&conn).map_err(StoreError::from)
    }
}

impl SessionStore for SqliteSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM session WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO session (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map(|_| ())
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM session WHERE key = ?1", params![key])
                .map(|_| ())
        })
    }
}

/// Supplies the bearer token for remote API calls.
pub trait TokenSupplier: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Typed view over the session store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn login(&self, token: &str, user: &CurrentUser) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token)?;
        self.store
            .set(CURRENT_USER_KEY, &serde_json::to_string(user)?)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(CURRENT_USER_KEY)
    }

    pub fn token(&self) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn current_user(&self) -> Result<Option<CurrentUser>, StoreError> {
        match self.store.get(CURRENT_USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn view(&self) -> Result<SessionView, StoreError> {
        let user = self.current_user()?;
        Ok(SessionView {
            authenticated: self.token()?.is_some(),
            can_delete: user.as_ref().is_some_and(CurrentUser::can_delete),
            user,
        })
    }
}

impl TokenSupplier for Session {
    fn bearer_token(&self) -> Option<String> {
        match self.token() {
            Ok(token) => token,
            Err(e) => {
                log::error!("could not read session token: {}", e);
                None
            }
        }
    }
}
