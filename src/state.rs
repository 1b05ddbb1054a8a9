use rusqlite::Connection;
use std::sync::Mutex;

use crate::error::AppError;

pub struct AppState {
    pub db: Mutex<Option<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        AppState {
            db: Mutex::new(Some(conn)),
        }
    }
}

pub trait DbAccess {
    fn db<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, AppError>;
}

impl DbAccess for AppState {
    fn db<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, AppError>,
    {
        let guard = self
            .db
            .lock()
            .map_err(|e| AppError::Custom(format!("Mutex poisoned: {}", e)))?;
        let conn = guard
            .as_ref()
            .ok_or_else(|| AppError::Custom("Base de données non initialisée".into()))?;
        f(conn)
    }
}
