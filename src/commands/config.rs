//! Lecture et mise à jour des paramètres persistés.

use crate::config::{get_config_from_db, update_config_in_db, AppConfig};
use crate::error::AppError;
use crate::state::{AppState, DbAccess};

pub fn lire_config(state: &AppState) -> Result<AppConfig, AppError> {
    state.db(|conn| Ok(get_config_from_db(conn)?))
}

pub fn maj_config(state: &AppState, config: AppConfig) -> Result<AppConfig, AppError> {
    state.db(|conn| {
        update_config_in_db(conn, &config)?;
        log::info!("configuration mise à jour");
        Ok(config)
    })
}
