//! Ouverture de la base et réglages de connexion.

use std::path::Path;

use rusqlite::Connection;

use crate::db::migrations::run_migrations;
use crate::error::AppError;

/// Ouvre (ou crée) la base sur disque et amène le schéma à jour.
pub fn init_db(chemin: &Path) -> Result<Connection, AppError> {
    let mut conn = Connection::open(chemin)?;
    appliquer_pragmas(&conn)?;
    run_migrations(&mut conn)?;
    Ok(conn)
}

/// Base en mémoire, pour les tests.
pub fn init_db_en_memoire() -> Result<Connection, AppError> {
    let mut conn = Connection::open_in_memory()?;
    run_migrations(&mut conn)?;
    Ok(conn)
}

fn appliquer_pragmas(conn: &Connection) -> Result<(), AppError> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}
