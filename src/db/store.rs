//! Magasin clé/valeur des lots scrapés. Chaque slot porte un document JSON
//! complet, remplacé en bloc à chaque écriture.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppError;

pub const SLOT_CHAMBRES: &str = "chambres_data";
pub const SLOT_TICKETS: &str = "tickets_data";
pub const SLOT_TICKETS_FORMATES: &str = "tickets_formatted";
pub const SLOT_CONSOLIDE: &str = "consolidated_data";
pub const SLOT_TICKETS_ENRICHIS: &str = "tickets_enriched";
pub const SLOT_MAJ: &str = "last_update";
pub const SLOT_MAJ_CHAMBRES: &str = "last_update_rooms";
pub const SLOT_MAJ_TICKETS: &str = "last_update_tickets";

/// Tous les slots, dans l'ordre de remise à zéro.
pub const TOUS_LES_SLOTS: &[&str] = &[
    SLOT_CHAMBRES,
    SLOT_TICKETS,
    SLOT_TICKETS_FORMATES,
    SLOT_CONSOLIDE,
    SLOT_TICKETS_ENRICHIS,
    SLOT_MAJ,
    SLOT_MAJ_CHAMBRES,
    SLOT_MAJ_TICKETS,
];

pub fn lire_slot<T: DeserializeOwned>(
    conn: &Connection,
    cle: &str,
) -> Result<Option<T>, AppError> {
    let valeur: Option<String> = conn
        .query_row("SELECT valeur FROM slots WHERE cle = ?1", [cle], |row| {
            row.get(0)
        })
        .optional()?;

    match valeur {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub fn ecrire_slot<T: Serialize>(
    conn: &Connection,
    cle: &str,
    valeur: &T,
) -> Result<(), AppError> {
    let json = serde_json::to_string(valeur)?;
    conn.execute(
        "INSERT OR REPLACE INTO slots (cle, valeur, maj_le) VALUES (?1, ?2, datetime('now'))",
        params![cle, json],
    )?;
    Ok(())
}

pub fn supprimer_slots(conn: &Connection, cles: &[&str]) -> Result<usize, AppError> {
    let mut supprimes = 0;
    for cle in cles {
        supprimes += conn.execute("DELETE FROM slots WHERE cle = ?1", [cle])?;
    }
    Ok(supprimes)
}
