//! Exports fichier : CSV des chambres, rapport texte des tickets.

use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use crate::analyzer::consolidation::DonneesConsolidees;
use crate::db::store::{
    lire_slot, SLOT_CHAMBRES, SLOT_CONSOLIDE, SLOT_TICKETS_ENRICHIS, SLOT_TICKETS_FORMATES,
};
use crate::error::AppError;
use crate::export::csv_chambres::generer_csv;
use crate::parser::types::LotChambres;
use crate::state::{AppState, DbAccess};

#[derive(Debug, Serialize)]
pub struct ExportResult {
    pub path: String,
    pub size_bytes: u64,
    pub duration_ms: u128,
}

/// Exporte les chambres en CSV. Les données consolidées priment ; à défaut,
/// les chambres accumulées brutes sont exportées sans statut calculé.
pub fn exporter_csv(state: &AppState, chemin: &Path) -> Result<ExportResult, AppError> {
    let depart = Instant::now();

    let csv = state.db(|conn| {
        if let Some(donnees) = lire_slot::<DonneesConsolidees>(conn, SLOT_CONSOLIDE)? {
            return Ok(generer_csv(&donnees.chambres));
        }
        if let Some(lot) = lire_slot::<LotChambres>(conn, SLOT_CHAMBRES)? {
            return Ok(generer_csv(&lot.chambres));
        }
        Err(AppError::DonneesManquantes(
            "Aucune donnée de chambres à exporter.".to_string(),
        ))
    })?;

    fs::write(chemin, &csv)?;
    log::info!("export CSV: {} octets vers {}", csv.len(), chemin.display());

    Ok(ExportResult {
        path: chemin.display().to_string(),
        size_bytes: csv.len() as u64,
        duration_ms: depart.elapsed().as_millis(),
    })
}

/// Exporte le rapport texte des tickets. La version enrichie (statuts en
/// suffixe) prime sur la version formatée brute.
pub fn exporter_tickets_txt(state: &AppState, chemin: &Path) -> Result<ExportResult, AppError> {
    let depart = Instant::now();

    let texte = state.db(|conn| {
        if let Some(texte) = lire_slot::<String>(conn, SLOT_TICKETS_ENRICHIS)? {
            return Ok(texte);
        }
        if let Some(texte) = lire_slot::<String>(conn, SLOT_TICKETS_FORMATES)? {
            return Ok(texte);
        }
        Err(AppError::DonneesManquantes(
            "Aucun rapport de tickets à exporter.".to_string(),
        ))
    })?;

    fs::write(chemin, &texte)?;
    log::info!(
        "export tickets: {} octets vers {}",
        texte.len(),
        chemin.display()
    );

    Ok(ExportResult {
        path: chemin.display().to_string(),
        size_bytes: texte.len() as u64,
        duration_ms: depart.elapsed().as_millis(),
    })
}
