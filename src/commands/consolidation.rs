//! Consolidation à la demande : jointure, moteur de statuts, enrichissement.

use crate::analyzer::consolidation::{
    appliquer_statuts, carte_statuts, consolider, enrichir_texte_tickets, DonneesConsolidees,
};
use crate::db::store::{
    ecrire_slot, lire_slot, SLOT_CHAMBRES, SLOT_CONSOLIDE, SLOT_MAJ, SLOT_TICKETS,
    SLOT_TICKETS_ENRICHIS, SLOT_TICKETS_FORMATES,
};
use crate::error::AppError;
use crate::parser::types::{LotChambres, LotTickets};
use crate::state::{AppState, DbAccess};

/// Consolide les deux sources en base : chambres + tickets → données jointes,
/// statuts calculés, rapport de tickets enrichi. Échoue si l'une des deux
/// sources manque.
pub fn consolider_donnees(state: &AppState) -> Result<DonneesConsolidees, AppError> {
    state.db(|conn| {
        let chambres: LotChambres = lire_slot(conn, SLOT_CHAMBRES)?.ok_or_else(|| {
            AppError::DonneesManquantes("Aucune donnée de chambres disponible.".to_string())
        })?;
        let tickets: LotTickets = lire_slot(conn, SLOT_TICKETS)?.ok_or_else(|| {
            AppError::DonneesManquantes("Aucune donnée de tickets disponible.".to_string())
        })?;

        let mut donnees = consolider(chambres.chambres, &tickets.tickets);
        appliquer_statuts(&mut donnees);

        ecrire_slot(conn, SLOT_CONSOLIDE, &donnees)?;
        ecrire_slot(conn, SLOT_MAJ, &donnees.timestamp)?;

        // le rapport texte existant reçoit les statuts en suffixe de ligne
        if let Some(texte) = lire_slot::<String>(conn, SLOT_TICKETS_FORMATES)? {
            let statuts = carte_statuts(&donnees.chambres);
            let enrichi = enrichir_texte_tickets(&texte, &statuts);
            ecrire_slot(conn, SLOT_TICKETS_ENRICHIS, &enrichi)?;
        }

        log::info!(
            "consolidation: {} chambres, {} tickets, {} sans chambre",
            donnees.statistiques.total_chambres,
            donnees.statistiques.tickets_total,
            donnees.tickets_sans_chambre.len()
        );

        Ok(donnees)
    })
}
