//! Réception des lots scrapés : normalisation, persistance, accumulation.

use chrono::Utc;
use serde::Serialize;

use crate::analyzer::accumulation::fusionner_lot;
use crate::commands::consolidation::consolider_donnees;
use crate::config::get_config_from_db;
use crate::db::store::{
    ecrire_slot, lire_slot, SLOT_CHAMBRES, SLOT_MAJ_CHAMBRES, SLOT_MAJ_TICKETS, SLOT_TICKETS,
    SLOT_TICKETS_FORMATES,
};
use crate::error::AppError;
use crate::export::rapport_tickets::formater_tickets;
use crate::parser::types::{
    LotChambres, LotChambresScrape, LotTickets, LotTicketsScrape, ParseWarning,
};
use crate::parser::{normaliser_lot_chambres, normaliser_lot_tickets};
use crate::roster;
use crate::state::{AppState, DbAccess};

#[derive(Debug, Serialize)]
pub struct ResultatImportTickets {
    pub total: usize,
    pub ignorees: usize,
    pub warnings: Vec<ParseWarning>,
    pub texte_formate: String,
}

#[derive(Debug, Serialize)]
pub struct ResultatImportChambres {
    /// Chambres accumulées après fusion de ce lot.
    pub total: usize,
    /// Chambres réellement ajoutées par ce lot.
    pub nouvelles: usize,
    pub ignorees: usize,
    pub warnings: Vec<ParseWarning>,
    pub manquantes: Vec<u32>,
    pub complet: bool,
    pub pourcentage: u32,
    /// Vraie si ce lot a déclenché la consolidation automatique.
    pub consolidation_declenchee: bool,
}

/// Importe un lot de tickets Dmbook : remplace le lot précédent en bloc,
/// régénère le rapport formaté.
pub fn importer_tickets(
    state: &AppState,
    lot: LotTicketsScrape,
) -> Result<ResultatImportTickets, AppError> {
    state.db(|conn| {
        let config = get_config_from_db(conn)?;
        let sortie = normaliser_lot_tickets(&lot, &config);

        let horodatage = lot
            .timestamp
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339());

        let persiste = LotTickets {
            total: sortie.tickets.len(),
            tickets: sortie.tickets,
            timestamp: horodatage.clone(),
            source: lot.source.clone().unwrap_or_else(|| "dmbook".to_string()),
        };
        ecrire_slot(conn, SLOT_TICKETS, &persiste)?;
        ecrire_slot(conn, SLOT_MAJ_TICKETS, &horodatage)?;

        let texte = formater_tickets(&persiste.tickets, &config);
        ecrire_slot(conn, SLOT_TICKETS_FORMATES, &texte)?;

        log::info!(
            "lot de tickets importé: {} conservés, {} ignorés",
            persiste.total,
            sortie.ignorees
        );

        Ok(ResultatImportTickets {
            total: persiste.total,
            ignorees: sortie.ignorees,
            warnings: sortie.warnings,
            texte_formate: texte,
        })
    })
}

/// Importe une page de chambres StayNTouch et la fusionne dans l'état cumulé.
/// Quand le roster passe de incomplet à complet et que des tickets sont déjà
/// en base, la consolidation se déclenche d'elle-même.
pub fn importer_lot_chambres(
    state: &AppState,
    lot: LotChambresScrape,
) -> Result<ResultatImportChambres, AppError> {
    let (resultat, declencher) = state.db(|conn| {
        let config = get_config_from_db(conn)?;
        let sortie = normaliser_lot_chambres(&lot);

        let precedent: Option<LotChambres> = lire_slot(conn, SLOT_CHAMBRES)?;
        let deja_complet = precedent.as_ref().map(|l| l.complete).unwrap_or(false);
        let existantes = precedent.map(|l| l.chambres).unwrap_or_default();

        let fusion = fusionner_lot(existantes, sortie.chambres);

        let horodatage = lot
            .timestamp
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339());

        let persiste = LotChambres {
            total: fusion.chambres.len(),
            new_count: fusion.nouvelles_count,
            missing: fusion.manquantes.clone(),
            complete: fusion.complet,
            percentage: fusion.pourcentage,
            chambres: fusion.chambres,
            timestamp: horodatage.clone(),
            source: lot
                .source
                .clone()
                .unwrap_or_else(|| "stayntouch".to_string()),
        };
        ecrire_slot(conn, SLOT_CHAMBRES, &persiste)?;
        ecrire_slot(conn, SLOT_MAJ_CHAMBRES, &horodatage)?;

        log::info!(
            "lot de chambres importé: {}/{} ({} nouvelles, {}%)",
            persiste.total,
            roster::TOTAL_CHAMBRES,
            persiste.new_count,
            persiste.percentage
        );

        // déclenchement sur la TRANSITION vers complet, pas à chaque page
        let tickets_presents: bool =
            lire_slot::<LotTickets>(conn, SLOT_TICKETS)?.is_some();
        let declencher =
            config.consolidation_auto && fusion.complet && !deja_complet && tickets_presents;

        Ok((
            ResultatImportChambres {
                total: persiste.total,
                nouvelles: persiste.new_count,
                ignorees: sortie.ignorees,
                warnings: sortie.warnings,
                manquantes: persiste.missing,
                complet: persiste.complete,
                pourcentage: persiste.percentage,
                consolidation_declenchee: false,
            },
            declencher,
        ))
    })?;

    let mut resultat = resultat;
    if declencher {
        log::info!("roster complet, consolidation automatique");
        consolider_donnees(state)?;
        resultat.consolidation_declenchee = true;
    }

    Ok(resultat)
}
