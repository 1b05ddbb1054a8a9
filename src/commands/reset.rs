//! Remise à zéro de toutes les données scrapées. La configuration survit.

use crate::db::store::{supprimer_slots, TOUS_LES_SLOTS};
use crate::error::AppError;
use crate::state::{AppState, DbAccess};

pub fn reinitialiser(state: &AppState) -> Result<usize, AppError> {
    state.db(|conn| {
        let supprimes = supprimer_slots(conn, TOUS_LES_SLOTS)?;
        log::info!("réinitialisation: {} slot(s) supprimé(s)", supprimes);
        Ok(supprimes)
    })
}
