//! Export CSV des chambres consolidées.
//!
//! Format figé : tous les champs entre guillemets sauf le compte de tickets,
//! qui reste numérique.

use crate::parser::types::{Chambre, Priorite};

pub const ENTETE_CSV: &str =
    "Chambre,Statut_Proprete,Type,Statut_Auto,Reservation,Tickets,Priorite";

pub fn generer_csv(chambres: &[Chambre]) -> String {
    let mut csv = String::from(ENTETE_CSV);
    csv.push('\n');

    for chambre in chambres {
        let priorite = chambre
            .statut_details
            .as_ref()
            .map(|d| d.priorite)
            .or(chambre.priority)
            .unwrap_or(Priorite::Basse);

        csv.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",{},\"{}\"\n",
            chambre.numero,
            chambre.statut_proprete,
            chambre.type_chambre.as_deref().unwrap_or("N/A"),
            chambre.statut_auto.as_deref().unwrap_or(""),
            chambre.statut_reservation.as_deref().unwrap_or("N/A"),
            chambre.nb_tickets,
            priorite,
        ));
    }

    csv
}
