//! Consolidation finale : jointure tickets ↔ chambres, priorités, statistiques,
//! enrichissement du rapport de tickets.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::Utc;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::analyzer::statut::calculer_statut_detaille;
use crate::parser::types::{Chambre, Priorite, Proprete, Ticket, TicketResume};

/// Ligne de ticket formatée : "#205 Description du ticket".
static RE_LIGNE_TICKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d{3})\s+(.+?)(\n|$)").expect("regex ligne ticket"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistiques {
    pub total_chambres: usize,
    pub chambres_avec_tickets: usize,
    pub tickets_total: usize,
    pub priorite_haute: usize,
    pub priorite_moyenne: usize,
    pub priorite_basse: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonneesConsolidees {
    pub chambres: Vec<Chambre>,
    /// Tickets sans numéro de chambre : conservés, jamais perdus.
    pub tickets_sans_chambre: Vec<Ticket>,
    pub statistiques: Statistiques,
    pub timestamp: String,
}

/// Joint les tickets aux chambres et calcule la priorité simple par chambre :
/// DIRTY ⇒ HAUTE ; sinon un ticket HAUTE ⇒ HAUTE ; sinon un ticket ⇒ MOYENNE ;
/// sinon BASSE. (Le moteur de statuts la remplace ensuite dans le pipeline
/// complet, mais cette version reste appelable seule.)
pub fn consolider(chambres: Vec<Chambre>, tickets: &[Ticket]) -> DonneesConsolidees {
    let mut chambres = chambres;

    for chambre in &mut chambres {
        let associes: Vec<&Ticket> = tickets
            .iter()
            .filter(|t| t.numero_chambre == Some(chambre.numero))
            .collect();

        let priorite = if chambre.statut_proprete == Proprete::Dirty {
            Priorite::Haute
        } else if associes.iter().any(|t| t.priorite == Priorite::Haute) {
            Priorite::Haute
        } else if !associes.is_empty() {
            Priorite::Moyenne
        } else {
            Priorite::Basse
        };

        chambre.tickets = associes.iter().map(|t| TicketResume::depuis_ticket(t)).collect();
        chambre.nb_tickets = chambre.tickets.len();
        chambre.priority = Some(priorite);
    }

    let tickets_sans_chambre: Vec<Ticket> = tickets
        .iter()
        .filter(|t| t.numero_chambre.is_none())
        .cloned()
        .collect();

    let statistiques = Statistiques {
        total_chambres: chambres.len(),
        chambres_avec_tickets: chambres.iter().filter(|c| c.nb_tickets > 0).count(),
        tickets_total: tickets.len(),
        priorite_haute: compter(&chambres, Priorite::Haute),
        priorite_moyenne: compter(&chambres, Priorite::Moyenne),
        priorite_basse: compter(&chambres, Priorite::Basse),
    };

    DonneesConsolidees {
        chambres,
        tickets_sans_chambre,
        statistiques,
        timestamp: Utc::now().to_rfc3339(),
    }
}

fn compter(chambres: &[Chambre], priorite: Priorite) -> usize {
    chambres
        .iter()
        .filter(|c| c.priority == Some(priorite))
        .count()
}

/// Passe le moteur de statuts sur chaque chambre consolidée. La priorité
/// détaillée (escalades comprises) remplace alors la priorité simple.
pub fn appliquer_statuts(donnees: &mut DonneesConsolidees) {
    for chambre in &mut donnees.chambres {
        let details = calculer_statut_detaille(chambre);
        chambre.statut_auto = Some(details.statut.clone());
        chambre.statut_details = Some(details);
    }
}

/// Carte numéro de chambre → statut symbolique, pour l'enrichissement.
pub fn carte_statuts(chambres: &[Chambre]) -> HashMap<u32, String> {
    chambres
        .iter()
        .filter_map(|c| c.statut_auto.clone().map(|s| (c.numero, s)))
        .collect()
}

/// Ajoute le statut symbolique en fin de chaque ligne "#XXX description" du
/// texte formaté. Réécriture textuelle, pas un nouveau rendu : la description
/// d'origine est préservée à l'identique, seul un suffixe est ajouté. Les
/// lignes de chambres sans statut calculé restent inchangées.
pub fn enrichir_texte_tickets(texte: &str, statuts: &HashMap<u32, String>) -> String {
    RE_LIGNE_TICKET
        .replace_all(texte, |caps: &Captures| {
            let numero: u32 = caps[1].parse().unwrap_or(0);
            match statuts.get(&numero).filter(|s| !s.is_empty()) {
                Some(statut) => format!(
                    "#{} {} {}{}",
                    &caps[1],
                    caps[2].trim(),
                    statut,
                    &caps[3]
                ),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
