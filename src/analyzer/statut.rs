//! Moteur de statuts automatiques des chambres.
//!
//! Liste de règles ordonnée, première correspondance gagnante — ce n'est pas
//! une machine à états exhaustive. L'ordre encode la précédence des statuts
//! qui se recouvrent : le réordonner change le comportement.

use crate::parser::types::{Chambre, Priorite, Proprete, StatutDetaille};

/// Statut symbolique d'occupation, avec ses annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatutAuto {
    /// Chambre hors service (OOO).
    Bloquee {
        jusqua: Option<String>,
        motif: Option<String>,
    },
    /// Arrivée et départ le même jour.
    DayUse {
        check_in: Option<String>,
        check_out: Option<String>,
    },
    /// Client en séjour, pas de départ aujourd'hui.
    Recouche,
    /// Client déjà arrivé, en chambre.
    Arrivee,
    /// Client parti, nouveau client attendu.
    RotationPrevue { check_in: Option<String> },
    /// Départ du jour, chambre disponible ensuite.
    DepartJour { check_out: Option<String> },
    /// Arrivée attendue, chambre encore libre.
    ArriveePrevue { check_in: Option<String> },
    /// Client parti, aucune arrivée attendue.
    Depart { check_out: Option<String> },
    /// Chambre vide et disponible.
    Disponible,
    /// Aucune règle ne correspond — anomalie à vérifier, jamais masquée.
    Inconnu,
}

impl StatutAuto {
    /// Forme symbolique courte, celle qui finit dans le CSV et les rapports.
    pub fn libelle(&self) -> String {
        match self {
            StatutAuto::Bloquee { jusqua, .. } => match jusqua {
                Some(date) => format!("(ooo) {}", date),
                None => "(ooo)".to_string(),
            },
            StatutAuto::DayUse {
                check_in,
                check_out,
            } => match (check_in, check_out) {
                (Some(entree), Some(sortie)) => format!("(day use) {} - {}", entree, sortie),
                (Some(entree), None) => format!("(day use) {}", entree),
                (None, Some(sortie)) => format!("(day use) {}", sortie),
                (None, None) => "(day use)".to_string(),
            },
            StatutAuto::Recouche => "(o)".to_string(),
            StatutAuto::Arrivee => "(in)".to_string(),
            StatutAuto::RotationPrevue { check_in } => avec_heure("(out/inc)", check_in),
            StatutAuto::DepartJour { check_out } => avec_heure("(in/dispo)", check_out),
            StatutAuto::ArriveePrevue { check_in } => avec_heure("(inc)", check_in),
            StatutAuto::Depart { check_out } => avec_heure("(out)", check_out),
            StatutAuto::Disponible => "(dispo)".to_string(),
            StatutAuto::Inconnu => "(inconnu)".to_string(),
        }
    }

    /// Priorité de base du statut, avant escalades.
    pub fn priorite_base(&self) -> Priorite {
        match self {
            StatutAuto::Bloquee { .. } => Priorite::Bloquee,
            StatutAuto::DayUse { .. } => Priorite::Haute,
            StatutAuto::RotationPrevue { .. } => Priorite::Haute,
            StatutAuto::Arrivee => Priorite::Moyenne,
            StatutAuto::DepartJour { .. } => Priorite::Moyenne,
            StatutAuto::ArriveePrevue { .. } => Priorite::Moyenne,
            StatutAuto::Depart { .. } => Priorite::Moyenne,
            StatutAuto::Recouche => Priorite::Basse,
            StatutAuto::Disponible => Priorite::Basse,
            StatutAuto::Inconnu => Priorite::Basse,
        }
    }

    pub fn description(&self) -> String {
        match self {
            StatutAuto::Bloquee { motif, .. } => match motif {
                Some(motif) => format!("Chambre hors service - {}", motif),
                None => "Chambre hors service".to_string(),
            },
            StatutAuto::DayUse { .. } => "Day use - Arrivée et départ le jour même".to_string(),
            StatutAuto::Recouche => "Client en séjour - Recouche".to_string(),
            StatutAuto::Arrivee => "Client arrivé - Chambre occupée".to_string(),
            StatutAuto::RotationPrevue { .. } => {
                "Rotation de client - Nettoyage urgent requis".to_string()
            }
            StatutAuto::DepartJour { .. } => "Départ prévu - Disponible après".to_string(),
            StatutAuto::ArriveePrevue { .. } => "Nouvelle arrivée prévue".to_string(),
            StatutAuto::Depart { .. } => "Client parti - Nettoyage requis".to_string(),
            StatutAuto::Disponible => "Chambre disponible".to_string(),
            StatutAuto::Inconnu => {
                "Statut non déterminé - À vérifier manuellement".to_string()
            }
        }
    }

    pub fn est_inconnu(&self) -> bool {
        matches!(self, StatutAuto::Inconnu)
    }
}

impl std::fmt::Display for StatutAuto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.libelle())
    }
}

fn avec_heure(base: &str, heure: &Option<String>) -> String {
    match heure {
        Some(heure) => format!("{} {}", base, heure),
        None => base.to_string(),
    }
}

/// Calcule le statut d'occupation d'une chambre.
///
/// Ne lève jamais d'erreur : un enregistrement incohérent tombe sur la
/// sentinelle `Inconnu`, visible en sortie, pour ne pas interrompre le
/// traitement d'un lot entier.
pub fn calculer_statut(chambre: &Chambre) -> StatutAuto {
    let cur = &chambre.etiquettes_current;
    let next = &chambre.etiquettes_next;

    // RÈGLE 1 : hors service
    if chambre.is_ooo {
        return StatutAuto::Bloquee {
            jusqua: chambre.ooo_until.clone(),
            motif: chambre.ooo_reason.clone(),
        };
    }

    // RÈGLE 2 : day use — flag explicite, ou descripteur composé
    // "Departed / Arrival" sur le séjour courant
    if chambre.is_day_use || (cur.departed && cur.arrival) {
        return StatutAuto::DayUse {
            check_in: chambre.check_in_time.clone(),
            check_out: chambre.check_out_time.clone(),
        };
    }

    // RÈGLE 3 : recouche — client en séjour, toujours là demain
    if chambre.is_stayover
        || (cur.stayover && next.stayover)
        || (cur.inhouse && next.stayover)
    {
        return StatutAuto::Recouche;
    }

    // RÈGLE 4 : client déjà arrivé (sans départ planifié dans le descripteur)
    if cur.arrived && !cur.departure {
        return StatutAuto::Arrivee;
    }

    // RÈGLE 5 : rotation prévue — parti, nouveau client pas encore arrivé
    if cur.departed && !cur.arrival && next.arrival {
        return StatutAuto::RotationPrevue {
            check_in: chambre.check_in_time.clone(),
        };
    }

    // RÈGLE 6 : départ du jour des deux côtés
    if cur.due_out && next.due_out {
        return StatutAuto::DepartJour {
            check_out: chambre.check_out_time.clone(),
        };
    }

    // RÈGLE 7 : arrivée attendue, chambre encore libre
    if (cur.arrival || cur.not_reserved || chambre.vacant) && next.arrival {
        return StatutAuto::ArriveePrevue {
            check_in: chambre.check_in_time.clone(),
        };
    }

    // RÈGLE 8 : parti, aucune arrivée attendue
    if cur.departed && !cur.arrival && (next.not_reserved || next.departed) {
        return StatutAuto::Depart {
            check_out: chambre.check_out_time.clone(),
        };
    }

    // RÈGLE 9 : vide et disponible
    if (chambre.vacant && next.not_reserved) || (cur.not_reserved && next.not_reserved) {
        return StatutAuto::Disponible;
    }

    // RÈGLE 10 : anomalie — signalée, jamais silencieuse
    log::warn!(
        "Chambre {}: aucun statut reconnu (current={:?}, next={:?}, vacant={})",
        chambre.numero,
        chambre.current_status,
        chambre.next_status,
        chambre.vacant
    );
    StatutAuto::Inconnu
}

/// Statut + priorité + description, escalades comprises.
///
/// Les deux escalades sont monotones : une chambre DIRTY monte d'un cran,
/// des tickets joints garantissent au moins MOYENNE (HAUTE si l'un d'eux
/// est HAUTE). Jamais de rétrogradation.
pub fn calculer_statut_detaille(chambre: &Chambre) -> StatutDetaille {
    let statut = calculer_statut(chambre);
    let mut priorite = statut.priorite_base();

    if chambre.statut_proprete == Proprete::Dirty {
        priorite = priorite.escalader();
    }

    if !chambre.tickets.is_empty() {
        priorite = priorite.max(Priorite::Moyenne);
        if chambre.tickets.iter().any(|t| t.priorite == Priorite::Haute) {
            priorite = priorite.max(Priorite::Haute);
        }
    }

    StatutDetaille {
        statut: statut.libelle(),
        priorite,
        description: statut.description(),
    }
}
