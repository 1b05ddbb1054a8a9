use serde::{Deserialize, Serialize};

use crate::parser::deserializers::opt_chaine_ou_nombre;
use crate::parser::etiquettes::Etiquettes;

/// Statut de propreté remonté par le PMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Proprete {
    #[serde(rename = "CLEAN")]
    Clean,
    #[serde(rename = "DIRTY")]
    Dirty,
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl std::fmt::Display for Proprete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Proprete::Clean => "CLEAN",
            Proprete::Dirty => "DIRTY",
            Proprete::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Priorité de traitement. L'ordre des variantes définit le rang :
/// BASSE < MOYENNE < HAUTE < BLOQUEE. Les escalades utilisent `max` et ne
/// redescendent jamais.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Priorite {
    #[default]
    #[serde(rename = "BASSE")]
    Basse,
    #[serde(rename = "MOYENNE")]
    Moyenne,
    #[serde(rename = "HAUTE")]
    Haute,
    #[serde(rename = "BLOQUEE")]
    Bloquee,
}

impl Priorite {
    /// Escalade d'un cran : BASSE → MOYENNE → HAUTE. HAUTE et BLOQUEE
    /// restent en place.
    pub fn escalader(self) -> Priorite {
        match self {
            Priorite::Basse => Priorite::Moyenne,
            Priorite::Moyenne => Priorite::Haute,
            Priorite::Haute => Priorite::Haute,
            Priorite::Bloquee => Priorite::Bloquee,
        }
    }

    pub fn depuis_libelle(libelle: &str) -> Option<Priorite> {
        match libelle.trim().to_uppercase().as_str() {
            "BASSE" => Some(Priorite::Basse),
            "MOYENNE" => Some(Priorite::Moyenne),
            "HAUTE" => Some(Priorite::Haute),
            "BLOQUEE" | "BLOQUÉE" => Some(Priorite::Bloquee),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priorite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priorite::Basse => "BASSE",
            Priorite::Moyenne => "MOYENNE",
            Priorite::Haute => "HAUTE",
            Priorite::Bloquee => "BLOQUEE",
        };
        f.write_str(s)
    }
}

/// Chambre telle que remontée par le scraper StayNTouch — tous les champs
/// sont optionnels, la forme varie d'une version du scraper à l'autre.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChambreRaw {
    #[serde(default, deserialize_with = "opt_chaine_ou_nombre")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_chaine_ou_nombre")]
    pub numero: Option<String>,
    pub statut_proprete: Option<String>,
    #[serde(rename = "type")]
    pub type_chambre: Option<String>,
    pub statut_reservation: Option<String>,
    pub current_status: Option<String>,
    pub next_status: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub vacant: Option<bool>,
    pub is_stayover: Option<bool>,
    pub is_day_use: Option<bool>,
    pub is_ooo: Option<bool>,
    pub ooo_until: Option<String>,
    pub ooo_reason: Option<String>,
}

/// Chambre normalisée. Les étiquettes de réservation sont analysées une seule
/// fois ici, à la frontière ; le moteur de règles ne relit jamais les chaînes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chambre {
    pub numero: u32,
    #[serde(default)]
    pub statut_proprete: Proprete,
    #[serde(default, rename = "type")]
    pub type_chambre: Option<String>,
    #[serde(default)]
    pub statut_reservation: Option<String>,
    #[serde(default)]
    pub current_status: String,
    #[serde(default)]
    pub next_status: String,
    #[serde(default)]
    pub etiquettes_current: Etiquettes,
    #[serde(default)]
    pub etiquettes_next: Etiquettes,
    #[serde(default)]
    pub check_in_time: Option<String>,
    #[serde(default)]
    pub check_out_time: Option<String>,
    #[serde(default)]
    pub vacant: bool,
    #[serde(default)]
    pub is_stayover: bool,
    #[serde(default)]
    pub is_day_use: bool,
    #[serde(default)]
    pub is_ooo: bool,
    #[serde(default)]
    pub ooo_until: Option<String>,
    #[serde(default)]
    pub ooo_reason: Option<String>,

    // Champs dérivés, remplis par la consolidation.
    #[serde(default)]
    pub statut_auto: Option<String>,
    #[serde(default)]
    pub statut_details: Option<StatutDetaille>,
    #[serde(default)]
    pub tickets: Vec<TicketResume>,
    #[serde(default)]
    pub priority: Option<Priorite>,
    #[serde(default)]
    pub nb_tickets: usize,
}

/// Résultat détaillé du moteur de statuts pour une chambre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutDetaille {
    pub statut: String,
    pub priorite: Priorite,
    pub description: String,
}

/// Ticket tel que remonté par le scraper Dmbook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketRaw {
    #[serde(default, deserialize_with = "opt_chaine_ou_nombre")]
    pub id: Option<String>,
    pub numero_ticket: Option<String>,
    #[serde(default, deserialize_with = "opt_chaine_ou_nombre")]
    pub numero_chambre: Option<String>,
    pub contenu: Option<String>,
    pub statut: Option<String>,
    pub auteur: Option<String>,
    pub date_creation: Option<String>,
    pub date_relative: Option<String>,
    pub priorite: Option<String>,
    pub modifie: Option<bool>,
}

/// Ticket de maintenance normalisé.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub numero_ticket: Option<String>,
    /// None = ticket sans chambre identifiable, routé vers DIVERS.
    #[serde(default)]
    pub numero_chambre: Option<u32>,
    pub contenu: String,
    #[serde(default)]
    pub statut: String,
    #[serde(default)]
    pub auteur: Option<String>,
    #[serde(default)]
    pub date_creation: Option<String>,
    #[serde(default)]
    pub date_relative: Option<String>,
    #[serde(default)]
    pub priorite: Priorite,
    #[serde(default)]
    pub modifie: bool,
}

/// Résumé d'un ticket joint à une chambre consolidée.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketResume {
    pub numero: Option<String>,
    pub contenu: String,
    pub statut: String,
    pub date: Option<String>,
    pub priorite: Priorite,
}

impl TicketResume {
    pub fn depuis_ticket(ticket: &Ticket) -> TicketResume {
        TicketResume {
            numero: ticket.numero_ticket.clone(),
            contenu: ticket.contenu.clone(),
            statut: ticket.statut.clone(),
            date: ticket
                .date_relative
                .clone()
                .or_else(|| ticket.date_creation.clone()),
            priorite: ticket.priorite,
        }
    }
}

/// Lot de chambres tel qu'émis par le scraper pour UNE page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LotChambresScrape {
    pub chambres: Vec<ChambreRaw>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Lot de tickets tel qu'émis par le scraper.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LotTicketsScrape {
    pub tickets: Vec<TicketRaw>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// État cumulé des chambres persisté entre deux pages de scraping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotChambres {
    pub chambres: Vec<Chambre>,
    pub timestamp: String,
    pub source: String,
    pub total: usize,
    pub new_count: usize,
    pub missing: Vec<u32>,
    pub complete: bool,
    pub percentage: u32,
}

/// Lot de tickets normalisé persisté.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotTickets {
    pub tickets: Vec<Ticket>,
    pub timestamp: String,
    pub source: String,
    pub total: usize,
}

/// Avertissement non bloquant émis pendant la normalisation d'un lot.
#[derive(Debug, Clone, Serialize)]
pub struct ParseWarning {
    pub index: usize,
    pub message: String,
}
