//! Étiquettes de réservation.
//!
//! Les descripteurs remontés par le PMS sont des chaînes libres, parfois
//! composées ("Departed / Arrival"). Elles sont analysées UNE fois ici par
//! inclusion de sous-chaîne ; le moteur de règles ne travaille ensuite que
//! sur cet ensemble structuré.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Etiquettes {
    pub stayover: bool,
    pub inhouse: bool,
    pub arrived: bool,
    pub departed: bool,
    pub departure: bool,
    pub arrival: bool,
    pub not_reserved: bool,
    pub due_out: bool,
}

impl Etiquettes {
    /// Analyse un descripteur. L'inclusion de sous-chaîne est volontaire :
    /// "Departed / Arrival" doit lever à la fois `departed` et `arrival`.
    /// "Arrived" et "Arrival" sont des mots distincts, aucun ne contient
    /// l'autre.
    pub fn depuis_texte(texte: &str) -> Etiquettes {
        Etiquettes {
            stayover: texte.contains("Stayover"),
            inhouse: texte.contains("Inhouse"),
            arrived: texte.contains("Arrived"),
            departed: texte.contains("Departed"),
            departure: texte.contains("Departure"),
            arrival: texte.contains("Arrival"),
            not_reserved: texte.contains("Not Reserved"),
            due_out: texte.contains("Due out"),
        }
    }

    pub fn est_vide(&self) -> bool {
        *self == Etiquettes::default()
    }
}
