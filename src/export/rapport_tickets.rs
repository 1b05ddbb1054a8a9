//! Rapport texte des tickets de maintenance, groupés par niveau.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;

use crate::config::AppConfig;
use crate::parser::types::Ticket;
use crate::roster::{niveau_chambre, NIVEAUX};

/// Numéro de chambre en tête de contenu : "#205 desc" ou "205 desc".
static RE_TETE_CHAMBRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?(\d{3})\s+(.+)").expect("regex tête de contenu"));

struct LigneTicket {
    numero: u32,
    description: String,
}

/// Rend le rapport canonique des tickets, daté du jour.
pub fn formater_tickets(tickets: &[Ticket], config: &AppConfig) -> String {
    formater_tickets_date(tickets, config, Local::now().date_naive())
}

/// Variante à date explicite, pour les tests.
pub fn formater_tickets_date(tickets: &[Ticket], config: &AppConfig, date: NaiveDate) -> String {
    let mut par_niveau: BTreeMap<u32, Vec<LigneTicket>> = BTreeMap::new();
    let mut divers: Vec<String> = Vec::new();

    for ticket in tickets {
        match RE_TETE_CHAMBRE.captures(&ticket.contenu) {
            Some(caps) => {
                let numero: u32 = caps[1].parse().unwrap_or(0);
                // la description s'arrête à la première ligne du contenu
                let description = premiere_ligne(&caps[2]);
                let niveau = niveau_chambre(numero);
                if NIVEAUX.contains(&niveau) {
                    par_niveau
                        .entry(niveau)
                        .or_default()
                        .push(LigneTicket { numero, description });
                } else {
                    divers.push(description);
                }
            }
            None => {
                // pas de numéro détecté → DIVERS, sauf contenu trop court
                // (le ticket reste compté dans le total brut)
                let description = premiere_ligne(&ticket.contenu);
                if description.chars().count() > config.longueur_min_divers {
                    divers.push(description);
                }
            }
        }
    }

    for lignes in par_niveau.values_mut() {
        lignes.sort_by_key(|l| l.numero);
    }

    let mut sortie = format!(
        "LISTE DES TICKETS DE MAINTENANCE\nDate : {}\n\n",
        date.format("%d/%m/%Y")
    );

    let mut a_des_tickets = false;
    for niveau in NIVEAUX {
        if let Some(lignes) = par_niveau.get(&niveau) {
            if lignes.is_empty() {
                continue;
            }
            if a_des_tickets {
                sortie.push_str("----------\n\n");
            }
            for ligne in lignes {
                sortie.push_str(&format!("#{} {}\n\n", ligne.numero, ligne.description));
            }
            a_des_tickets = true;
        }
    }

    if !divers.is_empty() {
        if a_des_tickets {
            sortie.push_str("----------\n\n");
        }
        sortie.push_str("DIVERS\n\n");
        for description in &divers {
            sortie.push_str(&format!("{}\n\n", description));
        }
        if a_des_tickets {
            sortie.push_str("----------\n\n");
        }
    }

    // total BRUT : les tickets sans numéro ou écartés du rendu restent réels
    sortie.push_str(&format!("Total de tickets : {}", tickets.len()));

    sortie
}

fn premiere_ligne(texte: &str) -> String {
    texte
        .split(['\n', '\r'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}
