//! Liste de référence des chambres de l'hôtel.
//! Sert uniquement à mesurer la complétude du scraping — jamais modifiée.

use std::collections::BTreeMap;

use serde::Serialize;

/// Les 80 chambres de l'hôtel. Le niveau 600 n'a que 11 chambres (621-631),
/// le niveau 100 commence à 102 : le pas n'est pas uniforme.
pub const LISTE_CHAMBRES: [u32; 80] = [
    // Niveau 100 (13 chambres)
    102, 103, 104, 105, 106, 107, 108, 109, 110, 111, 112, 113, 114,
    // Niveau 200 (14 chambres)
    201, 202, 203, 204, 205, 206, 207, 208, 209, 210, 211, 212, 213, 214,
    // Niveau 300 (14 chambres)
    301, 302, 303, 304, 305, 306, 307, 308, 309, 310, 311, 312, 313, 314,
    // Niveau 400 (14 chambres)
    401, 402, 403, 404, 405, 406, 407, 408, 409, 410, 411, 412, 413, 414,
    // Niveau 500 (14 chambres)
    501, 502, 503, 504, 505, 506, 507, 508, 509, 510, 511, 512, 513, 514,
    // Niveau 600 (11 chambres)
    621, 622, 623, 624, 625, 626, 627, 628, 629, 630, 631,
];

pub const TOTAL_CHAMBRES: usize = LISTE_CHAMBRES.len();

pub const NIVEAUX: [u32; 6] = [100, 200, 300, 400, 500, 600];

/// Niveau d'une chambre (100, 200, ... 600), 0 si hors plage.
pub fn niveau_chambre(numero: u32) -> u32 {
    match numero {
        100..=699 => (numero / 100) * 100,
        _ => 0,
    }
}

pub fn chambres_du_niveau(niveau: u32) -> Vec<u32> {
    LISTE_CHAMBRES
        .iter()
        .copied()
        .filter(|n| niveau_chambre(*n) == niveau)
        .collect()
}

/// Contrat de complétude exposé à l'appelant (jauge de progression,
/// déclenchement de la consolidation automatique).
#[derive(Debug, Clone, Serialize)]
pub struct EtatRoster {
    pub manquantes: Vec<u32>,
    pub manquantes_par_niveau: BTreeMap<u32, Vec<u32>>,
    pub complet: bool,
    pub total: usize,
    pub scrapees: usize,
    pub pourcentage: u32,
}

/// Compare les numéros scrapés à la liste de référence.
pub fn verifier_manquantes(scrapees: &[u32]) -> EtatRoster {
    let manquantes: Vec<u32> = LISTE_CHAMBRES
        .iter()
        .copied()
        .filter(|n| !scrapees.contains(n))
        .collect();

    let mut manquantes_par_niveau: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for numero in &manquantes {
        manquantes_par_niveau
            .entry(niveau_chambre(*numero))
            .or_default()
            .push(*numero);
    }

    EtatRoster {
        complet: manquantes.is_empty(),
        total: TOTAL_CHAMBRES,
        scrapees: scrapees.len(),
        pourcentage: pourcentage(scrapees.len()),
        manquantes,
        manquantes_par_niveau,
    }
}

pub fn pourcentage(scrapees: usize) -> u32 {
    (scrapees as f64 / TOTAL_CHAMBRES as f64 * 100.0).round() as u32
}

/// Rapport lisible des chambres manquantes, groupé par niveau.
pub fn formater_manquantes(etat: &EtatRoster) -> String {
    if etat.complet {
        return "Toutes les chambres ont été récupérées !".to_string();
    }

    let mut message = format!("{} chambre(s) manquante(s) :\n", etat.manquantes.len());
    for (niveau, chambres) in &etat.manquantes_par_niveau {
        let numeros: Vec<String> = chambres.iter().map(|n| format!("#{}", n)).collect();
        message.push_str(&format!("\nNiveau {} : {}", niveau, numeros.join(", ")));
    }
    message
}
