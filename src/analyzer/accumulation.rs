//! Accumulation des lots de chambres scrapés page par page.
//!
//! État explicite : lot précédent en entrée, lot fusionné en sortie. Aucune
//! variable de module, l'appelant relit et réécrit le slot de stockage.

use std::collections::HashSet;

use crate::parser::types::Chambre;
use crate::roster;

/// Résultat d'une fusion de lot.
#[derive(Debug)]
pub struct FusionLot {
    pub chambres: Vec<Chambre>,
    /// Chambres réellement ajoutées par ce lot.
    pub nouvelles_count: usize,
    pub manquantes: Vec<u32>,
    pub complet: bool,
    pub pourcentage: u32,
}

/// Fusionne un lot fraîchement scrapé dans la collection accumulée.
///
/// Déduplication par numéro, première occurrence gagnante : une chambre déjà
/// capturée n'est jamais écrasée par une page scrapée plus tard. La collection
/// ne rétrécit jamais.
pub fn fusionner_lot(existantes: Vec<Chambre>, nouvelles: Vec<Chambre>) -> FusionLot {
    let mut numeros_vus: HashSet<u32> = existantes.iter().map(|c| c.numero).collect();
    let mut chambres = existantes;
    let mut nouvelles_count = 0;

    for chambre in nouvelles {
        if numeros_vus.insert(chambre.numero) {
            chambres.push(chambre);
            nouvelles_count += 1;
        }
    }

    let numeros: Vec<u32> = chambres.iter().map(|c| c.numero).collect();
    let etat = roster::verifier_manquantes(&numeros);

    FusionLot {
        nouvelles_count,
        manquantes: etat.manquantes,
        complet: etat.complet,
        pourcentage: roster::pourcentage(chambres.len()),
        chambres,
    }
}
