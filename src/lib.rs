//! Gouvernante — consolidation des données de gouvernance hôtelière.
//!
//! Deux scrapers alimentent la base : les chambres du PMS StayNTouch (page
//! par page) et les tickets de maintenance Dmbook. Le crate normalise ces
//! lots, accumule les chambres jusqu'à complétude du roster, joint les deux
//! sources, calcule le statut d'occupation de chaque chambre par un moteur de
//! règles ordonné, puis produit les exports (CSV des chambres, rapport texte
//! des tickets groupé par niveau).

pub mod analyzer;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod parser;
pub mod roster;
pub mod state;

#[cfg(test)]
mod tests {
    use crate::commands::consolidation::consolider_donnees;
    use crate::commands::export::{exporter_csv, exporter_tickets_txt};
    use crate::commands::import::{importer_lot_chambres, importer_tickets};
    use crate::commands::reset::reinitialiser;
    use crate::db::setup::init_db_en_memoire;
    use crate::db::store::{lire_slot, SLOT_CONSOLIDE, SLOT_MAJ, SLOT_TICKETS_ENRICHIS};
    use crate::error::AppError;
    use crate::parser::types::{
        ChambreRaw, LotChambresScrape, LotTicketsScrape, Priorite, TicketRaw,
    };
    use crate::roster::LISTE_CHAMBRES;
    use crate::state::{AppState, DbAccess};

    fn etat_test() -> AppState {
        AppState::new(init_db_en_memoire().unwrap())
    }

    fn chambre_raw(numero: u32) -> ChambreRaw {
        ChambreRaw {
            numero: Some(numero.to_string()),
            statut_proprete: Some("CLEAN".to_string()),
            type_chambre: Some("Double".to_string()),
            current_status: Some("Stayover".to_string()),
            next_status: Some("Stayover".to_string()),
            vacant: Some(false),
            ..ChambreRaw::default()
        }
    }

    fn lot_chambres(numeros: &[u32]) -> LotChambresScrape {
        LotChambresScrape {
            chambres: numeros.iter().map(|n| chambre_raw(*n)).collect(),
            source: Some("stayntouch".to_string()),
            timestamp: Some("2026-08-26T09:00:00Z".to_string()),
        }
    }

    fn lot_tickets() -> LotTicketsScrape {
        serde_json::from_str(
            r##"{
                "tickets": [
                    { "id": 4821, "contenu": "#205 Fuite robinet salle de bain",
                      "statut": "Ouvert", "date_relative": "il y a 2 jours" },
                    { "contenu": "#412 Rideau décroché" },
                    { "contenu": "Ascenseur bruyant au sous-sol" }
                ],
                "source": "dmbook"
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_import_tickets_persiste_et_formate() {
        let state = etat_test();
        let resultat = importer_tickets(&state, lot_tickets()).unwrap();

        assert_eq!(resultat.total, 3);
        assert_eq!(resultat.ignorees, 0);
        assert!(resultat
            .texte_formate
            .starts_with("LISTE DES TICKETS DE MAINTENANCE"));
        assert!(resultat.texte_formate.contains("#205 Fuite robinet"));
        assert!(resultat.texte_formate.contains("DIVERS"));
        assert!(resultat.texte_formate.ends_with("Total de tickets : 3"));
    }

    #[test]
    fn test_import_chambres_accumule_entre_lots() {
        let state = etat_test();

        let premier = importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES[..40])).unwrap();
        assert_eq!(premier.total, 40);
        assert_eq!(premier.pourcentage, 50);
        assert!(!premier.complet);
        assert_eq!(premier.manquantes.len(), 40);

        // rejouer la même page n'ajoute rien
        let rejoue = importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES[..40])).unwrap();
        assert_eq!(rejoue.total, 40);
        assert_eq!(rejoue.nouvelles, 0);

        let second = importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES[40..])).unwrap();
        assert_eq!(second.total, 80);
        assert!(second.complet);
        assert_eq!(second.pourcentage, 100);
    }

    #[test]
    fn test_consolidation_automatique_sur_transition() {
        let state = etat_test();
        importer_tickets(&state, lot_tickets()).unwrap();

        let premier = importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES[..79])).unwrap();
        assert!(!premier.consolidation_declenchee);

        let dernier = importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES[79..])).unwrap();
        assert!(dernier.complet);
        assert!(dernier.consolidation_declenchee);

        // le slot consolidé et l'horodatage global existent désormais
        state
            .db(|conn| {
                let maj: Option<String> = lire_slot(conn, SLOT_MAJ)?;
                assert!(maj.is_some());
                let enrichi: Option<String> = lire_slot(conn, SLOT_TICKETS_ENRICHIS)?;
                assert!(enrichi.is_some());
                Ok(())
            })
            .unwrap();

        // pas de re-déclenchement sur un roster déjà complet
        let rejoue = importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES[..5])).unwrap();
        assert!(!rejoue.consolidation_declenchee);
    }

    #[test]
    fn test_consolidation_sans_chambres_echoue() {
        let state = etat_test();
        importer_tickets(&state, lot_tickets()).unwrap();
        match consolider_donnees(&state) {
            Err(AppError::DonneesManquantes(message)) => {
                assert_eq!(message, "Aucune donnée de chambres disponible.")
            }
            autre => panic!("attendu DonneesManquantes, obtenu {:?}", autre.map(|_| ())),
        }
    }

    #[test]
    fn test_consolidation_sans_tickets_echoue() {
        let state = etat_test();
        importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES)).unwrap();
        match consolider_donnees(&state) {
            Err(AppError::DonneesManquantes(message)) => {
                assert_eq!(message, "Aucune donnée de tickets disponible.")
            }
            autre => panic!("attendu DonneesManquantes, obtenu {:?}", autre.map(|_| ())),
        }
    }

    #[test]
    fn test_pipeline_complet_chambre_205() {
        let state = etat_test();
        importer_tickets(&state, lot_tickets()).unwrap();
        importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES)).unwrap();

        let donnees: crate::analyzer::consolidation::DonneesConsolidees = state
            .db(|conn| {
                lire_slot(conn, SLOT_CONSOLIDE)?.ok_or_else(|| {
                    AppError::DonneesManquantes("slot consolidé absent".to_string())
                })
            })
            .unwrap();
        let c205 = donnees.chambres.iter().find(|c| c.numero == 205).unwrap();
        assert_eq!(c205.nb_tickets, 1);
        assert_eq!(c205.tickets[0].contenu, "#205 Fuite robinet salle de bain");
        // "fuite" force la priorité HAUTE du ticket, qui escalade la chambre
        assert!(c205.statut_details.as_ref().unwrap().priorite >= Priorite::Haute);
        // Stayover des deux côtés : recouche
        assert_eq!(c205.statut_auto.as_deref(), Some("(o)"));

        assert_eq!(donnees.tickets_sans_chambre.len(), 1);
        assert_eq!(donnees.statistiques.tickets_total, 3);
        assert_eq!(donnees.statistiques.total_chambres, 80);

        // le rapport enrichi porte le statut en fin de ligne
        let enrichi: String = state
            .db(|conn| {
                lire_slot(conn, SLOT_TICKETS_ENRICHIS)?.ok_or_else(|| {
                    AppError::DonneesManquantes("rapport enrichi absent".to_string())
                })
            })
            .unwrap();
        assert!(enrichi.contains("#205 Fuite robinet salle de bain (o)"));
    }

    #[test]
    fn test_export_csv_valide() {
        let state = etat_test();
        importer_tickets(&state, lot_tickets()).unwrap();
        importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES)).unwrap();

        let chemin = std::env::temp_dir().join("gouvernante_test_export.csv");
        let resultat = exporter_csv(&state, &chemin).unwrap();
        assert!(resultat.size_bytes > 0);

        // le format maison doit rester lisible par un lecteur CSV standard
        let mut lecteur = csv::Reader::from_path(&chemin).unwrap();
        assert_eq!(
            lecteur.headers().unwrap(),
            &csv::StringRecord::from(vec![
                "Chambre",
                "Statut_Proprete",
                "Type",
                "Statut_Auto",
                "Reservation",
                "Tickets",
                "Priorite",
            ])
        );
        let lignes: Vec<csv::StringRecord> =
            lecteur.records().map(|r| r.unwrap()).collect();
        assert_eq!(lignes.len(), 80);
        let l205 = lignes.iter().find(|r| &r[0] == "205").unwrap();
        assert_eq!(&l205[5], "1");
        assert_eq!(&l205[6], "HAUTE");

        std::fs::remove_file(&chemin).ok();
    }

    #[test]
    fn test_export_csv_sans_donnees_echoue() {
        let state = etat_test();
        let chemin = std::env::temp_dir().join("gouvernante_test_vide.csv");
        assert!(matches!(
            exporter_csv(&state, &chemin),
            Err(AppError::DonneesManquantes(_))
        ));
    }

    #[test]
    fn test_export_tickets_txt() {
        let state = etat_test();
        importer_tickets(&state, lot_tickets()).unwrap();

        let chemin = std::env::temp_dir().join("gouvernante_test_tickets.txt");
        // pas encore consolidé : la version formatée brute est exportée
        exporter_tickets_txt(&state, &chemin).unwrap();
        let texte = std::fs::read_to_string(&chemin).unwrap();
        assert!(texte.contains("#205 Fuite robinet salle de bain\n"));

        importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES)).unwrap();
        // consolidé : la version enrichie prime
        exporter_tickets_txt(&state, &chemin).unwrap();
        let texte = std::fs::read_to_string(&chemin).unwrap();
        assert!(texte.contains("#205 Fuite robinet salle de bain (o)"));

        std::fs::remove_file(&chemin).ok();
    }

    #[test]
    fn test_reinitialisation() {
        let state = etat_test();
        importer_tickets(&state, lot_tickets()).unwrap();
        importer_lot_chambres(&state, lot_chambres(&LISTE_CHAMBRES)).unwrap();

        let supprimes = reinitialiser(&state).unwrap();
        assert!(supprimes >= 6);

        // tout a disparu, la consolidation redevient impossible
        assert!(matches!(
            consolider_donnees(&state),
            Err(AppError::DonneesManquantes(_))
        ));
    }

    #[test]
    fn test_lot_ticket_malforme_non_bloquant() {
        let state = etat_test();
        let lot: LotTicketsScrape = LotTicketsScrape {
            tickets: vec![
                TicketRaw {
                    contenu: Some("#205 Fuite".to_string()),
                    ..TicketRaw::default()
                },
                TicketRaw::default(),
            ],
            source: None,
            timestamp: None,
        };
        let resultat = importer_tickets(&state, lot).unwrap();
        assert_eq!(resultat.total, 1);
        assert_eq!(resultat.ignorees, 1);
        assert_eq!(resultat.warnings.len(), 1);
    }
}
