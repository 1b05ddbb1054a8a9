use std::sync::LazyLock;

use regex::Regex;

use crate::config::AppConfig;
use crate::parser::deserializers::parse_numero_chambre;
use crate::parser::etiquettes::Etiquettes;
use crate::parser::types::{
    Chambre, ChambreRaw, LotChambresScrape, LotTicketsScrape, ParseWarning, Priorite, Proprete,
    Ticket, TicketRaw,
};

/// Numéro de chambre cité n'importe où dans le contenu : "#205".
static RE_CHAMBRE_DIESE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d{3})").expect("regex chambre dièse"));

/// Numéro de chambre nu en tête de contenu : "205 Fuite...".
static RE_CHAMBRE_DEBUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})\s").expect("regex chambre début"));

/// Sortie de normalisation d'un lot de chambres. Les enregistrements
/// malformés sont ignorés avec un avertissement, jamais bloquants.
#[derive(Debug)]
pub struct ParseChambres {
    pub chambres: Vec<Chambre>,
    pub warnings: Vec<ParseWarning>,
    pub ignorees: usize,
}

#[derive(Debug)]
pub struct ParseTickets {
    pub tickets: Vec<Ticket>,
    pub warnings: Vec<ParseWarning>,
    pub ignorees: usize,
}

pub fn normaliser_lot_chambres(lot: &LotChambresScrape) -> ParseChambres {
    let mut chambres = Vec::with_capacity(lot.chambres.len());
    let mut warnings = Vec::new();

    for (index, raw) in lot.chambres.iter().enumerate() {
        match normaliser_chambre(raw) {
            Ok(chambre) => chambres.push(chambre),
            Err(message) => warnings.push(ParseWarning { index, message }),
        }
    }

    ParseChambres {
        ignorees: warnings.len(),
        chambres,
        warnings,
    }
}

pub fn normaliser_chambre(raw: &ChambreRaw) -> Result<Chambre, String> {
    let numero_texte = raw
        .numero
        .as_deref()
        .or(raw.id.as_deref())
        .unwrap_or("")
        .trim()
        .to_string();
    let numero = parse_numero_chambre(&numero_texte)
        .ok_or_else(|| format!("Numéro de chambre invalide: {:?}", numero_texte))?;

    let statut_proprete = match raw.statut_proprete.as_deref().map(str::trim) {
        Some("CLEAN") => Proprete::Clean,
        Some("DIRTY") => Proprete::Dirty,
        _ => Proprete::Unknown,
    };

    let current_status = raw.current_status.clone().unwrap_or_default();
    let next_status = raw.next_status.clone().unwrap_or_default();

    Ok(Chambre {
        numero,
        statut_proprete,
        type_chambre: nettoyer_opt(&raw.type_chambre),
        statut_reservation: nettoyer_opt(&raw.statut_reservation),
        etiquettes_current: Etiquettes::depuis_texte(&current_status),
        etiquettes_next: Etiquettes::depuis_texte(&next_status),
        current_status,
        next_status,
        check_in_time: nettoyer_opt(&raw.check_in_time),
        check_out_time: nettoyer_opt(&raw.check_out_time),
        vacant: raw.vacant.unwrap_or(false),
        is_stayover: raw.is_stayover.unwrap_or(false),
        is_day_use: raw.is_day_use.unwrap_or(false),
        is_ooo: raw.is_ooo.unwrap_or(false),
        ooo_until: nettoyer_opt(&raw.ooo_until),
        ooo_reason: nettoyer_opt(&raw.ooo_reason),
        statut_auto: None,
        statut_details: None,
        tickets: Vec::new(),
        priority: None,
        nb_tickets: 0,
    })
}

pub fn normaliser_lot_tickets(lot: &LotTicketsScrape, config: &AppConfig) -> ParseTickets {
    let mut tickets = Vec::with_capacity(lot.tickets.len());
    let mut warnings = Vec::new();

    for (index, raw) in lot.tickets.iter().enumerate() {
        match normaliser_ticket(raw, config) {
            Ok(ticket) => tickets.push(ticket),
            Err(message) => warnings.push(ParseWarning { index, message }),
        }
    }

    ParseTickets {
        ignorees: warnings.len(),
        tickets,
        warnings,
    }
}

pub fn normaliser_ticket(raw: &TicketRaw, config: &AppConfig) -> Result<Ticket, String> {
    let contenu = raw.contenu.as_deref().unwrap_or("").trim().to_string();
    if contenu.is_empty() {
        return Err("Ticket sans contenu".to_string());
    }

    // Numéro de chambre : celui du scraper, sinon extrait du contenu.
    // Un ticket sans numéro reste valide (bucket DIVERS).
    let numero_chambre = raw
        .numero_chambre
        .as_deref()
        .and_then(parse_numero_chambre)
        .or_else(|| extraire_numero_chambre(&contenu));

    // Priorité : celle du scraper, sinon inférée des mots-clés du contenu.
    let priorite = raw
        .priorite
        .as_deref()
        .and_then(Priorite::depuis_libelle)
        .unwrap_or_else(|| deriver_priorite(&contenu, config));

    let numero_ticket = raw.numero_ticket.clone().or_else(|| {
        raw.id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("#{}", s))
    });

    Ok(Ticket {
        numero_ticket,
        numero_chambre,
        contenu,
        statut: raw
            .statut
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Inconnu")
            .to_string(),
        auteur: nettoyer_opt(&raw.auteur),
        date_creation: nettoyer_opt(&raw.date_creation),
        date_relative: nettoyer_opt(&raw.date_relative),
        priorite,
        modifie: raw.modifie.unwrap_or(false),
    })
}

/// Cherche "#XXX" n'importe où, puis "XXX " en tête de contenu.
pub fn extraire_numero_chambre(contenu: &str) -> Option<u32> {
    RE_CHAMBRE_DIESE
        .captures(contenu)
        .or_else(|| RE_CHAMBRE_DEBUT.captures(contenu))
        .and_then(|c| parse_numero_chambre(&c[1]))
}

/// Priorité inférée des mots-clés du contenu ; MOYENNE par défaut.
pub fn deriver_priorite(contenu: &str, config: &AppConfig) -> Priorite {
    let contenu_minuscule = contenu.to_lowercase();
    if config
        .mots_haute_priorite
        .iter()
        .any(|mot| contenu_minuscule.contains(mot.as_str()))
    {
        Priorite::Haute
    } else if config
        .mots_basse_priorite
        .iter()
        .any(|mot| contenu_minuscule.contains(mot.as_str()))
    {
        Priorite::Basse
    } else {
        Priorite::Moyenne
    }
}

fn nettoyer_opt(valeur: &Option<String>) -> Option<String> {
    valeur
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chambre_raw(numero: &str) -> ChambreRaw {
        ChambreRaw {
            numero: Some(numero.to_string()),
            statut_proprete: Some("CLEAN".to_string()),
            current_status: Some("Stayover".to_string()),
            next_status: Some("Stayover".to_string()),
            vacant: Some(false),
            ..ChambreRaw::default()
        }
    }

    #[test]
    fn test_normaliser_chambre_ok() {
        let c = normaliser_chambre(&chambre_raw("205")).unwrap();
        assert_eq!(c.numero, 205);
        assert_eq!(c.statut_proprete, Proprete::Clean);
        assert!(c.etiquettes_current.stayover);
        assert!(c.etiquettes_next.stayover);
        assert!(!c.is_ooo);
    }

    #[test]
    fn test_normaliser_chambre_numero_via_id() {
        let mut raw = chambre_raw("205");
        raw.numero = None;
        raw.id = Some("304".to_string());
        let c = normaliser_chambre(&raw).unwrap();
        assert_eq!(c.numero, 304);
    }

    #[test]
    fn test_normaliser_chambre_sans_numero() {
        let mut raw = chambre_raw("205");
        raw.numero = None;
        assert!(normaliser_chambre(&raw).is_err());
    }

    #[test]
    fn test_proprete_inconnue() {
        let mut raw = chambre_raw("205");
        raw.statut_proprete = Some("WEIRD".to_string());
        let c = normaliser_chambre(&raw).unwrap();
        assert_eq!(c.statut_proprete, Proprete::Unknown);
    }

    #[test]
    fn test_statuts_absents_donnent_etiquettes_vides() {
        let mut raw = chambre_raw("205");
        raw.current_status = None;
        raw.next_status = None;
        let c = normaliser_chambre(&raw).unwrap();
        assert!(c.etiquettes_current.est_vide());
        assert_eq!(c.current_status, "");
    }

    #[test]
    fn test_lot_chambres_malformees_ignorees() {
        let lot = LotChambresScrape {
            chambres: vec![chambre_raw("205"), chambre_raw("pas-un-numero")],
            ..LotChambresScrape::default()
        };
        let sortie = normaliser_lot_chambres(&lot);
        assert_eq!(sortie.chambres.len(), 1);
        assert_eq!(sortie.ignorees, 1);
        assert_eq!(sortie.warnings[0].index, 1);
    }

    fn ticket_raw(contenu: &str) -> TicketRaw {
        TicketRaw {
            contenu: Some(contenu.to_string()),
            ..TicketRaw::default()
        }
    }

    #[test]
    fn test_extraction_numero_diese() {
        let t = normaliser_ticket(&ticket_raw("#205 Fuite robinet"), &AppConfig::default()).unwrap();
        assert_eq!(t.numero_chambre, Some(205));
    }

    #[test]
    fn test_extraction_numero_debut_sans_diese() {
        let t = normaliser_ticket(&ticket_raw("312 Ampoule grillée"), &AppConfig::default()).unwrap();
        assert_eq!(t.numero_chambre, Some(312));
    }

    #[test]
    fn test_ticket_sans_numero_conserve() {
        let t = normaliser_ticket(
            &ticket_raw("Ascenseur bruyant au sous-sol"),
            &AppConfig::default(),
        )
        .unwrap();
        assert!(t.numero_chambre.is_none());
    }

    #[test]
    fn test_ticket_sans_contenu_rejete() {
        let raw = TicketRaw {
            contenu: Some("   ".to_string()),
            ..TicketRaw::default()
        };
        assert!(normaliser_ticket(&raw, &AppConfig::default()).is_err());
    }

    #[test]
    fn test_priorite_scrapee_prioritaire_sur_mots_cles() {
        let mut raw = ticket_raw("#205 Fuite robinet");
        raw.priorite = Some("BASSE".to_string());
        let t = normaliser_ticket(&raw, &AppConfig::default()).unwrap();
        assert_eq!(t.priorite, Priorite::Basse);
    }

    #[test]
    fn test_priorite_inferee_haute() {
        let t = normaliser_ticket(&ticket_raw("#205 Fuite robinet"), &AppConfig::default()).unwrap();
        assert_eq!(t.priorite, Priorite::Haute);
    }

    #[test]
    fn test_priorite_inferee_basse() {
        let t = normaliser_ticket(
            &ticket_raw("#205 Détartrer la douche"),
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(t.priorite, Priorite::Basse);
    }

    #[test]
    fn test_priorite_defaut_moyenne() {
        let t = normaliser_ticket(&ticket_raw("#205 Rideau décroché"), &AppConfig::default())
            .unwrap();
        assert_eq!(t.priorite, Priorite::Moyenne);
    }

    #[test]
    fn test_numero_ticket_depuis_id() {
        let mut raw = ticket_raw("#205 Fuite");
        raw.id = Some("4821".to_string());
        let t = normaliser_ticket(&raw, &AppConfig::default()).unwrap();
        assert_eq!(t.numero_ticket.as_deref(), Some("#4821"));
    }
}
