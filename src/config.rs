use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Paramètres de l'application, persistés en table `config` (clé/valeur).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Mots-clés (minuscules) forçant la priorité HAUTE d'un ticket.
    pub mots_haute_priorite: Vec<String>,
    /// Mots-clés (minuscules) forçant la priorité BASSE d'un ticket.
    pub mots_basse_priorite: Vec<String>,
    /// Longueur minimale (exclusive) d'une description pour entrer en DIVERS.
    pub longueur_min_divers: usize,
    /// Consolidation automatique quand le roster devient complet.
    pub consolidation_auto: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            mots_haute_priorite: vec![
                "urgent".into(),
                "fuite".into(),
                "cassé".into(),
                "panne".into(),
                "danger".into(),
                "ne fonctionne pas".into(),
                "bloqué".into(),
                "hors service".into(),
            ],
            mots_basse_priorite: vec![
                "retouche".into(),
                "mineur".into(),
                "esthétique".into(),
                "détail".into(),
                "détartrer".into(),
                "nettoyer".into(),
            ],
            longueur_min_divers: 3,
            consolidation_auto: true,
        }
    }
}

pub fn get_config_from_db(conn: &Connection) -> Result<AppConfig, rusqlite::Error> {
    let mut stmt = conn.prepare_cached("SELECT key, value FROM config")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut config = AppConfig::default();

    for row in rows {
        let (key, value) = row?;
        match key.as_str() {
            "mots_haute_priorite" => {
                if let Ok(v) = serde_json::from_str(&value) {
                    config.mots_haute_priorite = v;
                }
            }
            "mots_basse_priorite" => {
                if let Ok(v) = serde_json::from_str(&value) {
                    config.mots_basse_priorite = v;
                }
            }
            "longueur_min_divers" => {
                config.longueur_min_divers = value.parse().unwrap_or(3)
            }
            "consolidation_auto" => config.consolidation_auto = value != "false",
            _ => {}
        }
    }

    Ok(config)
}

pub fn update_config_in_db(conn: &Connection, config: &AppConfig) -> Result<(), rusqlite::Error> {
    let pairs: Vec<(&str, String)> = vec![
        (
            "mots_haute_priorite",
            serde_json::to_string(&config.mots_haute_priorite).unwrap_or_default(),
        ),
        (
            "mots_basse_priorite",
            serde_json::to_string(&config.mots_basse_priorite).unwrap_or_default(),
        ),
        (
            "longueur_min_divers",
            config.longueur_min_divers.to_string(),
        ),
        ("consolidation_auto", config.consolidation_auto.to_string()),
    ];

    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO config (key, value, updated_at) VALUES (?1, ?2, datetime('now'))",
    )?;

    for (key, value) in pairs {
        stmt.execute(rusqlite::params![key, value])?;
    }

    Ok(())
}
