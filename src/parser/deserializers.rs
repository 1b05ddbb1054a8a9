use serde::{Deserialize, Deserializer};

/// Accepte indifféremment une chaîne ou un nombre JSON ("205" ou 205) —
/// les scrapers ne sont pas cohérents sur le type des numéros.
pub fn opt_chaine_ou_nombre<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChaineOuNombre {
        Chaine(String),
        Entier(i64),
        Flottant(f64),
    }

    let valeur = Option::<ChaineOuNombre>::deserialize(deserializer)?;
    Ok(valeur.map(|v| match v {
        ChaineOuNombre::Chaine(s) => s,
        ChaineOuNombre::Entier(n) => n.to_string(),
        ChaineOuNombre::Flottant(n) => n.to_string(),
    }))
}

/// Numéro de chambre à trois chiffres, plage 100..=999. Les zéros de tête
/// sont absorbés par le parsing numérique.
pub fn parse_numero_chambre(texte: &str) -> Option<u32> {
    let numero: u32 = texte.trim().parse().ok()?;
    if (100..=999).contains(&numero) {
        Some(numero)
    } else {
        None
    }
}
