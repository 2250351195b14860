use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::ExtractionConfig;
use crate::error::{PatronError, Result};
use crate::models::Draw;

/// Découpe sur retour à la ligne ou virgule, puis garde les 4 premiers caractères
/// des jetons d'au moins 4 caractères.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(&['\n', ','][..])
        .map(str::trim)
        .filter(|t| t.chars().count() >= 4)
}

fn parse_token(token: &str) -> Result<Draw> {
    let mut digits = [0u8; 4];
    for (slot, c) in digits.iter_mut().zip(token.chars()) {
        *slot = c
            .to_digit(10)
            .map(|d| d as u8)
            .ok_or_else(|| PatronError::InvalidDraw(format!("'{}' contient '{}'", token, c)))?;
    }
    Draw::new(digits)
}

/// Version tolérante : les jetons non numériques sont ignorés (avec un avertissement).
pub fn parse_draws(text: &str) -> Vec<Draw> {
    let draws: Vec<Draw> = tokens(text)
        .filter_map(|token| match parse_token(token) {
            Ok(draw) => Some(draw),
            Err(e) => {
                warn!(token, "jeton ignoré : {}", e);
                None
            }
        })
        .collect();
    debug!(count = draws.len(), "tirages analysés");
    draws
}

/// Version stricte : le premier jeton non numérique fait échouer l'analyse.
pub fn parse_draws_strict(text: &str) -> Result<Vec<Draw>> {
    tokens(text).map(parse_token).collect()
}

fn four_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{4}").expect("regex valide"))
}

/// Extrait les résultats d'une réponse texte libre du service de consultation.
///
/// Garde au plus `max_results` groupes de 4 chiffres consécutifs ; en dessous de
/// `min_results` la consultation est considérée comme un échec. Le texte renvoyé
/// (un résultat par ligne) est directement consommable par [`parse_draws`].
pub fn extract_results(response: &str, config: &ExtractionConfig) -> Result<String> {
    let found: Vec<&str> = four_digits()
        .find_iter(response)
        .map(|m| m.as_str())
        .collect();

    if found.len() < config.min_results {
        return Err(PatronError::InsufficientResults {
            found: found.len(),
            required: config.min_results,
        });
    }

    let kept = &found[..found.len().min(config.max_results)];
    debug!(found = found.len(), kept = kept.len(), "résultats extraits");
    Ok(kept.join("\n"))
}
