use serde::Serialize;

use crate::models::{Candidate, Draw};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BacktestHits {
    pub hits4: u32,
    pub hits3: u32,
    pub total: u32,
}

/// Confronte la matrice aux `window` tirages les plus récents : correspondance exacte
/// (`hits4`), sinon au moins 3 chiffres bien placés sur une cellule (`hits3`).
pub fn check_predictions(matrix: &[Vec<Candidate>], history: &[Draw], window: usize) -> BacktestHits {
    let recent = &history[..history.len().min(window)];
    let mut hits = BacktestHits {
        total: recent.len() as u32,
        ..BacktestHits::default()
    };

    for draw in recent {
        let mut cells = matrix.iter().flatten();
        if cells.clone().any(|c| c.digits() == &draw.digits) {
            hits.hits4 += 1;
        } else if cells.any(|c| c.positional_matches(draw) >= 3) {
            hits.hits3 += 1;
        }
    }

    hits
}
