use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::backtest::{BacktestHits, check_predictions};
use crate::analysis::groups::{DelayPair, GroupB, GroupC, PairCandidate, build_groups};
use crate::analysis::matrix::{diagonal, distinct_cells, generate_matrix};
use crate::analysis::patterns::{PatternSummary, analyze_patterns};
use crate::analysis::scoring::{ScoringContext, diagonal_pick, master_choices, score_pool};
use crate::analysis::{digit_frequencies, top_frequency_digit};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{Candidate, Draw, Pair, ScoredCandidate};
use crate::parse::parse_draws;

/// Résultat complet d'une analyse, prêt à être affiché.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Affichage uniquement ; n'intervient pas dans les calculs.
    pub as_of: Option<NaiveDate>,
    /// Fenêtre analysée (le plus récent en premier).
    pub history: Vec<Draw>,
    pub frequencies: [u32; 10],
    pub top_frequency_digit: u8,
    pub top_delay_digit: u8,
    pub group_a: Vec<PairCandidate>,
    pub group_b: GroupB,
    pub group_c: GroupC,
    pub group_d: Vec<DelayPair>,
    pub pair_a: Pair,
    pub pair_b: Pair,
    pub pair_c: Pair,
    pub matrix: Vec<Vec<Candidate>>,
    pub diagonal: Vec<Candidate>,
    pub patterns: PatternSummary,
    pub backtest: BacktestHits,
    pub scored: Vec<ScoredCandidate>,
    pub master_choices: Vec<ScoredCandidate>,
    pub final_choice: Candidate,
    pub diagonal_pick: Option<Candidate>,
}

/// Analyse un texte brut (tirages séparés par retour à la ligne ou virgule).
pub fn analyze(text: &str, as_of: Option<NaiveDate>, config: &AnalysisConfig) -> Result<Option<Analysis>> {
    let history = parse_draws(text);
    analyze_draws(&history, as_of, config)
}

/// `Ok(None)` tant que l'historique compte moins de `config.min_history` tirages ;
/// une configuration invalide est refusée avant tout calcul.
pub fn analyze_draws(
    history: &[Draw],
    as_of: Option<NaiveDate>,
    config: &AnalysisConfig,
) -> Result<Option<Analysis>> {
    config.validate()?;
    if history.len() < config.min_history {
        info!(
            draws = history.len(),
            required = config.min_history,
            "historique insuffisant, pas d'analyse"
        );
        return Ok(None);
    }

    Ok(run(history, as_of, config))
}

/// Fenêtre d'au moins 2 tirages garantie par `validate`.
fn run(history: &[Draw], as_of: Option<NaiveDate>, config: &AnalysisConfig) -> Option<Analysis> {
    let window = &history[..history.len().min(config.window)];
    let latest = window.first()?;
    let frequencies = digit_frequencies(window);
    let groups = build_groups(window, &frequencies);

    let matrix = generate_matrix(&groups.a, &groups.d);
    let diagonal = diagonal(&matrix);
    let patterns = analyze_patterns(window, &groups, &config.thresholds)?;
    let backtest = check_predictions(&matrix, history, config.backtest_window);

    let ctx = ScoringContext {
        frequencies: &frequencies,
        groups: &groups,
        patterns: &patterns,
        latest,
    };
    let pool = distinct_cells(&matrix);
    let scored = score_pool(&pool, &ctx, &config.weights);
    let master_choices = master_choices(&scored);
    let final_choice = master_choices.first()?.candidate;
    let pair_a = groups.a.first()?.pair;
    let diagonal_pick = diagonal_pick(&diagonal, &ctx, &config.thresholds);

    debug!(
        pool = pool.len(),
        hits4 = backtest.hits4,
        hits3 = backtest.hits3,
        "matrice évaluée"
    );
    info!(final_choice = %final_choice, window = window.len(), "analyse terminée");

    Some(Analysis {
        as_of,
        history: window.to_vec(),
        frequencies,
        top_frequency_digit: top_frequency_digit(&frequencies),
        top_delay_digit: groups.c.c1,
        pair_a,
        pair_b: groups.b.pair(),
        pair_c: groups.c.pair(),
        group_a: groups.a,
        group_b: groups.b,
        group_c: groups.c,
        group_d: groups.d,
        matrix,
        diagonal,
        patterns,
        backtest,
        scored,
        master_choices,
        final_choice,
        diagonal_pick,
    })
}
