use crate::analysis::groups::Groups;
use crate::analysis::patterns::{GroupTag, PatternSummary};
use crate::config::{ScoringWeights, Thresholds};
use crate::models::{Candidate, Draw, ScoredCandidate, Slot};

/// Tout ce dont les règles ont besoin pour noter un candidat.
pub struct ScoringContext<'a> {
    pub frequencies: &'a [u32; 10],
    pub groups: &'a Groups,
    pub patterns: &'a PatternSummary,
    pub latest: &'a Draw,
}

/// Règle additive : `weight` est ajouté si `applies` est vrai.
pub struct ScoringRule {
    pub name: &'static str,
    pub weight: f64,
    pub applies: fn(&Candidate, &ScoringContext) -> bool,
}

fn pacha_matches(c: &Candidate, ctx: &ScoringContext) -> bool {
    c.is_pacha() == ctx.patterns.pacha_prediction.expects_pacha()
}

fn repeats_latest(c: &Candidate, ctx: &ScoringContext) -> bool {
    c.digits().iter().filter(|&&d| ctx.latest.contains(d)).count() >= 2
}

fn head_in_group_a(c: &Candidate, ctx: &ScoringContext) -> bool {
    ctx.patterns.target.slot == Slot::S12 && ctx.groups.a.iter().any(|a| a.pair == c.head())
}

fn tail_in_group_d(c: &Candidate, ctx: &ScoringContext) -> bool {
    ctx.patterns.target.slot == Slot::S34 && ctx.groups.d.iter().any(|d| d.pair == c.tail())
}

fn group_a_strength(c: &Candidate, ctx: &ScoringContext) -> bool {
    ctx.patterns.groups.predicts(GroupTag::A)
        && c
            .digits()
            .iter()
            .any(|&d| ctx.groups.a.iter().any(|a| a.pair.contains(d)))
}

fn group_c_strength(c: &Candidate, ctx: &ScoringContext) -> bool {
    ctx.patterns.groups.predicts(GroupTag::C)
        && (c.contains(ctx.groups.c.c1) || c.contains(ctx.groups.c.c2))
}

pub fn scoring_rules(weights: &ScoringWeights) -> Vec<ScoringRule> {
    vec![
        ScoringRule { name: "pacha", weight: weights.pacha, applies: pacha_matches },
        ScoringRule { name: "repetition", weight: weights.repetition, applies: repeats_latest },
        ScoringRule { name: "position_12", weight: weights.position, applies: head_in_group_a },
        ScoringRule { name: "position_34", weight: weights.position, applies: tail_in_group_d },
        ScoringRule { name: "groupe_a", weight: weights.group, applies: group_a_strength },
        ScoringRule { name: "groupe_c", weight: weights.group, applies: group_c_strength },
    ]
}

/// Fréquence moyenne × poids + retard moyen × poids (divisé par 4, retard absent = 0).
pub fn base_score(c: &Candidate, ctx: &ScoringContext, weights: &ScoringWeights) -> f64 {
    let digits = c.digits();
    let avg_freq = digits
        .iter()
        .map(|&d| ctx.frequencies[d as usize] as f64)
        .sum::<f64>()
        / 4.0;
    let avg_delay = digits
        .iter()
        .map(|&d| ctx.groups.c.delay_of(d).unwrap_or(0) as f64)
        .sum::<f64>()
        / 4.0;
    avg_freq * weights.frequency + avg_delay * weights.delay
}

pub fn score_candidate(
    c: &Candidate,
    ctx: &ScoringContext,
    rules: &[ScoringRule],
    weights: &ScoringWeights,
) -> f64 {
    let bonus: f64 = rules
        .iter()
        .filter(|r| (r.applies)(c, ctx))
        .map(|r| r.weight)
        .sum();
    base_score(c, ctx, weights) + bonus
}

fn sort_desc(scored: &mut [ScoredCandidate]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Note chaque candidat du pool et trie par score décroissant (tri stable).
pub fn score_pool(pool: &[Candidate], ctx: &ScoringContext, weights: &ScoringWeights) -> Vec<ScoredCandidate> {
    let rules = scoring_rules(weights);
    let mut scored: Vec<ScoredCandidate> = pool
        .iter()
        .map(|c| ScoredCandidate {
            candidate: *c,
            score: score_candidate(c, ctx, &rules, weights),
        })
        .collect();
    sort_desc(&mut scored);
    scored
}

/// Meilleur pacha + deux meilleurs non-pacha, complétés à 3 depuis le pool trié.
pub fn master_choices(sorted_pool: &[ScoredCandidate]) -> Vec<ScoredCandidate> {
    let mut choices: Vec<ScoredCandidate> = Vec::with_capacity(3);
    if let Some(pacha) = sorted_pool.iter().find(|s| s.candidate.is_pacha()) {
        choices.push(pacha.clone());
    }
    choices.extend(
        sorted_pool
            .iter()
            .filter(|s| !s.candidate.is_pacha())
            .take(2)
            .cloned(),
    );

    if choices.len() < 3 {
        let missing = 3 - choices.len();
        let extra: Vec<ScoredCandidate> = sorted_pool
            .iter()
            .filter(|s| !choices.iter().any(|c| c.candidate == s.candidate))
            .take(missing)
            .cloned()
            .collect();
        choices.extend(extra);
    }

    sort_desc(&mut choices);
    choices
}

/// Nombre de motifs respectés par un candidat de la diagonale.
pub fn diagonal_compliance(c: &Candidate, ctx: &ScoringContext, thresholds: &Thresholds) -> u32 {
    let patterns = ctx.patterns;
    let group_a = &ctx.groups.a;
    let origin = patterns.origin.slot;
    let target = patterns.target.slot;

    let checks = [
        c.is_pacha() == patterns.pacha_prediction.expects_pacha(),
        patterns.groups.a > thresholds.group_a_percent
            && c.digits().iter().any(|&d| group_a.iter().any(|a| a.pair.contains(d))),
        origin == Slot::S12 || target == Slot::S12,
        origin == Slot::S34 || target == Slot::S34,
        patterns.groups.predicts(GroupTag::A)
            && group_a.iter().any(|a| c.contains(a.pair.0) && c.contains(a.pair.1)),
        patterns.groups.predicts(GroupTag::C)
            && c.contains(ctx.groups.c.c1)
            && c.contains(ctx.groups.c.c2),
    ];
    checks.iter().filter(|&&ok| ok).count() as u32
}

/// Premier candidat de la diagonale au meilleur taux de conformité.
pub fn diagonal_pick(diagonal: &[Candidate], ctx: &ScoringContext, thresholds: &Thresholds) -> Option<Candidate> {
    let mut best: Option<(Candidate, u32)> = None;
    for c in diagonal {
        let score = diagonal_compliance(c, ctx, thresholds);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((*c, score));
        }
    }
    best.map(|(c, _)| c)
}
