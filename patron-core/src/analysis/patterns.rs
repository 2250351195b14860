use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::groups::Groups;
use crate::config::Thresholds;
use crate::models::{Draw, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PachaPrediction {
    Pacha,
    NoPacha,
}

impl PachaPrediction {
    pub fn expects_pacha(self) -> bool {
        self == PachaPrediction::Pacha
    }
}

impl fmt::Display for PachaPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PachaPrediction::Pacha => write!(f, "Pacha probable"),
            PachaPrediction::NoPacha => write!(f, "Sans pacha"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RepetitionPrediction {
    High,
    Low,
}

impl fmt::Display for RepetitionPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepetitionPrediction::High => write!(f, "Répétition forte"),
            RepetitionPrediction::Low => write!(f, "Répétition faible"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupTag {
    A,
    B,
    C,
}

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupTag::A => write!(f, "A"),
            GroupTag::B => write!(f, "B"),
            GroupTag::C => write!(f, "C"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotTrend {
    pub slot: Slot,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupHits {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Les deux groupes les plus souvent sortis.
    pub prediction: [GroupTag; 2],
}

impl GroupHits {
    pub fn predicts(&self, tag: GroupTag) -> bool {
        self.prediction.contains(&tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSummary {
    pub pacha_rate: f64,
    pub pacha_prediction: PachaPrediction,
    pub repetition_rate: f64,
    pub repetition_prediction: RepetitionPrediction,
    pub origin: SlotTrend,
    pub target: SlotTrend,
    pub groups: GroupHits,
}

fn percent(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

/// Intersection des ensembles de chiffres : 1123 et 1456 ne partagent que le 1,
/// même si le 1 apparaît deux fois dans le premier.
fn shares_two_digits(a: &Draw, b: &Draw) -> bool {
    (0..10u8).filter(|&d| a.contains(d) && b.contains(d)).count() >= 2
}

fn best_of(tally: &[usize; 6], default: Slot) -> (Slot, usize) {
    let mut best: Option<usize> = None;
    for i in 0..tally.len() {
        if tally[i] > 0 && best.map_or(true, |b| tally[i] > tally[b]) {
            best = Some(i);
        }
    }
    match best {
        Some(i) => (Slot::ALL[i], tally[i]),
        None => (default, 0),
    }
}

/// Transitions de position : pour chaque couple (tirage courant, précédent), la
/// paire en position `origin` du précédent se retrouve-t-elle en `target` du courant ?
fn slot_transitions(draws: &[Draw]) -> ([usize; 6], [usize; 6]) {
    let mut origin = [0usize; 6];
    let mut target = [0usize; 6];
    for window in draws.windows(2) {
        let (current, previous) = (&window[0], &window[1]);
        for (o, &origin_slot) in Slot::ALL.iter().enumerate() {
            let pair = previous.pair_at(origin_slot);
            for (t, &target_slot) in Slot::ALL.iter().enumerate() {
                if current.pair_at(target_slot) == pair {
                    origin[o] += 1;
                    target[t] += 1;
                }
            }
        }
    }
    (origin, target)
}

fn group_hits(draws: &[Draw], groups: &Groups) -> GroupHits {
    let mut counts = [(GroupTag::A, 0usize), (GroupTag::B, 0), (GroupTag::C, 0)];
    for draw in draws {
        if groups
            .a
            .iter()
            .any(|c| draw.contains(c.pair.0) && draw.contains(c.pair.1))
        {
            counts[0].1 += 1;
        }
        if draw.contains(groups.b.b1) && draw.contains(groups.b.b2) {
            counts[1].1 += 1;
        }
        if draw.contains(groups.c.c1) && draw.contains(groups.c.c2) {
            counts[2].1 += 1;
        }
    }

    let total = draws.len();
    let (a, b, c) = (
        percent(counts[0].1, total),
        percent(counts[1].1, total),
        percent(counts[2].1, total),
    );
    let mut ranked = counts;
    ranked.sort_by(|x, y| y.1.cmp(&x.1));

    GroupHits {
        a,
        b,
        c,
        prediction: [ranked[0].0, ranked[1].0],
    }
}

/// Statistiques de tendance sur la fenêtre ; `None` avec moins de 2 tirages.
pub fn analyze_patterns(draws: &[Draw], groups: &Groups, thresholds: &Thresholds) -> Option<PatternSummary> {
    if draws.len() < 2 {
        return None;
    }
    let total = draws.len();
    let transitions = total - 1;

    let pacha_rate = percent(draws.iter().filter(|d| d.is_pacha()).count(), total);
    let repetition_rate = percent(
        draws
            .windows(2)
            .filter(|w| shares_two_digits(&w[0], &w[1]))
            .count(),
        transitions,
    );

    let (origin_tally, target_tally) = slot_transitions(draws);
    let (origin_slot, origin_count) = best_of(&origin_tally, Slot::S12);
    let (target_slot, target_count) = best_of(&target_tally, Slot::S34);

    let summary = PatternSummary {
        pacha_rate,
        pacha_prediction: if pacha_rate > thresholds.pacha_percent {
            PachaPrediction::Pacha
        } else {
            PachaPrediction::NoPacha
        },
        repetition_rate,
        repetition_prediction: if repetition_rate > thresholds.repetition_percent {
            RepetitionPrediction::High
        } else {
            RepetitionPrediction::Low
        },
        origin: SlotTrend {
            slot: origin_slot,
            percent: percent(origin_count, transitions),
        },
        target: SlotTrend {
            slot: target_slot,
            percent: percent(target_count, transitions),
        },
        groups: group_hits(draws, groups),
    };
    debug!(
        pacha = summary.pacha_rate,
        repetition = summary.repetition_rate,
        origin = %summary.origin.slot,
        target = %summary.target.slot,
        "motifs analysés"
    );
    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::groups::build_groups;
    use crate::analysis::{digit_frequencies, make_test_draws};

    fn summarize(numbers: &[&str]) -> Option<PatternSummary> {
        let draws = make_test_draws(numbers);
        let freqs = digit_frequencies(&draws);
        let groups = build_groups(&draws, &freqs);
        analyze_patterns(&draws, &groups, &Thresholds::default())
    }

    #[test]
    fn test_requires_two_draws() {
        assert!(summarize(&["1234"]).is_none());
        assert!(summarize(&[]).is_none());
        assert!(summarize(&["1234", "5678"]).is_some());
    }

    #[test]
    fn test_pacha_rate_and_prediction() {
        let s = summarize(&["1123", "4567", "8899", "1234", "5556"]).unwrap();
        assert!((s.pacha_rate - 60.0).abs() < 1e-10);
        assert_eq!(s.pacha_prediction, PachaPrediction::Pacha);

        let s = summarize(&["1123", "4567", "8902", "1234", "5678"]).unwrap();
        assert!((s.pacha_rate - 20.0).abs() < 1e-10);
        assert_eq!(s.pacha_prediction, PachaPrediction::NoPacha);
    }

    #[test]
    fn test_pacha_threshold_is_strict() {
        // 2/5 = 40% exactement : pas de pacha prédit
        let s = summarize(&["1123", "4567", "8899", "1234", "5678"]).unwrap();
        assert!((s.pacha_rate - 40.0).abs() < 1e-10);
        assert_eq!(s.pacha_prediction, PachaPrediction::NoPacha);
    }

    #[test]
    fn test_repetition_uses_distinct_digits() {
        // 1123 / 1456 : un seul chiffre commun, même répété
        let s = summarize(&["1123", "1456"]).unwrap();
        assert!((s.repetition_rate - 0.0).abs() < 1e-10);

        let s = summarize(&["1234", "2190", "5678"]).unwrap();
        assert!((s.repetition_rate - 50.0).abs() < 1e-10);
        assert_eq!(s.repetition_prediction, RepetitionPrediction::High);
    }

    #[test]
    fn test_slot_transitions() {
        // "12" en 12 du précédent réapparaît en 34 du courant
        let draws = make_test_draws(&["5612", "1234"]);
        let (origin, target) = slot_transitions(&draws);
        assert_eq!(origin[0], 1);
        assert_eq!(target[5], 1);
        assert_eq!(origin.iter().sum::<usize>(), 1);
    }

    #[test]
    fn test_slot_trends_best_and_defaults() {
        let s = summarize(&["5612", "1234", "7812", "9034"]).unwrap();
        // 1234 -> 5612 : 12 -> 34 ; 7812 -> 1234 : 34 -> 12 ; 9034 -> 7812 : aucun
        // égalité 12/34 des deux côtés : l'ordre canonique l'emporte
        assert_eq!(s.origin.slot, Slot::S12);
        assert!((s.origin.percent - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(s.target.slot, Slot::S12);

        let s = summarize(&["1234", "5678"]).unwrap();
        assert_eq!(s.origin.slot, Slot::S12);
        assert_eq!(s.target.slot, Slot::S34);
        assert!((s.target.percent - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_group_hits_and_prediction() {
        let draws = make_test_draws(&["1234", "5671", "8925", "1357", "2468"]);
        let freqs = digit_frequencies(&draws);
        let groups = build_groups(&draws, &freqs);
        let s = analyze_patterns(&draws, &groups, &Thresholds::default()).unwrap();
        // A : 1234, 1357 (13), 2468 (24) ; B (5,6) : 5671 ; C (0,8) : aucun
        assert!((s.groups.a - 60.0).abs() < 1e-10);
        assert!((s.groups.b - 20.0).abs() < 1e-10);
        assert!((s.groups.c - 0.0).abs() < 1e-10);
        assert_eq!(s.groups.prediction, [GroupTag::A, GroupTag::B]);
        assert!(s.groups.predicts(GroupTag::A));
        assert!(!s.groups.predicts(GroupTag::C));
    }

    #[test]
    fn test_group_prediction_ties_keep_abc_order() {
        let hits = group_hits(&make_test_draws(&["1234"]), &Groups {
            a: Vec::new(),
            b: crate::analysis::groups::GroupB { b1: 7, b2: 8 },
            c: crate::analysis::groups::group_c(&[], &[0; 10]),
            d: Vec::new(),
        });
        assert_eq!(hits.prediction, [GroupTag::A, GroupTag::B]);
    }
}
