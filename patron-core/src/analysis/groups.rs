use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::{compute_digit_stats, digit_delay};
use crate::models::{DigitStat, Draw, Pair, Slot};

/// Entrée du groupe A : une paire du dernier tirage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairCandidate {
    pub pair: Pair,
    /// Somme des fréquences des deux chiffres.
    pub frequency: u32,
    /// Occurrences de la paire, toutes positions confondues, dans la fenêtre.
    pub occurrences: u32,
    pub slot: Slot,
}

/// Chiffres « de rattrapage » : vus dans les 2e et 3e tirages mais pas dans le dernier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupB {
    pub b1: u8,
    pub b2: u8,
}

impl GroupB {
    pub fn pair(&self) -> Pair {
        Pair(self.b1, self.b2)
    }
}

/// Chiffres classés par retard décroissant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupC {
    pub c1: u8,
    pub c2: u8,
    /// Ordre 0-9, pour l'affichage.
    pub all: Vec<DigitStat>,
    pub ranked: Vec<DigitStat>,
}

impl GroupC {
    pub fn pair(&self) -> Pair {
        Pair(self.c1, self.c2)
    }

    pub fn delay_of(&self, digit: u8) -> Option<u32> {
        self.all.iter().find(|s| s.digit == digit).map(|s| s.delay)
    }
}

/// Entrée du groupe D : combinaison des groupes B et C.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayPair {
    pub pair: Pair,
    /// Somme des retards des deux chiffres ; sert de score.
    pub delay: u32,
    pub slot: Slot,
    pub occurrences: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Groups {
    pub a: Vec<PairCandidate>,
    pub b: GroupB,
    pub c: GroupC,
    pub d: Vec<DelayPair>,
}

/// Un seul passage : pour chaque paire, compteur par position (ordre de `Slot::ALL`).
fn pair_slot_counts(draws: &[Draw]) -> HashMap<Pair, [u32; 6]> {
    let mut counts: HashMap<Pair, [u32; 6]> = HashMap::new();
    for draw in draws {
        for (i, &slot) in Slot::ALL.iter().enumerate() {
            counts.entry(draw.pair_at(slot)).or_insert([0; 6])[i] += 1;
        }
    }
    counts
}

fn occurrences(counts: &HashMap<Pair, [u32; 6]>, pair: Pair) -> u32 {
    counts.get(&pair).map(|c| c.iter().sum()).unwrap_or(0)
}

/// Position la plus fréquente (égalité : ordre canonique) ; 12 si jamais vue.
fn best_slot(counts: Option<&[u32; 6]>) -> Slot {
    let Some(counts) = counts else {
        return Slot::S12;
    };
    let mut best = 0usize;
    for i in 1..counts.len() {
        if counts[i] > counts[best] {
            best = i;
        }
    }
    if counts[best] == 0 {
        return Slot::S12;
    }
    Slot::ALL[best]
}

fn repeated_digit(draw: &Draw) -> Option<u8> {
    (0..10u8).find(|&d| draw.count(d) >= 2)
}

pub fn group_a(draws: &[Draw], freqs: &[u32; 10]) -> Vec<PairCandidate> {
    let Some(latest) = draws.first() else {
        return Vec::new();
    };
    let counts = pair_slot_counts(draws);

    let mut ranked: Vec<PairCandidate> = Slot::ALL
        .iter()
        .map(|&slot| {
            let pair = latest.pair_at(slot);
            PairCandidate {
                pair,
                frequency: freqs[pair.0 as usize] + freqs[pair.1 as usize],
                occurrences: occurrences(&counts, pair),
                slot,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    if let Some(digit) = repeated_digit(latest) {
        let pair = Pair::doubled(digit);
        if !ranked.iter().any(|c| c.pair == pair) {
            let doubled_draws = draws.iter().filter(|d| d.count(digit) >= 2).count();
            ranked.insert(
                0,
                PairCandidate {
                    pair,
                    frequency: freqs[digit as usize] * 2,
                    occurrences: doubled_draws as u32,
                    slot: Slot::S12,
                },
            );
        }
    }

    ranked.truncate(6);
    ranked
}

pub fn group_b(draws: &[Draw], freqs: &[u32; 10]) -> GroupB {
    if draws.len() < 3 {
        return GroupB { b1: 0, b2: 1 };
    }
    let latest = &draws[0];

    let mut candidates: Vec<u8> = Vec::new();
    for &d in draws[1].digits.iter().chain(draws[2].digits.iter()) {
        if !latest.contains(d) && !candidates.contains(&d) {
            candidates.push(d);
        }
    }
    candidates.sort_by(|a, b| freqs[*b as usize].cmp(&freqs[*a as usize]));

    GroupB {
        b1: candidates.first().copied().unwrap_or(0),
        b2: candidates.get(1).copied().unwrap_or(1),
    }
}

pub fn group_c(draws: &[Draw], freqs: &[u32; 10]) -> GroupC {
    let all = compute_digit_stats(draws, freqs);
    let mut ranked = all.clone();
    ranked.sort_by(|a, b| b.delay.cmp(&a.delay));

    GroupC {
        c1: ranked[0].digit,
        c2: ranked[1].digit,
        all,
        ranked,
    }
}

pub fn group_d(b: &GroupB, c: &GroupC, draws: &[Draw]) -> Vec<DelayPair> {
    let delay = |d: u8| digit_delay(draws, d);
    let combos = [
        Pair(b.b1, c.c1),
        Pair(b.b1, c.c2),
        Pair(b.b2, c.c1),
        Pair(b.b2, c.c2),
        Pair(b.b1, b.b2),
        Pair(c.c1, c.c2),
    ];

    let mut scored: Vec<(Pair, u32)> = combos
        .iter()
        .map(|&p| (p, delay(p.0) + delay(p.1)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let counts = pair_slot_counts(draws);
    scored
        .into_iter()
        .map(|(pair, delay)| DelayPair {
            pair,
            delay,
            slot: best_slot(counts.get(&pair)),
            occurrences: occurrences(&counts, pair),
        })
        .collect()
}

pub fn build_groups(draws: &[Draw], freqs: &[u32; 10]) -> Groups {
    let a = group_a(draws, freqs);
    let b = group_b(draws, freqs);
    let c = group_c(draws, freqs);
    let d = group_d(&b, &c, draws);
    debug!(
        group_a = a.len(),
        b = %b.pair(),
        c = %c.pair(),
        "groupes construits"
    );
    Groups { a, b, c, d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{digit_frequencies, make_test_draws};

    fn sample() -> (Vec<Draw>, [u32; 10]) {
        let draws = make_test_draws(&["1234", "5671", "8925", "1357", "2468"]);
        let freqs = digit_frequencies(&draws);
        (draws, freqs)
    }

    fn pairs(list: &[Pair]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_group_a_ranking() {
        let (draws, freqs) = sample();
        let a = group_a(&draws, &freqs);
        let got: Vec<Pair> = a.iter().map(|c| c.pair).collect();
        assert_eq!(pairs(&got), vec!["12", "13", "14", "23", "24", "34"]);
        assert_eq!(a[0].frequency, 6);
        assert_eq!(a[1].frequency, 5);
        assert_eq!(a[5].frequency, 4);
        assert_eq!(a[1].slot, Slot::S13);
    }

    #[test]
    fn test_group_a_occurrences_any_slot() {
        let (draws, freqs) = sample();
        let a = group_a(&draws, &freqs);
        let find = |s: &str| a.iter().find(|c| c.pair.to_string() == s).unwrap().occurrences;
        // "13" : position 13 de 1234 et position 12 de 1357
        assert_eq!(find("13"), 2);
        assert_eq!(find("24"), 2);
        assert_eq!(find("12"), 1);
    }

    #[test]
    fn test_group_a_pacha_not_duplicated() {
        let draws = make_test_draws(&["1213", "4567", "8901"]);
        let freqs = digit_frequencies(&draws);
        let a = group_a(&draws, &freqs);
        assert_eq!(a.len(), 6);
        let doubled = a.iter().filter(|c| c.pair == Pair(1, 1)).count();
        assert_eq!(doubled, 1);
    }

    #[test]
    fn test_group_a_empty_history() {
        assert!(group_a(&[], &[0; 10]).is_empty());
    }

    #[test]
    fn test_group_b_rescue_digits() {
        let (draws, freqs) = sample();
        assert_eq!(group_b(&draws, &freqs), GroupB { b1: 5, b2: 6 });
    }

    #[test]
    fn test_group_b_short_history_fallback() {
        let draws = make_test_draws(&["1234", "5678"]);
        let freqs = digit_frequencies(&draws);
        assert_eq!(group_b(&draws, &freqs), GroupB { b1: 0, b2: 1 });
    }

    #[test]
    fn test_group_b_partial_fallback() {
        // Seul le 9 n'est pas dans le dernier tirage
        let draws = make_test_draws(&["1234", "1239", "4321"]);
        let freqs = digit_frequencies(&draws);
        assert_eq!(group_b(&draws, &freqs), GroupB { b1: 9, b2: 1 });
    }

    #[test]
    fn test_group_c_ranking() {
        let (draws, freqs) = sample();
        let c = group_c(&draws, &freqs);
        assert_eq!((c.c1, c.c2), (0, 8));
        assert_eq!(c.delay_of(0), Some(6));
        assert_eq!(c.delay_of(1), Some(1));
        let order: Vec<u8> = c.ranked.iter().map(|s| s.digit).collect();
        assert_eq!(order, vec![0, 8, 9, 5, 6, 7, 1, 2, 3, 4]);
        let all: Vec<u8> = c.all.iter().map(|s| s.digit).collect();
        assert_eq!(all, (0..10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_group_d_scores_and_slots() {
        let (draws, freqs) = sample();
        let b = group_b(&draws, &freqs);
        let c = group_c(&draws, &freqs);
        let d = group_d(&b, &c, &draws);
        let got: Vec<Pair> = d.iter().map(|e| e.pair).collect();
        assert_eq!(pairs(&got), vec!["08", "50", "60", "58", "68", "56"]);
        let delays: Vec<u32> = d.iter().map(|e| e.delay).collect();
        assert_eq!(delays, vec![9, 8, 8, 5, 5, 4]);

        assert_eq!(d[0].slot, Slot::S12);
        assert_eq!(d[0].occurrences, 0);
        // "68" en position 34 de 2468
        assert_eq!(d[4].slot, Slot::S34);
        assert_eq!(d[4].occurrences, 1);
        assert_eq!(d[5].slot, Slot::S12);
        assert_eq!(d[5].occurrences, 1);
    }

    #[test]
    fn test_best_slot_tie_uses_canonical_order() {
        assert_eq!(best_slot(Some(&[0, 0, 2, 0, 2, 0])), Slot::S14);
        assert_eq!(best_slot(Some(&[0; 6])), Slot::S12);
        assert_eq!(best_slot(None), Slot::S12);
    }

    #[test]
    fn test_build_groups_is_deterministic() {
        let (draws, freqs) = sample();
        assert_eq!(build_groups(&draws, &freqs), build_groups(&draws, &freqs));
    }
}
