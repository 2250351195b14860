pub mod backtest;
pub mod groups;
pub mod matrix;
pub mod patterns;
pub mod scoring;

use crate::models::{DigitStat, Draw};
use crate::parse::parse_draws;

/// Occurrences de chaque chiffre 0-9 ; les doublons dans un tirage comptent deux fois.
pub fn digit_frequencies(draws: &[Draw]) -> [u32; 10] {
    let mut freqs = [0u32; 10];
    for draw in draws {
        for &d in &draw.digits {
            freqs[d as usize] += 1;
        }
    }
    freqs
}

/// Chiffre le plus fréquent (égalité : le plus petit).
pub fn top_frequency_digit(freqs: &[u32; 10]) -> u8 {
    let mut best = 0usize;
    for d in 1..freqs.len() {
        if freqs[d] > freqs[best] {
            best = d;
        }
    }
    best as u8
}

/// Retard (« racha ») : rang 1-based du premier tirage contenant le chiffre,
/// `draws.len() + 1` s'il n'apparaît jamais.
pub fn digit_delay(draws: &[Draw], digit: u8) -> u32 {
    draws
        .iter()
        .position(|d| d.contains(digit))
        .map(|i| i as u32 + 1)
        .unwrap_or(draws.len() as u32 + 1)
}

pub fn compute_digit_stats(draws: &[Draw], freqs: &[u32; 10]) -> Vec<DigitStat> {
    (0..10u8)
        .map(|digit| DigitStat {
            digit,
            frequency: freqs[digit as usize],
            delay: digit_delay(draws, digit),
        })
        .collect()
}

/// Construit un historique à partir de chaînes (le plus récent en premier).
pub fn make_test_draws(numbers: &[&str]) -> Vec<Draw> {
    parse_draws(&numbers.join("\n"))
}
