use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PatronError, Result};

/// Vrai si les chiffres contiennent au moins une répétition (« pacha »).
pub fn check_pacha(digits: &[u8]) -> bool {
    let mut seen = [false; 10];
    for &d in digits {
        let idx = d as usize;
        if idx < seen.len() {
            if seen[idx] {
                return true;
            }
            seen[idx] = true;
        }
    }
    false
}

/// Un résultat historique à 4 chiffres. `history[0]` = le plus récent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draw {
    pub digits: [u8; 4],
    pub full: String,
}

impl Draw {
    pub fn new(digits: [u8; 4]) -> Result<Self> {
        validate_digits(&digits)?;
        let full = digits.iter().map(|d| char::from(b'0' + d)).collect();
        Ok(Self { digits, full })
    }

    pub fn contains(&self, digit: u8) -> bool {
        self.digits.contains(&digit)
    }

    pub fn pair_at(&self, slot: Slot) -> Pair {
        let (i, j) = slot.indices();
        Pair(self.digits[i], self.digits[j])
    }

    pub fn is_pacha(&self) -> bool {
        check_pacha(&self.digits)
    }

    /// Nombre d'occurrences d'un chiffre dans le tirage.
    pub fn count(&self, digit: u8) -> usize {
        self.digits.iter().filter(|&&d| d == digit).count()
    }
}

pub fn validate_digits(digits: &[u8; 4]) -> Result<()> {
    for &d in digits {
        if d > 9 {
            return Err(PatronError::InvalidDraw(format!("chiffre {} hors limites (0-9)", d)));
        }
    }
    Ok(())
}

/// Les six façons de choisir 2 positions parmi 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "12")]
    S12,
    #[serde(rename = "13")]
    S13,
    #[serde(rename = "14")]
    S14,
    #[serde(rename = "23")]
    S23,
    #[serde(rename = "24")]
    S24,
    #[serde(rename = "34")]
    S34,
}

impl Slot {
    /// Ordre canonique, utilisé aussi pour départager les égalités.
    pub const ALL: [Slot; 6] = [Slot::S12, Slot::S13, Slot::S14, Slot::S23, Slot::S24, Slot::S34];

    pub fn indices(self) -> (usize, usize) {
        match self {
            Slot::S12 => (0, 1),
            Slot::S13 => (0, 2),
            Slot::S14 => (0, 3),
            Slot::S23 => (1, 2),
            Slot::S24 => (1, 3),
            Slot::S34 => (2, 3),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::S12 => "12",
            Slot::S13 => "13",
            Slot::S14 => "14",
            Slot::S23 => "23",
            Slot::S24 => "24",
            Slot::S34 => "34",
        }
    }

    pub fn from_label(label: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deux chiffres, affichés comme une chaîne de 2 caractères.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Pair(pub u8, pub u8);

impl Pair {
    pub fn doubled(digit: u8) -> Self {
        Pair(digit, digit)
    }

    pub fn digits(self) -> [u8; 2] {
        [self.0, self.1]
    }

    pub fn contains(self, digit: u8) -> bool {
        self.0 == digit || self.1 == digit
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl From<Pair> for String {
    fn from(pair: Pair) -> Self {
        pair.to_string()
    }
}

/// Un numéro à 4 chiffres synthétisé par la matrice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Candidate(pub [u8; 4]);

impl Candidate {
    pub fn digits(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn is_pacha(&self) -> bool {
        check_pacha(&self.0)
    }

    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }

    pub fn head(&self) -> Pair {
        Pair(self.0[0], self.0[1])
    }

    pub fn tail(&self) -> Pair {
        Pair(self.0[2], self.0[3])
    }

    /// Nombre de positions identiques avec un tirage.
    pub fn positional_matches(&self, draw: &Draw) -> usize {
        self.0
            .iter()
            .zip(draw.digits.iter())
            .filter(|(a, b)| a == b)
            .count()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.0 {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl From<Candidate> for String {
    fn from(candidate: Candidate) -> Self {
        candidate.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigitStat {
    pub digit: u8,
    pub frequency: u32,
    pub delay: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_pacha() {
        assert!(!check_pacha(&[1, 2, 3, 4]));
        assert!(check_pacha(&[1, 1, 2, 3]));
        assert!(check_pacha(&[5, 5, 5, 5]));
        assert!(check_pacha(&[1, 2, 3, 1]));
    }

    #[test]
    fn test_draw_new_full_string() {
        let draw = Draw::new([0, 4, 0, 9]).unwrap();
        assert_eq!(draw.full, "0409");
        assert!(draw.is_pacha());
        assert_eq!(draw.count(0), 2);
    }

    #[test]
    fn test_draw_new_out_of_range() {
        assert!(Draw::new([1, 2, 3, 10]).is_err());
    }

    #[test]
    fn test_pair_at_slots() {
        let draw = Draw::new([1, 2, 3, 4]).unwrap();
        let pairs: Vec<String> = Slot::ALL.iter().map(|&s| draw.pair_at(s).to_string()).collect();
        assert_eq!(pairs, vec!["12", "13", "14", "23", "24", "34"]);
    }

    #[test]
    fn test_slot_labels_roundtrip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_label(slot.label()), Some(slot));
        }
        assert_eq!(Slot::from_label("21"), None);
    }

    #[test]
    fn test_slot_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Slot::S34).unwrap(), "\"34\"");
    }

    #[test]
    fn test_candidate_helpers() {
        let c = Candidate([1, 2, 3, 4]);
        assert_eq!(c.to_string(), "1234");
        assert_eq!(c.head(), Pair(1, 2));
        assert_eq!(c.tail(), Pair(3, 4));
        let draw = Draw::new([1, 2, 3, 9]).unwrap();
        assert_eq!(c.positional_matches(&draw), 3);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"1234\"");
    }
}
