use super::groups::{DelayPair, PairCandidate};
use crate::models::{Candidate, Pair, Slot};

/// Combine deux paires en un numéro à 4 chiffres.
///
/// `p1` occupe les positions de `slot1`. Les chiffres de `p2` vont dans les
/// positions libres de `slot2` (même rang relatif). Les positions encore vides
/// sont remplies de gauche à droite avec les chiffres de `p2` non consommés ;
/// ce qui reste vide devient 0.
pub fn combine_pairs(p1: Pair, slot1: Slot, p2: Pair, slot2: Slot) -> Candidate {
    let mut res: [Option<u8>; 4] = [None; 4];

    let (i, j) = slot1.indices();
    res[i] = Some(p1.0);
    res[j] = Some(p1.1);

    let p2_digits = p2.digits();
    let (k, l) = slot2.indices();
    for (rank, idx) in [k, l].into_iter().enumerate() {
        if res[idx].is_none() {
            res[idx] = Some(p2_digits[rank]);
        }
    }

    // La liste de reste n'est pas réduite par le placement ci-dessus.
    let mut remaining: Vec<u8> = p2_digits.to_vec();
    for idx in 0..4 {
        if res[idx].is_some() {
            continue;
        }
        let used: Vec<u8> = res.iter().flatten().copied().collect();
        let pick = remaining.iter().copied().find(|&d| {
            let in_remaining = remaining.iter().filter(|&&x| x == d).count();
            let in_used = used.iter().filter(|&&x| x == d).count();
            in_used == 0 || in_remaining > in_used
        });
        if let Some(d) = pick {
            res[idx] = Some(d);
            if let Some(pos) = remaining.iter().position(|&x| x == d) {
                remaining.remove(pos);
            }
        }
    }

    Candidate(res.map(|d| d.unwrap_or(0)))
}

/// Lignes : groupe A ; colonnes : groupe D.
pub fn generate_matrix(group_a: &[PairCandidate], group_d: &[DelayPair]) -> Vec<Vec<Candidate>> {
    group_a
        .iter()
        .map(|a| {
            group_d
                .iter()
                .map(|d| combine_pairs(a.pair, a.slot, d.pair, d.slot))
                .collect()
        })
        .collect()
}

pub fn diagonal(matrix: &[Vec<Candidate>]) -> Vec<Candidate> {
    matrix
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.get(i).copied())
        .collect()
}

/// Cellules en ordre ligne par ligne, sans doublons (première occurrence conservée).
pub fn distinct_cells(matrix: &[Vec<Candidate>]) -> Vec<Candidate> {
    let mut pool: Vec<Candidate> = Vec::new();
    for &cell in matrix.iter().flatten() {
        if !pool.contains(&cell) {
            pool.push(cell);
        }
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combine(p1: &str, s1: &str, p2: &str, s2: &str) -> String {
        let pair = |s: &str| {
            let b = s.as_bytes();
            Pair(b[0] - b'0', b[1] - b'0')
        };
        combine_pairs(
            pair(p1),
            Slot::from_label(s1).unwrap(),
            pair(p2),
            Slot::from_label(s2).unwrap(),
        )
        .to_string()
    }

    #[test]
    fn test_combine_disjoint_slots() {
        assert_eq!(combine("12", "12", "34", "34"), "1234");
        assert_eq!(combine("12", "14", "34", "23"), "1342");
    }

    #[test]
    fn test_combine_full_overlap_fills_left_to_right() {
        assert_eq!(combine("12", "12", "34", "12"), "1234");
        assert_eq!(combine("56", "34", "78", "34"), "7856");
    }

    #[test]
    fn test_combine_partial_overlap() {
        // position 2 prise par p1 : le 4 va en 3, puis le 3 complète
        assert_eq!(combine("12", "12", "34", "23"), "1243");
        // le chiffre de même rang relatif est utilisé, pas le premier
        assert_eq!(combine("13", "13", "08", "12"), "1830");
    }

    #[test]
    fn test_combine_shared_digits_leave_zero() {
        // p2 n'a rien de neuf à proposer
        assert_eq!(combine("12", "12", "12", "12"), "1200");
        assert_eq!(combine("12", "12", "21", "12"), "1200");
    }

    #[test]
    fn test_combine_repeated_p2_digit() {
        assert_eq!(combine("11", "12", "11", "34"), "1111");
        // un seul 1 déjà placé, p2 en contient deux
        assert_eq!(combine("12", "12", "11", "12"), "1210");
    }

    #[test]
    fn test_combine_all_slot_combinations() {
        for s1 in Slot::ALL {
            for s2 in Slot::ALL {
                let c = combine_pairs(Pair(1, 2), s1, Pair(3, 4), s2);
                let text = c.to_string();
                assert_eq!(text.len(), 4, "{s1}/{s2} -> {text}");
                assert!(text.chars().all(|ch| ch.is_ascii_digit()));

                let (i, j) = s1.indices();
                assert_eq!(c.digits()[i], 1, "{s1}/{s2} -> {text}");
                assert_eq!(c.digits()[j], 2, "{s1}/{s2} -> {text}");

                let mut sorted = *c.digits();
                sorted.sort();
                assert_eq!(sorted, [1, 2, 3, 4], "{s1}/{s2} -> {text}");

                let (k, l) = s2.indices();
                if ![k, l].contains(&i) && ![k, l].contains(&j) {
                    assert_eq!(c.digits()[k], 3);
                    assert_eq!(c.digits()[l], 4);
                }
            }
        }
    }

    #[test]
    fn test_generate_matrix_shape() {
        let a: Vec<PairCandidate> = Slot::ALL
            .iter()
            .map(|&slot| PairCandidate { pair: Pair(1, 2), frequency: 0, occurrences: 0, slot })
            .collect();
        let d: Vec<DelayPair> = Slot::ALL
            .iter()
            .map(|&slot| DelayPair { pair: Pair(5, 6), delay: 0, slot, occurrences: 0 })
            .collect();
        let matrix = generate_matrix(&a[..4], &d);
        assert_eq!(matrix.len(), 4);
        assert!(matrix.iter().all(|row| row.len() == 6));
        assert!(matrix.iter().flatten().all(|c| c.to_string().len() == 4));
        assert_eq!(matrix[0][5], combine_pairs(Pair(1, 2), Slot::S12, Pair(5, 6), Slot::S34));
    }

    #[test]
    fn test_diagonal_and_distinct_cells() {
        let c = |n: u8| Candidate([n, n, n, n]);
        let matrix = vec![vec![c(1), c(2), c(1)], vec![c(3), c(4), c(2)]];
        assert_eq!(diagonal(&matrix), vec![c(1), c(4)]);
        assert_eq!(distinct_cells(&matrix), vec![c(1), c(2), c(3), c(4)]);
        assert!(diagonal(&[]).is_empty());
    }
}
