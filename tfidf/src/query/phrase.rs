//! Phrase frequency
//!
//! Every term of a phrase has an offset from the first term. A phrase
//! occurrence starts at each position of the first term and picks one
//! position per remaining term, in order. Subtracting each term's offset
//! from its position gives where the phrase would have started had that
//! term been in place. The spread of those starts is the match length, and
//! an occurrence counts when the match length is within the slop.

use crate::similarity::SimilarityModel;


/// Position of `positions` nearest to `target`, strictly after `previous`
fn nearest_position(positions: &[u32], previous: i64, target: i64) -> Option<i64> {
    let lower_bound = target.max(previous + 1);
    let index = positions.partition_point(|&position| (position as i64) < lower_bound);

    let after = positions.get(index).map(|&position| position as i64);
    let before = if index > 0 {
        Some(positions[index - 1] as i64).filter(|&position| position > previous)
    } else {
        None
    };

    match (before, after) {
        (Some(before), Some(after)) => {
            if target - before <= after - target {
                Some(before)
            } else {
                Some(after)
            }
        }
        (before, after) => before.or(after),
    }
}


/// Counts exact occurrences of the phrase
pub fn exact_phrase_freq(positions: &[&[u32]], offsets: &[u32]) -> f32 {
    let (first, rest) = match positions.split_first() {
        Some(split) => split,
        None => return 0.0,
    };

    let mut freq = 0.0;
    for &start in first.iter() {
        let base = start as i64 - offsets[0] as i64;

        let all_present = rest.iter().zip(offsets[1..].iter()).all(|(term_positions, &offset)| {
            let wanted = base + offset as i64;
            wanted >= 0 && term_positions.binary_search(&(wanted as u32)).is_ok()
        });

        if all_present {
            freq += 1.0;
        }
    }

    freq
}


/// Sums `sloppy_freq(match length)` over every in-order occurrence of the
/// phrase whose match length is at most `slop`
pub fn sloppy_phrase_freq(similarity: SimilarityModel, positions: &[&[u32]], offsets: &[u32], slop: u32) -> f32 {
    let (first, rest) = match positions.split_first() {
        Some(split) => split,
        None => return 0.0,
    };

    let mut freq = 0.0;
    'starts: for &start in first.iter() {
        let base = start as i64 - offsets[0] as i64;
        let mut previous = start as i64;
        let mut min_start = base;
        let mut max_start = base;

        for (term_positions, &offset) in rest.iter().zip(offsets[1..].iter()) {
            let position = match nearest_position(term_positions, previous, base + offset as i64) {
                Some(position) => position,
                None => continue 'starts,
            };

            let term_start = position - offset as i64;
            min_start = min_start.min(term_start);
            max_start = max_start.max(term_start);
            previous = position;
        }

        let match_length = max_start - min_start;
        if match_length <= slop as i64 {
            freq += similarity.sloppy_freq(match_length as u32);
        }
    }

    freq
}


/// Phrase frequency for a document, given the positions of each phrase
/// term in the document and each term's offset within the phrase
pub fn phrase_freq(similarity: SimilarityModel, positions: &[&[u32]], offsets: &[u32], slop: u32) -> f32 {
    if positions.iter().any(|term_positions| term_positions.is_empty()) {
        return 0.0;
    }

    if slop == 0 {
        exact_phrase_freq(positions, offsets)
    } else {
        sloppy_phrase_freq(similarity, positions, offsets, slop)
    }
}


#[cfg(test)]
mod tests {
    use crate::similarity::SimilarityModel;

    use super::{phrase_freq, nearest_position};

    const SIM: SimilarityModel = SimilarityModel::Smoothed;

    #[test]
    fn test_nearest_position() {
        assert_eq!(nearest_position(&[1, 5, 9], 0, 4), Some(5));
        assert_eq!(nearest_position(&[1, 3, 9], 0, 4), Some(3));
        assert_eq!(nearest_position(&[1, 3, 9], 3, 4), Some(9));
        assert_eq!(nearest_position(&[1, 3], 3, 4), None);
    }

    #[test]
    fn test_exact_phrase() {
        // "a b c a b c"
        let a: &[u32] = &[1, 4];
        let b: &[u32] = &[2, 5];
        let c: &[u32] = &[3, 6];

        assert_eq!(phrase_freq(SIM, &[a, b, c], &[0, 1, 2], 0), 2.0);
        assert_eq!(phrase_freq(SIM, &[c, a], &[0, 1], 0), 1.0);
    }

    #[test]
    fn test_exact_phrase_with_gap() {
        // "a the b" with the stop word removed
        let a: &[u32] = &[1];
        let b: &[u32] = &[3];

        assert_eq!(phrase_freq(SIM, &[a, b], &[0, 2], 0), 1.0);
        assert_eq!(phrase_freq(SIM, &[a, b], &[0, 1], 0), 0.0);
    }

    #[test]
    fn test_sloppy_phrase() {
        // "a x b c"
        let a: &[u32] = &[1];
        let b: &[u32] = &[3];
        let c: &[u32] = &[4];

        assert_eq!(phrase_freq(SIM, &[a, b, c], &[0, 1, 2], 0), 0.0);
        assert_eq!(phrase_freq(SIM, &[a, b, c], &[0, 1, 2], 1), 0.5);
        assert_eq!(phrase_freq(SIM, &[a, b, c], &[0, 1, 2], 5), 0.5);
    }

    #[test]
    fn test_sloppy_phrase_exact_match_scores_one() {
        let a: &[u32] = &[1];
        let b: &[u32] = &[2];

        assert_eq!(phrase_freq(SIM, &[a, b], &[0, 1], 3), 1.0);
    }

    #[test]
    fn test_sloppy_phrase_is_ordered() {
        // "b a"
        let a: &[u32] = &[2];
        let b: &[u32] = &[1];

        assert_eq!(phrase_freq(SIM, &[a, b], &[0, 1], 10), 0.0);
    }

    #[test]
    fn test_missing_term() {
        let a: &[u32] = &[1];
        let b: &[u32] = &[];

        assert_eq!(phrase_freq(SIM, &[a, b], &[0, 1], 2), 0.0);
    }
}
