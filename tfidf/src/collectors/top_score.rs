use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::collectors::{Collector, DocumentMatch};


/// Heap entry. Ordered worst first so the heap's top is the next to evict.
#[derive(Debug, Copy, Clone)]
struct Ranked {
    doc_id: u64,
    score: f32,
}


impl Ord for Ranked {
    fn cmp(&self, other: &Ranked) -> Ordering {
        // Lower score is worse. On equal scores the higher id is worse.
        other.score.total_cmp(&self.score).then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Ranked) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Ranked) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}


/// Keeps the `limit` highest scoring documents
#[derive(Debug)]
pub struct TopScoreCollector {
    limit: usize,
    ranked: BinaryHeap<Ranked>,
}


impl TopScoreCollector {
    pub fn new(limit: usize) -> TopScoreCollector {
        TopScoreCollector {
            limit,
            ranked: BinaryHeap::with_capacity(limit),
        }
    }

    /// Collected documents, best first
    pub fn into_sorted_vec(self) -> Vec<DocumentMatch> {
        self.ranked.into_sorted_vec()
            .into_iter()
            .map(|ranked| DocumentMatch::new_scored(ranked.doc_id, ranked.score))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}


impl Collector for TopScoreCollector {
    fn needs_score(&self) -> bool {
        true
    }

    fn collect(&mut self, doc: DocumentMatch) {
        let score = match doc.score() {
            Some(score) if !score.is_nan() => score,
            _ => {
                warn!("skipping document {} with missing or NaN score", doc.doc_id());
                return;
            }
        };

        let candidate = Ranked { doc_id: doc.doc_id(), score };

        if self.ranked.len() < self.limit {
            self.ranked.push(candidate);
        } else if let Some(mut worst) = self.ranked.peek_mut() {
            if candidate < *worst {
                *worst = candidate;
            }
        }
    }
}
