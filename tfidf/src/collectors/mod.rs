//! Collectors receive every matching document of a search, in document id
//! order, and decide what to keep.

pub mod total_count;
pub mod top_score;


/// A matching document, with its score if the collector asked for one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentMatch {
    id: u64,
    score: Option<f32>,
}


impl DocumentMatch {
    pub fn new_unscored(id: u64) -> DocumentMatch {
        DocumentMatch {
            id,
            score: None,
        }
    }

    pub fn new_scored(id: u64, score: f32) -> DocumentMatch {
        DocumentMatch {
            id,
            score: Some(score),
        }
    }

    #[inline]
    pub fn doc_id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn score(&self) -> Option<f32> {
        self.score
    }
}


pub trait Collector {
    /// Whether matches must be scored before they're collected
    fn needs_score(&self) -> bool;

    fn collect(&mut self, doc: DocumentMatch);
}


/// Feeds the same matches to two collectors, so one search can both count
/// and rank
impl<A: Collector, B: Collector> Collector for (A, B) {
    fn needs_score(&self) -> bool {
        self.0.needs_score() || self.1.needs_score()
    }

    fn collect(&mut self, doc: DocumentMatch) {
        self.0.collect(doc);
        self.1.collect(doc);
    }
}
