//! Statistics consumed by the similarity
//!
//! These are snapshots taken from an index reader for one query. They are
//! never updated in place.

use crate::term::Term;


/// Sentinel for statistics the index couldn't supply
pub const UNKNOWN: i64 = -1;


#[derive(Debug, Clone, PartialEq)]
pub struct TermStatistics {
    pub term: Term,
    /// Number of documents that contain this term in the field
    pub doc_freq: u64,
    /// Total occurrences of this term in the field, or `UNKNOWN`
    pub total_term_freq: i64,
}


impl TermStatistics {
    pub fn new(term: Term, doc_freq: u64, total_term_freq: i64) -> TermStatistics {
        TermStatistics {
            term,
            doc_freq,
            total_term_freq,
        }
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStatistics {
    pub field: String,
    /// Upper bound on document ids, deleted documents included
    pub max_doc: u64,
    /// Number of documents with at least one term in the field, or `UNKNOWN`
    pub doc_count: i64,
    pub sum_total_term_freq: i64,
    pub sum_doc_freq: i64,
}


impl CollectionStatistics {
    pub fn new(field: String, max_doc: u64, doc_count: i64, sum_total_term_freq: i64, sum_doc_freq: i64) -> CollectionStatistics {
        CollectionStatistics {
            field,
            max_doc,
            doc_count,
            sum_total_term_freq,
            sum_doc_freq,
        }
    }

    /// The document count used by idf.
    ///
    /// Falls back to `max_doc` when the index doesn't track per-field doc counts.
    pub fn effective_doc_count(&self) -> u64 {
        if self.doc_count == UNKNOWN {
            self.max_doc
        } else {
            self.doc_count as u64
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{CollectionStatistics, UNKNOWN};

    #[test]
    fn test_effective_doc_count() {
        let stats = CollectionStatistics::new("content".to_string(), 120, 100, 5000, 900);

        assert_eq!(stats.effective_doc_count(), 100);
    }

    #[test]
    fn test_effective_doc_count_unknown_uses_max_doc() {
        let stats = CollectionStatistics::new("content".to_string(), 120, UNKNOWN, UNKNOWN, UNKNOWN);

        assert_eq!(stats.effective_doc_count(), 120);
        assert_eq!(stats.effective_doc_count(), 120);
    }
}
