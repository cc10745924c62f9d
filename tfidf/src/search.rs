use crate::explanation::Explanation;
use crate::similarity::SimilarityModel;
use crate::store::IndexReader;
use crate::collectors::{Collector, DocumentMatch};
use crate::query::Query;
use crate::query::weight::Weight;


/// Runs queries against an index reader with one similarity
pub struct Searcher<'a, R: IndexReader + ?Sized> {
    reader: &'a R,
    similarity: SimilarityModel,
}


impl<'a, R: IndexReader + ?Sized> Searcher<'a, R> {
    pub fn new(reader: &'a R, similarity: SimilarityModel) -> Searcher<'a, R> {
        Searcher {
            reader,
            similarity,
        }
    }

    pub fn reader(&self) -> &'a R {
        self.reader
    }

    pub fn similarity(&self) -> SimilarityModel {
        self.similarity
    }

    /// Builds the weight for `query` and normalises it with the query norm
    /// of all its leaves
    pub fn create_normalized_weight(&self, query: &Query) -> Weight {
        let mut weight = query.create_weight(self.reader, self.similarity);
        let sum = weight.value_for_normalization();

        let mut query_norm = self.similarity.query_norm(sum);
        if !query_norm.is_finite() {
            query_norm = 1.0;
        }

        debug!("normalising {} with sum of squared weights {} (queryNorm={})", query, sum, query_norm);
        weight.normalize(query_norm);
        weight
    }

    pub fn search<C: Collector>(&self, query: &Query, collector: &mut C) {
        let weight = self.create_normalized_weight(query);
        let candidates = weight.matching_docs(self.reader);
        let needs_score = collector.needs_score();

        for doc_id in candidates.iter() {
            if let Some(score) = weight.score(self.reader, self.similarity, doc_id) {
                if needs_score {
                    collector.collect(DocumentMatch::new_scored(doc_id, score));
                } else {
                    collector.collect(DocumentMatch::new_unscored(doc_id));
                }
            }
        }
    }

    /// Scores a single document, `None` if it doesn't match
    pub fn score(&self, query: &Query, doc_id: u64) -> Option<f32> {
        self.create_normalized_weight(query).score(self.reader, self.similarity, doc_id)
    }

    /// Explains how `doc_id` was scored. The value at the root is the
    /// document's score.
    pub fn explain(&self, query: &Query, doc_id: u64) -> Explanation {
        self.create_normalized_weight(query).explain(self.reader, self.similarity, doc_id)
    }
}


#[cfg(test)]
mod tests {
    use crate::term::Term;
    use crate::document::Document;
    use crate::analysis::AnalyzerSpec;
    use crate::schema::{FieldType, FieldFlags};
    use crate::similarity::SimilarityModel;
    use crate::store::IndexStore;
    use crate::store::memory::MemoryIndexStore;
    use crate::collectors::top_score::TopScoreCollector;
    use crate::collectors::total_count::TotalCountCollector;
    use crate::query::Query;

    use super::Searcher;

    fn make_test_store() -> MemoryIndexStore {
        let analyzer = AnalyzerSpec::standard();
        let mut store = MemoryIndexStore::new(SimilarityModel::Smoothed);
        let body = store.add_field("body".to_string(), FieldType::Text, FieldFlags::INDEXED | FieldFlags::NORMS).unwrap();

        for (key, text) in [
            ("rust", "Rust is a systems programming language"),
            ("python", "Python is a programming language"),
            ("snake", "A python is a snake"),
            ("crab", "The crab is not a snake"),
        ] {
            let mut doc = Document::new(key.to_string());
            doc.indexed_fields.insert(body, analyzer.analyze(text));
            store.insert_or_update_document(doc);
        }

        store
    }

    #[test]
    fn test_search_ranks_by_score() {
        let store = make_test_store();
        let searcher = Searcher::new(&store, SimilarityModel::Smoothed);
        let query = Query::new_disjunction(vec![
            Query::new_term("body", Term::from_string("python")),
            Query::new_term("body", Term::from_string("snake")),
        ]);

        let mut collector = TopScoreCollector::new(10);
        searcher.search(&query, &mut collector);
        let docs = collector.into_sorted_vec();

        assert_eq!(docs.len(), 3);
        // Only "A python is a snake" matches both terms
        assert_eq!(docs[0].doc_id(), 2);
    }

    #[test]
    fn test_search_count() {
        let store = make_test_store();
        let searcher = Searcher::new(&store, SimilarityModel::Smoothed);

        let mut collector = TotalCountCollector::new();
        searcher.search(&Query::new_term("body", Term::from_string("programming")), &mut collector);

        assert_eq!(collector.total_count(), 2);
    }

    #[test]
    fn test_explain_matches_score() {
        let store = make_test_store();
        let searcher = Searcher::new(&store, SimilarityModel::Smoothed);
        let query = Query::new_disjunction(vec![
            Query::new_term("body", Term::from_string("python")),
            Query::new_term("body", Term::from_string("language")),
        ]);

        for doc_id in 0..4 {
            let explanation = searcher.explain(&query, doc_id);

            match searcher.score(&query, doc_id) {
                Some(score) => {
                    assert!(explanation.is_match());
                    assert_eq!(explanation.value(), score);
                }
                None => assert!(!explanation.is_match()),
            }
        }
    }

    #[test]
    fn test_single_term_query_weight_is_one() {
        let store = make_test_store();
        let searcher = Searcher::new(&store, SimilarityModel::Smoothed);
        let weight = searcher.create_normalized_weight(&Query::new_term("body", Term::from_string("snake")));

        let stats = weight.leaves()[0].stats();
        assert!((stats.query_weight() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_match_none_uses_unit_query_norm() {
        let store = make_test_store();
        let searcher = Searcher::new(&store, SimilarityModel::Smoothed);

        let mut collector = TotalCountCollector::new();
        searcher.search(&Query::MatchNone, &mut collector);

        assert_eq!(collector.total_count(), 0);
        assert!(!searcher.explain(&Query::MatchNone, 0).is_match());
    }
}
