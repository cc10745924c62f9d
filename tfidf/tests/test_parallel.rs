use rayon::prelude::*;

use tfidf::{Term, Document, Query, Searcher, SimilarityModel};
use tfidf::analysis::AnalyzerSpec;
use tfidf::schema::{FieldType, FieldFlags};
use tfidf::store::{IndexReader, IndexStore};
use tfidf::store::memory::MemoryIndexStore;


#[test]
fn test_parallel_scoring_matches_sequential() {
    let analyzer = AnalyzerSpec::standard();
    let mut store = MemoryIndexStore::new(SimilarityModel::Smoothed);
    let body_field = store.add_field("body".to_string(), FieldType::Text, FieldFlags::INDEXED | FieldFlags::NORMS).unwrap();

    for i in 0..200 {
        let mut doc = Document::new(format!("doc-{}", i));
        let text = match i % 4 {
            0 => "search engines rank documents",
            1 => "documents are ranked by score",
            2 => "a score explains itself",
            _ => "nothing relevant here at all",
        };
        doc.indexed_fields.insert(body_field, analyzer.analyze(&format!("{} {}", text, "search ".repeat(i % 7))));
        store.insert_or_update_document(doc);
    }

    let searcher = Searcher::new(&store, SimilarityModel::Smoothed);
    let query = Query::new_disjunction(vec![
        Query::new_term("body", Term::from_string("search")),
        Query::new_term("body", Term::from_string("score")),
    ]);
    let weight = searcher.create_normalized_weight(&query);
    let doc_ids = (0..store.max_doc()).collect::<Vec<u64>>();

    let sequential = doc_ids.iter()
        .map(|&doc_id| weight.score(&store, SimilarityModel::Smoothed, doc_id))
        .collect::<Vec<_>>();
    let parallel = doc_ids.par_iter()
        .map(|&doc_id| weight.score(&store, SimilarityModel::Smoothed, doc_id))
        .collect::<Vec<_>>();

    assert_eq!(sequential, parallel);
    assert!(parallel.iter().any(|score| score.is_some()));
    assert!(parallel.iter().any(|score| score.is_none()));
}
