use std::fmt::Write;

use serde_json::Value;
use tfidf::{Explanation, Query, Searcher};
use tfidf::collectors::top_score::TopScoreCollector;
use tfidf::collectors::total_count::TotalCountCollector;
use tfidf::store::IndexReader;

use crate::indexer::HtmlFields;


#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub doc_id: u64,
    pub score: f32,
    pub path: String,
    pub title: String,
    pub explanation: Option<Explanation>,
}


#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub query: String,
    pub total: u64,
    pub hits: Vec<Hit>,
}


impl SearchResults {
    pub fn to_json(&self) -> Value {
        let hits = self.hits.iter().map(|hit| {
            let mut json = json!({
                "doc_id": hit.doc_id,
                "score": hit.score,
                "path": hit.path,
                "title": hit.title,
            });

            if let Some(ref explanation) = hit.explanation {
                json["explanation"] = explanation.to_json();
            }

            json
        }).collect::<Vec<Value>>();

        json!({
            "query": self.query,
            "total": self.total,
            "hits": hits,
        })
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "{} ({} matching documents)", self.query, self.total);

        for (rank, hit) in self.hits.iter().enumerate() {
            let _ = writeln!(text, "{:>3}. {:.4}  {}  {}", rank + 1, hit.score, hit.path, hit.title);

            if let Some(ref explanation) = hit.explanation {
                for line in explanation.to_string().lines() {
                    let _ = writeln!(text, "       {}", line);
                }
            }
        }

        text
    }
}


/// Runs `query`, keeping the `top` best hits
pub fn run_query<R: IndexReader + ?Sized>(searcher: &Searcher<R>, fields: &HtmlFields, query_text: &str, query: &Query, top: usize, explain: bool) -> SearchResults {
    let reader = searcher.reader();

    let mut collectors = (TotalCountCollector::new(), TopScoreCollector::new(top));
    searcher.search(query, &mut collectors);
    let (total, top_docs) = collectors;

    let hits = top_docs.into_sorted_vec().into_iter().map(|doc| {
        let doc_id = doc.doc_id();

        Hit {
            doc_id,
            score: doc.score().unwrap_or(0.0),
            path: reader.stored_value(doc_id, fields.path).unwrap_or_default().to_string(),
            title: reader.stored_value(doc_id, fields.title).unwrap_or_default().to_string(),
            explanation: if explain { Some(searcher.explain(query, doc_id)) } else { None },
        }
    }).collect();

    SearchResults {
        query: query_text.to_string(),
        total: total.total_count(),
        hits,
    }
}
