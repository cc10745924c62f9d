//! Vector space (TF-IDF) similarity
//!
//! A document's score for a term is the product of a query side weight and a
//! document side weight:
//!
//! ```text
//! score(q, d) = queryWeight(t) * fieldWeight(t, d)
//! queryWeight(t) = boost * idf(t) * queryNorm
//! fieldWeight(t, d) = tf(freq) * idf(t) * fieldNorm(d)
//! ```
//!
//! `IdfStats` holds everything on the query side and is computed once per
//! query term. `SimScorer` applies it to individual documents.

pub mod weight;
pub mod scorer;

use crate::explanation::Explanation;
use crate::norms::{FieldNorms, encode_norm, decode_norm};
use crate::statistics::{CollectionStatistics, TermStatistics};

pub use self::weight::IdfStats;
pub use self::scorer::{SimScorer, ScoreComponents, score};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimilarityModel {
    /// tf(freq) = sqrt(1 + freq)
    /// idf(docFreq, docCount) = ln((docCount + 2) / (docFreq + 2)) + 1
    #[default]
    Smoothed,

    /// tf(freq) = sqrt(freq)
    /// idf(docFreq, docCount) = ln((docCount + 1) / (docFreq + 1)) + 1
    Classic,
}


impl SimilarityModel {
    pub fn name(&self) -> &'static str {
        match *self {
            SimilarityModel::Smoothed => "SmoothedSimilarity",
            SimilarityModel::Classic => "ClassicSimilarity",
        }
    }

    /// Score factor for a term's frequency within a document
    #[inline]
    pub fn tf(&self, freq: f32) -> f32 {
        match *self {
            SimilarityModel::Smoothed => ((1.0 + freq) as f64).sqrt() as f32,
            SimilarityModel::Classic => (freq as f64).sqrt() as f32,
        }
    }

    /// Score factor for how rare a term is across the collection.
    ///
    /// Computed in double precision and narrowed on return.
    #[inline]
    pub fn idf(&self, doc_freq: u64, doc_count: u64) -> f32 {
        match *self {
            SimilarityModel::Smoothed => {
                (((doc_count + 2) as f64 / (doc_freq + 2) as f64).ln() + 1.0) as f32
            }
            SimilarityModel::Classic => {
                (((doc_count + 1) as f64 / (doc_freq + 1) as f64).ln() + 1.0) as f32
            }
        }
    }

    /// Score factor for a sloppy phrase match `distance` positions from exact
    #[inline]
    pub fn sloppy_freq(&self, distance: u32) -> f32 {
        1.0 / (distance as f32 + 1.0)
    }

    /// Score factor for a payload stored at a matched position
    #[inline]
    pub fn score_payload(&self, _doc_id: u64, _start: u32, _end: u32, _payload: &[u8]) -> f32 {
        1.0
    }

    /// Index time normalisation for a field with `num_terms` tokens.
    ///
    /// Tokens stacked on the previous token's position are overlaps and aren't
    /// counted when `discount_overlaps` is set.
    pub fn length_norm(&self, boost: f32, num_terms: u32, num_overlap: u32, discount_overlaps: bool) -> f32 {
        let num_terms = if discount_overlaps {
            num_terms.saturating_sub(num_overlap)
        } else {
            num_terms
        };

        boost * ((1.0 / (num_terms as f64).sqrt()) as f32)
    }

    /// Query wide factor that makes scores from different queries comparable
    pub fn query_norm(&self, sum_of_squared_weights: f32) -> f32 {
        (1.0 / (sum_of_squared_weights as f64).sqrt()) as f32
    }

    /// Rewards documents that match more of a boolean query's clauses
    pub fn coord(&self, overlap: usize, max_overlap: usize) -> f32 {
        overlap as f32 / max_overlap as f32
    }

    pub fn encode_norm(&self, value: f32) -> u8 {
        encode_norm(value)
    }

    pub fn decode_norm(&self, norm: u8) -> f32 {
        decode_norm(norm)
    }

    /// Idf of a single term, with an explanation
    pub fn idf_explain(&self, collection_stats: &CollectionStatistics, term_stats: &TermStatistics) -> Explanation {
        let doc_freq = term_stats.doc_freq;
        let doc_count = collection_stats.effective_doc_count();
        let idf = self.idf(doc_freq, doc_count);

        Explanation::leaf(idf, format!("idf(docFreq={}, docCount={})", doc_freq, doc_count))
    }

    /// Idf of a phrase: the sum of the idf of each of its terms
    pub fn idf_explain_phrase(&self, collection_stats: &CollectionStatistics, term_stats: &[TermStatistics]) -> Explanation {
        // Sum in double precision and narrow once at the end
        let mut idf = 0.0f64;
        let mut details = Vec::with_capacity(term_stats.len());

        for stats in term_stats.iter() {
            let idf_explanation = self.idf_explain(collection_stats, stats);
            idf += idf_explanation.value() as f64;
            details.push(idf_explanation);
        }

        Explanation::matched(idf as f32, "idf(), sum of:".to_string(), details)
    }

    /// Computes the query side weight for a term (one entry in `term_stats`)
    /// or a phrase (several entries, in phrase order).
    pub fn compute_weight(&self, collection_stats: &CollectionStatistics, term_stats: &[TermStatistics]) -> IdfStats {
        let idf = if term_stats.len() == 1 {
            self.idf_explain(collection_stats, &term_stats[0])
        } else {
            self.idf_explain_phrase(collection_stats, term_stats)
        };

        IdfStats::new(collection_stats.field.clone(), idf)
    }

    /// Binds a normalised weight to the norms of the field being searched.
    ///
    /// `norms` is `None` for fields that aren't length normalised.
    pub fn sim_scorer<'a>(&self, stats: &'a IdfStats, norms: Option<&'a dyn FieldNorms>) -> SimScorer<'a> {
        SimScorer::new(*self, stats, norms)
    }
}
