use roaring::RoaringTreemap;

use crate::term::Term;
use crate::explanation::Explanation;
use crate::schema::FieldRef;
use crate::similarity::{SimilarityModel, IdfStats};
use crate::statistics::TermStatistics;
use crate::store::IndexReader;
use crate::query::Query;
use crate::query::phrase::phrase_freq;


#[derive(Debug, Clone, PartialEq)]
pub enum LeafMatcher {
    Term(Term),
    Phrase {
        terms: Vec<Term>,
        offsets: Vec<u32>,
        slop: u32,
    },
}


/// A term or phrase, with its query side statistics
#[derive(Debug, Clone, PartialEq)]
pub struct LeafWeight {
    field_ref: FieldRef,
    matcher: LeafMatcher,
    boost: f32,
    stats: IdfStats,
    description: String,
}


impl LeafWeight {
    fn new<R: IndexReader + ?Sized>(reader: &R, similarity: SimilarityModel, field_ref: FieldRef, matcher: LeafMatcher, boost: f32, description: String) -> LeafWeight {
        let collection_stats = reader.collection_statistics(field_ref);
        let term_stats = match matcher {
            LeafMatcher::Term(ref term) => vec![reader.term_statistics(field_ref, term)],
            LeafMatcher::Phrase{ref terms, ..} => {
                terms.iter().map(|term| reader.term_statistics(field_ref, term)).collect::<Vec<TermStatistics>>()
            }
        };

        let mut stats = similarity.compute_weight(&collection_stats, &term_stats);
        stats.normalize(1.0, boost);

        LeafWeight {
            field_ref,
            matcher,
            boost,
            stats,
            description,
        }
    }

    pub fn stats(&self) -> &IdfStats {
        &self.stats
    }

    fn matching_docs<R: IndexReader + ?Sized>(&self, reader: &R) -> RoaringTreemap {
        match self.matcher {
            LeafMatcher::Term(ref term) => {
                reader.docs_with_term(self.field_ref, term).cloned().unwrap_or_default()
            }
            LeafMatcher::Phrase{ref terms, ..} => {
                let mut docs: Option<RoaringTreemap> = None;

                for term in terms.iter() {
                    let term_docs = match reader.docs_with_term(self.field_ref, term) {
                        Some(term_docs) => term_docs,
                        None => return RoaringTreemap::new(),
                    };

                    docs = Some(match docs {
                        Some(docs) => docs & term_docs,
                        None => term_docs.clone(),
                    });
                }

                docs.unwrap_or_default()
            }
        }
    }

    /// Term or phrase frequency in the document, 0.0 if it doesn't match
    fn freq<R: IndexReader + ?Sized>(&self, reader: &R, similarity: SimilarityModel, doc_id: u64) -> f32 {
        match self.matcher {
            LeafMatcher::Term(ref term) => reader.term_positions(doc_id, self.field_ref, term).len() as f32,
            LeafMatcher::Phrase{ref terms, ref offsets, slop} => {
                let positions = terms.iter()
                    .map(|term| reader.term_positions(doc_id, self.field_ref, term))
                    .collect::<Vec<&[u32]>>();

                phrase_freq(similarity, &positions, offsets, slop)
            }
        }
    }

    fn score<R: IndexReader + ?Sized>(&self, reader: &R, similarity: SimilarityModel, doc_id: u64) -> Option<f32> {
        let freq = self.freq(reader, similarity, doc_id);
        if freq <= 0.0 {
            return None;
        }

        let scorer = similarity.sim_scorer(&self.stats, reader.field_norms(self.field_ref));
        Some(scorer.score(doc_id, freq))
    }

    fn explain<R: IndexReader + ?Sized>(&self, reader: &R, similarity: SimilarityModel, doc_id: u64) -> Explanation {
        let freq = self.freq(reader, similarity, doc_id);
        if freq <= 0.0 {
            return Explanation::no_match("no matching term".to_string(), vec![]);
        }

        let freq_explanation = match self.matcher {
            LeafMatcher::Term(_) => Explanation::leaf(freq, format!("termFreq={:?}", freq)),
            LeafMatcher::Phrase{..} => Explanation::leaf(freq, format!("phraseFreq={:?}", freq)),
        };

        let scorer = similarity.sim_scorer(&self.stats, reader.field_norms(self.field_ref));
        let score_explanation = scorer.explain(doc_id, freq_explanation);

        Explanation::matched(
            score_explanation.value(),
            format!("weight({} in {}) [{}], result of:", self.description, doc_id, similarity.name()),
            vec![score_explanation],
        )
    }
}


/// A query bound to an index, ready to be normalised and then scored
#[derive(Debug, Clone, PartialEq)]
pub enum Weight {
    MatchNone,
    Leaf(LeafWeight),
    Conjunction(Vec<Weight>),
    Disjunction(Vec<Weight>),
}


impl Weight {
    pub fn new<R: IndexReader + ?Sized>(query: &Query, reader: &R, similarity: SimilarityModel) -> Weight {
        match *query {
            Query::MatchNone => Weight::MatchNone,
            Query::MatchTerm{ref field, ref term, boost} => {
                let field_ref = match reader.schema().get_field_by_name(field) {
                    Some(field_ref) => field_ref,
                    None => {
                        debug!("query references unknown field {:?}", field);
                        return Weight::MatchNone;
                    }
                };

                Weight::Leaf(LeafWeight::new(reader, similarity, field_ref, LeafMatcher::Term(term.clone()), boost, query.to_string()))
            }
            Query::MatchPhrase{ref field, ref tokens, slop, boost} => {
                let field_ref = match reader.schema().get_field_by_name(field) {
                    Some(field_ref) => field_ref,
                    None => {
                        debug!("query references unknown field {:?}", field);
                        return Weight::MatchNone;
                    }
                };

                let first_position = match tokens.iter().map(|token| token.position).min() {
                    Some(position) => position,
                    None => return Weight::MatchNone,
                };

                let matcher = LeafMatcher::Phrase {
                    terms: tokens.iter().map(|token| token.term.clone()).collect(),
                    offsets: tokens.iter().map(|token| token.position - first_position).collect(),
                    slop,
                };

                Weight::Leaf(LeafWeight::new(reader, similarity, field_ref, matcher, boost, query.to_string()))
            }
            Query::Conjunction{ref queries} => {
                Weight::Conjunction(queries.iter().map(|query| Weight::new(query, reader, similarity)).collect())
            }
            Query::Disjunction{ref queries} => {
                Weight::Disjunction(queries.iter().map(|query| Weight::new(query, reader, similarity)).collect())
            }
        }
    }

    /// Sum of the squared query weights of every leaf
    pub fn value_for_normalization(&self) -> f32 {
        match *self {
            Weight::MatchNone => 0.0,
            Weight::Leaf(ref leaf) => leaf.stats.value_for_normalization(),
            Weight::Conjunction(ref weights) | Weight::Disjunction(ref weights) => {
                weights.iter().map(|weight| weight.value_for_normalization()).sum()
            }
        }
    }

    /// Applies the query norm to every leaf, replacing any earlier normalisation
    pub fn normalize(&mut self, query_norm: f32) {
        match *self {
            Weight::MatchNone => (),
            Weight::Leaf(ref mut leaf) => {
                let boost = leaf.boost;
                leaf.stats.normalize(query_norm, boost);
            }
            Weight::Conjunction(ref mut weights) | Weight::Disjunction(ref mut weights) => {
                for weight in weights.iter_mut() {
                    weight.normalize(query_norm);
                }
            }
        }
    }

    /// Every leaf weight, in query order
    pub fn leaves(&self) -> Vec<&LeafWeight> {
        match *self {
            Weight::MatchNone => vec![],
            Weight::Leaf(ref leaf) => vec![leaf],
            Weight::Conjunction(ref weights) | Weight::Disjunction(ref weights) => {
                weights.iter().flat_map(|weight| weight.leaves()).collect()
            }
        }
    }

    /// Documents that may match. Phrases still need their positions checked.
    pub fn matching_docs<R: IndexReader + ?Sized>(&self, reader: &R) -> RoaringTreemap {
        match *self {
            Weight::MatchNone => RoaringTreemap::new(),
            Weight::Leaf(ref leaf) => leaf.matching_docs(reader),
            Weight::Conjunction(ref weights) => {
                let mut docs: Option<RoaringTreemap> = None;

                for weight in weights.iter() {
                    let weight_docs = weight.matching_docs(reader);
                    docs = Some(match docs {
                        Some(docs) => docs & weight_docs,
                        None => weight_docs,
                    });
                }

                docs.unwrap_or_default()
            }
            Weight::Disjunction(ref weights) => {
                let mut docs = RoaringTreemap::new();

                for weight in weights.iter() {
                    docs |= weight.matching_docs(reader);
                }

                docs
            }
        }
    }

    /// Score of the document, or `None` if it doesn't match
    pub fn score<R: IndexReader + ?Sized>(&self, reader: &R, similarity: SimilarityModel, doc_id: u64) -> Option<f32> {
        match *self {
            Weight::MatchNone => None,
            Weight::Leaf(ref leaf) => leaf.score(reader, similarity, doc_id),
            Weight::Conjunction(ref weights) => {
                let mut sum = 0.0f32;

                for weight in weights.iter() {
                    sum += weight.score(reader, similarity, doc_id)?;
                }

                Some(sum)
            }
            Weight::Disjunction(ref weights) => {
                let mut sum = 0.0f32;
                let mut matched = 0;

                for weight in weights.iter() {
                    if let Some(score) = weight.score(reader, similarity, doc_id) {
                        sum += score;
                        matched += 1;
                    }
                }

                if matched == 0 {
                    return None;
                }

                let coord = similarity.coord(matched, weights.len());
                if coord == 1.0 {
                    Some(sum)
                } else {
                    Some(sum * coord)
                }
            }
        }
    }

    pub fn explain<R: IndexReader + ?Sized>(&self, reader: &R, similarity: SimilarityModel, doc_id: u64) -> Explanation {
        match *self {
            Weight::MatchNone => Explanation::no_match("MatchNone doesn't match any documents".to_string(), vec![]),
            Weight::Leaf(ref leaf) => leaf.explain(reader, similarity, doc_id),
            Weight::Conjunction(ref weights) => {
                let mut details = Vec::with_capacity(weights.len());
                let mut sum = 0.0f32;
                let mut failed = false;

                for weight in weights.iter() {
                    let explanation = weight.explain(reader, similarity, doc_id);

                    if explanation.is_match() {
                        sum += explanation.value();
                        details.push(explanation);
                    } else {
                        failed = true;
                        details.push(Explanation::no_match("no match on required clause".to_string(), vec![explanation]));
                    }
                }

                if failed {
                    Explanation::no_match("Failure to meet condition(s) of required clause(s)".to_string(), details)
                } else {
                    Explanation::matched(sum, "sum of:".to_string(), details)
                }
            }
            Weight::Disjunction(ref weights) => {
                let mut details = Vec::with_capacity(weights.len());
                let mut sum = 0.0f32;

                for weight in weights.iter() {
                    let explanation = weight.explain(reader, similarity, doc_id);

                    if explanation.is_match() {
                        sum += explanation.value();
                        details.push(explanation);
                    }
                }

                if details.is_empty() {
                    return Explanation::no_match("No matching clauses".to_string(), details);
                }

                let matched = details.len();
                let coord = similarity.coord(matched, weights.len());
                let sum_explanation = Explanation::matched(sum, "sum of:".to_string(), details);

                if coord == 1.0 {
                    return sum_explanation;
                }

                Explanation::matched(
                    sum * coord,
                    "product of:".to_string(),
                    vec![
                        sum_explanation,
                        Explanation::leaf(coord, format!("coord({}/{})", matched, weights.len())),
                    ],
                )
            }
        }
    }
}
