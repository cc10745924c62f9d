use crate::explanation::Explanation;
use crate::norms::FieldNorms;
use crate::similarity::SimilarityModel;
use crate::similarity::weight::IdfStats;


/// Scores one document: `tf(freq) * weight_value`, multiplied by the decoded
/// field norm when the field has norms.
#[inline]
pub fn score(similarity: SimilarityModel, freq: f32, weight_value: f32, norm: Option<u8>) -> f32 {
    let raw = similarity.tf(freq) * weight_value;

    match norm {
        Some(norm) => raw * similarity.decode_norm(norm),
        None => raw,
    }
}


/// Every factor that went into one document's score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComponents {
    pub tf: f32,
    pub idf: f32,
    /// Decoded norm, or 1.0 if the field has no norms
    pub field_norm: f32,
    pub query_weight: f32,
    pub score: f32,
}


/// Scores documents for one normalised weight in one field
#[derive(Clone, Copy)]
pub struct SimScorer<'a> {
    similarity: SimilarityModel,
    stats: &'a IdfStats,
    weight_value: f32,
    norms: Option<&'a dyn FieldNorms>,
}


impl<'a> SimScorer<'a> {
    pub fn new(similarity: SimilarityModel, stats: &'a IdfStats, norms: Option<&'a dyn FieldNorms>) -> SimScorer<'a> {
        SimScorer {
            similarity,
            stats,
            weight_value: stats.value(),
            norms,
        }
    }

    /// Both `score` and `explain` read their numbers from here
    pub fn components(&self, doc_id: u64, freq: f32) -> ScoreComponents {
        let raw_norm = self.norms.map(|norms| norms.norm(doc_id));

        ScoreComponents {
            tf: self.similarity.tf(freq),
            idf: self.stats.idf().value(),
            field_norm: match raw_norm {
                Some(norm) => self.similarity.decode_norm(norm),
                None => 1.0,
            },
            query_weight: self.stats.query_weight(),
            score: score(self.similarity, freq, self.weight_value, raw_norm),
        }
    }

    #[inline]
    pub fn score(&self, doc_id: u64, freq: f32) -> f32 {
        self.components(doc_id, freq).score
    }

    /// Score factor for a sloppy match `distance` positions from exact
    pub fn compute_slop_factor(&self, distance: u32) -> f32 {
        self.similarity.sloppy_freq(distance)
    }

    /// Score factor for a payload found in `doc_id` between `start` and `end`
    pub fn compute_payload_factor(&self, doc_id: u64, start: u32, end: u32, payload: &[u8]) -> f32 {
        self.similarity.score_payload(doc_id, start, end, payload)
    }

    /// Explains the score of `doc_id`. `freq` explains where the frequency
    /// came from, and its value must be the freq that was scored.
    pub fn explain(&self, doc_id: u64, freq: Explanation) -> Explanation {
        let freq_value = freq.value();
        let components = self.components(doc_id, freq_value);
        let query_explanation = self.explain_query();
        let field_explanation = self.explain_field(doc_id, freq, &components);

        if query_explanation.value() == 1.0 {
            return field_explanation;
        }

        Explanation::matched(
            components.score,
            format!("score(doc={},freq={:?}), product of:", doc_id, freq_value),
            vec![query_explanation, field_explanation],
        )
    }

    fn explain_query(&self) -> Explanation {
        let mut details = Vec::with_capacity(3);

        if self.stats.boost() != 1.0 {
            details.push(Explanation::leaf(self.stats.boost(), "boost".to_string()));
        }

        details.push(self.stats.idf().clone());
        details.push(Explanation::leaf(self.stats.query_norm(), "queryNorm".to_string()));

        Explanation::matched(self.stats.query_weight(), "queryWeight, product of:".to_string(), details)
    }

    fn explain_field(&self, doc_id: u64, freq: Explanation, components: &ScoreComponents) -> Explanation {
        let tf_explanation = Explanation::matched(
            components.tf,
            format!("tf(freq={:?}), with freq of:", freq.value()),
            vec![freq],
        );
        let field_norm_explanation = Explanation::leaf(components.field_norm, format!("fieldNorm(doc={})", doc_id));

        Explanation::matched(
            components.tf * components.idf * components.field_norm,
            format!("fieldWeight in {}, product of:", doc_id),
            vec![tf_explanation, self.stats.idf().clone(), field_norm_explanation],
        )
    }
}


#[cfg(test)]
mod tests {
    use crate::explanation::Explanation;
    use crate::similarity::SimilarityModel;
    use crate::similarity::weight::IdfStats;
    use crate::norms::{FieldNorms, encode_norm, decode_norm};

    use super::score;

    fn make_stats(idf: f32) -> IdfStats {
        IdfStats::new("content".to_string(), Explanation::leaf(idf, "idf(docFreq=1, docCount=4)".to_string()))
    }

    fn freq(value: f32) -> Explanation {
        Explanation::leaf(value, format!("termFreq={:?}", value))
    }

    #[test]
    fn test_score_without_norm() {
        let similarity = SimilarityModel::Smoothed;

        assert_eq!(score(similarity, 4.0, 2.5, None), similarity.tf(4.0) * 2.5);
    }

    #[test]
    fn test_score_with_norm() {
        let similarity = SimilarityModel::Smoothed;
        let norm = encode_norm(0.5);

        assert_eq!(score(similarity, 4.0, 2.5, Some(norm)), similarity.tf(4.0) * 2.5 * decode_norm(norm));
    }

    #[test]
    fn test_scorer_uses_stats_value() {
        let similarity = SimilarityModel::Smoothed;
        let stats = make_stats(2.0);
        let scorer = similarity.sim_scorer(&stats, None);

        assert_eq!(scorer.score(0, 3.0), similarity.tf(3.0) * stats.value());
    }

    #[test]
    fn test_scorer_reads_norm_per_document() {
        let similarity = SimilarityModel::Smoothed;
        let stats = make_stats(2.0);
        let norms: Vec<u8> = vec![encode_norm(1.0), encode_norm(0.5)];
        let scorer = similarity.sim_scorer(&stats, Some(&norms as &dyn FieldNorms));

        assert_eq!(scorer.score(0, 3.0), 8.0);
        assert_eq!(scorer.score(1, 3.0), 4.0);
    }

    #[test]
    fn test_slop_and_payload_factors() {
        let similarity = SimilarityModel::Smoothed;
        let stats = make_stats(2.0);
        let scorer = similarity.sim_scorer(&stats, None);

        assert_eq!(scorer.compute_slop_factor(1), 0.5);
        assert_eq!(scorer.compute_payload_factor(0, 1, 2, &[1, 2, 3]), 1.0);
    }

    #[test]
    fn test_explain_elides_unit_query_weight() {
        let similarity = SimilarityModel::Smoothed;
        let stats = make_stats(1.0);
        let scorer = similarity.sim_scorer(&stats, None);

        let explanation = scorer.explain(7, freq(3.0));

        assert_eq!(explanation.description(), "fieldWeight in 7, product of:");
        assert_eq!(explanation.value(), scorer.score(7, 3.0));
        assert_eq!(explanation.details().len(), 3);
        assert_eq!(explanation.details()[0].description(), "tf(freq=3.0), with freq of:");
        assert_eq!(explanation.details()[0].details()[0].description(), "termFreq=3.0");
        assert_eq!(explanation.details()[1].description(), "idf(docFreq=1, docCount=4)");
        assert_eq!(explanation.details()[2].description(), "fieldNorm(doc=7)");
        assert_eq!(explanation.details()[2].value(), 1.0);
    }

    #[test]
    fn test_explain_with_query_weight() {
        let similarity = SimilarityModel::Smoothed;
        let stats = make_stats(2.0);
        let scorer = similarity.sim_scorer(&stats, None);

        let explanation = scorer.explain(2, freq(3.0));

        assert_eq!(explanation.description(), "score(doc=2,freq=3.0), product of:");
        assert_eq!(explanation.value(), scorer.score(2, 3.0));
        assert_eq!(explanation.value(), 8.0);

        let query_weight = &explanation.details()[0];
        assert_eq!(query_weight.description(), "queryWeight, product of:");
        assert_eq!(query_weight.value(), 2.0);
        // No boost applied, so only idf and queryNorm
        assert_eq!(query_weight.details().len(), 2);
        assert_eq!(query_weight.details()[1].description(), "queryNorm");

        let field_weight = &explanation.details()[1];
        assert_eq!(field_weight.value(), 4.0);
        assert_eq!(field_weight.details()[1], query_weight.details()[0]);
    }

    #[test]
    fn test_explain_includes_boost() {
        let similarity = SimilarityModel::Smoothed;
        let mut stats = make_stats(2.0);
        stats.normalize(0.3, 2.5);
        let scorer = similarity.sim_scorer(&stats, None);

        let explanation = scorer.explain(0, freq(1.0));
        let query_weight = &explanation.details()[0];

        assert_eq!(query_weight.details().len(), 3);
        assert_eq!(query_weight.details()[0].description(), "boost");
        assert_eq!(query_weight.details()[0].value(), 2.5);
        assert_eq!(query_weight.details()[2].value(), 0.3);
    }
}
