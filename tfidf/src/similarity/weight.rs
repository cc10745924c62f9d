use crate::explanation::Explanation;


/// Query side statistics for one term or phrase in one field.
///
/// The idf is fixed when the weight is created. The query norm and boost
/// aren't known until every clause of the query has been weighted, so they
/// are applied afterwards by `normalize`, which may run any number of times.
/// Once normalisation is finished the stats are only ever read, and can be
/// shared between threads scoring different documents.
#[derive(Debug, Clone, PartialEq)]
pub struct IdfStats {
    field: String,
    idf: Explanation,
    query_norm: f32,
    boost: f32,
    query_weight: f32,
    value: f32,
}


impl IdfStats {
    pub fn new(field: String, idf: Explanation) -> IdfStats {
        let mut stats = IdfStats {
            field,
            idf,
            query_norm: 1.0,
            boost: 1.0,
            query_weight: 0.0,
            value: 0.0,
        };

        stats.normalize(1.0, 1.0);
        stats
    }

    /// Applies a query norm and boost, replacing whatever was applied before
    pub fn normalize(&mut self, query_norm: f32, boost: f32) {
        self.boost = boost;
        self.query_norm = query_norm;
        self.query_weight = query_norm * boost * self.idf.value();
        self.value = self.query_weight * self.idf.value();
    }

    /// This weight's contribution to the query's sum of squared weights
    pub fn value_for_normalization(&self) -> f32 {
        self.query_weight * self.query_weight
    }

    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[inline]
    pub fn idf(&self) -> &Explanation {
        &self.idf
    }

    #[inline]
    pub fn query_norm(&self) -> f32 {
        self.query_norm
    }

    #[inline]
    pub fn boost(&self) -> f32 {
        self.boost
    }

    #[inline]
    pub fn query_weight(&self) -> f32 {
        self.query_weight
    }

    /// query_weight * idf, the weight applied to every document's tf
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }
}
