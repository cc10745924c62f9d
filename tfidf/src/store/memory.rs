use std::collections::{BTreeMap, HashMap};

use roaring::RoaringTreemap;

use crate::term::Term;
use crate::token::Token;
use crate::document::Document;
use crate::norms::FieldNorms;
use crate::schema::{Schema, FieldType, FieldFlags, FieldRef, AddFieldError};
use crate::similarity::SimilarityModel;
use crate::statistics::{CollectionStatistics, TermStatistics};
use crate::store::{IndexReader, IndexStore};


#[derive(Debug, Default, Clone, PartialEq)]
struct FieldStats {
    doc_count: u64,
    sum_total_term_freq: u64,
    sum_doc_freq: u64,
}


/// An index that lives entirely in memory
///
/// Length norms are computed with the similarity given at construction, so
/// the same similarity should be used to search it.
#[derive(Debug)]
pub struct MemoryIndexStore {
    schema: Schema,
    similarity: SimilarityModel,
    docs: BTreeMap<u64, Document>,
    doc_key2id_map: HashMap<String, u64>,
    next_doc_id: u64,
    postings: HashMap<FieldRef, BTreeMap<Term, RoaringTreemap>>,
    positions: HashMap<(u64, FieldRef), HashMap<Term, Vec<u32>>>,
    norms: HashMap<FieldRef, Vec<u8>>,
    field_stats: HashMap<FieldRef, FieldStats>,
}


/// Groups a field's tokens by term, keeping positions in order
fn term_positions(tokens: &[Token]) -> HashMap<Term, Vec<u32>> {
    let mut terms: HashMap<Term, Vec<u32>> = HashMap::new();

    for token in tokens.iter() {
        terms.entry(token.term.clone()).or_default().push(token.position);
    }

    for positions in terms.values_mut() {
        positions.sort_unstable();
    }

    terms
}


/// Number of tokens stacked on the position of the token before them
fn num_overlaps(tokens: &[Token]) -> u32 {
    tokens.windows(2).filter(|pair| pair[0].position == pair[1].position).count() as u32
}


impl MemoryIndexStore {
    pub fn new(similarity: SimilarityModel) -> MemoryIndexStore {
        MemoryIndexStore {
            schema: Schema::new(),
            similarity,
            docs: BTreeMap::new(),
            doc_key2id_map: HashMap::new(),
            next_doc_id: 0,
            postings: HashMap::new(),
            positions: HashMap::new(),
            norms: HashMap::new(),
            field_stats: HashMap::new(),
        }
    }

    pub fn similarity(&self) -> SimilarityModel {
        self.similarity
    }

    pub fn iter_docids_all(&self) -> impl Iterator<Item=u64> + '_ {
        self.docs.keys().cloned()
    }

    fn index_field(&mut self, doc_id: u64, field_ref: FieldRef, tokens: &[Token]) {
        let terms = term_positions(tokens);
        let field_postings = self.postings.entry(field_ref).or_default();

        for term in terms.keys() {
            field_postings.entry(term.clone()).or_default().insert(doc_id);
        }

        let stats = self.field_stats.entry(field_ref).or_default();
        if !tokens.is_empty() {
            stats.doc_count += 1;
        }
        stats.sum_total_term_freq += tokens.len() as u64;
        stats.sum_doc_freq += terms.len() as u64;

        if let Some(norms) = self.norms.get_mut(&field_ref) {
            if !tokens.is_empty() {
                let length_norm = self.similarity.length_norm(1.0, tokens.len() as u32, num_overlaps(tokens), true);

                if norms.len() <= doc_id as usize {
                    norms.resize(doc_id as usize + 1, 0);
                }
                norms[doc_id as usize] = self.similarity.encode_norm(length_norm);
            }
        }

        self.positions.insert((doc_id, field_ref), terms);
    }

    fn unindex_field(&mut self, doc_id: u64, field_ref: FieldRef) {
        let terms = match self.positions.remove(&(doc_id, field_ref)) {
            Some(terms) => terms,
            None => return,
        };

        if let Some(field_postings) = self.postings.get_mut(&field_ref) {
            for term in terms.keys() {
                let now_empty = match field_postings.get_mut(term) {
                    Some(docs) => {
                        docs.remove(doc_id);
                        docs.is_empty()
                    }
                    None => false,
                };

                if now_empty {
                    field_postings.remove(term);
                }
            }
        }

        let num_tokens = terms.values().map(|positions| positions.len() as u64).sum::<u64>();
        if let Some(stats) = self.field_stats.get_mut(&field_ref) {
            if num_tokens > 0 {
                stats.doc_count -= 1;
            }
            stats.sum_total_term_freq -= num_tokens;
            stats.sum_doc_freq -= terms.len() as u64;
        }

        if let Some(norms) = self.norms.get_mut(&field_ref) {
            if let Some(norm) = norms.get_mut(doc_id as usize) {
                *norm = 0;
            }
        }
    }
}


impl IndexStore for MemoryIndexStore {
    fn add_field(&mut self, name: String, field_type: FieldType, field_flags: FieldFlags) -> Result<FieldRef, AddFieldError> {
        let field_ref = self.schema.add_field(name, field_type, field_flags)?;

        if field_flags.contains(FieldFlags::NORMS) {
            self.norms.insert(field_ref, Vec::new());
        }

        Ok(field_ref)
    }

    fn insert_or_update_document(&mut self, doc: Document) -> u64 {
        if self.doc_key2id_map.contains_key(&doc.key) {
            debug!("replacing document {:?}", doc.key);
            self.remove_document_by_key(&doc.key);
        }

        let doc_id = self.next_doc_id;
        self.next_doc_id += 1;

        for (field_ref, tokens) in doc.indexed_fields.iter() {
            let indexed = self.schema.get(field_ref).map(|field_info| field_info.is_indexed()).unwrap_or(false);

            if !indexed {
                warn!("document {:?} has tokens for unindexed field {:?}", doc.key, field_ref);
                continue;
            }

            self.index_field(doc_id, *field_ref, tokens);
        }

        self.doc_key2id_map.insert(doc.key.clone(), doc_id);
        self.docs.insert(doc_id, doc);

        doc_id
    }

    fn remove_document_by_key(&mut self, doc_key: &str) -> bool {
        let doc_id = match self.doc_key2id_map.remove(doc_key) {
            Some(doc_id) => doc_id,
            None => return false,
        };

        if let Some(doc) = self.docs.remove(&doc_id) {
            for field_ref in doc.indexed_fields.keys() {
                self.unindex_field(doc_id, *field_ref);
            }
        }

        true
    }
}


impl IndexReader for MemoryIndexStore {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn get_document_by_id(&self, doc_id: u64) -> Option<&Document> {
        self.docs.get(&doc_id)
    }

    fn get_document_id_by_key(&self, doc_key: &str) -> Option<u64> {
        self.doc_key2id_map.get(doc_key).cloned()
    }

    fn num_docs(&self) -> u64 {
        self.docs.len() as u64
    }

    fn max_doc(&self) -> u64 {
        self.next_doc_id
    }

    fn collection_statistics(&self, field_ref: FieldRef) -> CollectionStatistics {
        let field_name = self.schema.get(&field_ref).map(|field_info| field_info.name().to_string()).unwrap_or_default();
        let stats = self.field_stats.get(&field_ref).cloned().unwrap_or_default();

        CollectionStatistics::new(
            field_name,
            self.max_doc(),
            stats.doc_count as i64,
            stats.sum_total_term_freq as i64,
            stats.sum_doc_freq as i64,
        )
    }

    fn term_statistics(&self, field_ref: FieldRef, term: &Term) -> TermStatistics {
        let (doc_freq, total_term_freq) = match self.docs_with_term(field_ref, term) {
            Some(docs) => {
                let total_term_freq = docs.iter()
                    .map(|doc_id| self.term_positions(doc_id, field_ref, term).len() as i64)
                    .sum::<i64>();

                (docs.len(), total_term_freq)
            }
            None => (0, 0),
        };

        TermStatistics::new(term.clone(), doc_freq, total_term_freq)
    }

    fn docs_with_term(&self, field_ref: FieldRef, term: &Term) -> Option<&RoaringTreemap> {
        self.postings.get(&field_ref).and_then(|field_postings| field_postings.get(term))
    }

    fn term_positions(&self, doc_id: u64, field_ref: FieldRef, term: &Term) -> &[u32] {
        self.positions.get(&(doc_id, field_ref))
            .and_then(|terms| terms.get(term))
            .map(|positions| positions.as_slice())
            .unwrap_or(&[])
    }

    fn field_norms(&self, field_ref: FieldRef) -> Option<&dyn FieldNorms> {
        self.norms.get(&field_ref).map(|norms| norms as &dyn FieldNorms)
    }
}
