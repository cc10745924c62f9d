pub mod memory;

use roaring::RoaringTreemap;

use crate::term::Term;
use crate::document::Document;
use crate::norms::FieldNorms;
use crate::schema::{Schema, FieldType, FieldFlags, FieldRef, AddFieldError};
use crate::statistics::{CollectionStatistics, TermStatistics};


/// Read access to an index, as needed by queries and the similarity
pub trait IndexReader: Sync {
    fn schema(&self) -> &Schema;
    fn get_document_by_id(&self, doc_id: u64) -> Option<&Document>;
    fn get_document_id_by_key(&self, doc_key: &str) -> Option<u64>;
    fn num_docs(&self) -> u64;

    /// One greater than the largest document id ever assigned
    fn max_doc(&self) -> u64;

    fn collection_statistics(&self, field_ref: FieldRef) -> CollectionStatistics;
    fn term_statistics(&self, field_ref: FieldRef, term: &Term) -> TermStatistics;
    fn docs_with_term(&self, field_ref: FieldRef, term: &Term) -> Option<&RoaringTreemap>;

    /// Positions of `term` in the field of a document, in ascending order
    fn term_positions(&self, doc_id: u64, field_ref: FieldRef, term: &Term) -> &[u32];

    /// `None` if the field isn't length normalised
    fn field_norms(&self, field_ref: FieldRef) -> Option<&dyn FieldNorms>;

    fn stored_value(&self, doc_id: u64, field_ref: FieldRef) -> Option<&str> {
        self.get_document_by_id(doc_id).and_then(|doc| doc.stored_fields.get(&field_ref)).map(|value| value.as_str())
    }
}


pub trait IndexStore {
    fn add_field(&mut self, name: String, field_type: FieldType, field_flags: FieldFlags) -> Result<FieldRef, AddFieldError>;
    fn insert_or_update_document(&mut self, doc: Document) -> u64;
    fn remove_document_by_key(&mut self, doc_key: &str) -> bool;
}
