use std::collections::HashMap;

use crate::token::Token;
use crate::schema::FieldRef;


#[derive(Debug, Clone)]
pub struct Document {
    pub key: String,
    pub indexed_fields: HashMap<FieldRef, Vec<Token>>,
    pub stored_fields: HashMap<FieldRef, String>,
}


impl Document {
    pub fn new(key: String) -> Document {
        Document {
            key,
            indexed_fields: HashMap::new(),
            stored_fields: HashMap::new(),
        }
    }
}
