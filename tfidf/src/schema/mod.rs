//! Field definitions
//!
//! Every field a document can carry is registered here first. The returned
//! `FieldRef` is what the index, the similarity statistics and the norms are
//! keyed by; field names are only resolved when a query is bound to a reader.

use std::collections::HashMap;

use thiserror::Error;


bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u32 {
        const INDEXED = 0b00000001;
        const STORED  = 0b00000010;
        /// Keep a per-document length norm for this field
        const NORMS   = 0b00000100;
    }
}


#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Analyzed into terms with positions
    Text,
    /// Stored as-is, never scored
    PlainString,
}


#[derive(Debug, Clone)]
pub struct FieldInfo {
    name: String,
    pub field_type: FieldType,
    pub field_flags: FieldFlags,
}


impl FieldInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_indexed(&self) -> bool {
        self.field_flags.contains(FieldFlags::INDEXED)
    }

    pub fn is_stored(&self) -> bool {
        self.field_flags.contains(FieldFlags::STORED)
    }

    pub fn has_norms(&self) -> bool {
        self.field_flags.contains(FieldFlags::NORMS)
    }
}


/// Handle to a registered field, valid only for the schema that issued it
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FieldRef(u32);


impl FieldRef {
    pub fn ord(&self) -> u32 {
        self.0
    }
}


#[derive(Debug, Error, PartialEq)]
pub enum AddFieldError {
    #[error("field {0:?} already exists")]
    FieldAlreadyExists(String),
}


#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldInfo>,
    by_name: HashMap<String, FieldRef>,
}


impl Schema {
    pub fn new() -> Schema {
        Schema::default()
    }

    pub fn add_field(&mut self, name: String, field_type: FieldType, field_flags: FieldFlags) -> Result<FieldRef, AddFieldError> {
        if self.by_name.contains_key(&name) {
            return Err(AddFieldError::FieldAlreadyExists(name));
        }

        let field_ref = FieldRef(self.fields.len() as u32);
        self.by_name.insert(name.clone(), field_ref);
        self.fields.push(FieldInfo { name, field_type, field_flags });

        Ok(field_ref)
    }

    pub fn get_field_by_name(&self, name: &str) -> Option<FieldRef> {
        self.by_name.get(name).cloned()
    }

    pub fn get(&self, field_ref: &FieldRef) -> Option<&FieldInfo> {
        self.fields.get(field_ref.ord() as usize)
    }

    /// Registered fields in the order they were added
    pub fn iter(&self) -> impl Iterator<Item=(FieldRef, &FieldInfo)> {
        self.fields.iter().enumerate().map(|(ord, field_info)| (FieldRef(ord as u32), field_info))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
