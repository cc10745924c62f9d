use std::fs;
use std::path::Path;

use slog::Logger;
use tfidf::Document;
use tfidf::analysis::AnalyzerSpec;
use tfidf::schema::{FieldType, FieldFlags, FieldRef};
use tfidf::store::IndexStore;

use crate::errors::IndexingError;
use crate::html::HtmlDocument;
use crate::settings::Settings;


/// Fields every HTML document is indexed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlFields {
    pub title: FieldRef,
    pub content: FieldRef,
    pub path: FieldRef,
}


impl HtmlFields {
    pub fn create<S: IndexStore>(store: &mut S, settings: &Settings) -> Result<HtmlFields, IndexingError> {
        let norms = |enabled: bool| if enabled { FieldFlags::NORMS } else { FieldFlags::empty() };

        Ok(HtmlFields {
            title: store.add_field("title".to_string(), FieldType::Text, FieldFlags::INDEXED | FieldFlags::STORED | norms(settings.title_norms))?,
            content: store.add_field("content".to_string(), FieldType::Text, FieldFlags::INDEXED | norms(settings.content_norms))?,
            path: store.add_field("path".to_string(), FieldType::PlainString, FieldFlags::STORED)?,
        })
    }
}


pub struct HtmlIndexer<'a, S: IndexStore> {
    log: Logger,
    store: &'a mut S,
    analyzer: AnalyzerSpec,
    fields: HtmlFields,
}


impl<'a, S: IndexStore> HtmlIndexer<'a, S> {
    pub fn new(log: Logger, store: &'a mut S, analyzer: AnalyzerSpec, fields: HtmlFields) -> HtmlIndexer<'a, S> {
        HtmlIndexer {
            log,
            store,
            analyzer,
            fields,
        }
    }

    /// Indexes a single file, or every file below a directory. Returns the
    /// number of documents indexed.
    pub fn index_path(&mut self, path: &Path) -> Result<u64, IndexingError> {
        if path.is_dir() {
            let mut count = 0;
            self.index_dir(path, &mut count)?;
            Ok(count)
        } else {
            let text = read_text(path)?;
            self.index_text(path, &text);
            Ok(1)
        }
    }

    fn index_dir(&mut self, dir: &Path, count: &mut u64) -> Result<(), IndexingError> {
        let entries = fs::read_dir(dir).map_err(|source| IndexingError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| IndexingError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            paths.push(entry.path());
        }
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.index_dir(&path, count)?;
                continue;
            }

            match read_text(&path) {
                Ok(text) => {
                    self.index_text(&path, &text);
                    *count += 1;
                }
                Err(err) => {
                    warn!(self.log, "[indexer] skipping unreadable file"; "path" => path.display().to_string(), "error" => err.to_string());
                }
            }
        }

        Ok(())
    }

    /// Indexes the text of an HTML page. The document is keyed by its path,
    /// so indexing the same path again replaces it.
    pub fn index_text(&mut self, path: &Path, text: &str) -> u64 {
        let html = HtmlDocument::parse(text);
        let key = path.display().to_string();

        let mut doc = Document::new(key.clone());
        doc.indexed_fields.insert(self.fields.title, self.analyzer.analyze(&html.title));
        doc.indexed_fields.insert(self.fields.content, self.analyzer.analyze(&html.body));
        doc.stored_fields.insert(self.fields.title, html.title);
        doc.stored_fields.insert(self.fields.path, key.clone());

        let doc_id = self.store.insert_or_update_document(doc);
        debug!(self.log, "[indexer] added document"; "path" => key, "doc_id" => doc_id);
        doc_id
    }
}


/// Reads a file as text, replacing bytes that aren't valid UTF-8
fn read_text(path: &Path) -> Result<String, IndexingError> {
    let bytes = fs::read(path).map_err(|source| IndexingError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
