use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tfidf::SimilarityModel;
use tfidf::analysis::AnalyzerSpec;
use tfidf::analysis::tokenizers::TokenizerSpec;
use tfidf::analysis::filters::FilterSpec;

use crate::errors::SettingsError;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityName {
    #[default]
    Smoothed,
    Classic,
}


impl From<SimilarityName> for SimilarityModel {
    fn from(name: SimilarityName) -> SimilarityModel {
        match name {
            SimilarityName::Smoothed => SimilarityModel::Smoothed,
            SimilarityName::Classic => SimilarityModel::Classic,
        }
    }
}


/// Everything that can be set from a settings file
///
/// ```json
/// {
///     "similarity": "classic",
///     "fields": ["content"],
///     "top": 20
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub similarity: SimilarityName,

    /// Fields that queries are run against, optionally boosted (`title^2`)
    pub fields: Vec<String>,

    /// Number of hits to show per query
    pub top: usize,

    pub title_norms: bool,
    pub content_norms: bool,

    /// Remove English stop words when analyzing documents and queries
    pub stop_words: bool,

    pub explain: bool,
}


impl Default for Settings {
    fn default() -> Settings {
        Settings {
            similarity: SimilarityName::Smoothed,
            fields: vec!["title".to_string(), "content".to_string()],
            top: 10,
            title_norms: true,
            content_norms: true,
            stop_words: true,
            explain: false,
        }
    }
}


impl Settings {
    pub fn from_json(json: &str) -> Result<Settings, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Settings::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn similarity_model(&self) -> SimilarityModel {
        self.similarity.into()
    }

    pub fn analyzer(&self) -> AnalyzerSpec {
        if self.stop_words {
            AnalyzerSpec::standard()
        } else {
            AnalyzerSpec {
                tokenizer: TokenizerSpec::Standard,
                filters: vec![FilterSpec::Lowercase],
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use tfidf::SimilarityModel;
    use tfidf::analysis::filters::FilterSpec;

    use super::{Settings, SimilarityName};

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_settings() {
        let settings = Settings::from_json(r#"{"similarity": "classic", "top": 3, "stop_words": false}"#).unwrap();

        assert_eq!(settings.similarity, SimilarityName::Classic);
        assert_eq!(settings.similarity_model(), SimilarityModel::Classic);
        assert_eq!(settings.top, 3);
        assert_eq!(settings.fields, vec!["title".to_string(), "content".to_string()]);
        assert_eq!(settings.analyzer().filters, vec![FilterSpec::Lowercase]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Settings::from_json(r#"{"similarty": "classic"}"#).is_err());
        assert!(Settings::from_json(r#"{"similarity": "bm25"}"#).is_err());
    }
}
