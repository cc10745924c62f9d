use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tfidf::schema::AddFieldError;


#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}


#[derive(Debug, Error)]
pub enum IndexingError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Schema(#[from] AddFieldError),
}
