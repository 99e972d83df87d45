use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort an import as a whole. Bad rows are never errors; they
/// end up in [`crate::ParsedStatement::skipped`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read statement file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("statement is not valid {encoding} text")]
    Decode { encoding: &'static str },
}

pub type Result<T> = std::result::Result<T, ImportError>;
