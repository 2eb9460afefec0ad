use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("cannot read roster file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read roster input: {0}")]
    Read(#[source] std::io::Error),

    #[error("malformed record on line {line}: expected 5 fields, found {found}")]
    MalformedRecord { line: u64, found: usize },

    /// Anything else the delimited reader rejects, e.g. invalid UTF-8.
    #[error("roster read error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;
