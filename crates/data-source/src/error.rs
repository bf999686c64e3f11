use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Failed to open sales sheet '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read the sales sheet: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV in the sales sheet: {0}")]
    Csv(#[from] csv::Error),

    #[error("The sales sheet has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("Data row {row} is invalid: {reason}")]
    InvalidRow { row: usize, reason: String },
}
