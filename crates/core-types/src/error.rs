use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),
}
