use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid symbol {0:?}: {1}")]
    InvalidSymbol(String, String),
}
