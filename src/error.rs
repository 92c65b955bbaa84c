use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriquiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Logging setup failed: {0}")]
    Logging(String),
}
