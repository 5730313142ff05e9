use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Runtime initialization failed: {0}")]
    Init(String),
}

pub type Result<T> = std::result::Result<T, Error>;
