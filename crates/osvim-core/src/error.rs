use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Template parse error: {0}")]
    TemplateParse(#[from] serde_yaml::Error),

    #[error("Invalid property collection: {0}")]
    InvalidProperties(String),

    #[error("{0} must be provided")]
    MissingField(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
