use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<String>),

    #[error("invalid relay url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
