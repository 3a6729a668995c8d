#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Status not 200 OK for {0}")]
    NotFound(String),

    #[error("Failed to get {0}")]
    ParseFailed(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

impl ScrapeError {
    pub fn parse(what: &str) -> Self {
        ScrapeError::ParseFailed(what.to_string())
    }
}
