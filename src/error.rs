use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("NOTION_API_KEY is not defined")]
    MissingApiKey,
    #[error("NOTION_DATABASE_ID is not defined")]
    MissingDatabaseId,
    #[error("Notion API error {status}: {body}")]
    Http { status: u16, body: String },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("Failed to decode Notion response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BoardError {
    pub fn is_config(&self) -> bool {
        matches!(self, BoardError::MissingApiKey | BoardError::MissingDatabaseId)
    }
}

pub type BoardResult<T> = std::result::Result<T, BoardError>;
