/// Errors that can stop a decksize run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment error: {0}")]
    Environment(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to fetch app list: {0}")]
    Fetch(String),

    #[error("failed to decode app list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected app list format: {0}")]
    Schema(String),

    #[error("app catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("failed to discover data locations: {0}")]
    Discovery(String),

    #[error("failed to list {0}")]
    Listing(String),

    #[error("size probe failed: {0}")]
    Probe(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn catalog_unavailable(msg: impl Into<String>) -> Self {
        Self::CatalogUnavailable(msg.into())
    }

    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    pub fn listing(msg: impl Into<String>) -> Self {
        Self::Listing(msg.into())
    }

    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
