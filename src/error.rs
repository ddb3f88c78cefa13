use thiserror::Error;

/// Errors that can occur during recipe ingestion
#[derive(Error, Debug)]
pub enum IngestError {
    /// Network error or non-2xx status fetching the source page
    #[error("Failed to fetch source page: {0}")]
    FetchFailed(String),

    /// No LLM API key configured for the household
    #[error("No API key configured for this household")]
    NoCredential,

    /// Caller supplied input the engine cannot process
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// The LLM request itself failed (transport or API error)
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Model output did not conform to the declared output schema
    #[error("Extraction result failed schema validation: {0}")]
    SchemaViolation(String),

    /// An embedded structured-data block could not be parsed.
    /// Recoverable: the extractor logs it and keeps scanning.
    #[error("Malformed structured data: {0}")]
    MalformedStructuredData(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl IngestError {
    /// HTTP-equivalent status for callers that surface ingestion errors
    /// over a web API.
    pub fn http_status(&self) -> u16 {
        match self {
            IngestError::FetchFailed(_) => 502,
            IngestError::NoCredential => 402,
            IngestError::UnsupportedInput(_) => 400,
            IngestError::ExtractionFailed(_) => 502,
            IngestError::SchemaViolation(_) => 422,
            IngestError::MalformedStructuredData(_) => 422,
            IngestError::ConfigError(_) => 500,
        }
    }
}
