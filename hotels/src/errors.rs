use thiserror::Error;

/// Failures of the hotel search adapter.
///
/// Every variant renders as a human-readable message that is fed back into
/// the conversation so the model can correct itself; none of them abort the
/// session.
#[derive(Error, Debug)]
pub enum HotelSearchError {
    /// The tool-call payload was malformed, not an object, or failed validation
    #[error("Invalid hotel query: {0}. Please provide a valid JSON object and try again.")]
    InvalidPayload(String),

    /// The search API reported an error or returned nothing usable
    #[error("Error processing the hotel query. Try again. Upstream error: {0}")]
    Upstream(String),

    /// The response was valid but carried no hotel entries
    #[error("No hotels found for the specified query.")]
    NoResults,
}

/// Result type for hotel search operations
pub type HotelSearchResult<T> = Result<T, HotelSearchError>;
