use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// the endpoint could not be reached, or responded with a non-success HTTP status
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// the endpoint was reached but returned one or more GraphQL errors
    #[error("GraphQL errors: {}", messages.join("; "))]
    Graphql { messages: Vec<String> },
    /// the endpoint returned a body that is neither data nor errors
    #[error("malformed GraphQL response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    pub fn graphql(messages: Vec<String>) -> Self {
        Self::Graphql { messages }
    }
}
