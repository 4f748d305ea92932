/// An error returned by a collaborator fetching data for the explorer.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be completed.
    #[error("network error: {0}")]
    Network(String),
    /// The request was rejected due to missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,
    /// The response could not be interpreted, for instance because of an unknown event source.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
