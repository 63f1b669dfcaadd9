use thiserror::Error;

/// Everything that can stop a comparison. Each variant renders as the single
/// line shown to the user.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Please enter all fields.")]
    MissingFields,
    #[error("Invalid Wikipedia URLs.")]
    InvalidUrl,
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Error fetching data for {title}: {status}")]
    Fetch { title: String, status: u16 },
    #[error("Error: invalid API base URL '{0}'")]
    InvalidEndpoint(String),
    #[error("Error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Error: {0}")]
    Decode(String),
    #[error("Error: {0}")]
    Render(String),
    #[error("Error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompareError {
    /// True for failures caught before any network call.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CompareError::MissingFields | CompareError::InvalidUrl | CompareError::InvalidDate(_)
        )
    }
}
