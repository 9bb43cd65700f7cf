use thiserror::Error;

/// Everything a screen can get back from the engine. Errors are values the
/// current screen renders inline; nothing here is meant to crash the app.
#[derive(Debug, Error)]
pub enum Error {
    /// Synchronous, field-level validation failure. The message is already
    /// user-facing ("Mobile number must be 10 digits").
    #[error("{message}")]
    Validation { message: String },

    /// A collaborator call failed at the transport level.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The collaborator answered, but with a non-success payload.
    #[error("{message}")]
    Collaborator { message: String },

    /// Requested plan or user does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation { message: message.into() }
    }

    pub fn collaborator(message: impl Into<String>) -> Self {
        Error::Collaborator { message: message.into() }
    }

    /// The inline string a step banner should show. Network failures get the
    /// generic retry message; the real cause goes to the log.
    pub fn step_message(&self) -> String {
        match self {
            Error::Network(e) => {
                log::error!("collaborator call failed: {e}");
                "Server error. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
