use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Message the backend put in `erro`, when there is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Unauthorized { message } | ClientError::Api { message, .. } => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}
