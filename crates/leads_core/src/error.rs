use thiserror::Error;

/// Failure of a single call to the lead service, or of local validation before one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {status}{}", message_suffix(.message))]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("invalid input: {0}")]
    Validation(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else if let Some(status) = value.status() {
            Self::Server {
                status: status.as_u16(),
                message: None,
            }
        } else {
            Self::Network(value.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

/// Failure of a controller operation. The store and any open edit session are left as
/// they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadsError {
    #[error("failed to fetch leads: {0}")]
    Fetch(#[source] ClientError),
    #[error("failed to submit lead: {0}")]
    Submit(#[source] ClientError),
    #[error("failed to update lead {phone}: {source}")]
    Update {
        phone: String,
        #[source]
        source: ClientError,
    },
    #[error("failed to delete lead {phone}: {source}")]
    Delete {
        phone: String,
        #[source]
        source: ClientError,
    },
    #[error("login failed: {0}")]
    Login(#[source] ClientError),
    #[error("signup failed: {0}")]
    Signup(#[source] ClientError),
    #[error("a submission is already in progress")]
    SubmitInFlight,
}

impl LeadsError {
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Fetch(source)
            | Self::Submit(source)
            | Self::Login(source)
            | Self::Signup(source)
            | Self::Update { source, .. }
            | Self::Delete { source, .. } => Some(source),
            Self::SubmitInFlight => None,
        }
    }

    /// Short text suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> String {
        let fallback = match self {
            Self::Fetch(_) => "Error fetching data.",
            Self::Submit(_) => "Error submitting form.",
            Self::Update { .. } => "Error updating record.",
            Self::Delete { .. } => "Error deleting record.",
            Self::Login(_) => "Login failed",
            Self::Signup(_) => "Signup failed",
            Self::SubmitInFlight => return "Submission already in progress.".to_string(),
        };

        match self.client_error() {
            Some(ClientError::Network(_)) => "Network error".to_string(),
            Some(ClientError::Validation(reason)) => reason.clone(),
            Some(err) => err
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            None => fallback.to_string(),
        }
    }
}
