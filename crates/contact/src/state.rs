/// Shown when the relay answered 2xx without confirming success and gave no reason.
pub const SEND_FAILED_MESSAGE: &str = "Failed to send message.";

/// Shown when the relay could not be reached or gave no usable reason.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Failed to send message. Please check your connection and try again.";

/// Where a contact form stands with respect to its last submit attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// `Succeeded` and `Failed` wait for the user; nothing moves them on automatically.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
