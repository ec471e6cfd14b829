use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Scheduling conflict: {0}")]
    Conflict(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Transport error: {0}")]
    Transport(#[from] eyre::Report),
}

impl ScheduleError {
    /// Message shown inline next to the action that failed.
    ///
    /// Variant prefixes are dropped, and an empty transport message becomes
    /// "Unknown error".
    pub fn user_message(&self) -> String {
        let message = match self {
            ScheduleError::NotFound(m)
            | ScheduleError::Validation(m)
            | ScheduleError::Authentication(m)
            | ScheduleError::Authorization(m)
            | ScheduleError::Conflict(m)
            | ScheduleError::Service(m) => m.clone(),
            ScheduleError::Transport(report) => report.to_string(),
        };

        if message.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            message
        }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
