//! Error types.
//!
//! Every [`ScheduleError`] is recoverable: it is reported to the caller and
//! the notification sink, and the store is left exactly as it was.

use thiserror::Error;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// A rejected timetable operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("{entity} '{key}' already exists")]
    DuplicateKey { entity: &'static str, key: String },
    #[error("hours per week must be a positive integer, got '{value}'")]
    InvalidQuota { value: String },
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },
    #[error("{name} already has maximum assigned hours ({hours_per_week})")]
    QuotaExceeded {
        code: String,
        name: String,
        hours_per_week: u32,
    },
}

/// Fieldless category of a [`ScheduleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    DuplicateKey,
    InvalidQuota,
    NotFound,
    QuotaExceeded,
}

impl ScheduleError {
    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn empty_field(field: &'static str) -> Self {
        Self::invalid_input(field, "must not be empty")
    }

    pub(crate) fn duplicate(entity: &'static str, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            Self::InvalidQuota { .. } => ErrorKind::InvalidQuota,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
        }
    }

    /// Short heading used when the error is shown as a notification.
    pub fn title(&self) -> &'static str {
        match self.kind() {
            ErrorKind::QuotaExceeded => "Subject Hours Exceeded!",
            ErrorKind::NotFound => "Not Found",
            _ => "Error",
        }
    }
}

/// Failure to read or write persisted state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ScheduleError::duplicate("faculty", "F1");
        assert_eq!(err.to_string(), "faculty 'F1' already exists");
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(err.title(), "Error");

        let err = ScheduleError::QuotaExceeded {
            code: "CS101".into(),
            name: "Intro to CS".into(),
            hours_per_week: 2,
        };
        assert_eq!(
            err.to_string(),
            "Intro to CS already has maximum assigned hours (2)"
        );
        assert_eq!(err.title(), "Subject Hours Exceeded!");
    }

    #[test]
    fn test_not_found_title() {
        let err = ScheduleError::not_found("subject", "X");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.title(), "Not Found");
    }
}
