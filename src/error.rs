use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid relation: {0}")]
    InvalidRelation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    ValidatorError(#[from] validator::ValidationErrors),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound(format!("{} not found", resource))
    }

    pub fn invalid_relation(msg: &str) -> Self {
        Self::InvalidRelation(msg.to_string())
    }

    pub fn forbidden(msg: &str) -> Self {
        Self::Authorization(msg.to_string())
    }

    pub fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn internal(msg: &str) -> Self {
        Self::Internal(msg.to_string())
    }

    /// Client errors map to bad-request semantics in the resolver layer
    /// above; everything else is a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::InvalidRelation(_)
                | Self::Validation(_)
                | Self::ValidatorError(_)
                | Self::Authorization(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(AppError::not_found("Comment").is_client_error());
        assert!(AppError::invalid_relation("parent on another post").is_client_error());
        assert!(AppError::forbidden("moderators only").is_client_error());
        assert!(!AppError::internal("store failure").is_client_error());
    }

    #[test]
    fn test_not_found_message() {
        let err = AppError::not_found("Comment");
        assert_eq!(err.to_string(), "Not found: Comment not found");
    }
}
