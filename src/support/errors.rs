use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    /// A store constraint rejected the write.
    #[error("Constraint violation: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn booking_not_found(id: i32) -> Self {
        DomainError::NotFound {
            entity: "Booking",
            field: "id",
            value: id.to_string(),
        }
    }

    /// Whether the caller sent something wrong (as opposed to the server failing).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::NotFound { .. }
                | DomainError::Validation(_)
                | DomainError::Conflict(_)
                | DomainError::Unauthorized(_)
        )
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
