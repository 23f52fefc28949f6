//! Service error model.

use thiserror::Error;

/// Result type used across the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type returned by persistence collaborators.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a persistence collaborator.
///
/// Constraint violations are the store's own enforcement of the uniqueness and
/// referential rules; services check the same rules up front, but the store is
/// the authoritative backstop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A write referenced a record that does not exist.
    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// The store could not serve the request (poisoned lock, lost connection, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unique(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }

    pub fn foreign_key(constraint: impl Into<String>) -> Self {
        Self::ForeignKeyViolation {
            constraint: constraint.into(),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Whether this failure is a constraint rejection rather than an outage.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::UniqueViolation { .. } | StoreError::ForeignKeyViolation { .. }
        )
    }
}

/// Error returned by every customer/document service operation.
///
/// Services only raise these kinds; mapping them to an external payload and a
/// status class happens once, at the HTTP boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed or missing required input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A uniqueness invariant would be violated.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// The referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Mapping between shapes, or JSON (de)serialization, failed.
    #[error("conversion failed: {0}")]
    Conversion(String),

    /// Unexpected failure inside a customer service operation.
    #[error("customer service error: {0}")]
    Customer(String),

    /// Unexpected failure inside a document service operation.
    #[error("document service error: {0}")]
    Document(String),

    /// Failure surfaced by the persistence collaborator.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    /// Kinds raised on purpose by service logic (or by store constraints).
    ///
    /// These pass through generic wrapping unchanged.
    pub fn is_deliberate(&self) -> bool {
        match self {
            ServiceError::Validation(_)
            | ServiceError::Duplicate(_)
            | ServiceError::NotFound(_) => true,
            ServiceError::Store(e) => e.is_constraint_violation(),
            _ => false,
        }
    }

    /// Keep deliberate kinds; replace everything else with `wrap(safe_message)`.
    ///
    /// The original failure is logged so the raw text never reaches clients.
    pub fn or_wrap(self, wrap: fn(String) -> ServiceError, safe_message: &str) -> ServiceError {
        if self.is_deliberate() {
            return self;
        }
        tracing::error!(error = %self, "unexpected service failure");
        wrap(safe_message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deliberate_kinds_pass_through_wrapping() {
        let not_found = ServiceError::not_found("customer not found");
        assert_eq!(
            not_found.clone().or_wrap(ServiceError::Customer, "failed"),
            not_found
        );

        let duplicate = ServiceError::duplicate("already registered");
        assert_eq!(
            duplicate.clone().or_wrap(ServiceError::Document, "failed"),
            duplicate
        );

        let unique = ServiceError::Store(StoreError::unique("customers_national_id_key"));
        assert_eq!(unique.clone().or_wrap(ServiceError::Customer, "failed"), unique);
    }

    #[test]
    fn unexpected_failures_are_wrapped_with_safe_message() {
        let err = ServiceError::Store(StoreError::unavailable("lock poisoned at 0x7f"))
            .or_wrap(ServiceError::Customer, "failed to update customer");
        assert_eq!(err, ServiceError::Customer("failed to update customer".to_string()));

        let err = ServiceError::conversion("missing field")
            .or_wrap(ServiceError::Document, "failed to save document");
        assert_eq!(err, ServiceError::Document("failed to save document".to_string()));
    }

    #[test]
    fn store_errors_convert_into_service_errors() {
        let err: ServiceError = StoreError::unavailable("down").into();
        match err {
            ServiceError::Store(StoreError::Unavailable(msg)) => assert_eq!(msg, "down"),
            other => panic!("Expected Store error, got {other:?}"),
        }
    }
}
