//! Error types for catalog write and read operations.
//!
//! Every integrity rule the services enforce surfaces as one of these
//! variants; callers get the rejection synchronously and nothing is
//! retried.

use thiserror::Error;

/// Catalog operation errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Row not found (or tombstoned) by ID
    #[error("{entity} {id} not found")]
    NotFound {
        /// Table the lookup ran against
        entity: &'static str,
        id: i32,
    },

    /// Unique-column collision
    #[error("{entity}.{field} '{value}' already exists")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Required text field was empty or whitespace
    #[error("{entity}.{field} must not be blank")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// Value is not a member of its choice domain
    #[error("'{value}' is not a valid {domain}")]
    InvalidChoice {
        domain: &'static str,
        value: String,
    },

    /// Field must hold an absolute URL
    #[error("{entity}.{field} '{value}' is not an absolute URL")]
    InvalidUrl {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Foreign key points at a missing or tombstoned row
    #[error("{entity}.{field} references missing row {id}")]
    MissingReference {
        entity: &'static str,
        field: &'static str,
        id: i32,
    },

    /// Deletion blocked while other rows still reference this one
    #[error("{entity} {id} is still referenced by {count} {by} row(s)")]
    StillReferenced {
        entity: &'static str,
        id: i32,
        /// Table holding the blocking references
        by: &'static str,
        count: u64,
    },

    /// Sign-up attempted while registration is closed
    #[error("Account registration is closed")]
    RegistrationClosed,

    /// Malformed JSON in a list or config payload
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    /// Check if this is a conflict with existing data (409)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            CatalogError::Duplicate { .. } | CatalogError::StillReferenced { .. }
        )
    }

    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Duplicate { .. }
                | CatalogError::MissingField { .. }
                | CatalogError::InvalidChoice { .. }
                | CatalogError::InvalidUrl { .. }
                | CatalogError::MissingReference { .. }
                | CatalogError::StillReferenced { .. }
                | CatalogError::RegistrationClosed
                | CatalogError::Json(_)
        )
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::NotFound { .. } => "NOT_FOUND",
            CatalogError::Duplicate { .. } | CatalogError::StillReferenced { .. } => "CONFLICT",
            CatalogError::MissingField { .. }
            | CatalogError::InvalidChoice { .. }
            | CatalogError::InvalidUrl { .. }
            | CatalogError::MissingReference { .. }
            | CatalogError::Json(_) => "VALIDATION_FAILED",
            CatalogError::RegistrationClosed => "REGISTRATION_CLOSED",
            CatalogError::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let err = CatalogError::NotFound {
            entity: "projects",
            id: 42,
        };
        assert_eq!(err.to_string(), "projects 42 not found");
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_duplicate() {
        let err = CatalogError::Duplicate {
            entity: "projects",
            field: "name",
            value: "Sales".to_string(),
        };
        assert_eq!(err.to_string(), "projects.name 'Sales' already exists");
        assert!(err.is_conflict());
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_invalid_choice() {
        let err = CatalogError::InvalidChoice {
            domain: "table type",
            value: "BOGUS".to_string(),
        };
        assert_eq!(err.to_string(), "'BOGUS' is not a valid table type");
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_still_referenced() {
        let err = CatalogError::StillReferenced {
            entity: "table_stores",
            id: 7,
            by: "template_input_tables",
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "table_stores 7 is still referenced by 2 template_input_tables row(s)"
        );
        assert!(err.is_conflict());
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_registration_closed() {
        let err = CatalogError::RegistrationClosed;
        assert_eq!(err.to_string(), "Account registration is closed");
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "REGISTRATION_CLOSED");
    }
}
