//! Error types for intake-core

use thiserror::Error;

/// Result type alias for intake operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for intake pipeline operations
///
/// Every failure carries enough context (the offending field or slot) for the
/// immediate caller to act on. Nothing is swallowed or retried internally:
/// `CatalogUnavailable` is retryable by the caller, `IncompleteCriteria` is a
/// caller error, and `SlotConflict` requires the caller to pick a different
/// slot or item.
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog data source could not be read
    #[error("catalog unavailable: {reason}")]
    CatalogUnavailable {
        /// What went wrong reading the catalog
        reason: String,
    },

    /// A snapshot, search, or reservation was requested before all required
    /// criteria fields were collected
    #[error("incomplete criteria, missing fields: {}", missing.join(", "))]
    IncompleteCriteria {
        /// Required fields that are still unset or empty
        missing: Vec<String>,
    },

    /// A reservation already exists for the requested (item, date, time) slot
    #[error("slot conflict: {item_id} is already reserved for {date} at {time}")]
    SlotConflict {
        /// Item whose slot is taken
        item_id: String,
        /// Requested date
        date: String,
        /// Requested time
        time: String,
    },

    /// A referenced catalog item does not exist
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// A criteria field value could not be interpreted
    #[error("invalid field {field}: {reason}")]
    InvalidField {
        /// Field name as supplied by the caller
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// An operation was attempted in a session state that does not allow it
    #[error("invalid session state: {0}")]
    InvalidState(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Construct a `CatalogUnavailable` error from any displayable cause
    pub fn catalog_unavailable(reason: impl std::fmt::Display) -> Self {
        Self::CatalogUnavailable {
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::IncompleteCriteria {
            missing: vec!["budget".to_string(), "category".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "incomplete criteria, missing fields: budget, category"
        );

        let err = Error::SlotConflict {
            item_id: "honda-civic".to_string(),
            date: "2025-06-01".to_string(),
            time: "10:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "slot conflict: honda-civic is already reserved for 2025-06-01 at 10:00"
        );
    }

    #[test]
    fn test_catalog_unavailable_helper() {
        let err = Error::catalog_unavailable("file not found");
        match err {
            Error::CatalogUnavailable { reason } => assert_eq!(reason, "file not found"),
            _ => panic!("expected CatalogUnavailable"),
        }
    }
}
