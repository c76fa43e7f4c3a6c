use std::path::PathBuf;
use thiserror::Error;

/// Result alias used by the record store and the entity services
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by the storage layer and the services built on it
#[derive(Error, Debug)]
pub enum StoreError {
    /// Identifier text that is not made of ASCII digits only
    #[error("ID must only contain digits, got {0:?}")]
    InvalidId(String),

    /// Identifier not present in the collection
    #[error("{kind} with ID={id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// Read or write failure other than a missing file
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Collection file exists but is not a valid JSON array of records
    #[error("cannot convert JSON in {} to records: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be serialized
    #[error("cannot convert records to JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// Input rejected before storage was touched
    #[error("{0}")]
    Validation(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Parse user supplied identifier text (`^[0-9]+$`)
pub fn parse_id(text: &str) -> StoreResult<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::InvalidId(text.to_string()));
    }
    text.parse::<u64>()
        .map_err(|_| StoreError::InvalidId(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_digits() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("0042").unwrap(), 42);
    }

    #[test]
    fn test_parse_id_rejects_non_digits() {
        for text in ["", "-1", "1a", " 1", "+3", "1.0", "١"] {
            let err = parse_id(text).unwrap_err();
            assert!(matches!(err, StoreError::InvalidId(_)), "{text:?} accepted");
        }
    }

    #[test]
    fn test_parse_id_rejects_overflow() {
        let err = parse_id("99999999999999999999999").unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
    }

    #[test]
    fn test_not_found_message() {
        let err = StoreError::NotFound { kind: "task", id: 7 };
        assert_eq!(err.to_string(), "task with ID=7 not found");
        assert!(err.is_not_found());
    }
}
