// ⚠️ Error taxonomy for the seeding pipeline
// Parse → Schema → Write, one variant per stage that can fail

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Underlying cause of a ParseError
#[derive(Debug, Error)]
pub enum ParseCause {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SeedError {
    /// Input missing, unreadable or not well-formed JSON
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseCause,
    },

    /// A feature (or the collection itself) lacks an expected field
    #[error("feature {}: {message}", feature_label(.index))]
    Schema {
        /// Zero-based feature index, None when the collection itself is malformed
        index: Option<usize>,
        field: &'static str,
        message: String,
    },

    /// Destination could not be created or written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn feature_label(index: &Option<usize>) -> String {
    match index {
        Some(i) => i.to_string(),
        None => "collection".to_string(),
    }
}

impl SeedError {
    pub(crate) fn parse(path: impl Into<PathBuf>, source: impl Into<ParseCause>) -> Self {
        SeedError::Parse {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn missing(index: Option<usize>, field: &'static str) -> Self {
        SeedError::Schema {
            index,
            field,
            message: format!("missing '{}'", field),
        }
    }

    pub(crate) fn wrong_type(index: Option<usize>, field: &'static str, expected: &str) -> Self {
        SeedError::Schema {
            index,
            field,
            message: format!("'{}' is not {}", field, expected),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SeedError::Write {
            path: path.into(),
            source,
        }
    }

    /// Short stage name, handy for console reporting
    pub fn kind(&self) -> &'static str {
        match self {
            SeedError::Parse { .. } => "ParseError",
            SeedError::Schema { .. } => "SchemaError",
            SeedError::Write { .. } => "WriteError",
        }
    }
}

pub type Result<T> = std::result::Result<T, SeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message_names_feature_and_field() {
        let err = SeedError::missing(Some(3), "NAME");
        assert_eq!(err.kind(), "SchemaError");
        assert_eq!(err.to_string(), "feature 3: missing 'NAME'");
    }

    #[test]
    fn test_schema_error_for_collection() {
        let err = SeedError::missing(None, "features");
        assert_eq!(err.to_string(), "feature collection: missing 'features'");
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = SeedError::parse("Neighborhoods.geojson", io_err);
        assert_eq!(err.kind(), "ParseError");
        assert!(err.to_string().contains("Neighborhoods.geojson"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
