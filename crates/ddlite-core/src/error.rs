//! Error types for statement building.

/// Errors raised while rendering a statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The statement needs a table name and none was set.
    #[error("no table name was set")]
    MissingTableName,

    /// A utility query was rendered before any statement was selected.
    #[error("no utility statement was selected")]
    NoStatement,

    /// A builder argument was rejected.
    #[error("invalid {argument}: {reason}")]
    InvalidArgument {
        /// What the argument describes (e.g. "column name").
        argument: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl BuildError {
    pub(crate) fn invalid(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

/// Result type for statement building.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Rejects empty or whitespace-only identifiers.
pub(crate) fn check_identifier(argument: &'static str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(BuildError::invalid(argument, "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BuildError::MissingTableName.to_string(),
            "no table name was set"
        );
        assert_eq!(
            BuildError::invalid("column name", "must not be empty").to_string(),
            "invalid column name: must not be empty"
        );
    }

    #[test]
    fn test_check_identifier() {
        assert!(check_identifier("table name", "users").is_ok());
        assert!(matches!(
            check_identifier("table name", "  "),
            Err(BuildError::InvalidArgument {
                argument: "table name",
                ..
            })
        ));
    }
}
