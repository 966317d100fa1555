use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Source;

/// A defect in a schema declaration, detected when the schema is built.
///
/// These are programming errors, not runtime conditions: the fix is to change
/// the declaration. [`SchemaBuilder::build`](crate::SchemaBuilder::build)
/// panics with one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Schema '{schema}' has an empty env prefix")]
    EmptyPrefix { schema: String },

    #[error("Field '{field}' is declared twice in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    #[error("Fields '{first}' and '{second}' both map to env var {env_var}")]
    AmbiguousEnvName {
        first: String,
        second: String,
        env_var: String,
    },

    #[error("Invalid CLI flag '{flag}' on field '{field}': {reason}")]
    InvalidCliFlag {
        field: String,
        flag: String,
        reason: &'static str,
    },

    #[error("CLI flag '{flag}' is used by both '{first}' and '{second}'")]
    DuplicateCliFlag {
        flag: String,
        first: String,
        second: String,
    },

    #[error("Default for field '{field}' does not match its type: {reason}")]
    InvalidDefault { field: String, reason: String },
}

/// What went wrong with a single field during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// A required field received no value from any tier.
    Missing,
    /// The winning raw value could not be coerced to the declared type.
    Invalid { source: Source },
}

/// One field-level problem found by a resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub env_var: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::Missing => {
                write!(f, "{} ({}): {}", self.field, self.env_var, self.message)
            }
            FieldErrorKind::Invalid { source } => write!(
                f,
                "{} ({}): {} (from {source})",
                self.field, self.env_var, self.message
            ),
        }
    }
}

/// Every field problem from one resolution pass, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub schema: String,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// One human-readable line per field problem.
    pub fn issues(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} validation error(s) for {}",
            self.errors.len(),
            self.schema
        )?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to read env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("Resolved values do not fit the {schema} struct: {source}")]
    SchemaMismatch {
        schema: String,
        source: toml::de::Error,
    },

    #[error("Unknown feature flag '{0}'")]
    UnknownFlag(String),
}

impl ConfigError {
    /// Flatten into one line per problem. Field-level failures expand to one
    /// line each; everything else is a single line.
    pub fn issues(&self) -> Vec<String> {
        match self {
            ConfigError::Validation(v) => v.issues(),
            other => vec![other.to_string()],
        }
    }
}
