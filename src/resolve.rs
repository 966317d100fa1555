//! Core resolution pipeline: merge all tiers and produce a typed config.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Steps:
//!
//! 1. Declared defaults
//! 2. Dotenv file pairs
//! 3. Environment variables
//! 4. CLI args (provided entries only)
//! 5. Explicit overrides (highest priority)
//! 6. Coerce each field's winning value, collecting every failure
//! 7. Deserialize the coerced table into the config struct

use toml::{Table, Value};

use crate::env;
use crate::error::{ConfigError, FieldError, FieldErrorKind, ValidationError};
use crate::merge::Layered;
use crate::overrides::{self, CliArgs};
use crate::schema::{AppConfig, Schema};
use crate::types::Source;

/// All pre-loaded data needed to resolve a config. No I/O happens here.
#[derive(Debug, Clone, Default)]
pub struct ResolveInput {
    /// `KEY=value` pairs read from the dotenv file.
    pub file_vars: Vec<(String, String)>,
    /// Raw environment variable pairs (the process environment or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Environment variables whose value is not valid UTF-8. Only the names
    /// are kept; a field whose env var is listed fails unless a CLI argument
    /// or override supplies it.
    pub non_utf8_env: Vec<String>,
    pub cli_args: CliArgs,
    /// Explicit `(field, value)` overrides.
    pub overrides: Vec<(String, Value)>,
}

/// Resolve a config struct from pre-loaded inputs.
pub fn resolve<C: AppConfig>(input: ResolveInput) -> Result<C, ConfigError> {
    let schema = C::schema();
    let table = resolve_table(schema, input)?;

    Value::Table(table)
        .try_into()
        .map_err(|source| ConfigError::SchemaMismatch {
            schema: schema.name().to_string(),
            source,
        })
}

/// Merge and coerce, returning every field problem at once.
///
/// Optional fields without a default and without a supplied value are left
/// out of the table, so they deserialize as `None`.
pub fn resolve_table(schema: &Schema, input: ResolveInput) -> Result<Table, ValidationError> {
    let mut merged = Layered::default();

    let defaults: Table = schema
        .fields()
        .iter()
        .filter_map(|f| Some((f.name().to_string(), f.default_value()?.clone())))
        .collect();
    merged.overlay(defaults, Source::Default);
    merged.overlay(env::env_to_table(schema, input.file_vars), Source::File);
    merged.overlay(env::env_to_table(schema, input.env_vars), Source::Env);
    merged.overlay(
        overrides::cli_args_to_table(schema, &input.cli_args),
        Source::Cli,
    );
    merged.overlay(
        overrides::overrides_to_table(schema, &input.overrides),
        Source::Override,
    );

    let mut table = Table::new();
    let mut errors = Vec::new();

    for field in schema.fields() {
        let winner = merged.get(field.name());
        let env_unreadable = input.non_utf8_env.iter().any(|k| k == field.env_var());
        if env_unreadable && winner.is_none_or(|(_, source)| *source < Source::Cli) {
            errors.push(FieldError {
                field: field.name().to_string(),
                env_var: field.env_var().to_string(),
                kind: FieldErrorKind::Invalid { source: Source::Env },
                message: "value is not valid UTF-8".into(),
            });
            continue;
        }

        let Some((raw, source)) = winner else {
            if field.is_required() {
                errors.push(FieldError {
                    field: field.name().to_string(),
                    env_var: field.env_var().to_string(),
                    kind: FieldErrorKind::Missing,
                    message: "missing required value".into(),
                });
            }
            continue;
        };

        match field.coerce(raw) {
            Ok(value) => {
                tracing::debug!(
                    schema = schema.name(),
                    field = field.name(),
                    source = %source,
                    "resolved field"
                );
                table.insert(field.name().to_string(), value);
            }
            Err(message) => errors.push(FieldError {
                field: field.name().to_string(),
                env_var: field.env_var().to_string(),
                kind: FieldErrorKind::Invalid { source: *source },
                message,
            }),
        }
    }

    if errors.is_empty() {
        Ok(table)
    } else {
        tracing::debug!(
            schema = schema.name(),
            errors = errors.len(),
            "resolution failed"
        );
        Err(ValidationError {
            schema: schema.name().to_string(),
            errors,
        })
    }
}
