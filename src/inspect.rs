//! Inspection utilities derived from the metadata table: env manifest,
//! dotenv template, environment validation, and redacted description.
//!
//! Manifest and template output depend only on the schema, so the same
//! schema always produces byte-identical text (safe to diff in CI).

use toml::Value;

use crate::builder::Resolver;
use crate::field::{FieldMeta, plain_value};
use crate::schema::{AppConfig, Schema};

/// Marker shown in place of secret values.
pub const REDACTED: &str = "***";

/// List every env var the schema reads, with its requirement status.
///
/// ```text
/// SAMPLE_NAME  # App name [required]
/// SAMPLE_PORT  # Port number [default=8080]
/// SAMPLE_DB_PASSWORD  # DB password [default=] [secret]
/// ```
pub fn generate_manifest(schema: &Schema) -> String {
    let mut lines = vec![
        "# Environment variable manifest".to_string(),
        format!("# Generated from {}", schema.name()),
        "#".to_string(),
        "# Format: ENV_VAR_NAME  # description [required|default=value|optional] [secret]"
            .to_string(),
        String::new(),
    ];

    for field in schema.fields() {
        let status = status(field);
        let secret = if field.is_secret() { " [secret]" } else { "" };
        let description = one_line(field.description());
        let line = if description.is_empty() {
            format!("{}  # {status}{secret}", field.env_var())
        } else {
            format!("{}  # {description} [{status}]{secret}", field.env_var())
        };
        lines.push(line);
    }

    lines.join("\n") + "\n"
}

/// Collapse a multi-line description so each manifest entry stays on one line.
fn one_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn status(field: &FieldMeta) -> String {
    if field.is_required() {
        "required".to_string()
    } else if let Some(default) = field.default_value() {
        format!("default={}", plain_value(default))
    } else {
        "optional".to_string()
    }
}

/// Produce a `.env.example` with one block per field.
///
/// Required fields are left uncommented and empty so they stand out; fields
/// with a default, or optional ones, are commented out.
pub fn generate_dotenv_template(schema: &Schema) -> String {
    let mut lines = vec![
        format!("# .env template for {}", schema.name()),
        "# Copy to .env and fill in values".to_string(),
        String::new(),
    ];

    for field in schema.fields() {
        for text in field.description().lines() {
            lines.push(format!("# {text}").trim_end().to_string());
        }
        let line = if field.is_required() {
            format!("{}=", field.env_var())
        } else if let Some(default) = field.default_value() {
            format!("# {}={}", field.env_var(), plain_value(default))
        } else {
            format!("# {}=", field.env_var())
        };
        lines.push(line);
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Check the real dotenv file and process environment for problems.
///
/// Returns one line per issue; an empty list means `C` would resolve.
pub fn validate_env<C: AppConfig>() -> Vec<String> {
    Resolver::<C>::new().validate()
}

/// Pretty-print a config with secret fields redacted, for startup logs.
///
/// ```text
/// SampleConfig:
///   name = "svc"
///   port = 8080
///   db_password = ***
/// ```
pub fn describe_config<C: AppConfig>(config: &C) -> String {
    let schema = C::schema();
    let values = match Value::try_from(config) {
        Ok(Value::Table(table)) => table,
        _ => toml::Table::new(),
    };

    let mut lines = vec![format!("{}:", schema.name())];
    for field in schema.fields() {
        let display = if field.is_secret() {
            REDACTED.to_string()
        } else {
            match values.get(field.name()) {
                Some(value) => display_value(value),
                None => "<not set>".to_string(),
            }
        };
        lines.push(format!("  {} = {display}", field.name()));
    }

    lines.join("\n")
}

/// Strings are quoted so that empty values stay visible.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{s:?}"),
        other => plain_value(other),
    }
}
