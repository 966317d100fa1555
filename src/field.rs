//! Field declarations and the metadata they compile into.

use toml::Value;

use crate::coerce::{Coercer, FieldValue};
use crate::types::FieldType;

/// Declaration of a single configuration field.
///
/// Fields are required unless they get a [`default`](Self::default) or are
/// marked [`optional`](Self::optional):
///
/// ```
/// use acme_config::ConfigField;
///
/// let name = ConfigField::new::<String>("name")
///     .description("App name")
///     .cli_flag("--name");
/// let port = ConfigField::new::<u16>("port").default(8080);
/// let key = ConfigField::new::<String>("api_key").default("").secret();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigField {
    pub(crate) name: String,
    pub(crate) field_type: FieldType,
    pub(crate) coercer: Coercer,
    pub(crate) default: Option<Value>,
    pub(crate) optional: bool,
    pub(crate) description: String,
    pub(crate) secret: bool,
    pub(crate) cli_flag: Option<String>,
}

impl ConfigField {
    /// Declare a field backed by the Rust type `T` (the type of the matching
    /// struct member).
    pub fn new<T: FieldValue>(name: &str) -> Self {
        Self::with_coercer(name, T::TYPE, Coercer::Scalar(T::coerce))
    }

    /// Declare a string field restricted to a fixed set of variants.
    pub fn choice(name: &str, variants: &'static [&'static str]) -> Self {
        Self::with_coercer(name, FieldType::Choice(variants), Coercer::Choice(variants))
    }

    fn with_coercer(name: &str, field_type: FieldType, coercer: Coercer) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            coercer,
            default: None,
            optional: false,
            description: String::new(),
            secret: false,
            cli_flag: None,
        }
    }

    /// Value used when no tier supplies one. Checked against the field type
    /// when the schema is built.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Not required, and no default: the struct member must be an `Option`.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    /// Redact this field's value in [`describe_config`](crate::describe_config).
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Expose the field on synthesized command lines, e.g. `"--bucket"` or `"-b"`.
    pub fn cli_flag(mut self, flag: &str) -> Self {
        self.cli_flag = Some(flag.to_string());
        self
    }
}

/// Immutable metadata for one declared field.
#[derive(Debug, Clone)]
pub struct FieldMeta {
    pub(crate) name: String,
    pub(crate) env_var: String,
    pub(crate) field_type: FieldType,
    pub(crate) coercer: Coercer,
    pub(crate) default: Option<Value>,
    pub(crate) required: bool,
    pub(crate) description: String,
    pub(crate) secret: bool,
    pub(crate) cli_flag: Option<String>,
}

impl FieldMeta {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully prefixed environment variable name.
    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The declared default, already coerced to the field type.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    pub fn cli_flag(&self) -> Option<&str> {
        self.cli_flag.as_deref()
    }

    pub(crate) fn coerce(&self, raw: &Value) -> Result<Value, String> {
        self.coercer.coerce(raw)
    }
}

/// Render a value the way it would be written in a dotenv file: strings bare,
/// everything else in its TOML form.
pub(crate) fn plain_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}
