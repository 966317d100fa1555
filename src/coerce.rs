//! Raw-value coercion: turn whatever a tier supplied into the typed value a
//! field declares.
//!
//! File, environment and CLI tiers always supply strings; overrides may supply
//! typed `toml::Value`s. Parsing is delegated to each Rust type's `FromStr`, so
//! range checks (a `u16` port rejecting `70000`) come for free. Anything that
//! does not parse is a hard error; there is no silent fallback to a default.

use std::path::PathBuf;

use toml::Value;

use crate::types::FieldType;

/// A Rust type that can back a declared config field.
pub trait FieldValue {
    const TYPE: FieldType;

    /// Coerce a raw tier value into the canonical `toml::Value` for this type.
    fn coerce(raw: &Value) -> Result<Value, String>;
}

/// How a field turns raw values into typed ones.
#[derive(Clone, Copy)]
pub(crate) enum Coercer {
    Scalar(fn(&Value) -> Result<Value, String>),
    Choice(&'static [&'static str]),
}

impl Coercer {
    pub(crate) fn coerce(&self, raw: &Value) -> Result<Value, String> {
        match self {
            Coercer::Scalar(f) => f(raw),
            Coercer::Choice(variants) => match raw {
                Value::String(s) if variants.contains(&s.as_str()) => Ok(raw.clone()),
                Value::String(s) => Err(format!(
                    "'{s}' is not one of {}",
                    variants.join(", ")
                )),
                other => Err(mismatch(other, "string")),
            },
        }
    }
}

impl std::fmt::Debug for Coercer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coercer::Scalar(_) => f.write_str("Scalar"),
            Coercer::Choice(v) => f.debug_tuple("Choice").field(v).finish(),
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "boolean",
        Value::Datetime(_) => "datetime",
        Value::Array(_) => "array",
        Value::Table(_) => "table",
    }
}

fn mismatch(value: &Value, expected: &str) -> String {
    format!("expected {expected}, got {}", kind_name(value))
}

impl FieldValue for String {
    const TYPE: FieldType = FieldType::String;

    fn coerce(raw: &Value) -> Result<Value, String> {
        match raw {
            Value::String(_) => Ok(raw.clone()),
            other => Err(mismatch(other, "string")),
        }
    }
}

impl FieldValue for PathBuf {
    const TYPE: FieldType = FieldType::String;

    fn coerce(raw: &Value) -> Result<Value, String> {
        String::coerce(raw)
    }
}

impl FieldValue for bool {
    const TYPE: FieldType = FieldType::Boolean;

    fn coerce(raw: &Value) -> Result<Value, String> {
        match raw {
            Value::Boolean(_) => Ok(raw.clone()),
            Value::Integer(0) => Ok(Value::Boolean(false)),
            Value::Integer(1) => Ok(Value::Boolean(true)),
            Value::String(s) => parse_bool(s)
                .map(Value::Boolean)
                .ok_or_else(|| format!("invalid boolean '{s}'")),
            other => Err(mismatch(other, "boolean")),
        }
    }
}

/// Accepts the usual truthy/falsy spellings, case-insensitively.
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

macro_rules! integer_field_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl FieldValue for $t {
                const TYPE: FieldType = FieldType::Integer;

                fn coerce(raw: &Value) -> Result<Value, String> {
                    let n: $t = match raw {
                        Value::String(s) => s
                            .trim()
                            .parse()
                            .map_err(|e| format!("invalid integer '{s}': {e}"))?,
                        Value::Integer(i) => <$t>::try_from(*i)
                            .map_err(|_| format!("{i} is out of range for {}", stringify!($t)))?,
                        other => return Err(mismatch(other, "integer")),
                    };
                    i64::try_from(n)
                        .map(Value::Integer)
                        .map_err(|_| format!("{n} does not fit in a 64-bit integer"))
                }
            }
        )*
    };
}

integer_field_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

macro_rules! float_field_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl FieldValue for $t {
                const TYPE: FieldType = FieldType::Float;

                fn coerce(raw: &Value) -> Result<Value, String> {
                    match raw {
                        Value::String(s) => s
                            .trim()
                            .parse::<$t>()
                            .map(|f| Value::Float(f as f64))
                            .map_err(|e| format!("invalid float '{s}': {e}")),
                        Value::Float(_) => Ok(raw.clone()),
                        Value::Integer(i) => Ok(Value::Float(*i as f64)),
                        other => Err(mismatch(other, "float")),
                    }
                }
            }
        )*
    };
}

float_field_value!(f32, f64);
