//! The two caller-supplied tiers: CLI arguments and explicit overrides.
//!
//! CLI entries carry `Option<Value>` so that "not provided" (`None`) stays
//! distinct from a real falsy value like `Some(false)` or `Some("")`. Only
//! `Some` entries take part in the merge. Overrides are plain values and are
//! never skipped.

use serde::Serialize;
use toml::{Table, Value};

use crate::schema::Schema;

/// CLI-tier values keyed by field name. `None` means "not provided".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    entries: Vec<(String, Option<Value>)>,
}

impl CliArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value supplied on the command line.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.insert(field, Some(value.into()));
        self
    }

    /// Record that a field was not supplied.
    pub fn absent(mut self, field: &str) -> Self {
        self.insert(field, None);
        self
    }

    /// Insert or replace the entry for `field`.
    pub fn insert(&mut self, field: &str, value: Option<Value>) {
        match self.entries.iter_mut().find(|(k, _)| k == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field.to_string(), value)),
        }
    }

    /// `None` when the field has no entry at all, `Some(None)` when it was
    /// recorded as not provided.
    pub fn get(&self, field: &str) -> Option<Option<&Value>> {
        self.entries
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_ref())
    }

    pub fn is_provided(&self, field: &str) -> bool {
        matches!(self.get(field), Some(Some(_)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect CLI values from any serializable source, such as a clap derive
    /// struct or a `HashMap`.
    ///
    /// Only top-level keys are read. `Option::None` members are not
    /// serialized and therefore count as not provided. Plain `bool` members
    /// always serialize, so use `Option<bool>` to keep "absent" distinguishable.
    pub fn from_serialize<S: Serialize>(source: &S) -> Result<Self, toml::ser::Error> {
        let value = Value::try_from(source)?;
        let mut args = CliArgs::new();
        if let Value::Table(table) = value {
            for (key, value) in table {
                args.insert(&key, Some(value));
            }
        }
        Ok(args)
    }
}

impl FromIterator<(String, Option<Value>)> for CliArgs {
    fn from_iter<I: IntoIterator<Item = (String, Option<Value>)>>(iter: I) -> Self {
        let mut args = CliArgs::new();
        for (key, value) in iter {
            args.insert(&key, value);
        }
        args
    }
}

/// Build the CLI layer: provided entries only, unknown fields dropped.
pub fn cli_args_to_table(schema: &Schema, args: &CliArgs) -> Table {
    let mut table = Table::new();
    for (key, value) in args.iter() {
        let Some(value) = value else {
            continue;
        };
        if schema.field(key).is_none() {
            tracing::warn!(schema = schema.name(), key, "ignoring CLI value for unknown field");
            continue;
        }
        table.insert(key.to_string(), value.clone());
    }
    table
}

/// Build the override layer. If multiple entries target the same field, the
/// last one wins.
pub fn overrides_to_table(schema: &Schema, entries: &[(String, Value)]) -> Table {
    let mut table = Table::new();
    for (key, value) in entries {
        if schema.field(key).is_none() {
            tracing::warn!(schema = schema.name(), key = %key, "ignoring override for unknown field");
            continue;
        }
        table.insert(key.clone(), value.clone());
    }
    table
}
