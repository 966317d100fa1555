//! Feature flags: a schema restricted to boolean fields that can be toggled
//! through environment variables.
//!
//! ```
//! use std::sync::LazyLock;
//! use acme_config::{AppConfig, FeatureFlag, FeatureFlags, Schema};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct MyFeatures {
//!     new_dashboard: bool,
//!     parallel_processing: bool,
//! }
//!
//! impl AppConfig for MyFeatures {
//!     fn schema() -> &'static Schema {
//!         static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
//!             Schema::flags("MyFeatures", "MYAPP_FEATURE_")
//!                 .flag(FeatureFlag::new("new_dashboard").description("Enable new dashboard UI"))
//!                 .flag(FeatureFlag::new("parallel_processing").default(true))
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! impl FeatureFlags for MyFeatures {}
//! ```

use serde::Serialize;
use toml::Value;

use crate::error::{ConfigError, SchemaError};
use crate::field::ConfigField;
use crate::schema::{AppConfig, Schema, SchemaBuilder};

/// Declaration of one boolean feature flag. Disabled unless a default says otherwise.
#[derive(Debug, Clone)]
pub struct FeatureFlag {
    name: String,
    default: bool,
    description: String,
}

impl FeatureFlag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: false,
            description: String::new(),
        }
    }

    pub fn default(mut self, enabled: bool) -> Self {
        self.default = enabled;
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }
}

impl From<FeatureFlag> for ConfigField {
    fn from(flag: FeatureFlag) -> Self {
        ConfigField::new::<bool>(&flag.name)
            .default(flag.default)
            .description(&flag.description)
    }
}

/// Schema builder that only accepts [`FeatureFlag`]s.
#[derive(Debug, Clone)]
pub struct FlagSchemaBuilder {
    inner: SchemaBuilder,
}

impl FlagSchemaBuilder {
    pub(crate) fn new(inner: SchemaBuilder) -> Self {
        Self { inner }
    }

    pub fn flag(mut self, flag: FeatureFlag) -> Self {
        self.inner = self.inner.field(flag.into());
        self
    }

    pub fn env_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.inner = self.inner.env_file(path);
        self
    }

    pub fn no_env_file(mut self) -> Self {
        self.inner = self.inner.no_env_file();
        self
    }

    pub fn build(self) -> Schema {
        self.inner.build()
    }

    pub fn try_build(self) -> Result<Schema, SchemaError> {
        self.inner.try_build()
    }
}

/// A resolved set of feature flags.
pub trait FeatureFlags: AppConfig {
    /// Look up a flag by field name.
    fn is_enabled(&self, flag: &str) -> Result<bool, ConfigError> {
        let schema = Self::schema();
        if schema.field(flag).is_none_or(|f| !f.field_type().is_boolean()) {
            return Err(ConfigError::UnknownFlag(flag.to_string()));
        }
        current_values(self)
            .and_then(|t| t.get(flag).and_then(Value::as_bool))
            .ok_or_else(|| ConfigError::UnknownFlag(flag.to_string()))
    }
}

/// State of one flag, as reported by [`list_flags`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagInfo {
    pub name: String,
    pub value: bool,
    pub description: String,
    pub default: bool,
}

/// All flags with their current and default state, in declaration order.
///
/// `FlagInfo` serializes cleanly, so the result can back an admin or debug
/// endpoint as JSON.
pub fn list_flags<F: FeatureFlags>(flags: &F) -> Vec<FlagInfo> {
    let Some(values) = current_values(flags) else {
        return Vec::new();
    };
    F::schema()
        .fields()
        .iter()
        .filter_map(|field| {
            let value = values.get(field.name())?.as_bool()?;
            Some(FlagInfo {
                name: field.name().to_string(),
                value,
                description: field.description().to_string(),
                default: field
                    .default_value()
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            })
        })
        .collect()
}

fn current_values<C: Serialize>(config: &C) -> Option<toml::Table> {
    match Value::try_from(config) {
        Ok(Value::Table(table)) => Some(table),
        _ => None,
    }
}
