//! Schema declaration: the single metadata table every other component reads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SchemaError;
use crate::features::FlagSchemaBuilder;
use crate::field::{ConfigField, FieldMeta};

/// Default dotenv file consulted by resolution, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// The base contract of an application configuration.
///
/// Implementors are plain `serde` structs whose members mirror the fields
/// declared in [`schema()`](Self::schema). The schema is built once, usually in
/// a `static LazyLock`:
///
/// ```
/// use std::sync::LazyLock;
/// use acme_config::{AppConfig, ConfigField, Schema};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct MyConfig {
///     bucket: String,
///     debug: bool,
/// }
///
/// impl AppConfig for MyConfig {
///     fn schema() -> &'static Schema {
///         static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
///             Schema::builder("MyConfig", "MYAPP_")
///                 .field(ConfigField::new::<String>("bucket").cli_flag("--bucket"))
///                 .field(ConfigField::new::<bool>("debug").default(false))
///                 .build()
///         });
///         &SCHEMA
///     }
/// }
/// ```
pub trait AppConfig: Serialize + DeserializeOwned {
    fn schema() -> &'static Schema;
}

/// An immutable, ordered table of field metadata plus the env naming rules.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    env_prefix: String,
    env_file: Option<PathBuf>,
    fields: Vec<FieldMeta>,
}

impl Schema {
    pub fn builder(name: &str, env_prefix: &str) -> SchemaBuilder {
        SchemaBuilder::new(name, env_prefix)
    }

    /// Start a feature-flag schema, which only accepts boolean flags.
    pub fn flags(name: &str, env_prefix: &str) -> FlagSchemaBuilder {
        FlagSchemaBuilder::new(SchemaBuilder::new(name, env_prefix))
    }

    /// Display name, used in generated headers and error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// The dotenv file consulted when the caller does not pass one.
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn env_var_name(&self, field_name: &str) -> String {
        env_var_name(&self.env_prefix, field_name)
    }
}

/// `{prefix}{FIELD_NAME}`: the one env naming rule every tier and generator uses.
fn env_var_name(prefix: &str, field_name: &str) -> String {
    format!("{prefix}{}", field_name.to_uppercase())
}

/// Collects field declarations and compiles them into a [`Schema`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    env_prefix: String,
    env_file: Option<PathBuf>,
    fields: Vec<ConfigField>,
}

impl SchemaBuilder {
    fn new(name: &str, env_prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            env_prefix: env_prefix.to_string(),
            env_file: Some(PathBuf::from(DEFAULT_ENV_FILE)),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: ConfigField) -> Self {
        self.fields.push(field);
        self
    }

    /// Change the default dotenv file (default: `.env`).
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Never read a dotenv file unless the caller passes one explicitly.
    pub fn no_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    /// Compile the declarations, panicking on a malformed schema.
    ///
    /// A bad declaration is a programming error, so this is meant to run
    /// inside the `LazyLock` that owns the schema and fail on first use.
    pub fn build(self) -> Schema {
        match self.try_build() {
            Ok(schema) => schema,
            Err(e) => panic!("acme-config: invalid schema: {e}"),
        }
    }

    /// Compile the declarations, reporting the first defect found.
    pub fn try_build(self) -> Result<Schema, SchemaError> {
        if self.env_prefix.is_empty() {
            return Err(SchemaError::EmptyPrefix { schema: self.name });
        }

        let mut by_env: HashMap<String, String> = HashMap::new();
        let mut by_flag: HashMap<String, String> = HashMap::new();
        let mut fields = Vec::with_capacity(self.fields.len());

        for decl in self.fields {
            if fields.iter().any(|f: &FieldMeta| f.name == decl.name) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name,
                    field: decl.name,
                });
            }

            let env_var = env_var_name(&self.env_prefix, &decl.name);
            if let Some(first) = by_env.get(&env_var) {
                return Err(SchemaError::AmbiguousEnvName {
                    first: first.clone(),
                    second: decl.name,
                    env_var,
                });
            }
            by_env.insert(env_var.clone(), decl.name.clone());

            if let Some(flag) = &decl.cli_flag {
                check_cli_flag(&decl.name, flag)?;
                if let Some(first) = by_flag.get(flag) {
                    return Err(SchemaError::DuplicateCliFlag {
                        flag: flag.clone(),
                        first: first.clone(),
                        second: decl.name,
                    });
                }
                by_flag.insert(flag.clone(), decl.name.clone());
            }

            let default = match &decl.default {
                Some(raw) => Some(decl.coercer.coerce(raw).map_err(|reason| {
                    SchemaError::InvalidDefault {
                        field: decl.name.clone(),
                        reason,
                    }
                })?),
                None => None,
            };

            fields.push(FieldMeta {
                required: default.is_none() && !decl.optional,
                name: decl.name,
                env_var,
                field_type: decl.field_type,
                coercer: decl.coercer,
                default,
                description: decl.description,
                secret: decl.secret,
                cli_flag: decl.cli_flag,
            });
        }

        Ok(Schema {
            name: self.name,
            env_prefix: self.env_prefix,
            env_file: self.env_file,
            fields,
        })
    }
}

/// Flags must be `--long-name` or `-c`. Help flags are owned by clap.
fn check_cli_flag(field: &str, flag: &str) -> Result<(), SchemaError> {
    let invalid = |reason| SchemaError::InvalidCliFlag {
        field: field.to_string(),
        flag: flag.to_string(),
        reason,
    };

    if flag == "--help" || flag == "-h" {
        return Err(invalid("reserved for help"));
    }
    if let Some(long) = flag.strip_prefix("--") {
        let valid = !long.is_empty()
            && !long.starts_with('-')
            && long
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        return if valid {
            Ok(())
        } else {
            Err(invalid("long flags must be '--' followed by [A-Za-z0-9_-]"))
        };
    }
    if let Some(short) = flag.strip_prefix('-') {
        let mut chars = short.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => Ok(()),
            _ => Err(invalid("short flags must be a single character")),
        };
    }
    Err(invalid("flags must start with '-' or '--'"))
}
