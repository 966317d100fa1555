//! Declarative, layered configuration for Rust services. Describe your
//! fields once, and get typed loading, CLI flags, env manifests, and feature
//! flags from that one description.
//!
//! A config is a plain serde struct plus a [`Schema`] built from
//! [`ConfigField`] declarations. The [`AppConfig`] trait ties the two
//! together:
//!
//! ```ignore
//! let config: ServiceConfig = Resolver::new().resolve()?;
//! ```
//!
//! That single call reads the schema's dotenv file, snapshots the process
//! environment, fills in declared defaults, coerces every raw value to its
//! declared type, and hands you a typed struct (or every problem at once).
//!
//! # Why acme-config
//!
//! Twelve-factor services read most of their settings from the environment,
//! with a `.env` file for local development and a handful of CLI flags for
//! one-off runs. Wiring each of those by hand means a prefix convention in
//! one place, a clap struct in another, and a `.env.example` that drifts
//! from both.
//!
//! Here the schema is the single source of truth. Env var names, CLI flags,
//! the env manifest, the dotenv template, startup logging, and validation
//! all derive from it. Add a field to the schema and every surface picks it
//! up.
//!
//! # Layer precedence
//!
//! ```text
//! Declared defaults     ConfigField::default(...)
//!        ↑ overridden by
//! Dotenv file           Schema::env_file, ".env" unless changed
//!        ↑ overridden by
//! Environment vars      PREFIX + FIELD_NAME uppercased
//!        ↑ overridden by
//! CLI arguments         CliArgs, only entries actually provided
//!        ↑ overridden by
//! Overrides             Resolver::override_value
//! ```
//!
//! Every tier is **sparse**. A field only takes a value from a tier that
//! actually supplies it, so a CLI flag the user did not pass never masks an
//! environment variable. [`CliArgs`] records "not provided" as `None`, which
//! keeps it distinct from an explicit `false` or empty string.
//!
//! A missing dotenv file is an empty tier. A dotenv file that exists but
//! cannot be parsed is an error ([`ConfigError::EnvFile`]).
//!
//! # Environment variables
//!
//! With prefix `MYAPP_`, each field maps to exactly one variable:
//!
//! | Field | Env var |
//! |-------|---------|
//! | `port` | `MYAPP_PORT` |
//! | `db_password` | `MYAPP_DB_PASSWORD` |
//!
//! Matching is exact and case-sensitive. Raw values are strings; each field
//! coerces them with the [`FieldValue`] impl of its declared type, so
//! `"8080"` becomes `8080u16` and `"yes"` becomes `true`. Out-of-range
//! integers, unknown booleans, and values outside a choice list are
//! validation errors, never silent fallbacks.
//!
//! # Validation errors
//!
//! Resolution never stops at the first problem. [`ValidationError`] lists
//! every missing required field and every value that failed to coerce,
//! naming the env var to set and the tier the bad value came from:
//!
//! ```text
//! 2 validation error(s) for ServiceConfig
//!   - name (SVC_NAME): missing required value
//!   - port (SVC_PORT): invalid integer 'abc': invalid digit found in string (from environment)
//! ```
//!
//! # Clap adapter
//!
//! Behind the `clap` feature (on by default), [`build_cli_parser`] turns the
//! fields that declare a `cli_flag` into clap arguments. Booleans become
//! presence flags: a field defaulting to `false` gets an enable-flag, one
//! defaulting to `true` gets a disable-flag such as `--no-cache`. Parsed
//! values are raw strings and go through the same coercion as env vars.
//!
//! Apps that already own a clap command can use [`CliParser::augment`], and
//! apps with a derive-based CLI can feed it through
//! [`CliArgs::from_serialize`].
//!
//! # Inspection
//!
//! - [`generate_manifest`] lists every env var with its status, for ops docs
//!   and CI diffs.
//! - [`generate_dotenv_template`] produces a `.env.example`.
//! - [`validate_env`] checks the real environment without building a config.
//! - [`describe_config`] renders a loaded config for startup logs, with
//!   secret fields shown as [`REDACTED`].
//!
//! Manifest and template output depend only on the schema, so they are
//! byte-stable across runs.
//!
//! # Feature flags
//!
//! A feature flag set is a schema whose fields are all booleans, built with
//! [`Schema::flags`]. Flags default to off, are controlled by env vars like
//! any other field, and can be queried by name via
//! [`FeatureFlags::is_enabled`] or listed with [`list_flags`].
//!
//! # Parameter store
//!
//! The [`params`] module and the `ac` binary (feature `tool`) fetch and store
//! namespaced parameter sets, writing them out as dotenv files a service can
//! point its `env_file` at.
//!
//! # Error handling
//!
//! Resolution returns [`ConfigError`]; schema construction reports
//! [`SchemaError`] through [`SchemaBuilder::try_build`]. See the [`error`]
//! module for the full set.

pub mod error;
pub mod params;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod coerce;
mod env;
mod features;
mod field;
mod file;
mod inspect;
pub(crate) mod merge;
mod overrides;
mod resolve;
mod schema;

#[cfg(test)]
mod fixtures;

pub use builder::{Resolver, resolve_config};
#[cfg(feature = "clap")]
pub use cli::{CliParser, build_cli_parser};
pub use coerce::FieldValue;
pub use error::{ConfigError, FieldError, FieldErrorKind, SchemaError, ValidationError};
pub use features::{FeatureFlag, FeatureFlags, FlagInfo, FlagSchemaBuilder, list_flags};
pub use field::{ConfigField, FieldMeta};
pub use inspect::{
    REDACTED, describe_config, generate_dotenv_template, generate_manifest, validate_env,
};
pub use overrides::CliArgs;
pub use resolve::{ResolveInput, resolve};
pub use schema::{AppConfig, DEFAULT_ENV_FILE, Schema, SchemaBuilder};
pub use types::{FieldType, Source};
