use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use toml::Value;

use crate::env;
use crate::error::ConfigError;
use crate::file;
use crate::overrides::CliArgs;
use crate::resolve::{self, ResolveInput};
use crate::schema::AppConfig;

/// Builder for one resolution pass over a config type.
///
/// Each call to [`resolve()`](Self::resolve) takes a fresh snapshot of the
/// dotenv file and the process environment; nothing is cached between calls.
pub struct Resolver<C: AppConfig> {
    env_file: EnvFile,
    vars: Option<Vec<(String, String)>>,
    cli_args: CliArgs,
    overrides: Vec<(String, Value)>,
    _phantom: PhantomData<C>,
}

#[derive(Debug, Clone, PartialEq)]
enum EnvFile {
    SchemaDefault,
    Path(PathBuf),
    Disabled,
}

impl<C: AppConfig> Default for Resolver<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: AppConfig> Resolver<C> {
    pub fn new() -> Self {
        Self {
            env_file: EnvFile::SchemaDefault,
            vars: None,
            cli_args: CliArgs::new(),
            overrides: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Read this dotenv file instead of the schema's default.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = EnvFile::Path(path.into());
        self
    }

    /// Skip the dotenv tier entirely.
    pub fn no_env_file(mut self) -> Self {
        self.env_file = EnvFile::Disabled;
        self
    }

    /// Use these pairs as the environment instead of the process environment.
    pub fn vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.vars = Some(vars.into_iter().collect());
        self
    }

    /// Set the CLI tier. Entries recorded as not provided are skipped.
    pub fn cli_args(mut self, args: CliArgs) -> Self {
        self.cli_args = args;
        self
    }

    /// Add an explicit override. Overrides always win; later calls take
    /// precedence over earlier ones for the same field.
    pub fn override_value(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.overrides.push((field.to_string(), value.into()));
        self
    }

    pub fn overrides<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.overrides
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The dotenv file this resolver will read, if any.
    fn effective_env_file(&self) -> Option<&Path> {
        match &self.env_file {
            EnvFile::SchemaDefault => C::schema().env_file(),
            EnvFile::Path(path) => Some(path),
            EnvFile::Disabled => None,
        }
    }

    /// Snapshot the file and environment into a `ResolveInput`.
    fn build_input(&self) -> Result<ResolveInput, ConfigError> {
        let file_vars = match self.effective_env_file() {
            Some(path) => file::load_env_file(path)?,
            None => Vec::new(),
        };
        let (env_vars, non_utf8_env) = match &self.vars {
            Some(vars) => (vars.clone(), Vec::new()),
            None => {
                let process = env::process_env();
                (process.vars, process.non_utf8)
            }
        };

        Ok(ResolveInput {
            file_vars,
            env_vars,
            non_utf8_env,
            cli_args: self.cli_args.clone(),
            overrides: self.overrides.clone(),
        })
    }

    /// Merge every tier and produce the config, or every problem found.
    pub fn resolve(self) -> Result<C, ConfigError> {
        let input = self.build_input()?;
        resolve::resolve(input)
    }

    /// Run a resolution and report each problem as one line. Empty means the
    /// config would resolve.
    pub fn validate(self) -> Vec<String> {
        match self.resolve() {
            Ok(_) => Vec::new(),
            Err(e) => e.issues(),
        }
    }
}

/// Resolve `C` with the full precedence order:
/// defaults < env file < environment < `cli_args` < `overrides`.
///
/// `env_file` replaces the schema's default dotenv path when given.
pub fn resolve_config<C: AppConfig>(
    cli_args: Option<CliArgs>,
    overrides: Option<Vec<(String, Value)>>,
    env_file: Option<&Path>,
) -> Result<C, ConfigError> {
    let mut resolver = Resolver::<C>::new();
    if let Some(args) = cli_args {
        resolver = resolver.cli_args(args);
    }
    if let Some(entries) = overrides {
        resolver = resolver.overrides(entries);
    }
    if let Some(path) = env_file {
        resolver = resolver.env_file(path);
    }
    resolver.resolve()
}
