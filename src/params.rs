//! Parameter store tooling behind the `ac` command.
//!
//! Parameters are flat `KEY=value` sets addressed by a [`Namespace`]
//! (application, environment, version). The [`ParameterStore`] trait is the
//! seam for remote backends; [`JsonFileStore`] keeps everything in one local
//! JSON document and [`MemoryStore`] is for tests and embedding.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A flat set of parameters, sorted by key.
pub type Parameters = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("No parameters stored for {0}")]
    NamespaceNotFound(Namespace),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse parameter store {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

/// Where a parameter set lives: application, environment, version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    pub app_name: String,
    pub env: String,
    pub version: u32,
}

impl Namespace {
    pub fn new(app_name: &str, env: &str, version: u32) -> Self {
        Self {
            app_name: app_name.to_string(),
            env: env.to_string(),
            version,
        }
    }

    /// File name used when saving fetched parameters: `{app}.{env}.{version}.env`.
    pub fn file_name(&self) -> String {
        format!("{}.{}.{}.env", self.app_name, self.env, self.version)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/v{}", self.app_name, self.env, self.version)
    }
}

pub trait ParameterStore {
    fn fetch_parameters(&self, ns: &Namespace) -> Result<Parameters, ParamsError>;

    /// Replace the parameter set stored under `ns`.
    fn set_parameters(&mut self, ns: &Namespace, params: &Parameters) -> Result<(), ParamsError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    sets: BTreeMap<Namespace, Parameters>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParameterStore for MemoryStore {
    fn fetch_parameters(&self, ns: &Namespace) -> Result<Parameters, ParamsError> {
        self.sets
            .get(ns)
            .cloned()
            .ok_or_else(|| ParamsError::NamespaceNotFound(ns.clone()))
    }

    fn set_parameters(&mut self, ns: &Namespace, params: &Parameters) -> Result<(), ParamsError> {
        self.sets.insert(ns.clone(), params.clone());
        Ok(())
    }
}

/// On-disk layout: `{ app: { env: { version: { KEY: value } } } }`.
type Document = BTreeMap<String, BTreeMap<String, BTreeMap<String, Parameters>>>;

/// A parameter store kept in a single JSON file. The file is created on the
/// first write; a missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Document, ParamsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => {
                return Err(ParamsError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        serde_json::from_str(&content).map_err(|e| ParamsError::Json {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write(&self, doc: &Document) -> Result<(), ParamsError> {
        let io_err = |e| ParamsError::Io {
            path: self.path.clone(),
            source: e,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(doc).map_err(|e| ParamsError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, json + "\n").map_err(io_err)
    }
}

impl ParameterStore for JsonFileStore {
    fn fetch_parameters(&self, ns: &Namespace) -> Result<Parameters, ParamsError> {
        let doc = self.read()?;
        doc.get(&ns.app_name)
            .and_then(|envs| envs.get(&ns.env))
            .and_then(|versions| versions.get(&ns.version.to_string()))
            .cloned()
            .ok_or_else(|| ParamsError::NamespaceNotFound(ns.clone()))
    }

    fn set_parameters(&mut self, ns: &Namespace, params: &Parameters) -> Result<(), ParamsError> {
        let mut doc = self.read()?;
        doc.entry(ns.app_name.clone())
            .or_default()
            .entry(ns.env.clone())
            .or_default()
            .insert(ns.version.to_string(), params.clone());
        self.write(&doc)?;
        tracing::debug!(store = %self.path.display(), namespace = %ns, count = params.len(), "stored parameters");
        Ok(())
    }
}

/// Write fetched parameters to `{dir}/{app}.{env}.{version}.env`, one
/// `KEY='value'` per line.
///
/// Values are single-quoted so that [`load_parameters`] reads back exactly
/// what was written: no `$VAR` substitution, no `#` comments, no quote
/// stripping.
pub fn save_parameters(
    dir: &Path,
    ns: &Namespace,
    params: &Parameters,
) -> Result<PathBuf, ParamsError> {
    let path = dir.join(ns.file_name());
    let content: String = params
        .iter()
        .map(|(key, value)| format!("{key}={}\n", quote_value(value)))
        .collect();
    fs::write(&path, content).map_err(|e| ParamsError::Io {
        path: path.clone(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), count = params.len(), "parameters saved");
    Ok(path)
}

/// Single-quote a value for dotenv. Characters the dotenv reader treats
/// specially even inside single quotes are written as backslash escapes
/// between quoted runs: `it's` becomes `'it'\''s'`.
fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\'' => quoted.push_str(r"'\''"),
            '\\' => quoted.push_str(r"'\\'"),
            '\n' => quoted.push_str(r"'\n'"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Read a dotenv file into a parameter set.
pub fn load_parameters(path: &Path) -> Result<Parameters, ParamsError> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| ParamsError::EnvFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    iter.collect::<Result<Parameters, _>>()
        .map_err(|e| ParamsError::EnvFile {
            path: path.to_path_buf(),
            source: e,
        })
}
