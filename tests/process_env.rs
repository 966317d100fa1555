//! Resolution against the real process environment.
//!
//! These tests mutate global env state, so every one of them is `#[serial]`
//! and uses a prefix no other test reads.

use std::fs;
use std::sync::LazyLock;

use acme_config::{
    AppConfig, CliArgs, ConfigError, ConfigField, FeatureFlag, FeatureFlags, FieldErrorKind,
    Resolver, Schema, Source, describe_config, generate_dotenv_template, list_flags, resolve_config, validate_env,
};
use serde::{Deserialize, Serialize};
use serial_test::serial;
use tempfile::TempDir;

#[derive(Serialize, Deserialize, Debug)]
struct ProcConfig {
    name: String,
    port: u16,
    debug: bool,
    api_key: String,
    region: Option<String>,
}

impl AppConfig for ProcConfig {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::builder("ProcConfig", "PROCTEST_")
                .no_env_file()
                .field(
                    ConfigField::new::<String>("name")
                        .description("App name")
                        .cli_flag("--name"),
                )
                .field(
                    ConfigField::new::<u16>("port")
                        .default(8080)
                        .cli_flag("--port"),
                )
                .field(
                    ConfigField::new::<bool>("debug")
                        .default(false)
                        .cli_flag("--debug"),
                )
                .field(
                    ConfigField::new::<String>("api_key")
                        .default("")
                        .description("API key")
                        .secret(),
                )
                .field(ConfigField::new::<String>("region").optional())
                .build()
        });
        &SCHEMA
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct ProcFeatures {
    new_dashboard: bool,
    parallel: bool,
}

impl AppConfig for ProcFeatures {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::flags("ProcFeatures", "PROCTEST_FEATURE_")
                .no_env_file()
                .flag(FeatureFlag::new("new_dashboard"))
                .flag(FeatureFlag::new("parallel").default(true))
                .build()
        });
        &SCHEMA
    }
}

impl FeatureFlags for ProcFeatures {}

const VARS: &[&str] = &[
    "PROCTEST_NAME",
    "PROCTEST_PORT",
    "PROCTEST_DEBUG",
    "PROCTEST_API_KEY",
    "PROCTEST_REGION",
    "PROCTEST_FEATURE_NEW_DASHBOARD",
    "PROCTEST_FEATURE_PARALLEL",
    "PROCTEST_UNRELATED",
];

/// Clear every variable the fixtures read, then set the given ones.
fn set_env(pairs: &[(&str, &str)]) {
    for key in VARS {
        // SAFETY: tests touching the environment are serialized.
        unsafe { std::env::remove_var(key) };
    }
    for (key, value) in pairs {
        // SAFETY: as above.
        unsafe { std::env::set_var(key, value) };
    }
}

#[test]
#[serial]
fn env_vars_populate_fields() {
    set_env(&[("PROCTEST_NAME", "myapp"), ("PROCTEST_PORT", "3000")]);

    let config: ProcConfig = resolve_config(None, None, None).unwrap();
    assert_eq!(config.name, "myapp");
    assert_eq!(config.port, 3000);
    assert!(!config.debug);
    assert_eq!(config.region, None);
}

#[test]
#[serial]
fn missing_required_field_names_env_var() {
    set_env(&[]);

    let err = resolve_config::<ProcConfig>(None, None, None).unwrap_err();
    let ConfigError::Validation(err) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].field, "name");
    assert!(err.to_string().contains("PROCTEST_NAME"));
}

#[test]
#[serial]
fn cli_beats_env_and_override_beats_cli() {
    set_env(&[("PROCTEST_NAME", "env"), ("PROCTEST_PORT", "3000")]);

    let cli = CliArgs::new().set("port", "9999").absent("debug");
    let config: ProcConfig = resolve_config(Some(cli.clone()), None, None).unwrap();
    assert_eq!(config.port, 9999);
    assert_eq!(config.name, "env");

    let overrides = vec![("port".to_string(), toml::Value::Integer(1234))];
    let config: ProcConfig = resolve_config(Some(cli), Some(overrides), None).unwrap();
    assert_eq!(config.port, 1234);
}

#[test]
#[serial]
fn absent_cli_flag_keeps_env_bool() {
    set_env(&[("PROCTEST_NAME", "x"), ("PROCTEST_DEBUG", "yes")]);

    let cli = CliArgs::new().absent("debug").absent("name");
    let config: ProcConfig = resolve_config(Some(cli), None, None).unwrap();
    assert!(config.debug);
    assert_eq!(config.name, "x");
}

#[test]
#[serial]
fn env_file_sits_below_env() {
    set_env(&[("PROCTEST_PORT", "5000")]);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "PROCTEST_NAME=from-file\nPROCTEST_PORT=4000\n").unwrap();

    let config: ProcConfig = resolve_config(None, None, Some(&path)).unwrap();
    assert_eq!(config.name, "from-file");
    assert_eq!(config.port, 5000);
}

#[test]
#[serial]
fn template_as_env_file_resolves() {
    set_env(&[]);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, generate_dotenv_template(ProcConfig::schema())).unwrap();

    let config = Resolver::<ProcConfig>::new().env_file(&path).resolve().unwrap();
    assert_eq!(config.name, "");
    assert_eq!(config.port, 8080);
    assert_eq!(config.region, None);
}

#[test]
#[serial]
fn validate_env_agrees_with_resolution() {
    set_env(&[("PROCTEST_PORT", "not-a-port")]);
    let issues = validate_env::<ProcConfig>();
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().any(|i| i.contains("PROCTEST_NAME")));
    assert!(issues.iter().any(|i| i.contains("not-a-port")));

    set_env(&[("PROCTEST_NAME", "ok")]);
    assert!(validate_env::<ProcConfig>().is_empty());
    assert!(resolve_config::<ProcConfig>(None, None, None).is_ok());
}

#[test]
#[serial]
fn describe_hides_secret_from_env() {
    set_env(&[("PROCTEST_NAME", "myapp"), ("PROCTEST_API_KEY", "sk-super-secret")]);

    let config: ProcConfig = resolve_config(None, None, None).unwrap();
    let desc = describe_config(&config);
    assert!(!desc.contains("sk-super-secret"));
    assert!(desc.contains("api_key = ***"));
    assert!(desc.contains("name = \"myapp\""));
}

#[test]
#[serial]
fn feature_flags_from_env() {
    set_env(&[("PROCTEST_FEATURE_NEW_DASHBOARD", "true")]);

    let flags: ProcFeatures = resolve_config(None, None, None).unwrap();
    assert!(flags.is_enabled("new_dashboard").unwrap());
    assert!(flags.is_enabled("parallel").unwrap());
    assert!(matches!(
        flags.is_enabled("missing"),
        Err(ConfigError::UnknownFlag(_))
    ));

    let listed = list_flags(&flags);
    assert_eq!(listed.len(), 2);
    assert!(listed[0].value && !listed[0].default);
}

#[cfg(unix)]
fn set_raw_env(key: &str, value: &[u8]) {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    // SAFETY: tests touching the environment are serialized.
    unsafe { std::env::set_var(key, OsStr::from_bytes(value)) };
}

#[cfg(unix)]
#[test]
#[serial]
fn non_utf8_unrelated_var_does_not_break_resolution() {
    set_env(&[("PROCTEST_NAME", "ok")]);
    set_raw_env("PROCTEST_UNRELATED", b"\xff\xfe");

    let config: ProcConfig = resolve_config(None, None, None).unwrap();
    assert_eq!(config.name, "ok");
    assert!(validate_env::<ProcConfig>().is_empty());

    set_env(&[]);
}

#[cfg(unix)]
#[test]
#[serial]
fn non_utf8_field_value_is_reported() {
    set_env(&[]);
    set_raw_env("PROCTEST_NAME", b"caf\xe9");

    let err = resolve_config::<ProcConfig>(None, None, None).unwrap_err();
    let ConfigError::Validation(err) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].field, "name");
    assert_eq!(
        err.errors[0].kind,
        FieldErrorKind::Invalid {
            source: Source::Env
        }
    );

    let issues = validate_env::<ProcConfig>();
    assert_eq!(issues.len(), 1);
    assert!(issues[0].contains("PROCTEST_NAME"));

    let cli = CliArgs::new().set("name", "from-cli");
    let config: ProcConfig = resolve_config(Some(cli), None, None).unwrap();
    assert_eq!(config.name, "from-cli");

    set_env(&[]);
}
