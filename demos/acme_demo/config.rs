//! Schemas for the acme-config demo application.
//!
//! [`DemoConfig`] is an ordinary service config: one required field, a few
//! defaulted ones, a choice, and a secret. [`DemoFeatures`] is a feature flag
//! set read from `ACME_DEMO_FEATURE_*`.
//!
//! | Env var                   | Field          |
//! |---------------------------|----------------|
//! | `ACME_DEMO_NAME`          | `name`         |
//! | `ACME_DEMO_HOST`          | `host`         |
//! | `ACME_DEMO_PORT`          | `port`         |
//! | `ACME_DEMO_COLOR`         | `color`        |
//! | `ACME_DEMO_VERBOSE`       | `verbose`      |
//! | `ACME_DEMO_API_TOKEN`     | `api_token`    |
//! | `ACME_DEMO_REGION`        | `region`       |

use std::sync::LazyLock;

use acme_config::{AppConfig, ConfigField, FeatureFlag, FeatureFlags, Schema};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct DemoConfig {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub color: String,
    pub verbose: bool,
    pub api_token: String,
    pub region: Option<String>,
}

pub const COLORS: &[&str] = &["red", "green", "yellow", "blue", "magenta", "cyan", "white"];

impl AppConfig for DemoConfig {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::builder("DemoConfig", "ACME_DEMO_")
                .field(
                    ConfigField::new::<String>("name")
                        .description("Application name shown in the echo banner")
                        .cli_flag("--name"),
                )
                .field(
                    ConfigField::new::<String>("host")
                        .default("127.0.0.1")
                        .description("Hostname to bind to")
                        .cli_flag("--host"),
                )
                .field(
                    ConfigField::new::<u16>("port")
                        .default(3000)
                        .description("Port number")
                        .cli_flag("--port"),
                )
                .field(
                    ConfigField::choice("color", COLORS)
                        .default("yellow")
                        .description("Terminal color for echo output")
                        .cli_flag("--color"),
                )
                .field(
                    ConfigField::new::<bool>("verbose")
                        .default(false)
                        .description("Enable verbose output")
                        .cli_flag("-v"),
                )
                .field(
                    ConfigField::new::<String>("api_token")
                        .default("")
                        .description("Token for the upstream API")
                        .secret(),
                )
                .field(ConfigField::new::<String>("region").optional())
                .build()
        });
        &SCHEMA
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DemoFeatures {
    pub new_dashboard: bool,
    pub parallel_processing: bool,
}

impl AppConfig for DemoFeatures {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::flags("DemoFeatures", "ACME_DEMO_FEATURE_")
                .flag(FeatureFlag::new("new_dashboard").description("Enable the new dashboard UI"))
                .flag(
                    FeatureFlag::new("parallel_processing")
                        .default(true)
                        .description("Process batches in parallel"),
                )
                .build()
        });
        &SCHEMA
    }
}

impl FeatureFlags for DemoFeatures {}
