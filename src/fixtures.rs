#[cfg(test)]
pub mod test {
    use std::sync::LazyLock;

    use serde::{Deserialize, Serialize};

    use crate::features::{FeatureFlag, FeatureFlags};
    use crate::field::ConfigField;
    use crate::schema::{AppConfig, Schema};

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct SampleConfig {
        pub name: String,
        pub port: u16,
        pub debug: bool,
        pub db_password: String,
    }

    impl AppConfig for SampleConfig {
        fn schema() -> &'static Schema {
            static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
                Schema::builder("SampleConfig", "SAMPLE_")
                    .no_env_file()
                    .field(
                        ConfigField::new::<String>("name")
                            .description("App name")
                            .cli_flag("--name"),
                    )
                    .field(
                        ConfigField::new::<u16>("port")
                            .default(8080)
                            .description("Port number")
                            .cli_flag("--port"),
                    )
                    .field(
                        ConfigField::new::<bool>("debug")
                            .default(false)
                            .description("Debug mode")
                            .cli_flag("--debug"),
                    )
                    .field(
                        ConfigField::new::<String>("db_password")
                            .default("")
                            .description("DB password")
                            .secret(),
                    )
                    .build()
            });
            &SCHEMA
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct InspectableConfig {
        pub name: String,
        pub port: u16,
        pub api_key: String,
        pub region: Option<String>,
    }

    impl AppConfig for InspectableConfig {
        fn schema() -> &'static Schema {
            static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
                Schema::builder("InspectableConfig", "INS_")
                    .no_env_file()
                    .field(ConfigField::new::<String>("name").description("App name"))
                    .field(
                        ConfigField::new::<u16>("port")
                            .default(8080)
                            .description("Port"),
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

    // -- Fixture with every field defaulted, for choice/float/disable-flag tests

    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Mode {
        Fast,
        Slow,
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct ModeConfig {
        pub mode: Mode,
        pub cache: bool,
        pub ratio: f64,
        pub region: Option<String>,
    }

    impl Default for ModeConfig {
        fn default() -> Self {
            Self {
                mode: Mode::Fast,
                cache: true,
                ratio: 0.5,
                region: None,
            }
        }
    }

    impl AppConfig for ModeConfig {
        fn schema() -> &'static Schema {
            static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
                Schema::builder("ModeConfig", "MODE_")
                    .no_env_file()
                    .field(
                        ConfigField::choice("mode", &["fast", "slow"])
                            .default("fast")
                            .cli_flag("-m"),
                    )
                    .field(
                        ConfigField::new::<bool>("cache")
                            .default(true)
                            .description("Disable the response cache")
                            .cli_flag("--no-cache"),
                    )
                    .field(ConfigField::new::<f64>("ratio").default(0.5))
                    .field(
                        ConfigField::new::<String>("region")
                            .optional()
                            .cli_flag("--region"),
                    )
                    .build()
            });
            &SCHEMA
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct SampleFeatures {
        pub new_dashboard: bool,
        pub parallel: bool,
    }

    impl AppConfig for SampleFeatures {
        fn schema() -> &'static Schema {
            static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
                Schema::flags("SampleFeatures", "MYAPP_FEATURE_")
                    .no_env_file()
                    .flag(FeatureFlag::new("new_dashboard").description("Enable new dashboard"))
                    .flag(
                        FeatureFlag::new("parallel")
                            .default(true)
                            .description("Use parallel processing"),
                    )
                    .build()
            });
            &SCHEMA
        }
    }

    impl FeatureFlags for SampleFeatures {}

    #[test]
    fn fixture_schemas_build() {
        assert_eq!(SampleConfig::schema().fields().len(), 4);
        assert_eq!(InspectableConfig::schema().fields().len(), 4);
        assert_eq!(ModeConfig::schema().fields().len(), 4);
        assert_eq!(SampleFeatures::schema().fields().len(), 2);
    }
}
