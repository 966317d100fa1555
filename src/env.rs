use toml::{Table, Value};

use crate::schema::Schema;

/// The process environment, split into readable pairs and the names of
/// variables whose value is not valid UTF-8. Variables with a non-UTF-8 name
/// can never match a field and are dropped.
#[derive(Debug, Default)]
pub struct ProcessEnv {
    pub vars: Vec<(String, String)>,
    pub non_utf8: Vec<String>,
}

pub fn process_env() -> ProcessEnv {
    let mut env = ProcessEnv::default();
    for (key, value) in std::env::vars_os() {
        let Ok(key) = key.into_string() else {
            continue;
        };
        match value.into_string() {
            Ok(value) => env.vars.push((key, value)),
            Err(_) => {
                tracing::debug!(key = %key, "env var value is not valid UTF-8");
                env.non_utf8.push(key);
            }
        }
    }
    env
}

/// Build a sparse layer from `NAME=value` pairs, keyed by field name.
///
/// A pair is picked up only when its name is exactly a field's env var
/// (`{prefix}{FIELD_NAME}`); everything else is ignored. Values stay raw
/// strings; coercion happens once, after all tiers are merged.
///
/// Used for both the process environment and dotenv file contents. Takes an
/// iterator so tests can pass synthetic data instead of [`process_env`].
pub fn env_to_table(schema: &Schema, vars: impl IntoIterator<Item = (String, String)>) -> Table {
    let mut table = Table::new();

    for (key, value) in vars {
        let Some(field) = schema.fields().iter().find(|f| f.env_var() == key) else {
            continue;
        };
        table.insert(field.name().to_string(), Value::String(value));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::SampleConfig;
    use crate::schema::AppConfig;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn table(pairs: &[(&str, &str)]) -> Table {
        env_to_table(SampleConfig::schema(), vars(pairs))
    }

    #[test]
    fn simple_key() {
        let t = table(&[("SAMPLE_NAME", "svc")]);
        assert_eq!(t["name"].as_str().unwrap(), "svc");
    }

    #[test]
    fn underscored_field_name() {
        let t = table(&[("SAMPLE_DB_PASSWORD", "hunter2")]);
        assert_eq!(t["db_password"].as_str().unwrap(), "hunter2");
    }

    #[test]
    fn values_stay_raw_strings() {
        let t = table(&[("SAMPLE_PORT", "8080"), ("SAMPLE_DEBUG", "true")]);
        assert_eq!(t["port"].as_str().unwrap(), "8080");
        assert_eq!(t["debug"].as_str().unwrap(), "true");
    }

    #[test]
    fn empty_value_kept() {
        let t = table(&[("SAMPLE_NAME", "")]);
        assert_eq!(t["name"].as_str().unwrap(), "");
    }

    #[test]
    fn other_prefix_ignored() {
        let t = table(&[("OTHER_NAME", "x"), ("SAMPLE", "x"), ("SAMPLE_", "x")]);
        assert!(t.is_empty());
    }

    #[test]
    fn unknown_field_under_prefix_ignored() {
        let t = table(&[("SAMPLE_TYPO", "x")]);
        assert!(t.is_empty());
    }

    #[test]
    fn lowercase_env_name_not_matched() {
        let t = table(&[("sample_name", "x")]);
        assert!(t.is_empty());
    }

    #[test]
    fn later_pair_wins() {
        let t = table(&[("SAMPLE_NAME", "a"), ("SAMPLE_NAME", "b")]);
        assert_eq!(t["name"].as_str().unwrap(), "b");
    }
}
