use std::collections::HashMap;

use toml::{Table, Value};

use crate::types::Source;

/// Per-field winners of the precedence merge, with the tier each came from.
#[derive(Debug, Default)]
pub struct Layered {
    values: HashMap<String, (Value, Source)>,
}

impl Layered {
    /// Overlay a sparse tier. Every key present in `layer` replaces whatever a
    /// lower tier supplied; absent keys fall through.
    ///
    /// Callers must overlay tiers in ascending precedence order.
    pub fn overlay(&mut self, layer: Table, source: Source) {
        for (key, value) in layer {
            self.values.insert(key, (value, source));
        }
    }

    pub fn get(&self, field: &str) -> Option<&(Value, Source)> {
        self.values.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(toml_str: &str) -> Table {
        toml_str.parse::<Table>().unwrap()
    }

    #[test]
    fn disjoint_keys_merge() {
        let mut merged = Layered::default();
        merged.overlay(table(r#"host = "localhost""#), Source::File);
        merged.overlay(table(r#"port = "3000""#), Source::Env);
        assert_eq!(merged.get("host").unwrap().1, Source::File);
        assert_eq!(merged.get("port").unwrap().1, Source::Env);
    }

    #[test]
    fn same_key_higher_tier_wins() {
        let mut merged = Layered::default();
        merged.overlay(table("port = 8080"), Source::Default);
        merged.overlay(table(r#"port = "3000""#), Source::Cli);
        let (value, source) = merged.get("port").unwrap();
        assert_eq!(value.as_str(), Some("3000"));
        assert_eq!(*source, Source::Cli);
    }

    #[test]
    fn empty_overlay_keeps_base() {
        let mut merged = Layered::default();
        merged.overlay(table("port = 8080"), Source::Default);
        merged.overlay(Table::new(), Source::Override);
        assert_eq!(merged.get("port").unwrap().1, Source::Default);
    }

    #[test]
    fn absent_key_is_none() {
        let merged = Layered::default();
        assert!(merged.get("port").is_none());
    }

    #[test]
    fn multiple_sequential_overlays() {
        let mut merged = Layered::default();
        merged.overlay(table(r#"host = "a""#), Source::Default);
        merged.overlay(table("port = 1000"), Source::File);
        merged.overlay(table(r#"host = "c""#), Source::Env);
        assert_eq!(merged.get("host").unwrap().0.as_str(), Some("c"));
        assert_eq!(merged.get("port").unwrap().0.as_integer(), Some(1000));
    }
}
