use std::fmt;

/// The scalar kind of a declared field.
///
/// Drives coercion of raw tier values and the action a synthesized CLI flag
/// gets (booleans become presence flags, everything else takes one value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    /// One of a fixed set of string variants.
    Choice(&'static [&'static str]),
}

impl FieldType {
    pub fn is_boolean(&self) -> bool {
        matches!(self, FieldType::Boolean)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Float => write!(f, "float"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Choice(variants) => write!(f, "one of {}", variants.join("|")),
        }
    }
}

/// A resolution tier, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Source {
    Default,
    File,
    Env,
    Cli,
    Override,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Default => "default",
            Source::File => "env file",
            Source::Env => "environment",
            Source::Cli => "command line",
            Source::Override => "override",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_ordered_by_precedence() {
        assert!(Source::Default < Source::File);
        assert!(Source::File < Source::Env);
        assert!(Source::Env < Source::Cli);
        assert!(Source::Cli < Source::Override);
    }

    #[test]
    fn choice_lists_variants() {
        let ty = FieldType::Choice(&["fast", "slow"]);
        assert_eq!(ty.to_string(), "one of fast|slow");
        assert!(!ty.is_boolean());
        assert!(FieldType::Boolean.is_boolean());
    }
}
