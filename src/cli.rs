//! Clap adapter: synthesize a command line from a schema.
//!
//! Only fields declared with a `cli_flag` become arguments. Booleans become
//! presence flags whose meaning depends on the declared default: a field that
//! defaults to `false` gets an enable-flag, one that defaults to `true` gets a
//! disable-flag. Everything else takes a single raw string; coercion happens
//! later, in the resolver, so the parser never needs to know field types.
//!
//! Arguments that were not given come back as "not provided" in [`CliArgs`],
//! never as the field's default, so lower tiers keep their say.
//!
//! This module is compiled only with the `clap` Cargo feature (on by default).

use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use toml::Value;

use crate::field::{FieldMeta, plain_value};
use crate::overrides::CliArgs;
use crate::schema::Schema;

/// A command line synthesized from a schema.
#[derive(Debug, Clone)]
pub struct CliParser {
    command: Command,
    fields: Vec<CliField>,
}

#[derive(Debug, Clone)]
struct CliField {
    name: String,
    boolean: bool,
}

/// Build a parser exposing every field that declares a CLI flag.
///
/// `program_name` defaults to the schema's display name.
pub fn build_cli_parser(
    schema: &Schema,
    program_name: Option<&str>,
    description: Option<&str>,
) -> CliParser {
    let mut command = Command::new(program_name.unwrap_or(schema.name()).to_string());
    if let Some(about) = description {
        command = command.about(about.to_string());
    }
    CliParser::new(schema, command)
}

impl CliParser {
    fn new(schema: &Schema, command: Command) -> Self {
        let mut command = command;
        let mut fields = Vec::new();

        for field in schema.fields() {
            let Some(flag) = field.cli_flag() else {
                continue;
            };
            command = command.arg(build_arg(field, flag));
            fields.push(CliField {
                name: field.name().to_string(),
                boolean: field.field_type().is_boolean(),
            });
        }

        Self { command, fields }
    }

    /// Add the schema's arguments to an existing application command.
    pub fn augment(schema: &Schema, command: Command) -> Self {
        Self::new(schema, command)
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn into_command(self) -> Command {
        self.command
    }

    /// Parse an argument list (including the program name) into CLI-tier values.
    pub fn try_parse_from<I, T>(&self, args: I) -> Result<CliArgs, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().try_get_matches_from(args)?;
        Ok(self.cli_args(&matches))
    }

    /// Extract CLI-tier values from matches produced by this parser's command
    /// (or a command it was [`augment`](Self::augment)ed into).
    ///
    /// Every exposed field gets an entry; fields not given on the command line
    /// are recorded as not provided.
    pub fn cli_args(&self, matches: &ArgMatches) -> CliArgs {
        let mut args = CliArgs::new();
        for field in &self.fields {
            let value = if field.boolean {
                // SetTrue/SetFalse always store a value; only a command-line
                // source counts as provided.
                match matches.value_source(&field.name) {
                    Some(ValueSource::CommandLine) => {
                        Some(Value::Boolean(matches.get_flag(&field.name)))
                    }
                    _ => None,
                }
            } else {
                matches
                    .get_one::<String>(&field.name)
                    .map(|s| Value::String(s.clone()))
            };
            args.insert(&field.name, value);
        }
        args
    }
}

fn build_arg(field: &FieldMeta, flag: &str) -> Arg {
    let mut arg = Arg::new(field.name().to_string());
    arg = match flag.strip_prefix("--") {
        Some(long) => arg.long(long.to_string()),
        None => match flag.strip_prefix('-').and_then(|s| s.chars().next()) {
            Some(short) => arg.short(short),
            None => arg.long(flag.to_string()),
        },
    };

    let mut help = field.description().to_string();
    if field.field_type().is_boolean() {
        let defaults_true = field.default_value().and_then(Value::as_bool) == Some(true);
        arg = arg.action(if defaults_true {
            ArgAction::SetFalse
        } else {
            ArgAction::SetTrue
        });
    } else {
        arg = arg
            .action(ArgAction::Set)
            .num_args(1)
            .value_name(field.env_var().to_string());
        if let Some(default) = field.default_value() {
            let default = if field.is_secret() {
                "***".to_string()
            } else {
                plain_value(default)
            };
            if help.is_empty() {
                help = format!("[default: {default}]");
            } else {
                help = format!("{help} [default: {default}]");
            }
        }
    }

    if !help.is_empty() {
        arg = arg.help(help);
    }
    arg
}
