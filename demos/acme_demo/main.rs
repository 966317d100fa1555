//! # acme-config demo application
//!
//! A sample CLI tool that wires [acme-config](https://docs.rs/acme-config)
//! into a real command line. It exists to demonstrate and manually verify
//! the library's features.
//!
//! ## Running
//!
//! ```sh
//! ACME_DEMO_NAME=demo cargo run --example acme_demo -- echo
//! cargo run --example acme_demo -- manifest
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature              | How to exercise it                                                    |
//! |----------------------|-----------------------------------------------------------------------|
//! | Missing required     | `cargo run --example acme_demo -- echo`                               |
//! | Env var              | `ACME_DEMO_NAME=demo cargo run --example acme_demo -- echo`           |
//! | Dotenv file          | Put `ACME_DEMO_NAME=demo` in `.env`, then run `echo`                  |
//! | CLI flag             | `cargo run --example acme_demo -- --name demo --port 9999 echo`       |
//! | Enable flag          | `cargo run --example acme_demo -- --name demo -v echo`                |
//! | Choice validation    | `ACME_DEMO_COLOR=pink cargo run --example acme_demo -- --name x echo` |
//! | Env manifest         | `cargo run --example acme_demo -- manifest`                           |
//! | Dotenv template      | `cargo run --example acme_demo -- template`                           |
//! | Environment check    | `cargo run --example acme_demo -- check`                              |
//! | Feature flags        | `ACME_DEMO_FEATURE_NEW_DASHBOARD=1 cargo run --example acme_demo -- flags` |

mod config;

use clap::{ArgMatches, Command};

use acme_config::{
    AppConfig, CliParser, FeatureFlags, Resolver, describe_config, generate_dotenv_template,
    generate_manifest, list_flags, validate_env,
};

use config::{DemoConfig, DemoFeatures};

// ---------------------------------------------------------------------------
// CLI definitions
// ---------------------------------------------------------------------------

/// The app's own command, with the config schema's flags added on top.
fn make_parser() -> CliParser {
    let command = Command::new("acme-demo")
        .about("acme-config demo: a sample CLI app for showcasing acme-config")
        .subcommand_required(true)
        .subcommand(Command::new("echo").about("Print the resolved configuration"))
        .subcommand(Command::new("manifest").about("Print the env var manifest"))
        .subcommand(Command::new("template").about("Print a .env template"))
        .subcommand(Command::new("check").about("Validate the current environment"))
        .subcommand(Command::new("flags").about("List feature flags"));
    CliParser::augment(DemoConfig::schema(), command)
}

// ---------------------------------------------------------------------------
// ANSI color helpers
// ---------------------------------------------------------------------------

fn ansi_color_code(name: &str) -> &str {
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",
        _ => "\x1b[0m",
    }
}

const RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn echo(parser: &CliParser, matches: &ArgMatches) {
    let config = Resolver::<DemoConfig>::new()
        .cli_args(parser.cli_args(matches))
        .resolve()
        .unwrap_or_else(|e| {
            eprintln!("Failed to load config:\n{e}");
            std::process::exit(1);
        });

    let color = ansi_color_code(&config.color);
    if config.verbose {
        println!("{color}[verbose] Resolved configuration for {:?}{RESET}", config.name);
        println!();
    }
    println!("{color}{}{RESET}", describe_config(&config));
}

fn check() {
    let issues = validate_env::<DemoConfig>();
    if issues.is_empty() {
        println!("Environment OK");
        return;
    }
    for issue in &issues {
        eprintln!("  - {issue}");
    }
    std::process::exit(1);
}

fn flags() {
    let features = Resolver::<DemoFeatures>::new().resolve().unwrap_or_else(|e| {
        eprintln!("Failed to load feature flags:\n{e}");
        std::process::exit(1);
    });

    for info in list_flags(&features) {
        let marker = if info.value { "on " } else { "off" };
        println!("[{marker}] {:<22} {}", info.name, info.description);
    }
    if features.is_enabled("new_dashboard").unwrap_or(false) {
        println!();
        println!("The new dashboard is live.");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let parser = make_parser();
    let matches = parser.command().clone().get_matches();

    match matches.subcommand_name() {
        Some("echo") => echo(&parser, &matches),
        Some("manifest") => print!("{}", generate_manifest(DemoConfig::schema())),
        Some("template") => println!("{}", generate_dotenv_template(DemoConfig::schema())),
        Some("check") => check(),
        Some("flags") => flags(),
        _ => unreachable!("subcommand_required"),
    }
}
