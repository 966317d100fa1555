//! `ac`: store and fetch namespaced application parameters.
//!
//! ```sh
//! ac fetch --app-name billing --env dev --ver-number 3
//! ac set --app-name billing --env dev --ver-number 3 --params-path .env.dev
//! ```
//!
//! `fetch` prints the parameters and writes them to
//! `billing.dev.3.env` in the current directory. Logging goes to stderr and
//! is controlled by `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use acme_config::params::{
    JsonFileStore, Namespace, ParameterStore, ParamsError, load_parameters, save_parameters,
};

/// System to store application configuration.
#[derive(Debug, Parser)]
#[command(name = "ac")]
struct Cli {
    /// Parameter store document.
    #[arg(long, global = true, default_value = "acme-params.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch parameters, print them, and save them to a file in the current directory.
    Fetch(NamespaceArgs),
    /// Store the parameters found in a dotenv file.
    Set {
        #[command(flatten)]
        namespace: NamespaceArgs,

        /// Dotenv file to upload.
        #[arg(long)]
        params_path: PathBuf,
    },
}

#[derive(Debug, Args)]
struct NamespaceArgs {
    /// Application name.
    #[arg(long)]
    app_name: String,

    /// Environment (e.g. "dev", "prod").
    #[arg(long)]
    env: String,

    /// Version number.
    #[arg(long)]
    ver_number: u32,
}

impl NamespaceArgs {
    fn namespace(&self) -> Namespace {
        Namespace::new(&self.app_name, &self.env, self.ver_number)
    }
}

fn run(cli: Cli) -> Result<(), ParamsError> {
    let mut store = JsonFileStore::new(cli.store);

    match cli.command {
        Command::Fetch(args) => {
            let ns = args.namespace();
            let params = store.fetch_parameters(&ns)?;
            for (key, value) in &params {
                println!("{key}={value}");
            }
            save_parameters(Path::new("."), &ns, &params)?;
        }
        Command::Set {
            namespace,
            params_path,
        } => {
            let ns = namespace.namespace();
            let params = load_parameters(&params_path)?;
            store.set_parameters(&ns, &params)?;
            tracing::info!(namespace = %ns, count = params.len(), "parameters set");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ac: {e}");
            ExitCode::FAILURE
        }
    }
}
