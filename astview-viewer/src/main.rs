//! Standalone binary for the astview workbench.
//! Usage:
//!   astv `<source>` [--rule `<file>`] [--tree] [--config `<file>`]

mod viewer;

use astview_config::{LoggingConfig, Loader};
use clap::{Arg, ArgAction, Command, ValueHint};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use viewer::viewer::ViewerOptions;

/// Environment variable holding log filter directives
const LOG_ENV: &str = "ASTVIEW_LOG";

fn main() {
    let matches = Command::new("astv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive workbench for syntax-tree transformations")
        .arg(
            Arg::new("source")
                .help("Source file to parse and transform")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("rule")
                .long("rule")
                .short('r')
                .help("File holding the transformation rule")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("tree")
                .long("tree")
                .help("Treat the source file as an already parsed JSON or YAML tree")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file (default: ./astview.toml when present)")
                .value_hint(ValueHint::FilePath),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").map(Path::new);
    let config = match Loader::new().with_user_file(config_path).build() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_logging(&config.logging) {
        eprintln!("Error: cannot open log file {}: {err}", config.logging.file.display());
        std::process::exit(1);
    }

    let options = ViewerOptions {
        source: matches
            .get_one::<String>("source")
            .map(PathBuf::from)
            .unwrap_or_default(),
        rule: matches.get_one::<String>("rule").map(PathBuf::from),
        tree_input: matches.get_flag("tree"),
    };
    if let Err(err) = viewer::viewer::run_viewer(options, &config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(logging: &LoggingConfig) -> io::Result<()> {
    let file = File::create(&logging.file)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}
