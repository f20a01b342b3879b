//! Command-line interface for astview
//! Renders a tree that an external parser already produced (JSON or YAML) as indented text.
//!
//! Usage:
//!   astview `<tree>` [--source `<file>`] [--variant all|filtered] [--depth `<n>`]
//!           [--whitelist `<a,b>`] [--active `<kind>`] [--format json|yaml] [--config `<file>`]

use astview_config::{AstviewConfig, Loader};
use astview_tree::render::{render_root, ExpansionStore};
use astview_tree::tree::{load_tree_file, TreeFormat};
use astview_tree::{to_text, DisplayRules, TreeError, Variant};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding log filter directives
const LOG_ENV: &str = "ASTVIEW_LOG";

#[derive(Debug)]
enum CliError {
    Config(config::ConfigError),
    Tree(TreeError),
    Source(PathBuf, std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(err) => write!(f, "Invalid configuration: {}", err),
            CliError::Tree(err) => write!(f, "{}", err),
            CliError::Source(path, err) => {
                write!(f, "Cannot read source {}: {}", path.display(), err)
            }
        }
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<TreeError> for CliError {
    fn from(err: TreeError) -> Self {
        CliError::Tree(err)
    }
}

fn command() -> Command {
    Command::new("astview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print a parsed syntax tree as collapsible indented text")
        .arg_required_else_help(true)
        .arg(
            Arg::new("tree")
                .help("JSON or YAML file holding the tree")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Source text the tree was parsed from, for snippets"),
        )
        .arg(
            Arg::new("variant")
                .long("variant")
                .help("Fields to show: all, or child nodes plus the whitelist")
                .value_parser(value_parser!(Variant)),
        )
        .arg(
            Arg::new("depth")
                .long("depth")
                .short('d')
                .help("Labels with a path up to this long start open (-1: all closed)")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32)),
        )
        .arg(
            Arg::new("whitelist")
                .long("whitelist")
                .short('w')
                .help("Comma-separated primitive fields shown by the filtered variant")
                .value_delimiter(','),
        )
        .arg(
            Arg::new("active")
                .long("active")
                .short('a')
                .help("Mark nodes of this kind"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Tree format (default: from the file extension)")
                .value_parser(value_parser!(TreeFormat)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file (default: ./astview.toml when present)"),
        )
}

fn main() {
    let matches = command().get_matches();
    if let Err(err) = run(&matches) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let config_path = matches.get_one::<String>("config").map(Path::new);
    let config = Loader::new().with_user_file(config_path).build()?;
    init_logging(&config);

    let tree_path = matches
        .get_one::<String>("tree")
        .map(PathBuf::from)
        .unwrap_or_default();
    let format = matches.get_one::<TreeFormat>("format").copied();
    let tree = load_tree_file(&tree_path, format)?;

    let source = match matches.get_one::<String>("source") {
        Some(path) => {
            let path = PathBuf::from(path);
            Some(std::fs::read_to_string(&path).map_err(|err| CliError::Source(path, err))?)
        }
        None => None,
    };

    let rules = display_rules(&config, matches).with_source_text(source);
    tracing::debug!(
        tree = %tree_path.display(),
        variant = %rules.variant,
        depth = rules.initial_open_depth,
        "rendering"
    );

    let mut store = ExpansionStore::new();
    let visual = render_root(Some(&tree), &rules, &mut store);
    print!("{}", to_text(&visual));
    Ok(())
}

/// Configured display rules with command-line flags applied on top
fn display_rules(config: &AstviewConfig, matches: &ArgMatches) -> DisplayRules {
    let mut rules = config.tree.display_rules();
    if let Some(variant) = matches.get_one::<Variant>("variant") {
        rules = rules.with_variant(*variant);
    }
    if let Some(depth) = matches.get_one::<i32>("depth") {
        rules = rules.with_initial_open_depth(*depth);
    }
    if let Some(fields) = matches.get_many::<String>("whitelist") {
        rules = rules.with_whitelist(fields.filter(|f| !f.is_empty()).cloned());
    }
    rules.with_active_kind(matches.get_one::<String>("active").cloned())
}

fn init_logging(config: &AstviewConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
