//! tooling-catalog: search, filter, group and sort a JSON Schema tooling catalog
//!
//! Preferences round-trip through page URLs, so a view printed here can be
//! opened in the browser and vice versa.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tooling_catalog::{
    cli::{self, PreferenceOverrides, ShowCommand, ValuesCommand, ViewCommand},
    config::{AppConfig, ConfigPreset},
    pipeline::{exit_codes, OutputFormat},
    preferences::{GroupBy, SortBy, SortOrder},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tooling-catalog")]
#[command(version)]
#[command(about = "Search, filter, group and sort a JSON Schema tooling catalog", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  The view matched no tools (with --fail-on-empty)
    3  Error occurred

EXAMPLES:
    # Validators written in Rust, grouped by language
    tooling-catalog view tooling-data.yaml --tooling-type validator --language Rust --group-by languages

    # Reproduce a shared page
    tooling-catalog view tooling-data.yaml --url 'https://json-schema.org/tools?query=ajv&sortOrder=descending'

    # Filter option lists as JSON
    tooling-catalog values tooling-data.yaml -o json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Configuration preset (default, strict, permissive, complete)
    #[arg(long, global = true, value_parser = parse_preset)]
    preset: Option<ConfigPreset>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Catalog YAML file (defaults to catalog.path from the config file)
    catalog: Option<PathBuf>,

    /// Page URL or query string to take preferences from
    #[arg(long)]
    url: Option<String>,

    /// Fuzzy search text
    #[arg(long)]
    query: Option<String>,

    /// Field to group on
    #[arg(long, value_enum)]
    group_by: Option<GroupBy>,

    /// Sort key
    #[arg(long, value_enum)]
    sort_by: Option<SortBy>,

    /// Sort direction
    #[arg(long, value_enum)]
    sort_order: Option<SortOrder>,

    /// Click a column header: flips the active column, activates any other
    #[arg(long, value_enum)]
    sort_column: Vec<SortBy>,

    /// Only tools in one of these languages (repeatable)
    #[arg(long = "language")]
    languages: Vec<String>,

    /// Only tools under one of these licenses (repeatable)
    #[arg(long = "license")]
    licenses: Vec<String>,

    /// Only tools supporting one of these drafts (repeatable)
    #[arg(long = "draft")]
    drafts: Vec<String>,

    /// Only tools of one of these tooling types (repeatable)
    #[arg(long = "tooling-type")]
    tooling_types: Vec<String>,

    /// Reset preferences (except grouping) before applying flags
    #[arg(long)]
    reset: bool,

    /// Also print the filter checkbox lists
    #[arg(long)]
    show_filters: bool,

    /// Exit with code 1 when no tool matches
    #[arg(long)]
    fail_on_empty: bool,

    /// Output format (auto: table on a terminal, json otherwise)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `values` subcommand
#[derive(Parser)]
struct ValuesArgs {
    /// Catalog YAML file (defaults to catalog.path from the config file)
    catalog: Option<PathBuf>,

    /// Field path to index (repeatable, replaces the configured list)
    #[arg(long = "field")]
    fields: Vec<String>,

    /// Hide a value, as FIELD=VALUE (repeatable, added to configured exclusions)
    #[arg(long = "exclude", value_parser = parse_exclusion)]
    exclusions: Vec<(String, String)>,

    /// List drafts lexically instead of in release order
    #[arg(long)]
    lexical_drafts: bool,

    /// Output format (auto: text on a terminal, json otherwise)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the catalog filtered, sorted and grouped by preferences
    View(ViewArgs),

    /// List the distinct values filters are built from
    Values(ValuesArgs),

    /// Show every attribute of one tool
    Show {
        /// Catalog YAML file
        catalog: PathBuf,

        /// Tool name (case-insensitive)
        name: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print the discovered config file
    Path,
    /// Generate an example .tooling-catalog.yaml in the current directory
    Init,
}

fn parse_preset(value: &str) -> Result<ConfigPreset, String> {
    ConfigPreset::from_name(value).ok_or_else(|| {
        let names: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
        format!("unknown preset '{value}' (expected one of: {})", names.join(", "))
    })
}

fn parse_exclusion(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .filter(|(field, _)| !field.is_empty())
        .map(|(field, excluded)| (field.to_string(), excluded.to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{value}'"))
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(exit_codes::SUCCESS) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Effective configuration: the config file, with a preset's tuning on top.
fn effective_config(cli: &Cli) -> AppConfig {
    let (config, loaded_from) = tooling_catalog::config::load_or_default(cli.config.as_deref());
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    match cli.preset {
        Some(preset) => {
            let tuned = AppConfig::from_preset(preset);
            AppConfig {
                search: tuned.search,
                values: tuned.values,
                ..config
            }
        }
        None => config,
    }
}

fn catalog_path(explicit: Option<PathBuf>, config: &AppConfig) -> Result<PathBuf> {
    explicit
        .or_else(|| config.catalog.path.clone())
        .context("No catalog file given and catalog.path is not set in the config file")
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = effective_config(&cli);

    match cli.command {
        Commands::View(args) => {
            let catalog_path = catalog_path(args.catalog, &config)?;
            if let Some(format) = args.output {
                config.output.format = format;
            }
            if args.output_file.is_some() {
                config.output.file = args.output_file;
            }

            let command = ViewCommand {
                catalog_path,
                location: args.url,
                overrides: PreferenceOverrides {
                    reset: args.reset,
                    query: args.query,
                    group_by: args.group_by,
                    sort_by: args.sort_by,
                    sort_order: args.sort_order,
                    sort_columns: args.sort_column,
                    languages: args.languages,
                    licenses: args.licenses,
                    drafts: args.drafts,
                    tooling_types: args.tooling_types,
                },
                show_filters: args.show_filters,
                fail_on_empty: args.fail_on_empty,
                quiet: cli.quiet,
            };
            cli::run_view(command, &config)
        }

        Commands::Values(args) => {
            let catalog_path = catalog_path(args.catalog, &config)?;
            let mut values = config.values;
            if !args.fields.is_empty() {
                values.fields = args.fields;
            }
            for (field, value) in args.exclusions {
                values.exclusions.entry(field).or_default().push(value);
            }
            if args.lexical_drafts {
                values.draft_order = false;
            }

            cli::run_values(ValuesCommand {
                catalog_path,
                values,
                format: args.output.unwrap_or(config.output.format),
                output_file: args.output_file.or(config.output.file),
                quiet: cli.quiet,
            })
        }

        Commands::Show {
            catalog,
            name,
            json,
            output_file,
        } => cli::run_show(ShowCommand {
            catalog_path: catalog,
            name,
            json,
            output_file,
            quiet: cli.quiet,
        }),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tooling-catalog", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = tooling_catalog::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                match tooling_catalog::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".tooling-catalog.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, tooling_catalog::config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
