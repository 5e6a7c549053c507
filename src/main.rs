//! lolreg: browse Windows registry keys documented as attack techniques
//!
//! Loads a directory of technique records and renders the catalog, the
//! registry tree or the flat key index.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use lolreg::{
    cli::{self, CatalogQuery, ConfigOutput, TreeOptions},
    config::AppConfig,
    pipeline::exit_codes,
    reports::{IndexView, ReportFormat},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lolreg")]
#[command(version)]
#[command(about = "Living Off The Land registry key catalog", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  No matches / technique not found
    2  Error occurred

EXAMPLES:
    # Browse the tree with everything open
    lolreg tree --expand-all

    # Find every key that mentions Run
    lolreg index --search run

    # Export the key index as Markdown
    lolreg index --view alphabetical -O keys.md")]
struct Cli {
    /// Directory of record files (overrides config file)
    #[arg(long, global = true, env = "LOLREG_DATA")]
    data: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Output format (auto picks from the output file extension, text otherwise)
    #[arg(short, long, global = true)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long, global = true)]
    output_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List techniques, optionally filtered
    List {
        /// Match against name, description and key paths (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only techniques carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show one technique in detail
    Show {
        /// Technique id (the record file name without extension)
        id: String,
    },

    /// Show the registry tree
    Tree {
        /// Open every node
        #[arg(long, conflicts_with = "collapse_all")]
        expand_all: bool,

        /// Start with every node closed
        #[arg(long)]
        collapse_all: bool,

        /// Open a path and its ancestors (repeatable)
        #[arg(short, long, value_name = "PATH")]
        expand: Vec<String>,
    },

    /// Show the flat registry key index
    Index {
        /// Match against key paths and technique names (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Group by hive or list alphabetically
        #[arg(long, default_value = "hive")]
        view: IndexView,
    },

    /// Print every registry path in the tree, depth-first
    Paths,

    /// Print every tag in use
    Tags,

    /// Print a template for a new technique record
    Template,

    /// Print the effective configuration
    Config {
        /// Print a commented example config file instead
        #[arg(long, conflicts_with = "schema")]
        example: bool,

        /// Print the JSON schema of the config file instead
        #[arg(long)]
        schema: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
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

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    if let Commands::Completions { shell } = cli.command {
        generate(shell, &mut Cli::command(), "lolreg", &mut io::stdout());
        return Ok(exit_codes::SUCCESS);
    }

    let mut overrides = AppConfig::builder()
        .output_format(cli.output.unwrap_or_default())
        .output_file(cli.output_file);
    if let Some(dir) = cli.data {
        overrides = overrides.data_dir(dir);
    }
    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides.build());
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    cli::validate_config(&config)?;

    let quiet = cli.quiet;
    match cli.command {
        Commands::List { search, tag } => {
            let mut query = CatalogQuery::new();
            if let Some(term) = search {
                query = query.term(term);
            }
            if let Some(tag) = tag {
                query = query.tag(tag);
            }
            cli::run_list(&config, &query, quiet)
        }

        Commands::Show { id } => cli::run_show(&config, &id, quiet),

        Commands::Tree {
            expand_all,
            collapse_all,
            expand,
        } => {
            let options = TreeOptions {
                expand_all,
                collapse_all,
                expand,
            };
            cli::run_tree(&config, &options, quiet)
        }

        Commands::Index { search, view } => {
            cli::run_index(&config, search.as_deref(), view, quiet)
        }

        Commands::Paths => cli::run_paths(&config, quiet),

        Commands::Tags => cli::run_tags(&config, quiet),

        Commands::Template => cli::run_template(&config, quiet),

        Commands::Config { example, schema } => {
            let what = if example {
                ConfigOutput::Example
            } else if schema {
                ConfigOutput::Schema
            } else {
                ConfigOutput::Effective
            };
            cli::run_config(&config, what, quiet)
        }

        Commands::Completions { .. } => Ok(exit_codes::SUCCESS),
    }
}
