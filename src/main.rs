use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hclsemver::config::ResolverConfig;
use hclsemver::version::{
    Constraint, SemanticVersion, Strategy, VersionTerm, is_equivalent, normalize, parse,
};

#[derive(Parser)]
#[command(name = "hclsemver")]
#[command(version, about = "Resolve dependency version updates without downgrading")]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every decision to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the literal to write for a target over an existing declaration
    Resolve {
        /// dynamic, exact or range; defaults to the configured strategy
        #[arg(short, long)]
        strategy: Option<Strategy>,
        #[arg(short, long)]
        target: String,
        /// Current declaration, empty when there is none
        #[arg(short, long, default_value = "")]
        existing: String,
    },
    /// Print a literal with canonical spacing
    Normalize {
        literal: String,
        /// Exit with status 1 unless the literal equals this one in meaning
        #[arg(long)]
        compare: Option<String>,
    },
    /// Print whether two ranges share a version
    Overlaps { a: String, b: String },
    /// Print the lowest and highest version of a range
    Bounds { range: String },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn range(literal: &str) -> anyhow::Result<Constraint> {
    match parse(literal).with_context(|| format!("failed to parse '{literal}'"))? {
        VersionTerm::Range(constraint) => Ok(constraint),
        VersionTerm::Exact(version) => bail!("expected a range, got exact version '{version}'"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ResolverConfig::load_or_default(cli.config.as_deref())?;
    let bounds = config.bounds;

    match cli.command {
        Command::Resolve {
            strategy,
            target,
            existing,
        } => {
            let strategy = strategy.unwrap_or(config.strategy);
            let resolved = config.resolver().apply(strategy, &target, &existing)?;
            println!("{resolved}");
        }
        Command::Normalize { literal, compare } => {
            println!("{}", normalize(&literal));
            if let Some(other) = compare
                && !is_equivalent(&literal, &other)
            {
                std::process::exit(1);
            }
        }
        Command::Overlaps { a, b } => {
            let (a, b) = (range(&a)?, range(&b)?);
            let bounds = bounds.widened_for(&a).widened_for(&b);
            println!("{}", bounds.overlaps(&a, &b));
        }
        Command::Bounds { range: literal } => {
            let constraint = range(&literal)?;
            let bounds = bounds.widened_for(&constraint);
            let show = |v: Option<SemanticVersion>| {
                v.map_or_else(|| "none".to_string(), |v| v.to_string())
            };
            println!("lowest: {}", show(bounds.lowest(&constraint)));
            println!("highest: {}", show(bounds.highest(&constraint)));
        }
    }

    Ok(())
}
