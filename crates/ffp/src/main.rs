//! FFP - command line entry point
//!
//! Lists the primitive operation catalogue and checks unit build plans.

use anyhow::{anyhow, bail, Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use ffp_codegen::{find_plan, BuildPlan, ContractError, UnitConfig};
use ffp_catalog::{self as catalog, Operation, SafetyClass, Width};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Poison-safety partitioned float primitives
#[derive(Parser, Debug)]
#[command(name = "ffp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The command to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Safety class filter
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Class {
    /// Plain arithmetic and comparisons
    #[value(alias = "arith")]
    Unconstrained,
    /// Poison-tolerant operations
    #[value(alias = "safe")]
    BoundarySafe,
    /// Operations that need frozen arguments
    #[value(alias = "unsafe")]
    BoundaryUnsafe,
}

impl From<Class> for SafetyClass {
    fn from(class: Class) -> Self {
        match class {
            Class::Unconstrained => SafetyClass::Unconstrained,
            Class::BoundarySafe => SafetyClass::BoundarySafe,
            Class::BoundaryUnsafe => SafetyClass::BoundaryUnsafe,
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// List operations with their class and exported symbols
    Catalog {
        /// Only operations of this class
        #[arg(long, value_enum)]
        class: Option<Class>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the class and symbols of one operation
    Lookup {
        /// Operation base name, e.g. `ln`
        op: String,
    },

    /// Print compiler arguments for each unit of a build plan
    Flags {
        /// Build plan to read; defaults to the nearest ffp.toml, then the
        /// recommended plan
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Only the unit of this class
        #[arg(long, value_enum)]
        class: Option<Class>,
    },

    /// Validate a build plan
    Check {
        /// Build plan to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Catalog { class, json } => print_catalog(class.map(Into::into), json),
        Commands::Lookup { ref op } => print_lookup(op),
        Commands::Flags { ref config, class } => {
            print_flags(config.as_deref(), class.map(Into::into))
        }
        Commands::Check { ref file } => check_plan(file),
    }
}

/// One catalogue row as printed by `catalog --json`
#[derive(Serialize, Debug)]
struct CatalogEntry {
    name: &'static str,
    class: SafetyClass,
    requires_freeze: bool,
    signature: String,
    symbols: Vec<String>,
}

impl CatalogEntry {
    fn new(op: &Operation) -> Self {
        Self {
            name: op.name,
            class: op.class,
            requires_freeze: op.class.requires_freeze(),
            signature: op.signature.render(Width::F64).replace("f64", "W"),
            symbols: Width::ALL
                .iter()
                .flat_map(|&width| op.symbols(width))
                .collect(),
        }
    }
}

fn catalog_entries(class: Option<SafetyClass>) -> Vec<CatalogEntry> {
    catalog::OPERATIONS
        .iter()
        .filter(|op| class.map_or(true, |c| op.class == c))
        .map(CatalogEntry::new)
        .collect()
}

/// List the catalogue
fn print_catalog(class: Option<SafetyClass>, json: bool) -> Result<()> {
    let entries = catalog_entries(class);
    tracing::debug!("{} operation(s) selected", entries.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{:<12} {:<16} {:<18} {}",
            entry.name,
            entry.class,
            entry.signature,
            entry.symbols.join(" ")
        );
    }
    Ok(())
}

/// Describe one operation
fn print_lookup(name: &str) -> Result<()> {
    let op = catalog::lookup(name).ok_or_else(|| anyhow!("unknown operation `{name}`"))?;

    println!("{}: {}", op.name, op.class);
    if op.class.requires_freeze() {
        println!("  arguments must be frozen before the call");
    }
    for width in Width::ALL {
        println!("  {}  {}", width, op.signature.render(width));
        for symbol in op.symbols(width) {
            println!("    {symbol}");
        }
    }
    Ok(())
}

/// Resolve the plan for `flags`: explicit file, nearest ffp.toml, or the
/// recommended plan.
fn resolve_plan(config: Option<&Path>) -> Result<BuildPlan> {
    if let Some(path) = config {
        let path = utf8_path(path)?;
        return BuildPlan::load(&path).with_context(|| format!("failed to load {path}"));
    }

    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    match find_plan(utf8_path(&cwd)?) {
        Ok(path) => {
            tracing::info!("Using build plan {}", path);
            BuildPlan::load(&path).with_context(|| format!("failed to load {path}"))
        }
        Err(ContractError::ConfigNotFound(_)) => {
            tracing::debug!("No build plan found, using the recommended one");
            Ok(BuildPlan::recommended())
        }
        Err(e) => Err(e.into()),
    }
}

fn render_unit(unit: &UnitConfig) -> String {
    format!(
        "{} ({}): {}",
        unit.class,
        unit.source,
        unit.compiler_args().join(" ")
    )
}

/// Print compiler arguments per unit
fn print_flags(config: Option<&Path>, class: Option<SafetyClass>) -> Result<()> {
    let plan = resolve_plan(config)?;

    for violation in plan.violations() {
        tracing::warn!("{}", violation);
    }

    let mut printed = 0;
    for unit in plan
        .units
        .iter()
        .filter(|unit| class.map_or(true, |c| unit.class == c))
    {
        println!("{}", render_unit(unit));
        printed += 1;
    }

    if printed == 0 {
        if let Some(class) = class {
            bail!("the plan has no {class} unit");
        }
    }
    Ok(())
}

/// Validate a plan file
fn check_plan(file: &Path) -> Result<()> {
    let path = utf8_path(file)?;
    tracing::info!("Checking {}", path);

    let plan = BuildPlan::load(&path).with_context(|| format!("failed to load {path}"))?;
    let violations = plan.violations();

    if violations.is_empty() {
        println!("{path}: ok");
        return Ok(());
    }

    for violation in &violations {
        tracing::error!("{}", violation);
    }
    bail!(
        "{path}: {} contract violation(s)",
        violations.len()
    )
}

fn utf8_path(path: &Path) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path.to_path_buf())
        .map_err(|p| anyhow!("Invalid UTF-8 in path: {}", p.display()))
}
