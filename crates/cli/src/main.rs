use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rebrand_engine::{
    extract_inner_markup, LocatorEngine, RewriteConfig, RewriteReport, Rewriter, Strictness,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rebrand")]
#[command(about = "Swap the logo and brand text in a web frontend checkout", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Project root containing the frontend checkout
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Source file containing the icon declarations (relative to root)
    #[arg(long, global = true)]
    icons_file: Option<PathBuf>,

    /// Replacement vector-image asset (relative to root)
    #[arg(long, global = true)]
    logo_asset: Option<PathBuf>,

    /// Source file containing the powered-by text (relative to root)
    #[arg(long, global = true)]
    powered_by_file: Option<PathBuf>,

    /// Brand name currently present in the sources
    #[arg(long, global = true)]
    old_brand: Option<String>,

    /// Brand name to write
    #[arg(long, global = true)]
    new_brand: Option<String>,

    /// Binding name of the icon declaration
    #[arg(long, global = true)]
    icon_component: Option<String>,

    /// Binding name of the logo-type declaration
    #[arg(long, global = true)]
    logo_type_component: Option<String>,

    /// Skip missing declarations/literals with a warning instead of aborting
    #[arg(long, global = true)]
    lenient: bool,

    /// Declaration locator: ast (structural) or pattern (regex fallback)
    #[arg(long, global = true, value_enum)]
    engine: Option<EngineFlag>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the rewrite and persist the mutated sources
    Apply(OutputArgs),

    /// Dry-run: locate everything and validate, write nothing
    Check(OutputArgs),

    /// Print the inner markup extracted from the replacement asset
    Extract,
}

#[derive(Args)]
struct OutputArgs {
    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum EngineFlag {
    Ast,
    Pattern,
}

impl EngineFlag {
    const fn as_domain(self) -> LocatorEngine {
        match self {
            EngineFlag::Ast => LocatorEngine::Ast,
            EngineFlag::Pattern => LocatorEngine::Pattern,
        }
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Apply(args) | Commands::Check(args) => args.json,
        Commands::Extract => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = build_config(&cli)?;

    match cli.command {
        Commands::Apply(args) => run_rewrite(config, args.json, false),
        Commands::Check(args) => run_rewrite(config, args.json, true),
        Commands::Extract => run_extract(config),
    }
}

fn build_config(cli: &Cli) -> Result<RewriteConfig> {
    let mut config = match &cli.config {
        Some(path) => RewriteConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RewriteConfig::default(),
    };

    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
    if let Some(path) = &cli.icons_file {
        config.icons_file = path.clone();
    }
    if let Some(path) = &cli.logo_asset {
        config.logo_asset = path.clone();
    }
    if let Some(path) = &cli.powered_by_file {
        config.powered_by_file = path.clone();
    }
    if let Some(brand) = &cli.old_brand {
        config.old_brand = brand.clone();
    }
    if let Some(brand) = &cli.new_brand {
        config.new_brand = brand.clone();
    }
    if let Some(name) = &cli.icon_component {
        config.icon_component = name.clone();
    }
    if let Some(name) = &cli.logo_type_component {
        config.logo_type_component = name.clone();
    }
    if cli.lenient {
        config.strictness = Strictness::Lenient;
    }
    if let Some(engine) = cli.engine {
        config.engine = engine.as_domain();
    }

    Ok(config)
}

fn run_rewrite(config: RewriteConfig, json: bool, dry_run: bool) -> Result<()> {
    let rewriter = match Rewriter::new(config) {
        Ok(rewriter) => rewriter,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    let result = if dry_run {
        rewriter.check()
    } else {
        rewriter.rewrite()
    };

    match result {
        Ok(report) => print_report(&report, json),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_report(report: &RewriteReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for step in report.steps() {
        println!("{}: {}", step.target, step.outcome.as_str());
    }
    if report.is_noop() {
        eprintln!("Nothing to do: rebrand already applied");
    } else {
        let verb = if report.dry_run { "Would update" } else { "Updated" };
        eprintln!(
            "{} {} and {} ({} step(s) applied)",
            verb,
            report.icons_file.display(),
            report.powered_by_file.display(),
            report.applied_count()
        );
    }
    Ok(())
}

fn run_extract(config: RewriteConfig) -> Result<()> {
    let path = config.asset_path();
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read asset {}", path.display()))?;

    match extract_inner_markup(&content) {
        Ok(inner) => {
            println!("{inner}");
            Ok(())
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
