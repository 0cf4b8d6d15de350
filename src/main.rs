//! `auto-router-gen`: generate route registration code for an ArkTS module.
//!
//! ```text
//! auto-router-gen generate --config router.json5
//! auto-router-gen generate --module-path feature/home --module-name home --scan-file src/main/ets/pages/Home
//! auto-router-gen scan feature/home/src/main/ets/pages/Home.ets
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use route_analyzer::{AnalyzerConfig, RouteScanner};
use route_codegen::{GeneratorConfig, generate_with};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "auto-router-gen")]
#[command(about = "Generate @AppRouter route builders and route maps", long_about = None)]
#[command(version)]
struct Cli {
    /// Analyzer settings (JSON5): resolution depth, manifest and extension lists, decorator keys
    #[arg(long, global = true)]
    analyzer_config: Option<PathBuf>,

    /// Log every constant resolution step at debug level
    #[arg(long, global = true)]
    trace_resolution: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the module and write RouterBuilder.ets, route_map.json and the Index.ets export
    Generate {
        /// Plugin options file (JSON5)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Module root, overrides the config file
        #[arg(long)]
        module_path: Option<PathBuf>,
        /// Module name, overrides the config file
        #[arg(long)]
        module_name: Option<String>,
        /// Additional file to scan, relative to the module root (repeatable)
        #[arg(long = "scan-file")]
        scan_files: Vec<String>,
        /// Treat the module as the entry module (no Index.ets export)
        #[arg(long)]
        main_target: bool,
        /// Route decorator name
        #[arg(long)]
        annotation: Option<String>,
    },

    /// Print the routes found in one file as JSON
    Scan {
        /// Source file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Missing .env is fine; the tool is usually run from a build script.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,route_analyzer=info,route_codegen=info"))
        .context("invalid log filter")?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let mut analyzer = route_analyzer::config::load_or_default(cli.analyzer_config.as_deref())
        .context("loading analyzer config")?;
    analyzer.trace_resolution |= cli.trace_resolution;

    let outcome = match cli.command {
        Commands::Generate {
            config,
            module_path,
            module_name,
            scan_files,
            main_target,
            annotation,
        } => {
            let mut cfg = match config {
                Some(path) => GeneratorConfig::load_from_file(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => GeneratorConfig::default(),
            };
            if let Some(path) = module_path {
                cfg.module_path = path;
            }
            if let Some(name) = module_name {
                cfg.module_name = name;
            }
            if let Some(name) = annotation {
                cfg.annotation = name;
            }
            cfg.main_target |= main_target;
            let cfg = cfg
                .with_extra_scan_files(&scan_files.join(","))
                .with_env_scan_files();
            run_generate(&cfg, analyzer)
        }
        Commands::Scan { file } => run_scan(file, analyzer),
    };

    if let Err(err) = outcome {
        eprintln!("{}: {:#}", "Error".red().bold(), err);
        std::process::exit(1);
    }
    Ok(())
}

fn run_generate(cfg: &GeneratorConfig, analyzer: AnalyzerConfig) -> Result<()> {
    debug!(config = ?cfg, "Generator config");
    let summary = generate_with(cfg, analyzer)?;

    for route in &summary.routes {
        let login = if route.login { " (login)".yellow().to_string() } else { String::new() };
        println!(
            "  {} {} -> {}{}",
            "route".green(),
            route.name.bold(),
            route.component_name,
            login
        );
    }
    for skipped in &summary.skipped_files {
        println!("  {} {}", "skipped".yellow(), skipped.display());
    }
    match &summary.builder_file {
        Some(builder) => println!(
            "{} {} routes from {} files -> {}",
            "Generated".green().bold(),
            summary.routes.len(),
            summary.scanned_files,
            builder.display()
        ),
        None => println!("{}", "No scan files configured; nothing generated.".yellow()),
    }
    Ok(())
}

fn run_scan(file: PathBuf, analyzer: AnalyzerConfig) -> Result<()> {
    let scanner = RouteScanner::new(analyzer)?;
    let results = scanner
        .scan(&file)
        .with_context(|| format!("scanning {}", file.display()))?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
