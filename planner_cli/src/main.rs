use clap::{Parser, Subcommand, ValueEnum};
use planner_core::api::{self, SolveOptions};
use planner_core::*;
use serde::de::DeserializeOwned;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "wplan")]
#[command(about = "Constraint-based workout scheduler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog JSON file (defaults to the configured catalog path)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a workout for a request
    Solve {
        /// Request JSON file
        #[arg(long)]
        request: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Cap on the number of exercises
        #[arg(long)]
        max_results: Option<usize>,
    },

    /// Score catalog entries by index, without filters or coverage
    Score {
        /// Request JSON file
        #[arg(long)]
        request: PathBuf,

        /// Comma-separated catalog indices
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        indices: Vec<i64>,
    },

    /// Load the catalog and report its size
    Count,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

fn main() -> Result<()> {
    // Initialize logging
    planner_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let catalog_path = cli
        .catalog
        .clone()
        .unwrap_or_else(|| config.data.catalog_path.clone());

    match cli.command {
        Commands::Solve {
            request,
            format,
            max_results,
        } => cmd_solve(&catalog_path, &request, format, max_results, &config),
        Commands::Score { request, indices } => {
            cmd_score(&catalog_path, &request, &indices, &config)
        }
        Commands::Count => cmd_count(&catalog_path),
    }
}

fn cmd_solve(
    catalog_path: &Path,
    request_path: &Path,
    format: Format,
    max_results: Option<usize>,
    config: &Config,
) -> Result<()> {
    load_catalog_file(catalog_path)?;
    let record: SolveRequestRecord = read_json(request_path)?;

    let options = SolveOptions {
        max_results: max_results.unwrap_or(config.solver.max_results),
        default_weights: config.weights,
        now: chrono::Utc::now(),
    };
    let schedule = api::solve_with(&record, &options)?;

    let stdout = io::stdout();
    match format {
        Format::Text => print!("{}", export::render_text(&schedule)),
        Format::Json => export::write_json(&schedule, stdout.lock())?,
        Format::Csv => export::write_csv(&schedule, stdout.lock())?,
    }

    Ok(())
}

fn cmd_score(
    catalog_path: &Path,
    request_path: &Path,
    indices: &[i64],
    config: &Config,
) -> Result<()> {
    load_catalog_file(catalog_path)?;
    let record: SolveRequestRecord = read_json(request_path)?;
    let (request, _) = record.to_request(&config.weights, chrono::Utc::now())?;

    let scores = CatalogStore::global().score_batch(indices, &request)?;
    for (index, score) in indices.iter().zip(scores) {
        println!("{}\t{:.2}", index, score);
    }

    Ok(())
}

fn cmd_count(catalog_path: &Path) -> Result<()> {
    let report = load_catalog_file(catalog_path)?;

    println!("✓ Loaded {} exercises", api::exercise_count());
    if report.dropped_records > 0 {
        println!(
            "  Dropped {} records past the {}-exercise capacity",
            report.dropped_records, MAX_EXERCISES
        );
    }
    if report.clipped_activation_lists > 0 {
        println!(
            "  Clipped {} activation lists to {} muscles",
            report.clipped_activation_lists, MAX_MUSCLES
        );
    }

    Ok(())
}

fn load_catalog_file(path: &Path) -> Result<LoadReport> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "Catalog file not found: {}",
            path.display()
        )));
    }

    let records: Vec<ExerciseRecord> = read_json(path)?;
    tracing::debug!("Read {} catalog records from {:?}", records.len(), path);
    api::load_catalog(&records)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
