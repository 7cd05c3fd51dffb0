use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use csv_cleaner::error::CleanerError;
use csv_cleaner::{
    logging, metrics, normalize_address, ClassifierMode, CleanerConfig,
    CleaningPipeline, RowClassifier,
};

const STDIO_PATH: &str = "-";

#[derive(Parser)]
#[command(name = "csv_cleaner")]
#[command(about = "Keep only unique address rows from a task-tracker CSV export")]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a CSV down to unique address rows
    Clean {
        /// Input CSV file, or - for stdin
        input: PathBuf,
        /// Output file, or - for stdout. Defaults to cleaned_<input> next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// TOML config file (defaults to $CSV_CLEANER_CONFIG, then ./cleaner.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Column holding the address text
        #[arg(long)]
        column: Option<String>,
        /// Column checked for action items instead of the address column
        #[arg(long)]
        name_column: Option<String>,
        /// Classifier: keyword, indicator or pattern
        #[arg(long, value_parser = parse_mode)]
        mode: Option<ClassifierMode>,
        /// Keep rows that repeat an earlier address
        #[arg(long)]
        no_dedupe: bool,
        /// Drop address rows whose action field reads as a to-do
        #[arg(long)]
        reject_action_items: bool,
        /// Column to remove from the output (case-insensitive)
        #[arg(long)]
        drop_column: Option<String>,
        /// Do not remove any column
        #[arg(long, conflicts_with = "drop_column")]
        keep_all_columns: bool,
        /// Write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Show how individual values are classified
    Check {
        /// Classifier: keyword, indicator or pattern
        #[arg(long, value_parser = parse_mode)]
        mode: Option<ClassifierMode>,
        /// TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// List the metrics a cleaning run emits
    Metrics,
}

fn parse_mode(raw: &str) -> std::result::Result<ClassifierMode, CleanerError> {
    raw.parse()
}

struct CleanArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    if input == Path::new(STDIO_PATH) {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read CSV from stdin")?;
        Ok(buf)
    } else {
        fs::read(input).with_context(|| format!("Failed to read '{}'", input.display()))
    }
}

fn resolve_output(config: &CleanerConfig, input: &Path, output: Option<PathBuf>) -> Option<PathBuf> {
    match output {
        Some(path) if path == Path::new(STDIO_PATH) => None,
        Some(path) => Some(path),
        None if input == Path::new(STDIO_PATH) => None,
        None => Some(config.output_path_for(input)),
    }
}

fn run_clean(config: CleanerConfig, args: CleanArgs) -> Result<()> {
    let span = tracing::info_span!("clean", input = %args.input.display());
    let _enter = span.enter();

    let output_path = resolve_output(&config, &args.input, args.output);
    let pipeline = CleaningPipeline::new(config)?;

    let input = read_input(&args.input)?;
    info!(bytes = input.len(), "read input");

    let (cleaned, report) = pipeline.clean_csv(&input)?;

    match &output_path {
        Some(path) => {
            fs::write(path, &cleaned)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!(path = %path.display(), "wrote cleaned CSV");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&cleaned).context("Failed to write CSV to stdout")?;
            stdout.flush()?;
        }
    }

    if let Some(path) = &args.report {
        report
            .write_to(path)
            .with_context(|| format!("Failed to write report '{}'", path.display()))?;
        info!(path = %path.display(), run_id = %report.run_id, "wrote run report");
    }

    eprintln!("\n📊 Cleaning results:");
    for line in report.summary_lines() {
        eprintln!("   {}", line);
    }
    if let Some(path) = &output_path {
        eprintln!("   Output file: {}", path.display());
    }
    Ok(())
}

fn run_check(classifier: &RowClassifier, values: &[String]) {
    println!("mode: {}", classifier.mode());
    for value in values {
        let value = Some(value.as_str());
        let key = normalize_address(value).unwrap_or_else(|| "-".to_string());
        println!(
            "{:?}\n   address-like: {}\n   action item:  {}\n   class:        {:?}\n   key:          {}",
            value.unwrap_or_default(),
            classifier.address().is_address_like(value),
            classifier.action().is_action_item(value),
            classifier.classify(value, value),
            key
        );
    }
}

fn run_metrics() {
    for doc in metrics::documentation() {
        println!("{:<44} {:<10} {}", doc.name, doc.metric_type, doc.help);
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let _guard = logging::init_logging(cli.verbose);
    metrics::init_metrics();

    match cli.command {
        Commands::Clean {
            input,
            output,
            config,
            column,
            name_column,
            mode,
            no_dedupe,
            reject_action_items,
            drop_column,
            keep_all_columns,
            report,
        } => {
            let mut settings = CleanerConfig::discover(config.as_deref())?;
            if let Some(column) = column {
                settings.primary_column = column;
            }
            if name_column.is_some() {
                settings.name_column = name_column;
            }
            if let Some(mode) = mode {
                settings.mode = mode;
            }
            if no_dedupe {
                settings.dedupe = false;
            }
            if reject_action_items {
                settings.reject_action_items = true;
            }
            if let Some(drop) = drop_column {
                settings.drop_column = drop;
            }
            if keep_all_columns {
                settings.drop_column.clear();
            }

            let args = CleanArgs { input, output, report };
            if let Err(e) = run_clean(settings, args) {
                error!("Cleaning failed: {:#}", e);
                return Err(e);
            }
        }
        Commands::Check { mode, config, values } => {
            let settings = CleanerConfig::discover(config.as_deref())?;
            let classifier = RowClassifier::new(mode.unwrap_or(settings.mode))
                .rejecting_action_items(settings.reject_action_items);
            run_check(&classifier, &values);
        }
        Commands::Metrics => run_metrics(),
    }
    Ok(())
}
