use anyhow::{Context, Result, bail};
use clap::Parser;
use splitwall::{CellFormat, Report, ReportConfig, ReportKind, TimingError, parse_competition};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "splitwall")]
#[command(version)]
#[command(about = "Split, race-clock and delta tables for checkpoint races", long_about = None)]
struct Cli {
    /// Report to produce
    #[arg(value_enum)]
    mode: ReportKind,

    /// Record file, one run per line
    #[arg(value_name = "FILE")]
    data: PathBuf,

    /// YAML report configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of BEST-k rows in split and delta reports
    #[arg(long, value_name = "N")]
    best_rows: Option<usize>,

    /// Number of fastest leg times averaged into the delta reference
    #[arg(long, value_name = "N")]
    reference_count: Option<usize>,

    /// Print cells as HH:MM:SS instead of seconds
    #[arg(long)]
    clock: bool,

    /// Fail if any record is rejected instead of reporting the valid ones
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn report_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::load(path)?,
            None => ReportConfig::default(),
        };
        if let Some(rows) = self.best_rows {
            config.best_rows = rows;
        }
        if let Some(count) = self.reference_count {
            config.reference_count = count;
        }
        if self.clock {
            config.cell_format = CellFormat::Clock;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.report_config()?;

    let data = std::fs::read_to_string(&cli.data)
        .map_err(|e| TimingError::file_error(cli.data.clone(), e))?;

    let (competition, rejected) = parse_competition(&data).into_parts();
    if let Some(error) = rejected {
        if cli.strict {
            return Err(error).with_context(|| format!("rejected records in {}", cli.data.display()));
        }
        warn!("Skipping rejected records in {}:\n{}", cli.data.display(), error);
    }
    if competition.is_empty() {
        bail!("no valid runs in {}", cli.data.display());
    }
    info!(runs = competition.len(), mode = %cli.mode, "Building report");

    let report = Report::generate(cli.mode, competition, &config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report.write_to(&mut out, &config).context("writing report")?;
    out.flush().context("writing report")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(&cli) {
        eprintln!("error: {error:#}");
        if let Some(timing) = error.downcast_ref::<TimingError>() {
            for suggestion in timing.recovery_suggestions() {
                eprintln!("  - {suggestion}");
            }
        }
        std::process::exit(1);
    }
}
