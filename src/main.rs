use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use studyload::feeds::{JsonFileSource, RecordSource, StdinSource};
use studyload::report::{self, listing};
use studyload::{AnalysisOutcome, Config, EmptyStage, Pipeline, RawRecord};
use studyload_core::{institutions, WEEKDAYS};

#[derive(Parser)]
#[command(name = "studyload", about = "Imaging study load analysis from DICOM exports")]
struct Cli {
    /// Log at debug level instead of warn.
    #[arg(long, global = true)]
    debug: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Use this config file instead of ~/.config/studyload/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Top-N busiest slots and weekday × hour distributions.
    Analyze(AnalyzeArgs),
    /// Count records per institution name.
    Institutions {
        /// JSON export, or `-` for stdin.
        input: PathBuf,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// JSON export, or `-` for stdin.
    input: PathBuf,

    /// Directory for CSV reports.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// all, 180d, 90d or 30d.
    #[arg(long)]
    window: Option<String>,

    /// Holiday calendar region (DE, AT, CH, FR, GB, US).
    #[arg(long)]
    region: Option<String>,

    #[arg(long, value_name = "N")]
    top_n: Option<usize>,

    /// ignore, optional or required.
    #[arg(long)]
    identity: Option<String>,

    /// Anchor date for the window instead of the local date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Print listings only; write no CSV files.
    #[arg(long)]
    no_csv: bool,

    /// Also print the per-weekday hour tables.
    #[arg(long)]
    weekdays: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to built-in config");
            Config::defaults()
        }),
    };

    match cli.command {
        Command::Analyze(args) => analyze(config, args),
        Command::Institutions { input } => {
            let records = read_input(&input)?;
            print!("{}", listing::render_institutions(&institutions::tally(&records)));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(debug: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if debug { "debug" } else { "warn" })
    });

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}

fn analyze(config: Config, args: AnalyzeArgs) -> anyhow::Result<ExitCode> {
    let mut settings = config.analysis;
    if let Some(window) = args.window {
        settings.window = window;
    }
    if let Some(region) = args.region {
        settings.region = region;
    }
    if let Some(top_n) = args.top_n {
        settings.top_n = top_n;
    }
    if let Some(identity) = args.identity {
        settings.identity = identity;
    }
    let options = settings.resolve().context("invalid analysis settings")?;
    let out_dir = args.output.unwrap_or(config.output.directory);
    let write_csv = config.output.csv && !args.no_csv;
    let today = args.today.unwrap_or_else(|| chrono::Local::now().date_naive());

    let records = read_input(&args.input)?;
    let analysis = match Pipeline::new(options).run(&records, today) {
        AnalysisOutcome::Complete(analysis) => analysis,
        AnalysisOutcome::NoData { stage, total_records, skipped } => {
            match stage {
                EmptyStage::Normalization => eprintln!(
                    "No valid data to process ({total_records} records, {skipped} skipped). Exiting."
                ),
                EmptyStage::Window => {
                    eprintln!("No studies inside the selected time window. Exiting.")
                }
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    println!(
        "{} records, {} skipped; window {} up to {}; region {}; counting {}",
        analysis.total_records,
        analysis.skipped.len(),
        analysis.window,
        analysis.today,
        analysis.region,
        match analysis.count_mode {
            studyload::CountMode::Events => "events",
            studyload::CountMode::DistinctIdentities => "distinct studies",
        }
    );

    for section in analysis.sections() {
        println!();
        if section.is_empty() {
            println!("[{}] no data", section.name);
            if write_csv {
                for path in report::remove_section_files(&out_dir, section.name)? {
                    println!("removed stale {}", path.display());
                }
            }
            continue;
        }
        println!("[{}] {} events", section.name, section.events);
        print!("{}", listing::render_top(&section.top));
        if args.weekdays {
            for weekday in WEEKDAYS {
                println!();
                print!("{}", listing::render_weekday(&section.distribution, weekday));
            }
        }
        if write_csv {
            let paths = report::write_section_files(
                &out_dir,
                section.name,
                &section.top,
                &section.distribution,
            )?;
            for path in paths {
                println!("saved {}", path.display());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_input(input: &Path) -> anyhow::Result<Vec<RawRecord>> {
    let mut source: Box<dyn RecordSource> = if input == Path::new("-") {
        Box::new(StdinSource::new())
    } else {
        Box::new(JsonFileSource::new(input))
    };
    source
        .read_records()
        .with_context(|| format!("cannot read records from {}", source.name()))
}
