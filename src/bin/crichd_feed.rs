use std::process::ExitCode;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use crichd_feed::config::{DEFAULT_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, FeedConfig, SelectionConfig};
use crichd_feed::domain::NumberingMode;
use crichd_feed::error::FeedError;
use crichd_feed::output::JsonOutput;
use crichd_feed::pipeline::Pipeline;
use crichd_feed::select;
use crichd_feed::source::SourceHttpClient;

#[derive(Parser)]
#[command(name = "crichd-feed")]
#[command(about = "Fetch, normalize, and publish CricHD-style live stream channel lists")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch the source feed once and write the channel file")]
    Fetch(FetchArgs),
    #[command(about = "Refresh the channel file on a fixed interval")]
    Watch(WatchArgs),
    #[command(about = "Copy channels matched by exact name into a renamed selection file")]
    Select(SelectArgs),
}

#[derive(Args, Clone)]
struct FetchArgs {
    #[arg(long)]
    source_url: Option<String>,

    #[arg(long)]
    output: Option<Utf8PathBuf>,

    #[arg(long)]
    thumbnail: Option<String>,

    #[arg(long)]
    numbering: Option<NumberingMode>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

#[derive(Args)]
struct WatchArgs {
    #[command(flatten)]
    fetch: FetchArgs,

    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS)]
    interval: u64,
}

#[derive(Args)]
struct SelectArgs {
    #[arg(long)]
    rules: Option<Utf8PathBuf>,

    #[arg(long = "name")]
    names: Vec<String>,

    #[arg(long = "rename")]
    renames: Vec<String>,

    #[arg(long)]
    source: Option<String>,

    #[arg(long)]
    output: Option<Utf8PathBuf>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(feed) = report.downcast_ref::<FeedError>() {
            return ExitCode::from(map_exit_code(feed));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &FeedError) -> u8 {
    match error {
        FeedError::InvalidNumberingMode(_)
        | FeedError::RuleCountMismatch { .. }
        | FeedError::RulesMissing
        | FeedError::RulesRead(_)
        | FeedError::RulesParse(_)
        | FeedError::NumberSpaceExhausted => 2,
        FeedError::SourceHttp(_) | FeedError::SourceStatus { .. } => 3,
        FeedError::InvalidJson(_)
        | FeedError::UnexpectedPayload(_)
        | FeedError::ChannelNumberRange(_) => 4,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch(args) => run_fetch(args),
        Commands::Watch(args) => run_watch(args),
        Commands::Select(args) => run_select(args),
    }
}

fn run_fetch(args: FetchArgs) -> miette::Result<()> {
    let config = resolve_feed_config(&args)?;
    let client = SourceHttpClient::new(Duration::from_secs(args.timeout))?;
    let mut pipeline = Pipeline::new(client, config);

    let summary = pipeline.run_once()?;
    JsonOutput::print_run(&summary).into_diagnostic()?;
    Ok(())
}

fn run_watch(args: WatchArgs) -> miette::Result<()> {
    let interval = Duration::from_secs(args.interval);
    let config = resolve_feed_config(&args.fetch)?;
    let client = SourceHttpClient::new(Duration::from_secs(args.fetch.timeout))?;
    let mut pipeline = Pipeline::new(client, config);

    pipeline.run_forever(interval)
}

fn run_select(args: SelectArgs) -> miette::Result<()> {
    let config = resolve_selection_config(&args)?;
    let client = SourceHttpClient::new(Duration::from_secs(args.timeout))?;

    let summary = select::run_select(&client, &config)?;
    JsonOutput::print_select(&summary).into_diagnostic()?;
    Ok(())
}

fn resolve_feed_config(args: &FetchArgs) -> Result<FeedConfig, FeedError> {
    let mut config = FeedConfig::from_env()?;
    if let Some(source_url) = &args.source_url {
        config.source_url = source_url.clone();
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if let Some(thumbnail) = &args.thumbnail {
        config.profile.thumbnail = thumbnail.clone();
    }
    if let Some(numbering) = args.numbering {
        config.numbering = numbering;
    }
    Ok(config)
}

fn resolve_selection_config(args: &SelectArgs) -> Result<SelectionConfig, FeedError> {
    let mut config = match &args.rules {
        Some(path) => SelectionConfig::load(path)?,
        None => SelectionConfig::default(),
    };

    if !args.names.is_empty() || !args.renames.is_empty() {
        config.selected_channels = args.names.clone();
        config.replacement_names = args.renames.clone();
    } else if args.rules.is_none() {
        return Err(FeedError::RulesMissing);
    }

    if let Some(source) = &args.source {
        config.source = source.clone();
    }
    if let Some(output) = &args.output {
        config.output = output.to_string();
    }
    Ok(config)
}
