// Command-line entry point for lexgraph.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lexgraph::application::AnalyzeUsecase;
use lexgraph::config::LexgraphConfig;
use lexgraph::domain::language::Dialect;
use lexgraph::domain::policy::FilterReason;
use lexgraph::error::LexgraphError;
use lexgraph::infrastructure::{build_pool, SourceLoader};
use lexgraph::ports::graph_exporter::{DotExporter, JsonExporter, TextExporter};
use lexgraph::ports::GraphExporter;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input source file path (can specify multiple)
    #[arg(short, long)]
    input: Vec<PathBuf>,

    /// Input source folder(s), walked recursively
    #[arg(short = 'd', long)]
    folder: Vec<PathBuf>,

    /// Source dialect: auto (by extension), c or cobol
    #[arg(long, default_value = "auto")]
    dialect: String,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drop callees starting with this prefix (repeatable)
    #[arg(short = 'x', long = "exclude-prefix")]
    exclude_prefix: Vec<String>,

    /// Keep only calls to units defined in the inputs
    #[arg(long)]
    only_defined: bool,

    /// Keep direct self-recursion edges
    #[arg(long)]
    include_self: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worker threads for extraction (default: half the logical cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Log at debug level unless LEXGRAPH_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Dot,
}

impl OutputFormat {
    fn exporter(self) -> &'static dyn GraphExporter {
        match self {
            OutputFormat::Text => &TextExporter,
            OutputFormat::Json => &JsonExporter,
            OutputFormat::Dot => &DotExporter,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("LEXGRAPH_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_dialect(value: &str) -> Result<Option<Dialect>> {
    if value.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    Ok(Some(value.parse::<Dialect>()?))
}

fn load_config(path: Option<&Path>) -> Result<LexgraphConfig> {
    match path {
        Some(path) => LexgraphConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(LexgraphConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let mut policy = config
        .policy
        .clone()
        .with_exclude_prefixes(cli.exclude_prefix.iter().cloned());
    if cli.only_defined {
        policy = policy.only_defined(true);
    }
    if cli.include_self {
        policy = policy.self_calls(true);
    }
    let registry = config.registry()?;

    // 1. input files, then folders, in command-line order
    let loader = SourceLoader::new(parse_dialect(&cli.dialect)?);
    let mut sources = Vec::new();
    for path in &cli.input {
        sources.push(loader.load_file(path)?);
    }
    for dir in &cli.folder {
        sources.extend(loader.load_dir(dir)?);
    }
    if sources.is_empty() {
        return Err(LexgraphError::NoSources.into());
    }

    // 2. analyse
    let pool = build_pool(cli.jobs)?;
    let analysis = AnalyzeUsecase::new(&registry, &policy).run_parallel(&sources, &pool);
    tracing::info!(
        files = sources.len(),
        units = analysis.units.len(),
        edges = analysis.graph.edge_count(),
        observed = analysis.stats.observed,
        reserved = analysis.stats.dropped_for(FilterReason::Reserved),
        excluded = analysis.stats.dropped_for(FilterReason::ExcludedPrefix),
        self_calls = analysis.stats.dropped_for(FilterReason::SelfCall),
        undefined = analysis.stats.dropped_for(FilterReason::Undefined),
        "analysis complete"
    );

    // 3. report
    let exporter = cli.format.exporter();
    match &cli.output {
        Some(path) => {
            let path_str = path.to_string_lossy();
            exporter
                .export(&analysis.graph, &path_str)
                .with_context(|| format!("writing report to {}", path.display()))?;
            tracing::info!(output = %path.display(), format = ?cli.format, "report written");
        }
        None => print!("{}", exporter.render(&analysis.graph)?),
    }
    Ok(())
}
