use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use repolens::config::AnalysisConfig;
use repolens::core::RepoAnalyzer;
use repolens::formatters::{JsonFormatter, MarkdownFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "repolens",
    version,
    author = "repolens developers",
    about = "Repository structure analysis: import graph, framework and patterns"
)]
struct Cli {
    /// Input directory to analyze
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "REPOLENS.json")]
    output: PathBuf,

    /// Output format: json, json-compact, markdown
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Identifier recorded in the index (defaults to the input directory name)
    #[arg(long, value_name = "ID")]
    repo_id: Option<String>,

    /// Abandon the analysis after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// TOML file overriding the built-in scan and heuristic tables
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Json,
    JsonCompact,
    Markdown,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::JsonCompact => "json-compact",
            OutputFormat::Markdown => "markdown",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        output,
        format,
        repo_id,
        timeout_secs,
        config,
    } = cli;

    let start_time = Instant::now();

    let config = match config {
        Some(path) => AnalysisConfig::from_toml_file(&path)?,
        None => AnalysisConfig::default(),
    };
    let repo_id = repo_id.unwrap_or_else(|| default_repo_id(&input));

    log::info!("REPOLENS - Repository Analysis");
    log::info!("Input: {}", input.display());
    log::info!("Output: {}", output.display());
    log::info!("Format: {}", format.as_str());

    let analyzer = Arc::new(RepoAnalyzer::with_config(config));
    let index = match timeout_secs {
        Some(secs) => analyzer
            .analyze_with_timeout(input.clone(), repo_id, Duration::from_secs(secs))
            .await
            .with_context(|| format!("failed to analyze {}", input.display()))?,
        None => {
            let root = input.clone();
            tokio::task::spawn_blocking(move || analyzer.analyze(&root, &repo_id))
                .await
                .context("analysis task panicked")?
                .with_context(|| format!("failed to analyze {}", input.display()))?
        }
    };

    match format {
        OutputFormat::Json => JsonFormatter::new().format_to_file(&index, &output)?,
        OutputFormat::JsonCompact => JsonFormatter::compact().format_to_file(&index, &output)?,
        OutputFormat::Markdown => MarkdownFormatter::new().format_to_file(&index, &output)?,
    }

    log::info!(
        "Analysis complete: {} files, framework {}. Generated {}",
        index.total_files,
        index.framework,
        output.display()
    );
    log::info!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn default_repo_id(input: &Path) -> String {
    input
        .canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(input)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "repository".to_string())
}
