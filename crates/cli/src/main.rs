use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use brevis_core::{BrevisError, Config, Extraction, ExtractionMethod, Pipeline, SummaryLength, is_valid_url, parse_url};
use clap::Parser;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Summarize a blog post or article from its URL
#[derive(Parser, Debug)]
#[command(name = "brevis")]
#[command(version = VERSION)]
#[command(about = "Summarize blog posts and articles from the web", long_about = None)]
struct Args {
    /// URL of the blog post or article
    #[arg(value_name = "URL")]
    url: String,

    /// Summary length (short, medium, long)
    #[arg(short, long, default_value = "medium", value_name = "LENGTH", value_parser = ["short", "medium", "long"])]
    length: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only extract the article text, do not summarize
    #[arg(long)]
    extract_only: bool,

    /// HTTP timeout in seconds for direct page fetches
    #[arg(long, default_value = "15", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for direct page fetches
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Text-generation model
    #[arg(long, env = "BREVIS_MODEL", value_name = "MODEL")]
    model: Option<String>,

    /// Groq API key (required unless --extract-only)
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, value_name = "KEY")]
    groq_api_key: Option<String>,

    /// Firecrawl API key (enables rendering-based extraction)
    #[arg(long, env = "FIRECRAWL_API_KEY", hide_env_values = true, value_name = "KEY")]
    firecrawl_api_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        config.fetch.timeout = self.timeout;
        if let Some(agent) = &self.user_agent {
            config.fetch.user_agent = agent.clone();
        }
        if let Some(model) = non_blank(&self.model) {
            config.groq.model = model;
        }
        if let Some(key) = non_blank(&self.groq_api_key) {
            config.groq_api_key = Some(key);
        }
        if let Some(key) = non_blank(&self.firecrawl_api_key) {
            config.firecrawl_api_key = Some(key);
        }
        config
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "brevis_core=debug,brevis=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.config();
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            echo::print_error(&format!("Failed to start async runtime: {}", e));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&args, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err, &config);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, config: &Config) -> anyhow::Result<()> {
    if args.verbose {
        echo::print_banner();
        echo::print_info(&format!(
            "Primary extraction: {}",
            if config.has_primary() { "Firecrawl" } else { "disabled (basic scraping only)" }
        ));
        eprintln!();
    }

    if !is_valid_url(&args.url) {
        return Err(BrevisError::InvalidUrl(args.url.clone()).into());
    }
    debug!(url = %args.url, length = %args.length, extract_only = args.extract_only, "starting");

    let output = if args.extract_only { extract_only(args, config).await? } else { summarize(args, config).await? };

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}

async fn summarize(args: &Args, config: &Config) -> anyhow::Result<String> {
    let length = SummaryLength::from_name(&args.length);
    let pipeline = Pipeline::from_config(config)?;

    if args.verbose {
        echo::print_step(
            1,
            2,
            &format!("Extracting and summarizing {}", args.url.bright_white().underline()),
        );
    }

    let started = Instant::now();
    let digest = pipeline.run(&args.url, length).await?;

    if args.verbose {
        echo::print_timing("Total", started.elapsed());
        echo::print_step(2, 2, "Writing output");
        eprintln!();
    }

    let output = match args.format {
        OutputFormat::Text => echo::render_digest(&digest),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&digest).context("Failed to serialize summary")?;
            text.push('\n');
            text
        }
    };

    Ok(output)
}

async fn extract_only(args: &Args, config: &Config) -> anyhow::Result<String> {
    let url = parse_url(&args.url)?;
    let orchestrator = config.orchestrator()?;

    if args.verbose {
        echo::print_step(1, 2, &format!("Extracting content from {}", url.bright_white().underline()));
    }

    let started = Instant::now();
    let outcome = orchestrator.extract(&url).await;
    let method = outcome.method;
    let extraction = outcome.into_result()?.ensure_sufficient()?;

    if args.verbose {
        echo::print_timing("Extraction", started.elapsed());
        eprintln!("  {} {}", "Method:".dimmed(), method.to_string().bright_white());
        echo::print_step(2, 2, "Writing output");
        eprintln!();
    }

    Ok(render_extraction(&extraction, method, url.as_str(), args.format))
}

fn render_extraction(extraction: &Extraction, method: ExtractionMethod, url: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            if let Some(title) = &extraction.title {
                out.push_str(&format!("# {}\n\n", title));
            }
            out.push_str(&extraction.content);
            out.push('\n');
            out
        }
        OutputFormat::Json => {
            let value = json!({
                "url": url,
                "method": method,
                "title": extraction.title,
                "content": extraction.content,
                "content_length": extraction.content.chars().count(),
            });
            format!("{:#}\n", value)
        }
    }
}

/// Print a terminal failure, with a hint where one helps.
fn report_failure(err: &anyhow::Error, config: &Config) {
    match err.downcast_ref::<BrevisError>() {
        Some(BrevisError::InvalidUrl(_)) => {
            echo::print_error("Please enter a valid URL (including http:// or https://)");
        }
        Some(BrevisError::InsufficientContent { .. }) => {
            echo::print_error(
                "Unable to extract sufficient content from this URL. The page might be behind a paywall, \
                 require JavaScript, or have content protection.",
            );
            if !config.has_primary() {
                echo::print_tip("Firecrawl can often handle protected and JavaScript-heavy sites. Set FIRECRAWL_API_KEY to enable it.");
            }
        }
        Some(e @ BrevisError::ExtractionFailed { .. }) => {
            echo::print_error(&e.to_string());
            if !config.has_primary() && !e.is_timeout() {
                echo::print_tip("Many extraction issues can be resolved with Firecrawl. Set FIRECRAWL_API_KEY to enable it.");
            }
        }
        Some(e) => echo::print_error(&e.to_string()),
        None => echo::print_error(&format!("{:#}", err)),
    }
}
