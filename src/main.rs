mod api_types;
mod budget;
mod classifier;
mod config;
mod error;
mod features;
mod fetch;
mod lexicon;
mod models;
mod normalize;
mod orchestrator;
mod out_models;
mod prompts;
mod reasons;
mod render;
mod verdict;

use anyhow::{Context, Result};
use awful_aj::{config as aj_config, template};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use api_types::{parse_batch_line, BatchRecord, DetectRequest, DetectResponse, ErrorBody};
use classifier::AwfulJadeClassifier;
use config::{classifier_template_name, resolve_paths, DetectorSettings, DEFAULT_BATCH_WIDTH};
use orchestrator::Detector;

/// News credibility checker - heuristic or LLM-backed verdicts for headlines, text and URLs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to awful_aj config file (overrides AJ_CONFIG environment variable)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Page fetch timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 10, global = true)]
    fetch_timeout_secs: u64,

    /// Remote classifier timeout in seconds
    #[arg(long, env = "REMOTE_TIMEOUT_SECS", default_value_t = 30, global = true)]
    remote_timeout_secs: u64,

    /// Use the remote LLM classifier instead of the built-in heuristics
    #[arg(long, global = true)]
    remote: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a single headline, text or URL
    Detect(DetectArgs),
    /// Classify JSON-lines requests ({"text","headline","url"}) concurrently
    Batch(BatchArgs),
}

#[derive(ClapArgs, Debug)]
struct DetectArgs {
    #[arg(long)]
    headline: Option<String>,

    #[arg(long)]
    text: Option<String>,

    #[arg(long)]
    url: Option<String>,

    /// Print the response JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also print the heuristic signal breakdown
    #[arg(long)]
    explain: bool,
}

#[derive(ClapArgs, Debug)]
struct BatchArgs {
    /// Input file with one JSON request per line ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Requests processed at once
    #[arg(long, default_value_t = DEFAULT_BATCH_WIDTH)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting news_credibility");

    let batch_width = match &args.command {
        Command::Batch(b) => b.concurrency,
        Command::Detect(_) => DEFAULT_BATCH_WIDTH,
    };
    let settings = DetectorSettings::new(args.fetch_timeout_secs, args.remote_timeout_secs, batch_width);
    debug!("Detector settings - {:?}", settings);

    let mut detector = Detector::new(settings).context("creating detector")?;
    if args.remote {
        match load_remote_classifier(args.config.as_deref()).await? {
            Some(remote) => detector = detector.with_remote(Box::new(remote)),
            None => warn!("Remote classifier not configured - falling back to heuristics"),
        }
    }

    match args.command {
        Command::Detect(d) => run_detect(&detector, d).await,
        Command::Batch(b) => run_batch(&detector, &b.input).await,
    }
}

/// Ok(None) when no awful_aj config exists; errors only for a config that
/// exists but cannot be loaded.
async fn load_remote_classifier(config_arg: Option<&str>) -> Result<Option<AwfulJadeClassifier>> {
    // Determine config path: CLI arg > resolve_paths logic
    let cfg_path = match config_arg {
        Some(p) => {
            debug!("Using config file from --config argument: {}", p);
            std::path::PathBuf::from(p)
        }
        None => {
            let paths = resolve_paths()?;
            debug!(
                "Using config file from environment/default: {} (base={}, templates={})",
                paths.config.display(),
                paths.base_dir.display(),
                paths.templates.display()
            );
            paths.config
        }
    };

    if !cfg_path.exists() {
        warn!("awful_aj config not found at {}", cfg_path.display());
        return Ok(None);
    }

    let cfg = aj_config::load_config(
        cfg_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("invalid config path"))?,
    )
    .map_err(|e| anyhow::anyhow!(e.to_string()))
    .with_context(|| format!("loading awful_aj config {}", cfg_path.display()))?;

    let tpl_name = classifier_template_name();
    let tpl = template::load_template(&tpl_name)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .with_context(|| format!("loading template {tpl_name}"))?;

    info!("Remote classifier enabled - template={}", tpl_name);
    Ok(Some(AwfulJadeClassifier::new(cfg, tpl)))
}

async fn run_detect(detector: &Detector, args: DetectArgs) -> Result<()> {
    let request = DetectRequest {
        text: args.text,
        headline: args.headline,
        url: args.url,
    };
    let explain_text = if args.explain {
        detector.explain_text(&request)
    } else {
        None
    };

    let outcome = detector.detect(request).await;
    let mut stdout = std::io::stdout().lock();
    match outcome {
        Ok(verdict) => {
            if args.json {
                serde_json::to_writer_pretty(&mut stdout, &DetectResponse::from(&verdict))?;
                writeln!(stdout)?;
            } else {
                write!(stdout, "{}", render::render_verdict_text(&verdict))?;
                if let Some(text) = explain_text {
                    let features = features::extract_features(&text);
                    write!(stdout, "\n{}", render::render_feature_breakdown(&features))?;
                }
            }
            Ok(())
        }
        Err(e) => {
            warn!("Detection failed - status={}, cause={}", e.status(), e);
            if args.json {
                serde_json::to_writer_pretty(&mut stdout, &ErrorBody::from(&e))?;
                writeln!(stdout)?;
            } else {
                writeln!(stdout, "Error: {}", e.user_message())?;
            }
            stdout.flush()?;
            std::process::exit(if e.status() >= 500 { 2 } else { 1 });
        }
    }
}

async fn run_batch(detector: &Detector, input: &str) -> Result<()> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(std::io::stdin().lock())
    } else {
        let file = std::fs::File::open(input).with_context(|| format!("opening {input}"))?;
        Box::new(std::io::BufReader::new(file))
    };

    // Unparsable lines are reported in place rather than aborting the batch.
    let mut lines = Vec::new();
    let mut requests = Vec::new();
    let mut rejected = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading {input}"))?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_batch_line(&line) {
            Ok(r) => {
                lines.push(idx + 1);
                requests.push(r);
            }
            Err(e) => {
                warn!("Unparsable batch request - line={}, cause={}", idx + 1, e);
                rejected.push((idx + 1, e));
            }
        }
    }

    let results = detector.detect_batch(requests).await;

    let mut records: Vec<BatchRecord> = lines
        .into_iter()
        .zip(results.iter())
        .map(|(line, outcome)| BatchRecord::new(line, outcome))
        .collect();
    records.extend(rejected.into_iter().map(|(line, e)| BatchRecord::new(line, &Err(e))));
    records.sort_by_key(|r| r.line);

    let mut stdout = std::io::stdout().lock();
    for rec in &records {
        serde_json::to_writer(&mut stdout, rec)?;
        writeln!(stdout)?;
    }
    Ok(())
}
