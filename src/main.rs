use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use signal_desk::config::{load_config, AppConfig};
use signal_desk::hooks::{expand_keywords, hooks};
use signal_desk::ingest::merge_batch;
use signal_desk::loader::{load_batch, load_signals, load_signals_or_default};
use signal_desk::models::Signal;
use signal_desk::pipeline::run;
use signal_desk::rank::{rank_signals, top_n};
use signal_desk::render::{render_blueprint, render_clusters, render_csv, render_table_markdown};
use signal_desk::trends::{label_trend, simple_slope, velocity};
use signal_desk::TfIdfKMeans;

/// Signal Desk - rank keyword signals and cluster their phrases
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Signals document ({"signals": [...]})
    #[arg(short, long, default_value = "data/demo_signals.json")]
    signals: PathBuf,

    /// Raw collector batch (trends/videos/posts) merged into the signals
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Path to JSON config file (overrides SIGNAL_DESK_CONFIG environment variable)
    #[arg(short, long, env = "SIGNAL_DESK_CONFIG")]
    config: Option<PathBuf>,

    /// Fail on a missing or malformed signals file instead of using an empty set
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ranked table as Markdown
    Rank {
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Ranked table as CSV
    Csv {
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Ranked phrases grouped by lexical cluster
    Clusters {
        #[arg(short, long)]
        k: Option<usize>,
        /// Rows shown per cluster
        #[arg(long, default_value_t = 8)]
        per_cluster: usize,
    },
    /// Weekly blueprint Markdown with ad copy per row
    Blueprint {
        #[arg(short = 'n', long, default_value_t = 10)]
        top: usize,
        /// Date in the heading (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Ad copy for one phrase
    Hooks { phrase: String },
    /// Expand a seed keyword into search phrases
    Expand { seed: String },
    /// Label a series as up/down/flat
    Trend {
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<f64>,
    },
}

fn load_inputs(args: &Args) -> Result<Vec<Signal>> {
    let file = if args.strict {
        load_signals(&args.signals)?
    } else {
        load_signals_or_default(&args.signals)
    };
    let mut signals = file.signals;
    if let Some(ref batch_path) = args.batch {
        let batch = load_batch(batch_path)?;
        merge_batch(&mut signals, &batch);
    }
    info!("Signals ready - count={}", signals.len());
    Ok(signals)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    let cfg = match args.config {
        Some(ref path) => {
            debug!("Using config file - path={}", path.display());
            load_config(path)?
        }
        None => {
            debug!("No config file, using defaults");
            AppConfig::default()
        }
    };

    match args.command {
        Command::Rank { top } => {
            let rows = rank_signals(&load_inputs(&args)?, &cfg.scoring);
            print!("{}", render_table_markdown(top_n(&rows, top.unwrap_or(cfg.top_n))));
        }
        Command::Csv { top } => {
            let rows = rank_signals(&load_inputs(&args)?, &cfg.scoring);
            print!("{}", render_csv(top_n(&rows, top.unwrap_or(cfg.top_n))));
        }
        Command::Clusters { k, per_cluster } => {
            let mut cfg = cfg;
            if let Some(k) = k {
                cfg.clustering.k = k;
            }
            let dashboard = run(&load_inputs(&args)?, &cfg, &TfIdfKMeans::new(cfg.clustering));
            print!("{}", render_clusters(&dashboard.rows, &dashboard.clustering, per_cluster));
        }
        Command::Blueprint { top, ref date } => {
            let rows = rank_signals(&load_inputs(&args)?, &cfg.scoring);
            let date = date
                .clone()
                .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());
            print!("{}", render_blueprint(top_n(&rows, top), &date));
        }
        Command::Hooks { ref phrase } => {
            if phrase.trim().is_empty() {
                bail!("phrase must not be empty");
            }
            let h = hooks(phrase);
            println!("Ad: {}\nShort: {}\nLanding H1: {}", h.ad, h.short, h.h1);
        }
        Command::Expand { ref seed } => {
            for kw in expand_keywords(seed) {
                println!("- {}", kw);
            }
        }
        Command::Trend { ref values } => {
            println!(
                "label={} slope={:.3} velocity={:.3}",
                label_trend(values, cfg.scoring.flat_eps),
                simple_slope(values),
                velocity(values)
            );
        }
    }

    Ok(())
}
