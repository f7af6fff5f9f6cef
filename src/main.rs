use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use climatch::{build_matcher, build_recommender, ClimatchConfig, RecommendRequest};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "climatch",
    version,
    about = "Match climate-scenario data requests to providers and rank coverage"
)]
struct Cli {
    /// YAML config file; defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank catalog providers against a free-text request
    Match {
        /// Provider catalog JSON; overrides `catalog.path`
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print only the parsed query
        #[arg(long)]
        parse_only: bool,
        /// Request text, e.g. "ssp2 gdp|ppp india 2020 2050 annual"
        query: Vec<String>,
    },
    /// Rank (provider, model) pairs by stored coverage
    Rank {
        /// Observations JSON; overrides `coverage.observations_path`
        #[arg(long)]
        observations: Option<PathBuf>,
        #[arg(long)]
        sector: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        start: Option<i32>,
        #[arg(long)]
        end: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ClimatchConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ClimatchConfig::default(),
    };

    let output = match cli.command {
        Command::Match {
            catalog,
            parse_only,
            query,
        } => {
            let text = query.join(" ");
            if parse_only {
                serde_json::to_string_pretty(&climatch::parse_query(&text))?
            } else {
                let matcher = build_matcher(&config, catalog.as_deref())?;
                let result = tokio::task::spawn_blocking(move || matcher.match_query(&text))
                    .await
                    .context("match task panicked")?;
                serde_json::to_string_pretty(&result)?
            }
        }
        Command::Rank {
            observations,
            sector,
            region,
            start,
            end,
        } => {
            let service = build_recommender(&config, observations.as_deref())?;
            let request = RecommendRequest {
                sector,
                region,
                start_year: start,
                end_year: end,
                variables: Vec::new(),
            };
            serde_json::to_string_pretty(&service.recommend(&request).await?)?
        }
    };

    println!("{output}");
    Ok(())
}
