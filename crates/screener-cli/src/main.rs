//! screener: rank companies by a weighted financial and extra-financial score.
//!
//! Usage:
//!   cargo run -p screener-cli -- rank --top 10
//!   cargo run -p screener-cli -- --w-extra 0 rank --format json
//!   cargo run -p screener-cli -- profile "Alpha Industries"
//!   cargo run -p screener-cli -- export --out out/

mod config;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::ScreenerConfig;
use ratio_engine::{latest_period, RatioEngine};
use scoring_engine::ScoringEngine;
use screener_core::{ExtraFinancialRecord, FinancialRecord, RatioRecord, ScoreCategory, ScoreRecord};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "screener", version, about = "Multi-criteria company screener")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Financial facts CSV (default: $SCREENER_FINANCIALS_PATH or data/donnees_financieres.csv)
    #[arg(long, global = true)]
    financials: Option<PathBuf>,

    /// Extra-financial CSV (default: $SCREENER_EXTRA_PATH or data/donnees_extra_financieres.csv)
    #[arg(long, global = true)]
    extra: Option<PathBuf>,

    #[arg(long, global = true)]
    w_profitability: Option<f64>,
    #[arg(long, global = true)]
    w_growth: Option<f64>,
    #[arg(long, global = true)]
    w_solidity: Option<f64>,
    #[arg(long, global = true)]
    w_liquidity: Option<f64>,
    #[arg(long, global = true)]
    w_cashflow: Option<f64>,
    #[arg(long, global = true)]
    w_extra: Option<f64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the ranked score table
    Rank {
        /// Only show the first N companies
        #[arg(long)]
        top: Option<usize>,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Show one company's profile, income and ratio history
    Profile {
        company: String,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Write the ranking and both input tables as CSV
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    fn config(&self) -> Result<ScreenerConfig> {
        let mut config = ScreenerConfig::from_env()?;
        if let Some(path) = &self.financials {
            config.financials_path = path.clone();
        }
        if let Some(path) = &self.extra {
            config.extra_path = path.clone();
        }
        config.override_weight(ScoreCategory::Profitability, self.w_profitability);
        config.override_weight(ScoreCategory::Growth, self.w_growth);
        config.override_weight(ScoreCategory::Solidity, self.w_solidity);
        config.override_weight(ScoreCategory::Liquidity, self.w_liquidity);
        config.override_weight(ScoreCategory::Cashflow, self.w_cashflow);
        config.override_weight(ScoreCategory::ExtraFinancial, self.w_extra);
        config.validate()?;
        Ok(config)
    }
}

/// Everything computed from one data snapshot and weight vector.
struct Universe {
    financials: Vec<FinancialRecord>,
    extra: Vec<ExtraFinancialRecord>,
    ratios: Vec<RatioRecord>,
    scores: Vec<ScoreRecord>,
}

impl Universe {
    fn build(config: &ScreenerConfig) -> Result<Self> {
        let financials = screener_data::load_financials_path(&config.financials_path)
            .with_context(|| format!("loading {}", config.financials_path.display()))?;
        let extra = screener_data::load_extra_financials_path(&config.extra_path)
            .with_context(|| format!("loading {}", config.extra_path.display()))?;

        let ratios = RatioEngine::new().compute(&financials)?;
        let latest = latest_period(&ratios)?;
        let scores = ScoringEngine::with_weights(config.weights).score(&latest, &extra)?;

        tracing::info!(
            "Scored {} companies from {} yearly records",
            scores.len(),
            financials.len()
        );

        Ok(Self {
            financials,
            extra,
            ratios,
            scores,
        })
    }
}

#[derive(Serialize)]
struct ProfileReport {
    profile: screener_data::CompanyProfile,
    income: Vec<screener_data::IncomePoint>,
    ratios: Vec<screener_data::RatioPoint>,
}

fn init_tracing() {
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    // logs go to stderr so table/json output on stdout stays clean
    if json_logging {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run_rank(universe: &Universe, top: Option<usize>, format: OutputFormat) -> Result<()> {
    let rows = match top {
        Some(n) => screener_data::top_n(&universe.scores, n),
        None => &universe.scores[..],
    };
    match format {
        OutputFormat::Table => println!("{}", report::score_table(rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
    }
    Ok(())
}

fn run_profile(universe: &Universe, company: &str, format: OutputFormat) -> Result<()> {
    let profile =
        screener_data::company_profile(company, &universe.scores, &universe.ratios, &universe.extra)
            .with_context(|| {
                format!(
                    "known companies: {}",
                    screener_data::companies(&universe.scores).join(", ")
                )
            })?;
    let income = screener_data::income_series(company, &universe.ratios)?;
    let ratios = screener_data::ratio_series(company, &universe.ratios)?;

    match format {
        OutputFormat::Table => {
            println!("{}\n", report::profile_card(&profile));
            println!("{}\n", report::income_table(&income));
            println!("{}", report::ratio_table(&ratios));
        }
        OutputFormat::Json => {
            let report = ProfileReport {
                profile,
                income,
                ratios,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn run_export(universe: &Universe, out: &Path) -> Result<()> {
    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;

    let create = |name: &str| -> Result<File> {
        let path = out.join(name);
        File::create(&path).with_context(|| format!("creating {}", path.display()))
    };

    screener_data::write_scores(create("classement_scores.csv")?, &universe.scores)?;
    screener_data::write_financials(create("donnees_financieres.csv")?, &universe.financials)?;
    screener_data::write_extra_financials(
        create("donnees_extra_financieres.csv")?,
        &universe.extra,
    )?;

    tracing::info!("Exported ranking and inputs to {}", out.display());
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = cli.config()?;
    tracing::debug!("Using config {:?}", config);

    let universe = Universe::build(&config)?;

    match &cli.command {
        Command::Rank { top, format } => run_rank(&universe, *top, *format),
        Command::Profile { company, format } => run_profile(&universe, company, *format),
        Command::Export { out } => run_export(&universe, out),
    }
}
