//! Valora CLI binary.
//!
//! Provides a command-line interface for stage-weighted startup valuations.

mod cmd;
mod logging;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "valora")]
#[command(about = "Stage-weighted valuation engine for early-stage companies", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log format (pretty or json)
    #[arg(long, global = true, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show method weights for a business stage
    Weights {
        /// Business stage (all stages when omitted)
        stage: Option<String>,
    },

    /// Show the typical VC target return for a business stage
    Roi {
        /// Business stage (all stages when omitted)
        stage: Option<String>,
    },

    /// List the valuation methods
    Methods {
        /// Show descriptions
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run a full-projection DCF from a JSON request file
    Dcf {
        /// Path to the request file
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scorecard valuation
    Scorecard {
        /// Average pre-money valuation of comparable companies
        #[arg(long)]
        average: f64,

        /// Strength of the team (1.0 = average)
        #[arg(long, default_value = "1.0")]
        team: f64,

        /// Size of the opportunity
        #[arg(long, default_value = "1.0")]
        opportunity: f64,

        /// Product, service and IP
        #[arg(long, default_value = "1.0")]
        product: f64,

        /// Competitive environment
        #[arg(long, default_value = "1.0")]
        competition: f64,

        /// Strategic relationships
        #[arg(long, default_value = "1.0")]
        relationships: f64,

        /// Funding requirement
        #[arg(long, default_value = "1.0")]
        funding: f64,
    },

    /// Checklist valuation
    Checklist {
        /// Maximum valuation for a company at this stage
        #[arg(long)]
        max_valuation: f64,

        /// Idea quality score (0 to 100)
        #[arg(long, default_value = "0")]
        idea: f64,

        /// Product roll-out and IP score (0 to 100)
        #[arg(long, default_value = "0")]
        product: f64,

        /// Core team score (0 to 100)
        #[arg(long, default_value = "0")]
        team: f64,

        /// Operating stage score (0 to 100)
        #[arg(long, default_value = "0")]
        operating: f64,

        /// Strategic relationships score (0 to 100)
        #[arg(long, default_value = "0")]
        relationships: f64,
    },

    /// Venture capital method valuation
    Vc {
        /// EBITDA in the exit year
        #[arg(long)]
        ebitda: f64,

        /// Exit EBITDA multiple
        #[arg(long)]
        multiple: f64,

        /// Target annual return (defaults to the typical return for --stage)
        #[arg(long)]
        roi: Option<f64>,

        /// Business stage used to look up the target return
        #[arg(long)]
        stage: Option<String>,

        /// Years until exit
        #[arg(long, default_value = "5")]
        years: i32,

        /// Capital raised in the current round
        #[arg(long, default_value = "0.0")]
        capital_raised: f64,
    },

    /// Blend method valuations with stage weights
    Aggregate {
        /// Business stage
        #[arg(short, long)]
        stage: String,

        /// Method results as NAME=VALUE
        #[arg(required = true, value_parser = cmd::aggregate::parse_result)]
        results: Vec<(String, f64)>,

        /// Currency label for the breakdown
        #[arg(long, default_value = "EUR")]
        currency: String,
    },

    /// List the tools offered to the model
    Tools {
        /// Print the JSON schemas
        #[arg(short, long)]
        verbose: bool,
    },

    /// Call a tool with JSON arguments
    Call {
        /// Tool name
        name: String,

        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },

    /// Ask the model for a five-year forecast of a document
    Forecast {
        /// JSON file of documents keyed by id
        #[arg(short, long)]
        documents: PathBuf,

        /// Document id
        id: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the model value a company using the tools
    Value {
        /// JSON file of documents keyed by id
        #[arg(short, long)]
        documents: PathBuf,

        /// Document id
        id: String,

        /// Override the tool-calling turn limit
        #[arg(long)]
        max_turns: Option<usize>,

        /// Show each tool call
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Weights { stage } => {
            cmd::stage::show_weights(stage.as_deref())?;
        }
        Commands::Roi { stage } => {
            cmd::stage::show_roi(stage.as_deref())?;
        }
        Commands::Methods { verbose } => {
            cmd::methods::list_methods(verbose);
        }
        Commands::Dcf { file, json } => {
            cmd::dcf::run_dcf(&file, json)?;
        }
        Commands::Scorecard {
            average,
            team,
            opportunity,
            product,
            competition,
            relationships,
            funding,
        } => {
            let scores = valora_methods::ScorecardScores {
                strength_of_team_score: team,
                size_of_opportunity_score: opportunity,
                product_service_ip_score: product,
                competitive_environment_score: competition,
                strategic_relationships_score: relationships,
                funding_requirement_score: funding,
            };
            cmd::methods::run_scorecard(average, scores)?;
        }
        Commands::Checklist {
            max_valuation,
            idea,
            product,
            team,
            operating,
            relationships,
        } => {
            let checklist = cmd::methods::checklist(
                max_valuation,
                [idea, product, team, operating, relationships],
            );
            cmd::methods::run_checklist(&checklist)?;
        }
        Commands::Vc {
            ebitda,
            multiple,
            roi,
            stage,
            years,
            capital_raised,
        } => {
            cmd::methods::run_vc(ebitda, multiple, roi, stage.as_deref(), years, capital_raised)?;
        }
        Commands::Aggregate {
            stage,
            results,
            currency,
        } => {
            cmd::aggregate::run_aggregate(&stage, &results, currency)?;
        }
        Commands::Tools { verbose } => {
            cmd::tools::list_tools(verbose)?;
        }
        Commands::Call { name, args } => {
            cmd::tools::call_tool(&name, &args)?;
        }
        Commands::Forecast {
            documents,
            id,
            json,
        } => {
            cmd::llm::run_forecast(&documents, &id, json).await?;
        }
        Commands::Value {
            documents,
            id,
            max_turns,
            verbose,
        } => {
            cmd::llm::run_session(&documents, &id, max_turns, verbose).await?;
        }
    }

    Ok(())
}
