//! CLI definitions and entry point

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use super::commands::{self, Context};
use fieldmatch::output::OutputMode;

/// fieldmatch - Match field agents to site visits
#[derive(Parser, Debug)]
#[command(
    name = "fieldmatch",
    version,
    about = "Match field agents to site visits",
    long_about = "Rank data collectors for a site visit, rank visits for a collector,\n\
                  find the nearest collectors and assign work without double-booking.\n\n\
                  Reads agents and tasks from a JSON snapshot file."
)]
pub struct Cli {
    /// Agent/task snapshot file [default: ./fieldmatch.json]
    #[arg(short, long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Config file (overrides FIELDMATCH_CONFIG and the default lookup)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate as of this instant (RFC 3339) instead of the current time
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank eligible agents for a task
    RankAgents {
        /// Task ID
        task_id: String,

        /// Order by composite score instead of the default criteria
        #[arg(long)]
        by_score: bool,
    },

    /// Rank assignable tasks for an agent
    RankTasks {
        /// Agent ID
        agent_id: String,
    },

    /// List the data collectors closest to a task
    Nearest {
        /// Task ID
        task_id: String,

        /// Maximum number of results [default: from config]
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// List the data collectors within a radius of a task
    Nearby {
        /// Task ID
        task_id: String,

        /// Search radius in km [default: search_radius_km from config]
        #[arg(short, long)]
        radius: Option<f64>,
    },

    /// Show an agent's workload and due reminders
    Workload {
        /// Agent ID
        agent_id: String,
    },

    /// List data collectors at or above the workload ceiling
    Overloaded,

    /// Assign a task to an agent
    Assign {
        /// Task ID
        task_id: String,

        /// Agent ID
        agent_id: String,

        /// Actor recorded as the assigner
        #[arg(long = "by", default_value = fieldmatch::core::services::coordinator::DEFAULT_ACTOR)]
        assigned_by: String,
    },

    /// Print the effective configuration
    Config,

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command else {
        if output_mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": fieldmatch::VERSION,
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("fieldmatch v{}", fieldmatch::VERSION);
            println!("\nRun 'fieldmatch --help' for usage");
        }
        return Ok(());
    };

    if matches!(command, Command::Version) {
        if output_mode == OutputMode::Json {
            println!("{}", serde_json::json!({ "version": fieldmatch::VERSION }));
        } else {
            println!("fieldmatch v{}", fieldmatch::VERSION);
        }
        return Ok(());
    }

    let ctx = Context::load(cli.snapshot, cli.config.as_deref(), cli.now, output_mode)?;

    match command {
        Command::RankAgents { task_id, by_score } => commands::rank_agents(&ctx, &task_id, by_score),
        Command::RankTasks { agent_id } => commands::rank_tasks(&ctx, &agent_id),
        Command::Nearest { task_id, limit } => commands::nearest(&ctx, &task_id, limit),
        Command::Nearby { task_id, radius } => commands::nearby(&ctx, &task_id, radius),
        Command::Workload { agent_id } => commands::workload(&ctx, &agent_id),
        Command::Overloaded => commands::overloaded(&ctx),
        Command::Assign {
            task_id,
            agent_id,
            assigned_by,
        } => commands::assign(&ctx, &task_id, &agent_id, &assigned_by),
        Command::Config => commands::show_config(&ctx),
        Command::Version => Ok(()),
    }
}
