mod collection;
mod config;
mod interpret_cmd;
mod lookup_cmd;
mod output;
mod schedule_cmd;
mod tips_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use verdant_core::{
    CareScheduleEngine, Hemisphere, PlantKnowledgeBase, Season, TextCareInterpreter,
    WateringHeuristics,
};

use config::VerdantConfig;

#[derive(Parser)]
#[command(name = "verdant", about = "House plant care scheduling and care-message interpretation")]
struct Cli {
    /// Knowledge data directory (overrides VERDANT_DATA_DIR env var)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Hemisphere for season lookup: northern or southern (overrides VERDANT_HEMISPHERE env var)
    #[arg(long, global = true)]
    hemisphere: Option<Hemisphere>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a verdant config file from --data-dir and --hemisphere
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Show the care profile a species name resolves to
    Lookup {
        /// Species or common name
        name: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Derive a watering interval from a free-text description
    ParseWatering {
        /// Watering description, e.g. "Keep moist between watering"
        text: String,
        /// Plant category, used when no phrase matches
        #[arg(long, default_value = "")]
        category: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show next care dates for every plant in a collection file
    Schedule {
        /// Path to the plants TOML file
        plants_file: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List overdue care for a collection, oldest first
    Reminders {
        /// Path to the plants TOML file
        plants_file: PathBuf,
        /// Only reminders urgent enough to send (medium or higher)
        #[arg(long)]
        notifiable: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Work out which plant and care action a message reports
    Interpret {
        /// Path to the plants TOML file
        plants_file: PathBuf,
        /// The message text, e.g. "watered Spike"
        message: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show seasonal care notes (defaults to the current season)
    Tips {
        /// spring, summer, fall or winter
        #[arg(long)]
        season: Option<Season>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Execute the `verdant init` command: write config file.
fn cmd_init(
    data_dir: Option<&str>,
    hemisphere: Option<Hemisphere>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        data: config::DataSection {
            dir: data_dir.map(str::to_string),
        },
        schedule: config::ScheduleSection {
            hemisphere: hemisphere.unwrap_or_default(),
            ..config::ScheduleSection::default()
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!(
        "  data.dir = {}",
        cfg.data.dir.as_deref().unwrap_or("(bundled data)")
    );
    println!("  schedule.hemisphere = {}", cfg.schedule.hemisphere);
    println!(
        "  schedule.fertilizing_grace_days = {}",
        cfg.schedule.fertilizing_grace_days
    );
    println!("  schedule.max_care_tips = {}", cfg.schedule.max_care_tips);

    Ok(())
}

/// Knowledge base and engine built from the resolved config.
fn build_engine(resolved: &VerdantConfig) -> CareScheduleEngine {
    let knowledge = Arc::new(PlantKnowledgeBase::load(&resolved.knowledge));
    CareScheduleEngine::new(knowledge).with_config(resolved.engine.clone())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(cli.data_dir.as_deref(), cli.hemisphere, force)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "verdant",
                &mut std::io::stdout(),
            );
        }
        Commands::ParseWatering {
            text,
            category,
            json,
        } => {
            let heuristics = WateringHeuristics::bundled();
            lookup_cmd::run_parse_watering(&heuristics, &text, &category, json)?;
        }
        Commands::Lookup { name, json } => {
            let resolved = VerdantConfig::resolve(cli.data_dir.as_deref(), cli.hemisphere)?;
            let knowledge = PlantKnowledgeBase::load(&resolved.knowledge);
            lookup_cmd::run_lookup(&knowledge, &name, json)?;
        }
        Commands::Schedule { plants_file, json } => {
            let resolved = VerdantConfig::resolve(cli.data_dir.as_deref(), cli.hemisphere)?;
            let plants = collection::load_collection(&plants_file)?;
            let engine = build_engine(&resolved);
            schedule_cmd::run_schedule(&engine, &plants, json)?;
        }
        Commands::Reminders {
            plants_file,
            notifiable,
            json,
        } => {
            let resolved = VerdantConfig::resolve(cli.data_dir.as_deref(), cli.hemisphere)?;
            let plants = collection::load_collection(&plants_file)?;
            let engine = build_engine(&resolved);
            schedule_cmd::run_reminders(&engine, &plants, notifiable, json)?;
        }
        Commands::Interpret {
            plants_file,
            message,
            json,
        } => {
            let resolved = VerdantConfig::resolve(cli.data_dir.as_deref(), cli.hemisphere)?;
            let plants = collection::load_collection(&plants_file)?;
            let knowledge = Arc::new(PlantKnowledgeBase::load(&resolved.knowledge));
            let interpreter = TextCareInterpreter::new(knowledge);
            interpret_cmd::run_interpret(&interpreter, &plants, &message, json)?;
        }
        Commands::Tips { season, json } => {
            let resolved = VerdantConfig::resolve(cli.data_dir.as_deref(), cli.hemisphere)?;
            let engine = build_engine(&resolved);
            tips_cmd::run_tips(&engine, season, json)?;
        }
    }

    Ok(())
}
