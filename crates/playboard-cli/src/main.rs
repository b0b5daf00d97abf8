//! Playboard command line
//!
//! Lists and exports saved plays without opening the board.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use playboard_editor::{ConfigManager, PlayStore};

#[derive(Parser, Debug)]
#[command(name = "playboard")]
#[command(version, about = "Inspect saved basketball plays", long_about = None)]
struct Cli {
    /// Plays file to use instead of the configured one
    #[arg(long, global = true)]
    plays: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List saved plays
    List,

    /// Write one saved play as JSON
    Export {
        /// Name of the play
        name: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show configuration file locations and values
    Config {
        /// Write the default configuration to disk
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut manager = ConfigManager::new();
    let plays_path = cli
        .plays
        .clone()
        .unwrap_or_else(|| manager.config().plays_path());
    let store = playboard_editor::JsonFileStore::new(&plays_path);

    match cli.command {
        Commands::List => {
            let plays = store.load_all();
            if plays.is_empty() {
                println!("No saved plays in {}", plays_path.display());
                return Ok(());
            }
            for play in plays {
                let diagram = &play.diagram;
                println!(
                    "{:<24} {:>2} players {:>2} arrows  updated {}",
                    play.name,
                    diagram.players().len(),
                    diagram.connectors().len(),
                    play.updated_at.format("%Y-%m-%d %H:%M"),
                );
            }
        }
        Commands::Export { name, output } => {
            let Some(play) = store.find(&name) else {
                bail!("no saved play named \"{}\" in {}", name.trim(), plays_path.display());
            };
            let json = serde_json::to_string_pretty(&play).context("failed to serialize play")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!("Exported \"{}\" to {:?}", play.name, path);
                }
                None => println!("{json}"),
            }
        }
        Commands::Config { reset } => {
            if reset {
                manager.reset_to_defaults();
                manager.save().context("failed to save configuration")?;
            }
            let config = manager.config();
            println!("config file: {}", manager.config_file_path().display());
            println!("plays file:  {}", plays_path.display());
            println!("min draw distance:        {}", config.min_draw_distance);
            println!("handle radius:            {}", config.handle_radius);
            println!("player pick radius:       {}", config.player_pick_radius);
            println!("connector pick tolerance: {}", config.connector_pick_tolerance);
            println!("max history:              {}", config.max_history);
            println!(
                "default court:            {} x {}",
                config.default_court.width, config.default_court.height
            );
        }
    }

    Ok(())
}
