//! ArcadeTUI - a retro arcade cabinet for your terminal

mod tui;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use arcade_core::config::ArcadeConfig;
use arcade_core::paths::{resolve_data_dir, DataPaths};
use arcade_core::scores::JsonScoreStore;
use arcade_core::themes::{builtin, ThemeManager};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui::utils::pad_right;
use tui::{
    registry, run_theme_demo, App, Cartridge, CrosstermInput, Palette, PlayContext, TerminalGuard,
    DEMO_INTERVAL,
};

/// Environment variable holding the log filter
const LOG_ENV: &str = "ARCADE_LOG";

#[derive(Parser, Debug)]
#[command(name = "arcade", version)]
#[command(about = "A retro arcade cabinet for your terminal")]
struct Cli {
    /// Where scores, themes, config and the log live
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Fixed RNG seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Activate (and remember) this theme before starting
    #[arg(long, global = true)]
    theme: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one game directly, skipping the menu
    Play { game: String },
    /// Print high scores, or reset them
    Scores {
        /// Limit to one game
        game: Option<String>,
        #[arg(long)]
        reset: bool,
    },
    /// Manage color themes
    Themes {
        #[command(subcommand)]
        action: ThemeCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    /// List built-in and custom themes
    List,
    /// Make a theme the active one
    Set { name: String },
    /// Download a JSON or YAML theme
    Add { url: String },
    /// Delete a custom theme
    Remove { name: String },
    /// Cycle through every theme
    Demo,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = DataPaths::new(resolve_data_dir(cli.data_dir.as_deref()));
    init_logging(&paths)?;

    let config = ArcadeConfig::load(&paths.config_file())?;
    let seed = cli.seed.or(config.seed);
    let mut themes = ThemeManager::load(paths.themes_dir());
    if let Some(name) = &cli.theme {
        themes.set_current_by_name(name)?;
    }
    let scores = JsonScoreStore::new(paths.scores_dir());
    let cartridges = registry();
    info!(data_dir = ?paths.root(), ?seed, "Starting arcade");

    match cli.command {
        None => {
            let mut guard = TerminalGuard::enter()?;
            let mut app = App::new(cartridges, themes, scores, config.game, seed);
            app.run(guard.terminal(), &mut CrosstermInput)
        }
        Some(Commands::Play { game }) => {
            let Some(cartridge) = tui::cartridges::find(&cartridges, &game) else {
                bail!("unknown game '{game}' (try: {})", game_ids(&cartridges));
            };
            let palette = Palette::from_theme(themes.current());
            let outcome = {
                let mut guard = TerminalGuard::enter()?;
                let mut input = CrosstermInput;
                let mut ctx = PlayContext {
                    screen: guard.terminal(),
                    input: &mut input,
                    scores: &scores,
                    palette: &palette,
                    config: &config.game,
                    seed,
                };
                cartridge.play(&mut ctx)?
            };
            println!(
                "{}: score {}, level {}",
                cartridge.name(),
                outcome.summary.score,
                outcome.summary.level
            );
            if let Some(name) = &outcome.player_name {
                println!("Saved as {name}");
            }
            if outcome.high_score {
                println!("NEW HIGH SCORE!");
            }
            Ok(())
        }
        Some(Commands::Scores { game, reset }) => {
            let selected: Vec<&dyn Cartridge> = match &game {
                Some(key) => match tui::cartridges::find(&cartridges, key) {
                    Some(c) => vec![c],
                    None => bail!("unknown game '{key}' (try: {})", game_ids(&cartridges)),
                },
                None => cartridges.iter().map(|c| &**c).collect(),
            };
            for cartridge in selected {
                if reset {
                    cartridge.reset_high_scores(&scores)?;
                    println!("Reset {} high scores", cartridge.name());
                    continue;
                }
                println!("{}:", cartridge.name());
                let entries = cartridge.high_scores(&scores);
                if entries.is_empty() {
                    println!("  No scores yet");
                }
                for (rank, entry) in entries.iter().enumerate() {
                    println!(
                        "  {:>2}. {} {:>8}  L{:<3} {}",
                        rank + 1,
                        pad_right(&entry.player_name, 10),
                        entry.score,
                        entry.level,
                        entry.date
                    );
                }
            }
            Ok(())
        }
        Some(Commands::Themes { action }) => run_themes(action, themes, &config).await,
    }
}

async fn run_themes(
    action: ThemeCommand,
    mut themes: ThemeManager,
    config: &ArcadeConfig,
) -> Result<()> {
    match action {
        ThemeCommand::List => {
            let current = themes.current().name.clone();
            for theme in themes.all_themes() {
                let marker = if theme.name == current { "*" } else { " " };
                let kind = if builtin::is_builtin(&theme.name) {
                    "built-in"
                } else {
                    "custom"
                };
                println!(
                    "{marker} {} {:<9} {}",
                    pad_right(&theme.name, 16),
                    kind,
                    theme.description
                );
            }
        }
        ThemeCommand::Set { name } => {
            let theme = themes.set_current_by_name(&name)?;
            println!("Theme changed to: {}", theme.name);
        }
        ThemeCommand::Add { url } => {
            let client = reqwest::Client::builder()
                .build()
                .context("building HTTP client")?;
            let theme = themes.add_theme_from_url(&client, &url).await?;
            println!("Added theme: {} - {}", theme.name, theme.description);
        }
        ThemeCommand::Remove { name } => {
            if builtin::is_builtin(&name) {
                bail!("'{name}' is a built-in theme and cannot be removed");
            }
            if themes.delete_custom_theme(&name)? {
                println!("Removed theme: {name}");
            } else {
                println!("No custom theme named {name}");
            }
        }
        ThemeCommand::Demo => {
            let all = themes.all_themes();
            {
                let mut guard = TerminalGuard::enter()?;
                run_theme_demo(
                    guard.terminal(),
                    &mut CrosstermInput,
                    &all,
                    DEMO_INTERVAL,
                    config.game.input_poll(),
                )?;
            }
            println!("Theme cycling complete!");
        }
    }
    Ok(())
}

fn game_ids(cartridges: &[Box<dyn Cartridge>]) -> String {
    cartridges
        .iter()
        .map(|c| c.id())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Log to `<data_dir>/arcade.log`; the terminal belongs to the UI
fn init_logging(paths: &DataPaths) -> Result<()> {
    std::fs::create_dir_all(paths.root())
        .with_context(|| format!("creating data directory {:?}", paths.root()))?;
    let log_path = paths.log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {:?}", log_path))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
