//! Thin CLI wrapper around the library's orchestrator (§1 AMBIENT, §6):
//! create a game from a variant's starting position, process its current
//! pending phase, or inspect/remove a game directory.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use septarchy::game::{self, GameMeta, GamesRoot};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Structural(#[from] game::StructuralError),
    #[error(transparent)]
    Core(#[from] game::CoreError),
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve turns for septarchy games")]
struct Cli {
    /// Root directory holding one subdirectory per game.
    #[arg(long, env = "SEPTARCHY_GAMES_ROOT", default_value = "games")]
    games_root: PathBuf,

    /// Root directory holding one subdirectory per variant.
    #[arg(long, env = "SEPTARCHY_VARIANTS_ROOT", default_value = "variants")]
    variants_root: PathBuf,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new game from a variant's starting position.
    New { game_id: String, variant: String },
    /// Resolve the game's current pending phase and advance its turn code.
    Process { game_id: String },
    /// List every game id under the games root.
    List,
    /// Delete a game directory entirely.
    Delete { game_id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level.parse().unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let games_root = GamesRoot::new(cli.games_root.clone());
    match &cli.command {
        Command::New { game_id, variant } => cmd_new(&games_root, &cli.variants_root, game_id, variant),
        Command::Process { game_id } => cmd_process(&games_root, &cli.variants_root, game_id),
        Command::List => cmd_list(&games_root),
        Command::Delete { game_id } => cmd_delete(&games_root, game_id),
    }
}

fn cmd_new(
    games_root: &GamesRoot,
    variants_root: &Path,
    game_id: &str,
    variant: &str,
) -> Result<(), CliError> {
    let game_dir = games_root.game_dir(game_id);
    if game_dir.is_dir() {
        return Err(game::StructuralError::GameExists(game_dir).into());
    }
    let variant_root = variants_root.join(variant);
    let state = game::variant::load_initial_state(&variant_root, game_id, variant)?;
    state.save(games_root, game_id)?;
    log::info!("created game `{game_id}` on variant `{variant}`");
    Ok(())
}

fn cmd_process(games_root: &GamesRoot, variants_root: &Path, game_id: &str) -> Result<(), CliError> {
    let meta: GameMeta = game::io::load_json(&games_root.game_meta_path(game_id))?;
    let variant_root = variants_root.join(&meta.variant);
    let rules = game::variant::load_rules(&variant_root)?;
    let state = game::process_turn(games_root, &rules, game_id)?;
    log::info!("game `{game_id}` now at turn {}", state.meta.turn_code);
    Ok(())
}

fn cmd_list(games_root: &GamesRoot) -> Result<(), CliError> {
    let mut ids = games_root.list_game_ids()?;
    ids.sort();
    for id in ids {
        println!("{id}");
    }
    Ok(())
}

fn cmd_delete(games_root: &GamesRoot, game_id: &str) -> Result<(), CliError> {
    games_root.delete_game(game_id)?;
    log::info!("deleted game `{game_id}`");
    Ok(())
}
