//! # Descent Main Entry Point
//!
//! Runs the dungeon crawler as a line-oriented terminal game: one key name per
//! line on stdin, the rendered floor (or a JSON snapshot) on stdout.

use clap::Parser;
use descent::{
    create_rng, DescentResult, GameConfig, GameController, GameEvent, GameSnapshot, InputHandler,
    MessageLog, PlayerInput, TextRenderer,
};
use log::{info, warn};
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// How many log lines to show under the map.
const VISIBLE_MESSAGES: usize = 3;

/// Command line arguments for Descent.
#[derive(Parser, Debug)]
#[command(name = "descent")]
#[command(about = "A turn-based dungeon crawler played one keystroke per line")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Base monsters per floor (clamped to 0..=20)
    #[arg(short, long)]
    monsters: Option<i64>,

    /// Potions per floor (clamped to 0..=10)
    #[arg(short, long)]
    potions: Option<i64>,

    /// JSON file with `monster_count` and `potion_count`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON snapshots instead of the text map
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> DescentResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Descent v{}", descent::VERSION);

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);

    run_game(&args, &config, create_rng(seed))
}

/// Initializes logging based on the specified level.
fn initialize_logging(log_level: &str) -> DescentResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .target(env_logger::Target::Stderr)
            .init();
    }

    Ok(())
}

/// Merges the config file with command line overrides.
fn load_config(args: &Args) -> DescentResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if args.monsters.is_some() {
        config.monster_count = args.monsters;
    }
    if args.potions.is_some() {
        config.potion_count = args.potions;
    }

    Ok(config)
}

/// Runs the main input loop until quit or end of input.
fn run_game(args: &Args, config: &GameConfig, rng: StdRng) -> DescentResult<()> {
    let input_handler = InputHandler::new();
    let renderer = TextRenderer::new();
    let mut controller = GameController::new(rng);
    let mut log = MessageLog::new();

    log.add_events(&controller.new_game(config)?);
    present(&controller.snapshot(), &log, &renderer, args.json)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let Some(input) = input_handler.parse_key(&line) else {
            if !line.trim().is_empty() {
                warn!("Unknown key: {}", line.trim());
            }
            continue;
        };

        match input {
            PlayerInput::Quit => break,
            PlayerInput::Help => {
                print_help();
                continue;
            }
            PlayerInput::NewGame => {
                log.clear();
                log.add_events(&controller.new_game(config)?);
            }
            PlayerInput::Move(_) => {
                if let Some(action) = input_handler.input_to_action(&input) {
                    let report = controller.handle_action(action)?;
                    log.add_events(&report.events);
                    if report.events.contains(&GameEvent::PlayerDied) {
                        print_statistics(&controller);
                    }
                }
            }
        }

        present(&controller.snapshot(), &log, &renderer, args.json)?;
    }

    info!("Goodbye");
    Ok(())
}

fn present(
    snapshot: &Option<GameSnapshot>,
    log: &MessageLog,
    renderer: &TextRenderer,
    json: bool,
) -> DescentResult<()> {
    let Some(snapshot) = snapshot else {
        return Ok(());
    };

    let mut stdout = io::stdout().lock();
    if json {
        writeln!(stdout, "{}", snapshot.to_json()?)?;
    } else {
        write!(stdout, "{}", renderer.render(snapshot))?;
        for entry in log.iter().take(VISIBLE_MESSAGES) {
            writeln!(stdout, "{} {}", entry.marker(), entry.text)?;
        }
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

fn print_help() {
    println!("Move: arrows (up/down/left/right), WASD or hjkl");
    println!("Walk into a monster to attack it. Step on > to descend.");
    println!("n: new game  q: quit  ?: help");
}

fn print_statistics(controller: &GameController<StdRng>) {
    if let Some(state) = controller.state() {
        let stats = &state.statistics;
        println!(
            "Defeated {} monsters, drank {} potions, dealt {} and took {} damage.",
            stats.monsters_defeated, stats.potions_consumed, stats.damage_dealt, stats.damage_taken
        );
    }
}
