//! Sokoban - command-line driver
//!
//! Plays move strings against a level, inspects and imports level files, and
//! manages checkpoints and the ranking.

use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use sokoban_rs::{
    config::StorageConfig,
    core::{Biome, Difficulty},
    game::{parse_moves, EventLogger, OutputFormat, Session, VerbosityLevel},
    level::{decode, import_legacy, LevelFile, LevelLibrary},
    store::Storage,
    Result,
};
use std::path::PathBuf;

/// Output format for the play command
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "sokoban")]
#[command(about = "Sokoban - block-pushing puzzle", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a move string against a level, resuming its checkpoint
    Play {
        /// Level file (.xml)
        #[arg(value_name = "LEVEL")]
        level: PathBuf,

        /// Moves as u/d/l/r letters, e.g. "rrdLu"
        #[arg(long, short = 'm', default_value = "")]
        moves: String,

        /// Ignore (and discard) any checkpoint for this level
        #[arg(long)]
        fresh: bool,

        /// Directory holding checkpoints and the ranking
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, short = 'v', default_value = "normal")]
        verbosity: VerbosityLevel,

        /// Log output format
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,
    },

    /// Print a level
    Show {
        /// Level file (.xml)
        #[arg(value_name = "LEVEL")]
        level: PathBuf,

        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a level from an XML level collection into a level file
    Import {
        /// Collection document
        #[arg(value_name = "COLLECTION")]
        collection: PathBuf,

        /// Id of the level inside the collection
        #[arg(long)]
        id: String,

        #[arg(long, default_value = "grass")]
        biome: Biome,

        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,

        /// Where to write the level file
        #[arg(long, short = 'o')]
        output: PathBuf,
    },

    /// Show the ranking of a level
    Ranking {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// List the levels of a directory, or pick one at random
    Levels {
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Pick a random level of this difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Seed for the random pick
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Delete the checkpoint of a level
    Reset {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            level,
            moves,
            fresh,
            data_dir,
            verbosity,
            format,
        } => run_play(level, &moves, fresh, data_dir, verbosity, format.into())?,
        Commands::Show { level, json } => run_show(level, json)?,
        Commands::Import {
            collection,
            id,
            biome,
            difficulty,
            output,
        } => run_import(collection, &id, biome, difficulty, output).await?,
        Commands::Ranking { name, data_dir } => run_ranking(&name, data_dir)?,
        Commands::Levels {
            dir,
            difficulty,
            seed,
        } => run_levels(dir, difficulty, seed).await?,
        Commands::Reset { name, data_dir } => {
            let storage = Storage::open(StorageConfig::new(data_dir));
            storage.progress().clear(&name)?;
            println!("Checkpoint of '{name}' cleared");
        }
    }

    Ok(())
}

fn run_play(
    level: PathBuf,
    moves: &str,
    fresh: bool,
    data_dir: PathBuf,
    verbosity: VerbosityLevel,
    format: OutputFormat,
) -> Result<()> {
    let directions = parse_moves(moves)?;
    let grid = LevelFile::load(&level)?;
    let storage = Storage::open(StorageConfig::new(data_dir));

    let mut logger = EventLogger::with_verbosity(verbosity);
    logger.set_output_format(format);

    let mut session = if fresh {
        storage.progress().clear(grid.name())?;
        Session::new(grid)
    } else {
        Session::resume(grid, storage.progress())?
    }
    .with_logger(logger);

    session.logger().normal(&format!(
        "Playing '{}' ({}, {}) from move {}",
        session.grid().name(),
        session.grid().difficulty(),
        session.grid().biome(),
        session.moves_taken()
    ));

    for direction in directions {
        if session.is_solved() {
            break;
        }
        session.step(direction, &storage)?;
    }

    // A level that loads solved was never played, so it has no score
    let played_solve = session.is_solved() && session.moves_taken() > 0;

    match format {
        OutputFormat::Text => {
            println!("{}", session.grid());
            if session.is_solved() && !played_solve {
                println!("Already solved, nothing to play");
            } else if played_solve {
                println!(
                    "Solved in {} moves, {} points",
                    session.moves_taken(),
                    session.score()
                );
            } else {
                println!("Unsolved after {} moves", session.moves_taken());
            }
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "level": session.grid().name(),
                "moves": session.moves_taken(),
                "solved": session.is_solved(),
                "points": played_solve.then(|| session.score()),
                "rows": session.grid().to_string().lines().collect::<Vec<_>>(),
            });
            println!("{summary}");
        }
    }

    Ok(())
}

fn run_show(level: PathBuf, json: bool) -> Result<()> {
    let grid = LevelFile::load(&level)?;
    if json {
        let text = serde_json::to_string_pretty(&grid)?;
        println!("{text}");
    } else {
        println!(
            "{} ({}x{}, {}, {})",
            grid.name(),
            grid.width(),
            grid.height(),
            grid.difficulty(),
            grid.biome()
        );
        println!("{grid}");
    }
    Ok(())
}

async fn run_import(
    collection: PathBuf,
    id: &str,
    biome: Biome,
    difficulty: Difficulty,
    output: PathBuf,
) -> Result<()> {
    let text = tokio::fs::read_to_string(&collection).await?;
    let native = import_legacy(&text, id, biome, difficulty)?;
    // Refuse to write a level that cannot be played
    let grid = decode(&native)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&output, native).await?;
    println!(
        "Imported level '{}' ({}x{}) to {}",
        grid.name(),
        grid.width(),
        grid.height(),
        output.display()
    );
    Ok(())
}

fn run_ranking(name: &str, data_dir: PathBuf) -> Result<()> {
    let storage = Storage::open(StorageConfig::new(data_dir));
    let records = storage.leaderboard().get_records(name)?;
    if records.is_empty() {
        println!("No records for '{name}'");
        return Ok(());
    }

    println!("Ranking of '{name}':");
    for (rank, record) in records.iter().enumerate() {
        println!(
            "{:>3}. {:>6} points  {:>4} moves  at {}",
            rank + 1,
            record.points,
            record.moves_taken,
            record.timestamp
        );
    }
    Ok(())
}

async fn run_levels(dir: PathBuf, difficulty: Option<Difficulty>, seed: Option<u64>) -> Result<()> {
    let library = LevelLibrary::scan(&dir).await?;

    let Some(difficulty) = difficulty else {
        println!(
            "{} levels in {} (scanned in {:?})",
            library.len(),
            dir.display(),
            library.scan_time()
        );
        for difficulty in Difficulty::ALL {
            for entry in library.pool(difficulty) {
                println!("  [{difficulty}] {} ({})", entry.name(), entry.path.display());
            }
        }
        return Ok(());
    };

    let mut rng = match seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::from_entropy(),
    };
    match library.random(difficulty, &mut rng) {
        Some(entry) => println!("{} ({})", entry.name(), entry.path.display()),
        None => println!("No {difficulty} levels in {}", dir.display()),
    }
    Ok(())
}
