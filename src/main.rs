use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::*;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use connect_toot_ai::*;

mod render;
use render::*;

/// Play Connect 4 or TOOT-OTTO against a friend or the computer
#[derive(Parser)]
#[command(name = "connect_toot", about = "Connect 4 and TOOT-OTTO with a minimax opponent")]
struct Cli {
    /// Game to play: connect4 or toot-otto
    #[arg(long, default_value = "connect4")]
    variant: Variant,

    /// Computer strength: easy, medium or hard (overrides --depth)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Override the search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Seed the computer's tie-breaks for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_toot.toml")]
    config: PathBuf,

    /// Append finished games to this NDJSON file
    #[arg(long)]
    records: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Which side the computer plays: one, two or none
        #[arg(long, default_value = "two")]
        computer: Seat,
    },
    /// Play computer-vs-computer games in parallel and report the results
    Arena {
        #[arg(long, default_value_t = 100)]
        games: usize,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Seat {
    One,
    Two,
    Nobody,
}

impl Seat {
    fn player(self) -> Option<Player> {
        match self {
            Seat::One => Some(Player::One),
            Seat::Two => Some(Player::Two),
            Seat::Nobody => None,
        }
    }

    fn plays(self, player: Player) -> bool {
        self.player() == Some(player)
    }
}

impl FromStr for Seat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one" | "1" => Ok(Seat::One),
            "two" | "2" => Ok(Seat::Two),
            "none" | "nobody" => Ok(Seat::Nobody),
            other => Err(format!("unknown seat '{}' (expected one, two or none)", other)),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    config.merge(Overrides {
        depth: cli.depth,
        difficulty: cli.difficulty,
        seed: cli.seed,
        record_path: cli.records.clone(),
    });
    config.validate()?;

    let mut records = match &config.record_path {
        Some(path) => Some(
            NdjsonRecordStore::open_append(path)
                .with_context(|| format!("opening record file {}", path.display()))?,
        ),
        None => None,
    };

    match cli.command.unwrap_or(Command::Play {
        computer: Seat::Two,
    }) {
        Command::Play { computer } => play(cli.variant, computer, &config, records.as_mut()),
        Command::Arena { games } => arena(cli.variant, games, &config, records.as_mut()),
    }
}

fn engine(config: &AppConfig, offset: u64) -> SearchEngine {
    match config.seed {
        Some(seed) => SearchEngine::seeded(config.search_config(), seed.wrapping_add(offset)),
        None => SearchEngine::new(config.search_config()),
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    stdout().flush()?;
    let mut buffer = String::new();
    stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

/// Parses "4" for Connect 4 or "4T" / "T4" for TOOT-OTTO into a zero-indexed column and marker
fn parse_move(input: &str, variant: Variant) -> Result<(usize, Marker)> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let column_one_indexed = digits
        .parse::<usize>()
        .map_err(|_| anyhow!("Invalid number: {}", input))?;
    if column_one_indexed < 1 || column_one_indexed > WIDTH {
        return Err(anyhow!(
            "Invalid move, column {} out of range. Columns must be between 1 and {}",
            column_one_indexed,
            WIDTH
        ));
    }

    let marker = match variant {
        Variant::Connect4 => Marker::Disc,
        Variant::TootOtto => {
            let letter = input
                .chars()
                .find_map(Letter::from_char)
                .ok_or_else(|| {
                    anyhow!(
                        "Choose a letter, e.g. {}T or {}O",
                        column_one_indexed,
                        column_one_indexed
                    )
                })?;
            Marker::Letter(letter)
        }
    };
    Ok((column_one_indexed - 1, marker))
}

fn play(
    variant: Variant,
    computer: Seat,
    config: &AppConfig,
    records: Option<&mut NdjsonRecordStore>,
) -> Result<()> {
    let (one, two) = config.player_names(computer.player());
    let mut game = Game::new(variant, one, two);
    let mut engine = engine(config, 0);

    println!("Welcome to {}\n", variant);
    if variant == Variant::TootOtto {
        println!(
            "{} spells TOOT, {} spells OTTO. Either side may play either letter.\n",
            game.player_name(Player::One),
            game.player_name(Player::Two)
        );
    }

    // game loop
    loop {
        display(game.board(), game.last_placement())?;

        match game.outcome() {
            Outcome::InProgress => {
                let player = game.turn();
                if computer.plays(player) {
                    println!("{} is thinking...", game.player_name(player));
                    let report = game.play_computer(&mut engine)?;
                    match report.placement.marker {
                        Marker::Letter(letter) => println!(
                            "{} plays {} in column {}",
                            game.player_name(player),
                            letter.as_char(),
                            report.placement.column + 1
                        ),
                        Marker::Disc => println!(
                            "{} plays column {}",
                            game.player_name(player),
                            report.placement.column + 1
                        ),
                    }
                    continue;
                }

                let input = prompt(&format!("{} > ", game.player_name(player)))?;
                let (column, marker) = match parse_move(&input, variant) {
                    Ok(parsed) => parsed,
                    Err(err) => {
                        println!("{}", err);
                        continue;
                    }
                };
                if let Err(err) = game.play(column, marker) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            Outcome::PlayerOneWins | Outcome::PlayerTwoWins => {
                let winner = game.outcome().winner().unwrap_or(Player::One);
                println!("{} wins!", game.player_name(winner));
                break;
            }
            Outcome::Draw => {
                println!("It's a draw!");
                break;
            }
        }
    }

    if let Some(records) = records {
        game.finish(records);
    }
    Ok(())
}

fn arena(
    variant: Variant,
    games: usize,
    config: &AppConfig,
    records: Option<&mut NdjsonRecordStore>,
) -> Result<()> {
    let start = Instant::now();
    // a fixed base seed keeps a seeded run reproducible however rayon schedules the games
    let base_seed = config.seed.unwrap_or_else(rand::random);

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let results: Vec<Result<(Outcome, Option<GameRecord>, usize)>> = (0..games)
        .into_par_iter()
        .map(|i| {
            let seeded = AppConfig {
                seed: Some(base_seed),
                ..config.clone()
            };
            let mut first = engine(&seeded, 2 * i as u64);
            let mut second = engine(&seeded, 2 * i as u64 + 1);
            let mut game = Game::new(variant, "Computer 1", "Computer 2");

            while !game.outcome().is_terminal() {
                match game.turn() {
                    Player::One => game.play_computer(&mut first)?,
                    Player::Two => game.play_computer(&mut second)?,
                };
            }
            progress.inc(1);
            Ok((
                game.outcome(),
                game.record(connect_toot_ai::record::now_ms()),
                first.node_count + second.node_count,
            ))
        })
        .collect();
    progress.finish();

    let (mut one, mut two, mut draws, mut nodes) = (0, 0, 0, 0usize);
    let mut finished = Vec::with_capacity(games);
    for result in results {
        let (outcome, record, searched) = result?;
        match outcome {
            Outcome::PlayerOneWins => one += 1,
            Outcome::PlayerTwoWins => two += 1,
            _ => draws += 1,
        }
        nodes += searched;
        finished.extend(record);
    }

    let time = Instant::now() - start;
    println!(
        "{} games of {} in {:.2}s (base seed {})",
        games,
        variant,
        time.as_secs_f64(),
        base_seed
    );
    println!(
        "Player 1 wins: {}, Player 2 wins: {}, Draws: {}",
        one, two, draws
    );
    println!(
        "No. of positions: {}, kpos/s: {:.1}",
        nodes,
        nodes as f64 / (1000.0 * time.as_secs_f64())
    );

    if let Some(records) = records {
        for record in finished.iter() {
            if let Err(err) = records.save(record) {
                tracing::warn!(error = %err, "failed to save game record");
            }
        }
    }
    Ok(())
}
