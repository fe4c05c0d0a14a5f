use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use prize_odds::card::Category;
use prize_odds::logging::init_logging;
use prize_odds::rng::GameRng;
use prize_odds::simulation::engine::{
    run_breakdown, run_simulation, run_simulation_with_progress, DEFAULT_TRIALS,
};
use prize_odds::simulation::{
    draw_opening_hand, parse_deck_file, Condition, Deck, SimulationConfig, SimulationReport,
};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "prize-odds")]
#[command(about = "Opening hand and prize card odds simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Seed for random number generator (for reproducibility)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Deck file to use
    #[arg(short, long, default_value = "data.txt", global = true)]
    deck: String,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: Level,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate openings and print the result accumulator (default)
    Run {
        /// Number of openings to simulate
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
        trials: u64,

        /// Print a JSON report instead of the accumulator
        #[arg(long)]
        json: bool,

        /// Show a progress bar on stderr
        #[arg(long)]
        progress: bool,

        /// Print one sample opening hand and prize pile to stderr first
        #[arg(long)]
        show_hand: bool,
    },

    /// Print the parsed deck list
    Show,

    /// Break the success rate down by condition
    Analyze {
        /// Number of openings to simulate
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
        trials: u64,
    },

    /// Compare two deck lists
    Compare {
        /// First deck file
        deck1: String,

        /// Second deck file
        deck2: String,

        /// Number of openings per deck
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
        trials: u64,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Some(Commands::Run {
            trials,
            json,
            progress,
            show_hand,
        }) => {
            let config = SimulationConfig {
                trials,
                seed: cli.seed,
            };
            run(&cli.deck, &config, json, progress, show_hand);
        }
        Some(Commands::Show) => show_deck(&cli.deck),
        Some(Commands::Analyze { trials }) => {
            let config = SimulationConfig {
                trials,
                seed: cli.seed,
            };
            analyze(&cli.deck, &config);
        }
        Some(Commands::Compare {
            deck1,
            deck2,
            trials,
        }) => {
            let config = SimulationConfig {
                trials,
                seed: cli.seed,
            };
            compare_decks(&deck1, &deck2, &config);
        }
        None => {
            let config = SimulationConfig {
                trials: DEFAULT_TRIALS,
                seed: cli.seed,
            };
            run(&cli.deck, &config, false, false, false);
        }
    }
}

fn load_deck(deck_file: &str) -> Deck {
    match parse_deck_file(deck_file) {
        Ok(deck) => {
            info!(deck = deck_file, cards = deck.len(), basics = deck.basic_pokemon_count(), "deck loaded");
            deck
        }
        Err(e) => {
            eprintln!("✗ Failed to parse deck file '{}': {}", deck_file, e);
            std::process::exit(1);
        }
    }
}

fn ensure_basics(deck: &Deck, deck_file: &str) {
    if deck.basic_pokemon_count() == 0 {
        eprintln!("✗ Deck '{}' has no basic Pokémon; no opening can ever be kept", deck_file);
        std::process::exit(1);
    }
}

fn run(deck_file: &str, config: &SimulationConfig, json: bool, progress: bool, show_hand: bool) {
    let deck = load_deck(deck_file);
    ensure_basics(&deck, deck_file);

    if show_hand {
        let mut rng = GameRng::new(config.seed);
        let opening = draw_opening_hand(&deck, &mut rng);
        eprintln!("--- hand (seed {}) ---", rng.seed());
        for card in &opening.hand {
            eprintln!("{}", card);
        }
        eprintln!("--- prizes ---");
        for card in &opening.prizes {
            eprintln!("{}", card);
        }
    }

    let bar = if progress {
        let bar = ProgressBar::new(config.trials);
        if let Ok(style) =
            ProgressStyle::with_template("{elapsed_precise} [{bar:40}] {pos}/{len} ({per_sec})")
        {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let start = std::time::Instant::now();
    let tally = run_simulation_with_progress(&deck, config, |n| bar.inc(n));
    bar.finish_and_clear();
    let elapsed = start.elapsed();

    info!(
        trials = config.trials,
        successes = tally.successes(),
        elapsed_ms = elapsed.as_millis() as u64,
        "simulation finished"
    );

    if json {
        let report = SimulationReport::new(deck_file, config, tally);
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("✗ Failed to encode report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", tally);
    }
}

fn show_deck(deck_file: &str) {
    let deck = load_deck(deck_file);

    for card in deck.cards() {
        println!("{}", card);
    }
    println!();
    for category in Category::ALL {
        println!("{:8} {:2}", format!("{}:", category), deck.count_category(category));
    }
    println!("{:8} {:2}", "Basics:", deck.basic_pokemon_count());
}

fn analyze(deck_file: &str, config: &SimulationConfig) {
    let deck = load_deck(deck_file);
    ensure_basics(&deck, deck_file);

    println!("\n=== Opening Hand Analysis ===\n");
    println!("Deck: {} ({} cards)", deck_file, deck.len());
    println!("Trials: {}", config.trials);
    if let Some(s) = config.seed {
        println!("Seed: {}", s);
    }
    println!();

    let start = std::time::Instant::now();
    let results = run_breakdown(&deck, config);
    let elapsed = start.elapsed();

    println!("Conditions met (overlapping):\n");
    for condition in Condition::ALL {
        let count = results.hits(condition);
        let pct = results.rate(count) * 100.0;
        let bar = "█".repeat((pct / 2.0) as usize);
        println!(
            "  {}. {:34} {:5.1}% {} ({})",
            condition.number(),
            condition.to_string(),
            pct,
            bar,
            count
        );
    }

    println!("\n--- Statistics ---\n");
    println!(
        "Good openings: {:.2}% ({}/{})",
        results.rate(results.successes) * 100.0,
        results.successes,
        results.trials
    );
    if results.trials > 0 {
        println!(
            "Mulligans per opening: {:.3}",
            results.mulligans as f64 / results.trials as f64
        );
    }

    println!(
        "\nCompleted in {:.2?} ({:.0} trials/sec)",
        elapsed,
        config.trials as f64 / elapsed.as_secs_f64()
    );
}

fn compare_decks(deck1_file: &str, deck2_file: &str, config: &SimulationConfig) {
    let deck1 = load_deck(deck1_file);
    let deck2 = load_deck(deck2_file);
    ensure_basics(&deck1, deck1_file);
    ensure_basics(&deck2, deck2_file);

    println!("\n=== Deck Comparison ===\n");
    println!("Deck 1: {}", deck1_file);
    println!("Deck 2: {}", deck2_file);
    println!("Trials per deck: {}", config.trials);
    println!();

    let start = std::time::Instant::now();
    let tally1 = run_simulation(&deck1, config);
    let tally2 = run_simulation(&deck2, config);
    let elapsed = start.elapsed();

    let rate = |successes: u64| {
        if config.trials == 0 {
            0.0
        } else {
            successes as f64 / config.trials as f64 * 100.0
        }
    };
    let rate1 = rate(tally1.successes());
    let rate2 = rate(tally2.successes());

    println!("=== Results ===\n");
    println!("Deck 1: {:6.2}% ({}/{})", rate1, tally1.successes(), config.trials);
    println!("Deck 2: {:6.2}% ({}/{})", rate2, tally2.successes(), config.trials);
    println!("Difference (2 - 1): {:+.2} points", rate2 - rate1);
    println!("\nCompleted in {:.2?}", elapsed);
}
