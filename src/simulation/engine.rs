use crate::rng::GameRng;
use crate::simulation::analyze::{evaluate, ConditionBreakdown};
use crate::simulation::deck::Deck;
use crate::simulation::hand::HandDrawer;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_TRIALS: u64 = 1_000_000;

/// Trials per parallel work unit; each unit gets its own RNG
pub const CHUNK_SIZE: u64 = 10_000;

/// Four-slot result accumulator. Slot 0 counts successful openings; the
/// other slots are reserved and stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally(pub [u64; 4]);

impl Tally {
    pub fn successes(&self) -> u64 {
        self.0[0]
    }

    pub fn record_success(&mut self) {
        self.0[0] += 1;
    }

    pub fn merge(self, other: Tally) -> Tally {
        let mut slots = self.0;
        for (mine, theirs) in slots.iter_mut().zip(other.0) {
            *mine += theirs;
        }
        Tally(slots)
    }
}

/// One slot per line
impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}\n{}\n{}\n{}", a, b, c, d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub trials: u64,
    /// Base seed; chunk `i` is seeded with `seed + i`. Random when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

/// Run `trials` draw-and-evaluate rounds on a single RNG
pub fn run_trials(deck: &Deck, trials: u64, rng: &mut GameRng) -> Tally {
    let mut drawer = HandDrawer::new(deck);
    let mut tally = Tally::default();
    for _ in 0..trials {
        let opening = drawer.draw(rng);
        if evaluate(&opening) {
            tally.record_success();
        }
    }
    tally
}

/// Run the whole simulation in parallel.
///
/// A deck without basic Pokémon never finishes: every opening is thrown back.
pub fn run_simulation(deck: &Deck, config: &SimulationConfig) -> Tally {
    run_simulation_with_progress(deck, config, |_| {})
}

/// Like [`run_simulation`], calling `on_chunk` with the trial count of each
/// finished chunk
pub fn run_simulation_with_progress<F>(deck: &Deck, config: &SimulationConfig, on_chunk: F) -> Tally
where
    F: Fn(u64) + Sync,
{
    chunks(config.trials)
        .into_par_iter()
        .map(|(chunk, len)| {
            let mut rng = chunk_rng(config.seed, chunk);
            let tally = run_trials(deck, len, &mut rng);
            on_chunk(len);
            tally
        })
        .reduce(Tally::default, Tally::merge)
}

/// Run the simulation recording which conditions each opening met.
/// Uses the same chunk seeding as [`run_simulation`], so a seeded run sees
/// the same openings.
pub fn run_breakdown(deck: &Deck, config: &SimulationConfig) -> ConditionBreakdown {
    chunks(config.trials)
        .into_par_iter()
        .map(|(chunk, len)| {
            let mut rng = chunk_rng(config.seed, chunk);
            let mut drawer = HandDrawer::new(deck);
            let mut breakdown = ConditionBreakdown::default();
            for _ in 0..len {
                breakdown.record(&drawer.draw(&mut rng));
            }
            breakdown
        })
        .reduce(ConditionBreakdown::default, ConditionBreakdown::merge)
}

/// (chunk index, trials in chunk) covering `trials` in order
fn chunks(trials: u64) -> Vec<(u64, u64)> {
    (0..trials.div_ceil(CHUNK_SIZE))
        .map(|i| (i, CHUNK_SIZE.min(trials - i * CHUNK_SIZE)))
        .collect()
}

fn chunk_rng(seed: Option<u64>, chunk: u64) -> GameRng {
    GameRng::new(seed.map(|s| s.wrapping_add(chunk)))
}

/// Machine-readable summary of a run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub deck: String,
    pub trials: u64,
    pub seed: Option<u64>,
    pub accumulator: [u64; 4],
    pub success_rate: f64,
    pub generated_at: String,
}

impl SimulationReport {
    pub fn new(deck: &str, config: &SimulationConfig, tally: Tally) -> Self {
        let success_rate = if config.trials == 0 {
            0.0
        } else {
            tally.successes() as f64 / config.trials as f64
        };
        SimulationReport {
            deck: deck.to_string(),
            trials: config.trials,
            seed: config.seed,
            accumulator: tally.0,
            success_rate,
            generated_at: chrono::Local::now().to_rfc3339(),
        }
    }
}
