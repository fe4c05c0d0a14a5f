pub mod analyze;
pub mod deck;
pub mod engine;
pub mod hand;

pub use analyze::{evaluate, Condition, ConditionBreakdown, HandCounts};
pub use deck::{parse_deck_file, parse_deck_str, Deck, DeckError, DECK_SIZE};
pub use engine::{run_simulation, SimulationConfig, SimulationReport, Tally};
pub use hand::{draw_opening_hand, HandDrawer, OpeningHand};
