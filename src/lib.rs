pub mod card;
pub mod logging;
pub mod rng;
pub mod simulation;
