//! Opening hand evaluation
//!
//! Scores an opening against five fixed conditions built from the counts of a
//! handful of named cards in hand and in the prizes.

use crate::card::Card;
use crate::simulation::hand::OpeningHand;
use serde::Serialize;
use std::fmt;

pub const QUICK_BALL: &str = "Quick Ball";
pub const ARCHEOPS: &str = "Archeops";
pub const LUMINEON: &str = "Lumineon";
pub const PROFESSOR_BURNET: &str = "Professor Burnet";
pub const EVOLUTION_INCENSE: &str = "Evolution Incense";

/// Named-card counts the conditions are written in terms of
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandCounts {
    pub quick_ball: u32,
    pub archeops: u32,
    pub lumineon: u32,
    pub burnet: u32,
    pub incense: u32,
    pub basics: u32,
    pub prized_archeops: u32,
    pub prized_lumineon: u32,
}

impl HandCounts {
    pub fn from_cards<'c>(
        hand: impl IntoIterator<Item = &'c Card>,
        prizes: impl IntoIterator<Item = &'c Card>,
    ) -> Self {
        let mut counts = HandCounts::default();

        for card in hand {
            match card.name() {
                QUICK_BALL => counts.quick_ball += 1,
                ARCHEOPS => counts.archeops += 1,
                LUMINEON => counts.lumineon += 1,
                PROFESSOR_BURNET => counts.burnet += 1,
                EVOLUTION_INCENSE => counts.incense += 1,
                _ => {}
            }
            if card.is_basic_pokemon() {
                counts.basics += 1;
            }
        }

        for card in prizes {
            match card.name() {
                ARCHEOPS => counts.prized_archeops += 1,
                LUMINEON => counts.prized_lumineon += 1,
                _ => {}
            }
        }

        counts
    }

    pub fn from_opening(opening: &OpeningHand<'_>) -> Self {
        Self::from_cards(
            opening.hand.iter().copied(),
            opening.prizes.iter().copied(),
        )
    }
}

/// The five ways an opening can count as good
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Condition {
    /// Two or more basics and a way to find Lumineon, with both fish not prized
    TwoBasicsWithSearch,
    /// Lumineon is the only basic, a Quick Ball backs it up, no Lumineon prized
    LoneLumineonWithSearch,
    /// The only basic is not Lumineon, a Quick Ball is in hand
    LoneBasicWithSearch,
    BurnetInHand,
    /// More than two of Archeops and Evolution Incense combined
    ArcheopsPieces,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::TwoBasicsWithSearch,
        Condition::LoneLumineonWithSearch,
        Condition::LoneBasicWithSearch,
        Condition::BurnetInHand,
        Condition::ArcheopsPieces,
    ];

    /// 1-based position in [`Condition::ALL`]
    pub fn number(&self) -> usize {
        match self {
            Condition::TwoBasicsWithSearch => 1,
            Condition::LoneLumineonWithSearch => 2,
            Condition::LoneBasicWithSearch => 3,
            Condition::BurnetInHand => 4,
            Condition::ArcheopsPieces => 5,
        }
    }

    pub fn holds(&self, c: &HandCounts) -> bool {
        // Two prized Archeops sink every condition.
        if c.prized_archeops >= 2 {
            return false;
        }
        match self {
            Condition::TwoBasicsWithSearch => {
                c.basics > 1 && c.quick_ball + c.lumineon > 0 && c.prized_lumineon < 2
            }
            Condition::LoneLumineonWithSearch => {
                c.basics == 1 && c.lumineon == 1 && c.quick_ball > 0 && c.prized_lumineon < 1
            }
            Condition::LoneBasicWithSearch => {
                c.basics == 1 && c.lumineon == 0 && c.quick_ball > 0 && c.prized_lumineon < 2
            }
            Condition::BurnetInHand => c.burnet == 1,
            Condition::ArcheopsPieces => c.incense + c.archeops > 2,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoBasicsWithSearch => write!(f, "2+ basics, Quick Ball or Lumineon"),
            Self::LoneLumineonWithSearch => write!(f, "Lumineon alone, Quick Ball"),
            Self::LoneBasicWithSearch => write!(f, "1 other basic, Quick Ball"),
            Self::BurnetInHand => write!(f, "Professor Burnet in hand"),
            Self::ArcheopsPieces => write!(f, "3+ Archeops / Evolution Incense"),
        }
    }
}

/// True when any of the five conditions holds
pub fn is_success(counts: &HandCounts) -> bool {
    Condition::ALL.iter().any(|c| c.holds(counts))
}

pub fn evaluate(opening: &OpeningHand<'_>) -> bool {
    is_success(&HandCounts::from_opening(opening))
}

/// Conditions satisfied by the given counts, in order
pub fn matched_conditions(counts: &HandCounts) -> impl Iterator<Item = Condition> + '_ {
    Condition::ALL.into_iter().filter(move |c| c.holds(counts))
}

/// Per-condition hit counts over many trials.
///
/// Conditions overlap, so the per-condition numbers do not add up to
/// `successes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConditionBreakdown {
    pub trials: u64,
    pub successes: u64,
    pub per_condition: [u64; 5],
    pub mulligans: u64,
}

impl ConditionBreakdown {
    pub fn record(&mut self, opening: &OpeningHand<'_>) {
        let counts = HandCounts::from_opening(opening);
        self.trials += 1;
        self.mulligans += u64::from(opening.mulligans);

        let mut any = false;
        for condition in matched_conditions(&counts) {
            self.per_condition[condition.number() - 1] += 1;
            any = true;
        }
        if any {
            self.successes += 1;
        }
    }

    pub fn merge(mut self, other: ConditionBreakdown) -> Self {
        self.trials += other.trials;
        self.successes += other.successes;
        self.mulligans += other.mulligans;
        for (mine, theirs) in self.per_condition.iter_mut().zip(other.per_condition) {
            *mine += theirs;
        }
        self
    }

    pub fn hits(&self, condition: Condition) -> u64 {
        self.per_condition[condition.number() - 1]
    }

    /// Fraction of trials, 0.0 when nothing was run
    pub fn rate(&self, count: u64) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            count as f64 / self.trials as f64
        }
    }
}
