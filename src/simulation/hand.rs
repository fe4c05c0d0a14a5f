use crate::card::Card;
use crate::rng::GameRng;
use crate::simulation::deck::Deck;

/// Cards in the opening seven
pub const OPENING_HAND_SIZE: usize = 7;
/// Cards set aside as prizes
pub const PRIZE_COUNT: usize = 6;
/// Cards drawn after prizes are set aside
pub const FIRST_DRAW: usize = 1;

/// Size of the hand handed to the evaluator
pub const HAND_SIZE: usize = OPENING_HAND_SIZE + FIRST_DRAW;

/// One opening: the 8-card hand and the 6 prize cards, borrowed from the deck
#[derive(Debug, Clone)]
pub struct OpeningHand<'a> {
    pub hand: Vec<&'a Card>,
    pub prizes: Vec<&'a Card>,
    /// Openings thrown back because they held no basic Pokémon
    pub mulligans: u32,
}

/// Draws openings from a fixed deck.
///
/// Works on a permutation of card positions rather than the cards themselves,
/// so two copies of the same card are never confused.
pub struct HandDrawer<'a> {
    deck: &'a Deck,
    order: Vec<usize>,
}

impl<'a> HandDrawer<'a> {
    pub fn new(deck: &'a Deck) -> Self {
        HandDrawer {
            deck,
            order: (0..deck.len()).collect(),
        }
    }

    /// Draw 7 until one holds a basic Pokémon, set aside 6 prizes from the
    /// rest, then draw 1 more into the hand.
    ///
    /// Never returns for a deck without basic Pokémon.
    pub fn draw(&mut self, rng: &mut GameRng) -> OpeningHand<'a> {
        let deck: &'a Deck = self.deck;
        let cards = deck.cards();
        let mut mulligans = 0;

        loop {
            rng.partial_shuffle(&mut self.order, OPENING_HAND_SIZE);
            if self.order[..OPENING_HAND_SIZE]
                .iter()
                .any(|&i| cards[i].is_basic_pokemon())
            {
                break;
            }
            mulligans += 1;
        }

        let prize_end = OPENING_HAND_SIZE + PRIZE_COUNT;
        rng.partial_shuffle(&mut self.order[OPENING_HAND_SIZE..], PRIZE_COUNT);
        rng.partial_shuffle(&mut self.order[prize_end..], FIRST_DRAW);

        let hand = self.order[..OPENING_HAND_SIZE]
            .iter()
            .chain(&self.order[prize_end..prize_end + FIRST_DRAW])
            .map(|&i| &cards[i])
            .collect();
        let prizes = self.order[OPENING_HAND_SIZE..prize_end]
            .iter()
            .map(|&i| &cards[i])
            .collect();

        OpeningHand {
            hand,
            prizes,
            mulligans,
        }
    }
}

/// Draw a single opening from the deck
pub fn draw_opening_hand<'a>(deck: &'a Deck, rng: &mut GameRng) -> OpeningHand<'a> {
    HandDrawer::new(deck).draw(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Category, Tag};
    use crate::simulation::deck::{parse_deck_str, tests::SAMPLE_DECK, DECK_SIZE};
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Deck with `basics` basic Pokémon and Energy filling the rest
    fn deck_with_basics(basics: usize) -> Deck {
        let cards = (0..DECK_SIZE)
            .map(|i| {
                let index = i as u32 + 1;
                if i < basics {
                    Card::new(index, "Lugia V", Category::Pokemon, Some(Tag::Basic))
                } else {
                    Card::new(index, "Jet Energy", Category::Energy, None)
                }
            })
            .collect();
        Deck::from_cards(cards).unwrap()
    }

    #[test]
    fn test_hand_and_prize_sizes() {
        let deck = parse_deck_str(SAMPLE_DECK).unwrap();
        let mut rng = GameRng::new(Some(42));
        let opening = draw_opening_hand(&deck, &mut rng);
        assert_eq!(opening.hand.len(), HAND_SIZE);
        assert_eq!(opening.prizes.len(), PRIZE_COUNT);
    }

    #[test]
    fn test_single_basic_always_lands_in_opening_seven() {
        let deck = deck_with_basics(1);
        let mut rng = GameRng::new(Some(7));
        let mut drawer = HandDrawer::new(&deck);
        for _ in 0..200 {
            let opening = drawer.draw(&mut rng);
            let basic_positions: Vec<usize> = opening
                .hand
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_basic_pokemon())
                .map(|(i, _)| i)
                .collect();
            assert_eq!(basic_positions.len(), 1);
            assert!(basic_positions[0] < OPENING_HAND_SIZE);
            assert!(opening.prizes.iter().all(|c| !c.is_basic_pokemon()));
        }
    }

    #[test]
    fn test_mulligans_are_counted() {
        let deck = deck_with_basics(1);
        let mut rng = GameRng::new(Some(3));
        let mut drawer = HandDrawer::new(&deck);
        let total: u32 = (0..100).map(|_| drawer.draw(&mut rng).mulligans).sum();
        assert!(total > 0, "one basic in 60 cards should force mulligans");
    }

    #[test]
    fn test_same_seed_same_opening() {
        let deck = parse_deck_str(SAMPLE_DECK).unwrap();
        let a = draw_opening_hand(&deck, &mut GameRng::new(Some(99)));
        let b = draw_opening_hand(&deck, &mut GameRng::new(Some(99)));
        fn indices(cards: &[&Card]) -> Vec<u32> {
            cards.iter().map(|c| c.index()).collect()
        }
        assert_eq!(indices(&a.hand), indices(&b.hand));
        assert_eq!(indices(&a.prizes), indices(&b.prizes));
    }

    proptest! {
        #[test]
        fn prop_opening_is_legal(seed in any::<u64>(), basics in 1usize..=DECK_SIZE) {
            let deck = deck_with_basics(basics);
            let mut rng = GameRng::new(Some(seed));
            let opening = draw_opening_hand(&deck, &mut rng);

            prop_assert_eq!(opening.hand.len(), HAND_SIZE);
            prop_assert_eq!(opening.prizes.len(), PRIZE_COUNT);

            let hand: HashSet<u32> = opening.hand.iter().map(|c| c.index()).collect();
            let prizes: HashSet<u32> = opening.prizes.iter().map(|c| c.index()).collect();
            prop_assert_eq!(hand.len(), HAND_SIZE);
            prop_assert_eq!(prizes.len(), PRIZE_COUNT);
            prop_assert!(hand.is_disjoint(&prizes));

            prop_assert!(opening.hand.iter().any(|c| c.category() == Category::Pokemon && c.is_basic_pokemon()));
        }
    }
}
