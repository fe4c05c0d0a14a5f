use serde::{Deserialize, Serialize};
use std::fmt;

/// Deck list sections a card can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pokemon,
    Trainer,
    Energy,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Pokemon, Category::Trainer, Category::Energy];

    /// Section label as it appears in a deck list, without the trailing colon
    pub fn label(&self) -> &'static str {
        match self {
            Category::Pokemon => "Pokémon",
            Category::Trainer => "Trainer",
            Category::Energy => "Energy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Pokemon => write!(f, "Pokemon"),
            Category::Trainer => write!(f, "Trainer"),
            Category::Energy => write!(f, "Energy"),
        }
    }
}

/// Optional trailing keyword on a deck list line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Basic,
    Supporter,
    Search,
}

impl Tag {
    pub fn keyword(&self) -> &'static str {
        match self {
            Tag::Basic => "basic",
            Tag::Supporter => "supporter",
            Tag::Search => "search",
        }
    }

    /// Whether this tag means anything for a card of the given category
    pub fn applies_to(&self, category: Category) -> bool {
        matches!(
            (self, category),
            (Tag::Basic, Category::Pokemon)
                | (Tag::Supporter, Category::Trainer)
                | (Tag::Search, Category::Trainer)
        )
    }
}

/// A single physical card in the deck.
///
/// Two copies of the same card are distinct instances with distinct indices.
/// The tag is kept only when it is consistent with the category, so at most
/// one of the basic/supporter/search flags is ever set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    index: u32,
    name: String,
    category: Category,
    tag: Option<Tag>,
}

impl Card {
    /// Build a card, discarding a tag that does not fit the category
    pub fn new(index: u32, name: impl Into<String>, category: Category, tag: Option<Tag>) -> Self {
        Card {
            index,
            name: name.into(),
            category,
            tag: tag.filter(|t| t.applies_to(category)),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn tag(&self) -> Option<Tag> {
        self.tag
    }

    pub fn is_basic_pokemon(&self) -> bool {
        self.tag == Some(Tag::Basic)
    }

    pub fn is_supporter(&self) -> bool {
        self.tag == Some(Tag::Supporter)
    }

    pub fn is_search_card(&self) -> bool {
        self.tag == Some(Tag::Search)
    }
}

/// `02 Lugia V Pokemon, Basic`
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} {} {}", self.index, self.name, self.category)?;
        match self.tag {
            Some(Tag::Basic) => write!(f, ", Basic"),
            Some(Tag::Supporter) => write!(f, ", Supporter"),
            Some(Tag::Search) => write!(f, ", Search"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_tag() {
        let card = Card::new(2, "Lugia V", Category::Pokemon, Some(Tag::Basic));
        assert_eq!(card.to_string(), "02 Lugia V Pokemon, Basic");
    }

    #[test]
    fn test_display_without_tag() {
        let card = Card::new(41, "Lost Vacuum", Category::Trainer, None);
        assert_eq!(card.to_string(), "41 Lost Vacuum Trainer");
    }

    #[test]
    fn test_inconsistent_tag_is_dropped() {
        let energy = Card::new(1, "Jet Energy", Category::Energy, Some(Tag::Basic));
        assert_eq!(energy.tag(), None);
        assert!(!energy.is_basic_pokemon());

        let trainer = Card::new(2, "Quick Ball", Category::Trainer, Some(Tag::Basic));
        assert!(!trainer.is_basic_pokemon());

        let pokemon = Card::new(3, "Archeops", Category::Pokemon, Some(Tag::Search));
        assert!(!pokemon.is_search_card());
    }

    #[test]
    fn test_flags_are_exclusive() {
        let supporter = Card::new(1, "Iono", Category::Trainer, Some(Tag::Supporter));
        assert!(supporter.is_supporter());
        assert!(!supporter.is_search_card());
        assert!(!supporter.is_basic_pokemon());
    }
}
