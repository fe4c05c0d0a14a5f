use crate::card::{Card, Category, Tag};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Number of cards a legal deck holds
pub const DECK_SIZE: usize = 60;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("deck has {found} cards, expected {expected}")]
    WrongSize { found: usize, expected: usize },
}

/// A parsed deck of exactly [`DECK_SIZE`] cards, immutable once built
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize {
                found: cards.len(),
                expected: DECK_SIZE,
            });
        }
        Ok(Deck { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn count_category(&self, category: Category) -> usize {
        self.cards.iter().filter(|c| c.category() == category).count()
    }

    pub fn basic_pokemon_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_basic_pokemon()).count()
    }
}

/// One deck list line: `<qty> <name> <SET> <number> [basic|supporter|search]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckLine<'a> {
    pub quantity: u32,
    pub name: &'a str,
    pub set_code: &'a str,
    pub number: &'a str,
    pub tag: Option<Tag>,
}

/// Read a deck file and build a 60-card deck
pub fn parse_deck_file(path: impl AsRef<Path>) -> Result<Deck, DeckError> {
    let content = std::fs::read_to_string(path)?;
    parse_deck_str(&content)
}

/// Parse deck list text and check the deck size
pub fn parse_deck_str(content: &str) -> Result<Deck, DeckError> {
    Deck::from_cards(parse_card_list(content))
}

/// Expand every recognised line into card instances, numbered from 1 in
/// reading order. Lines that do not match the line format are skipped.
pub fn parse_card_list(content: &str) -> Vec<Card> {
    let mut cards = Vec::new();
    let mut next_index: u32 = 1;

    for section in split_sections(content) {
        for (offset, line) in section.text.lines().enumerate() {
            let line_num = section.first_line + offset;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let Some(entry) = parse_line(trimmed) else {
                debug!(line = line_num, text = trimmed, "skipping unrecognised deck line");
                continue;
            };

            if let Some(tag) = entry.tag {
                if !tag.applies_to(section.category) {
                    debug!(
                        line = line_num,
                        keyword = tag.keyword(),
                        category = %section.category,
                        "ignoring keyword that does not apply to this section"
                    );
                }
            }

            for _ in 0..entry.quantity {
                cards.push(Card::new(next_index, entry.name, section.category, entry.tag));
                next_index += 1;
            }
        }
    }

    cards
}

struct Section<'a> {
    category: Category,
    text: &'a str,
    /// 1-based line number of the first line of `text`
    first_line: usize,
}

/// Cut the text at each `<Label>:` header followed by whitespace.
/// Anything before the first header belongs to no section and is dropped.
fn split_sections(content: &str) -> Vec<Section<'_>> {
    let mut headers = Vec::new();
    let mut pos = 0;
    while let Some((start, end, category)) = next_header(content, pos) {
        headers.push((start, end, category));
        pos = end;
    }

    if let Some((first, _, _)) = headers.first() {
        if !content[..*first].trim().is_empty() {
            debug!("ignoring text before the first section header");
        }
    }

    headers
        .iter()
        .enumerate()
        .map(|(i, &(_, body_start, category))| {
            let body_end = headers.get(i + 1).map_or(content.len(), |h| h.0);
            Section {
                category,
                text: &content[body_start..body_end],
                first_line: content[..body_start].matches('\n').count() + 1,
            }
        })
        .collect()
}

/// Earliest header at or after `from`, as (start, end after whitespace, category)
fn next_header(content: &str, from: usize) -> Option<(usize, usize, Category)> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let label = format!("{}:", category.label());
            content[from..].match_indices(&label).find_map(|(at, _)| {
                let start = from + at;
                let after = start + label.len();
                let ws = content[after..].chars().next().filter(|c| c.is_whitespace())?;
                Some((start, after + ws.len_utf8(), category))
            })
        })
        .min_by_key(|&(start, _, _)| start)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '\'' | '-')
}

/// Parse a single trimmed line. The name runs as far right as it can while
/// still leaving a set code and card number after it.
pub fn parse_line(line: &str) -> Option<DeckLine<'_>> {
    let digits_end = line.find(|c: char| !c.is_ascii_digit()).unwrap_or(line.len());
    if digits_end == 0 {
        return None;
    }
    let quantity: u32 = line[..digits_end].parse().ok()?;

    let body = skip_one_whitespace(&line[digits_end..])?;
    let class_end = body.find(|c: char| !is_name_char(c)).unwrap_or(body.len());

    body[..class_end]
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|name_end| {
            let (set_code, number, tag) = parse_tail(&body[name_end..])?;
            let name = body[..name_end].trim();
            (!name.is_empty()).then_some(DeckLine {
                quantity,
                name,
                set_code,
                number,
                tag,
            })
        })
}

/// ` SET 123[ keyword]`, with anything after that ignored
fn parse_tail(tail: &str) -> Option<(&str, &str, Option<Tag>)> {
    let rest = skip_one_whitespace(tail)?;
    let set_code = rest.get(..3)?;
    if !set_code.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }

    let rest = skip_one_whitespace(&rest[3..])?;
    let number_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if number_end == 0 {
        return None;
    }
    let number = &rest[..number_end];

    Some((set_code, number, parse_tag(&rest[number_end..])))
}

fn parse_tag(rest: &str) -> Option<Tag> {
    let rest = skip_one_whitespace(rest).unwrap_or(rest);
    [Tag::Basic, Tag::Supporter, Tag::Search]
        .into_iter()
        .find(|tag| rest.starts_with(tag.keyword()))
}

fn skip_one_whitespace(s: &str) -> Option<&str> {
    let c = s.chars().next().filter(|c| c.is_whitespace())?;
    Some(&s[c.len_utf8()..])
}
