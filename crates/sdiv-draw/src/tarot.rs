//! # Tarot Deck and Seeded Card Draw
//!
//! The 78-card deck is laid out as the 22 Major Arcana (0..=21) followed by
//! the four minor suits in the order Wands, Cups, Swords, Pentacles, each
//! running Ace..Ten, Page, Knight, Queen, King.
//!
//! A draw of `count` cards consumes `3 * count` integers in `[0, 77]` from
//! the seeded [`Lcg`]. The first `count` distinct values are the cards; the
//! values at positions `count..2 * count` decide orientation (reversed when
//! the value modulo 10 is below 3, i.e. 30% of the time).

use serde::{Deserialize, Serialize};

use crate::codec::{decode_card, encode_card};
use crate::error::DrawError;
use crate::rng::Lcg;
use crate::seed::resolve_checked_seed;

pub const DECK_SIZE: u32 = 78;
pub const MIN_CARDS: u32 = 1;
pub const MAX_CARDS: u32 = 10;

const MAJOR_ARCANA: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

const RANKS: [&str; 14] = [
    "Ace", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Page",
    "Knight", "Queen", "King",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "Major Arcana")]
    MajorArcana,
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl Suit {
    const MINOR: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MajorArcana => "Major Arcana",
            Self::Wands => "Wands",
            Self::Cups => "Cups",
            Self::Swords => "Swords",
            Self::Pentacles => "Pentacles",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One card of the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TarotCard {
    pub index: u32,
    pub name: String,
    pub suit: Suit,
    /// 0..=21 for the Major Arcana, 1..=14 within a minor suit.
    pub number: u32,
}

/// The card at `index`, or `None` past the end of the deck.
pub fn card(index: u32) -> Option<TarotCard> {
    let major = MAJOR_ARCANA.len() as u32;
    if index < major {
        return Some(TarotCard {
            index,
            name: MAJOR_ARCANA[index as usize].to_string(),
            suit: Suit::MajorArcana,
            number: index,
        });
    }
    let minor = index - major;
    let suit = *Suit::MINOR.get((minor / RANKS.len() as u32) as usize)?;
    let rank = minor % RANKS.len() as u32;
    Some(TarotCard {
        index,
        name: format!("{} of {}", RANKS[rank as usize], suit),
        suit,
        number: rank + 1,
    })
}

/// All 78 cards in deck order.
pub fn deck() -> Vec<TarotCard> {
    (0..DECK_SIZE).filter_map(card).collect()
}

/// A card as placed in a spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    /// `"card_<index>"`.
    pub id: String,
    pub name: String,
    pub suit: Suit,
    pub number: u32,
    pub upright: bool,
    /// 1-based.
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDrawRequest {
    pub count: i64,
    pub allow_reversed: bool,
    pub seed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraw {
    pub cards: Vec<DrawnCard>,
    /// Codec form of each card, in position order.
    pub encoded: Vec<u32>,
    pub seed: String,
}

/// Validate the request, pick or check the seed, and draw.
pub fn draw_cards(request: CardDrawRequest) -> Result<CardDraw, DrawError> {
    if request.count < i64::from(MIN_CARDS) || request.count > i64::from(MAX_CARDS) {
        return Err(DrawError::CountOutOfRange {
            technique: "cards",
            count: request.count,
            min: MIN_CARDS,
            max: MAX_CARDS,
        });
    }
    let seed = resolve_checked_seed(request.seed)?;
    let encoded = encoded_draw(&seed, request.count as u32, request.allow_reversed);

    let cards = encoded
        .iter()
        .enumerate()
        .filter_map(|(position, &value)| {
            let symbol = decode_card(value);
            card(symbol.index).map(|c| DrawnCard {
                id: format!("card_{}", c.index),
                name: c.name,
                suit: c.suit,
                number: c.number,
                upright: !symbol.reversed,
                position: position as u32 + 1,
            })
        })
        .collect();

    Ok(CardDraw {
        cards,
        encoded,
        seed,
    })
}

/// The codec values of a `count`-card draw from `seed`.
pub fn encoded_draw(seed: &str, count: u32, allow_reversed: bool) -> Vec<u32> {
    let wanted = count as usize;
    let values = Lcg::from_seed_str(seed).take_in_range(wanted * 3, 0, DECK_SIZE - 1);

    let mut drawn = [false; DECK_SIZE as usize];
    let mut indices = Vec::with_capacity(wanted);
    for &value in &values {
        if indices.len() == wanted {
            break;
        }
        if !drawn[value as usize] {
            drawn[value as usize] = true;
            indices.push(value);
        }
    }
    for index in 0..DECK_SIZE {
        if indices.len() == wanted {
            break;
        }
        if !drawn[index as usize] {
            drawn[index as usize] = true;
            indices.push(index);
        }
    }

    let reversals = &values[wanted..wanted * 2];
    indices
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            let reversed = allow_reversed && reversals[position % wanted] % 10 < 3;
            encode_card(index, reversed)
        })
        .collect()
}
