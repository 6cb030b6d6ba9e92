//! # Symbol Codec
//!
//! Cards and runes travel as a single integer: the symbol index shifted left
//! by one, with the low bit set when the symbol is reversed. I Ching lines
//! travel as their traditional values 6 through 9.

use serde::{Deserialize, Serialize};

use crate::error::DrawError;

/// A symbol index with its orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedSymbol {
    pub index: u32,
    pub reversed: bool,
}

pub fn encode_card(index: u32, reversed: bool) -> u32 {
    (index << 1) | u32::from(reversed)
}

pub fn decode_card(value: u32) -> DecodedSymbol {
    DecodedSymbol {
        index: value >> 1,
        reversed: value & 1 == 1,
    }
}

pub fn encode_rune(index: u32, reversed: bool) -> u32 {
    encode_card(index, reversed)
}

pub fn decode_rune(value: u32) -> DecodedSymbol {
    decode_card(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yin,
    Yang,
}

/// Meaning of one I Ching line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineReading {
    pub polarity: Polarity,
    /// Old yin (6) and old yang (9) change into their opposite.
    pub changing: bool,
}

pub fn decode_iching_line(value: u32) -> Result<LineReading, DrawError> {
    let (polarity, changing) = match value {
        6 => (Polarity::Yin, true),
        7 => (Polarity::Yang, false),
        8 => (Polarity::Yin, false),
        9 => (Polarity::Yang, true),
        other => return Err(DrawError::InvalidLineValue(other)),
    };
    Ok(LineReading { polarity, changing })
}
