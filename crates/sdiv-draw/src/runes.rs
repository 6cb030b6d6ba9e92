//! Seeded Elder Futhark draw.
//!
//! Each of the `count` stream values is already a codec value: with
//! reversals enabled it ranges over `[0, 47]`; with reversals disabled over
//! `[0, 46]` with the reversal bit masked off. Repeated runes are skipped
//! and any shortfall is filled with the lowest unused runes, upright.

use serde::{Deserialize, Serialize};

use crate::codec::{decode_rune, encode_rune};
use crate::error::DrawError;
use crate::rng::Lcg;
use crate::seed::resolve_checked_seed;

pub const RUNE_COUNT: u32 = 24;
pub const MIN_RUNES: u32 = 1;
pub const MAX_RUNES: u32 = 5;
pub const DEFAULT_RUNES: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnRune {
    /// `"rune_<index>"`.
    pub id: String,
    pub reversed: bool,
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuneDrawRequest {
    pub count: i64,
    pub allow_reversed: bool,
    pub seed: Option<String>,
}

impl Default for RuneDrawRequest {
    fn default() -> Self {
        Self {
            count: DEFAULT_RUNES,
            allow_reversed: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuneDraw {
    pub runes: Vec<DrawnRune>,
    pub encoded: Vec<u32>,
    pub seed: String,
}

pub fn draw_runes(request: RuneDrawRequest) -> Result<RuneDraw, DrawError> {
    if request.count < i64::from(MIN_RUNES) || request.count > i64::from(MAX_RUNES) {
        return Err(DrawError::CountOutOfRange {
            technique: "runes",
            count: request.count,
            min: MIN_RUNES,
            max: MAX_RUNES,
        });
    }
    let seed = resolve_checked_seed(request.seed)?;
    let encoded = encoded_draw(&seed, request.count as u32, request.allow_reversed);

    let runes = encoded
        .iter()
        .enumerate()
        .map(|(position, &value)| {
            let symbol = decode_rune(value);
            DrawnRune {
                id: format!("rune_{}", symbol.index),
                reversed: request.allow_reversed && symbol.reversed,
                position: position as u32 + 1,
            }
        })
        .collect();

    Ok(RuneDraw {
        runes,
        encoded,
        seed,
    })
}

/// The codec values of a `count`-rune draw from `seed`.
pub fn encoded_draw(seed: &str, count: u32, allow_reversed: bool) -> Vec<u32> {
    let wanted = count as usize;
    let max_encoded = if allow_reversed {
        RUNE_COUNT * 2 - 1
    } else {
        RUNE_COUNT * 2 - 2
    };
    let values = Lcg::from_seed_str(seed).take_in_range(wanted, 0, max_encoded);

    let mut seen = [false; RUNE_COUNT as usize];
    let mut picks = Vec::with_capacity(wanted);
    for value in values {
        let value = if allow_reversed { value } else { value & !1 };
        let index = decode_rune(value).index;
        if !seen[index as usize] {
            seen[index as usize] = true;
            picks.push(value);
        }
        if picks.len() == wanted {
            break;
        }
    }
    for index in 0..RUNE_COUNT {
        if picks.len() >= wanted {
            break;
        }
        if !seen[index as usize] {
            seen[index as usize] = true;
            picks.push(encode_rune(index, false));
        }
    }
    picks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_encoded_draws() {
        assert_eq!(encoded_draw("runes-seed", 3, true), vec![24, 21, 3]);
        assert_eq!(encoded_draw("runes-seed", 3, false), vec![24, 20, 2]);
        assert_eq!(encoded_draw("runes-seed", 5, true), vec![24, 21, 3, 34, 42]);
        assert_eq!(encoded_draw("abcd", 1, true), vec![42]);
        assert_eq!(encoded_draw("abcd", 5, false), vec![40, 6, 4, 12, 18]);
    }

    #[test]
    fn draw_reports_ids_and_orientation() {
        let draw = draw_runes(RuneDrawRequest {
            seed: Some("runes-seed".to_string()),
            ..RuneDrawRequest::default()
        })
        .unwrap();
        let ids: Vec<&str> = draw.runes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rune_12", "rune_10", "rune_1"]);
        let reversed: Vec<bool> = draw.runes.iter().map(|r| r.reversed).collect();
        assert_eq!(reversed, vec![false, true, true]);
        assert_eq!(draw.runes[2].position, 3);
    }

    #[test]
    fn reversals_disabled_yields_upright_runes() {
        let draw = draw_runes(RuneDrawRequest {
            count: 5,
            allow_reversed: false,
            seed: Some("runes-seed".to_string()),
        })
        .unwrap();
        assert!(draw.runes.iter().all(|r| !r.reversed));
        assert!(draw.encoded.iter().all(|v| v & 1 == 0));
    }

    #[test]
    fn count_bounds() {
        for bad in [0, 6, -2] {
            let result = draw_runes(RuneDrawRequest {
                count: bad,
                seed: Some("runes-seed".to_string()),
                ..RuneDrawRequest::default()
            });
            assert!(matches!(result, Err(DrawError::CountOutOfRange { .. })));
        }
    }

    #[test]
    fn short_seed_is_rejected() {
        let result = draw_runes(RuneDrawRequest {
            seed: Some("ab".to_string()),
            ..RuneDrawRequest::default()
        });
        assert_eq!(result, Err(DrawError::SeedTooShort { min: 4 }));
    }
}
