//! # I Ching Coin Draw
//!
//! A seed is hashed with FNV-1a into a mulberry32 stream. Each round takes
//! one value, scales it to `[0, 8)` and looks the line up in
//! [`LINE_TABLE`], which reproduces the three-coin probabilities (1/8 old
//! yin, 3/8 young yang, 3/8 young yin, 1/8 old yang).
//!
//! The first six lines fold into a binary-indexed hexagram number 1..=64:
//! bit `i` is set when line `i` is yang. This is not the King Wen sequence.
//! Changing lines (6 and 9) flip to produce the resulting hexagram.

use serde::{Deserialize, Serialize};

use crate::rng::Mulberry32;
use crate::seed::resolve_seed;

pub const MIN_ROUNDS: usize = 1;
pub const MAX_ROUNDS: usize = 6;
pub const DEFAULT_ROUNDS: usize = MAX_ROUNDS;

/// Line value for each of the eight equally likely coin outcomes.
pub const LINE_TABLE: [u8; 8] = [6, 7, 7, 7, 8, 8, 8, 9];

const HEXAGRAM_COUNT: u32 = 64;

/// Clamp a requested round count into `[1, 6]`.
pub fn clamp_rounds(rounds: i64) -> usize {
    rounds.clamp(MIN_ROUNDS as i64, MAX_ROUNDS as i64) as usize
}

/// A normalized coin draw: rounds already clamped, seed already chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRequest {
    rounds: usize,
    seed: String,
}

impl DrawRequest {
    /// Missing rounds default to six. A missing or empty seed is generated.
    pub fn new(rounds: Option<i64>, seed: Option<String>) -> Self {
        Self {
            rounds: rounds.map_or(DEFAULT_ROUNDS, clamp_rounds),
            seed: resolve_seed(seed),
        }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub lines: Vec<u8>,
    pub primary_hex: u8,
    /// 1-based positions of lines valued 6 or 9.
    pub changing_lines: Vec<u8>,
    /// Hexagram after changing lines flip. Present iff `changing_lines` is
    /// non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_hex: Option<u8>,
}

pub fn draw(request: &DrawRequest) -> DrawResult {
    cast(request.seed(), request.rounds())
}

/// Generate `rounds` lines (clamped) from `seed` and derive the hexagrams.
pub fn cast(seed: &str, rounds: usize) -> DrawResult {
    let rounds = rounds.clamp(MIN_ROUNDS, MAX_ROUNDS);
    let mut rng = Mulberry32::from_seed_str(seed);
    let lines: Vec<u8> = (0..rounds)
        .map(|_| LINE_TABLE[(rng.next_f64() * 8.0).floor() as usize])
        .collect();

    let changing_lines: Vec<u8> = lines
        .iter()
        .enumerate()
        .filter(|(_, &line)| is_changing(line))
        .map(|(i, _)| (i + 1) as u8)
        .collect();

    let result_hex = if changing_lines.is_empty() {
        None
    } else {
        let resolved: Vec<u8> = lines.iter().copied().map(resolve_line).collect();
        Some(fold_hexagram(&resolved))
    };

    DrawResult {
        primary_hex: fold_hexagram(&lines),
        lines,
        changing_lines,
        result_hex,
    }
}

/// Fold up to the first six lines into a hexagram number in `[1, 64]`.
pub fn fold_hexagram(lines: &[u8]) -> u8 {
    let acc = lines
        .iter()
        .take(MAX_ROUNDS)
        .enumerate()
        .filter(|(_, &line)| is_yang(line))
        .fold(0u32, |acc, (i, _)| acc | (1 << i));
    ((acc % HEXAGRAM_COUNT) + 1) as u8
}

/// Changing lines become their opposite: 6 to 7, 9 to 8.
pub fn resolve_line(line: u8) -> u8 {
    match line {
        6 => 7,
        9 => 8,
        other => other,
    }
}

fn is_changing(line: u8) -> bool {
    line == 6 || line == 9
}

fn is_yang(line: u8) -> bool {
    line == 7 || line == 9
}
