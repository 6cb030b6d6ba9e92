//! # Deterministic Generators
//!
//! Two seeded streams, both implemented with explicit `u32`/`u64`
//! arithmetic so that a given seed yields the same values on every platform
//! and in every client that reimplements them:
//!
//! - [`Mulberry32`] seeded by [`fnv1a32`]: drives I Ching line generation.
//! - [`Lcg`] seeded by [`string_hash31`]: drives card and rune draws.
//!
//! Strings are hashed over their UTF-16 code units, which is what the
//! mobile and web clients iterate over.

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;

const LCG_MULTIPLIER: u64 = 1_664_525;
const LCG_INCREMENT: u64 = 1_013_904_223;
const LCG_MODULUS: u64 = 1 << 32;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// 32-bit FNV-1a over the UTF-16 code units of `input`.
pub fn fnv1a32(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// mulberry32: a 32-bit state generator with two xorshift-multiply rounds.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed from a string via [`fnv1a32`].
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(fnv1a32(seed))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }
}

/// `h = h * 31 + unit` over UTF-16 code units in wrapping `i32`, then the
/// absolute value.
pub fn string_hash31(input: &str) -> u32 {
    input
        .encode_utf16()
        .fold(0i32, |h, unit| {
            h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

/// Linear congruential generator with the Numerical Recipes constants,
/// modulo 2^32.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }

    /// Seed from a string via [`string_hash31`].
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(string_hash31(seed))
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / TWO_POW_32
    }

    /// Next integer in `[min, max]`. Bounds given in reverse order are
    /// swapped.
    pub fn next_in_range(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = u64::from(hi) - u64::from(lo) + 1;
        let offset = (self.next_f64() * span as f64).floor() as u64;
        (u64::from(lo) + offset) as u32
    }

    /// `count` integers in `[min, max]`.
    pub fn take_in_range(&mut self, count: usize, min: u32, max: u32) -> Vec<u32> {
        (0..count).map(|_| self.next_in_range(min, max)).collect()
    }
}
