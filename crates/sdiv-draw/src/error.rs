use thiserror::Error;

/// Request-level draw failures. All of them are the caller's fault; the
/// draw itself cannot fail once its inputs are accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// A supplied seed for a card or rune draw is too short.
    #[error("seed must be at least {min} characters")]
    SeedTooShort { min: usize },

    /// Requested symbol count is outside the technique's range.
    #[error("{technique} count must be between {min} and {max}, got {count}")]
    CountOutOfRange {
        technique: &'static str,
        count: i64,
        min: u32,
        max: u32,
    },

    /// Not one of the four I Ching line values 6, 7, 8, 9.
    #[error("invalid I Ching line value: {0}")]
    InvalidLineValue(u32),
}
