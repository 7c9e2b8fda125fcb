//! Error types for share decoding and secret reconstruction.

use crate::rational::Rational;

/// Everything that can go wrong between reading a share set and handing
/// back a secret.
///
/// Decode errors (`InvalidDigit`, `InvalidRadix`, `EmptyValue`) belong to a
/// single share; a caller may drop that share and carry on. The rest abort
/// the reconstruction they came from.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    /// A character of the share value is not a digit of the stated radix.
    #[error("invalid digit {digit:?} at position {position} for radix {radix}")]
    InvalidDigit {
        digit: char,
        /// Index from the left of the value string.
        position: usize,
        radix: u32,
    },

    #[error("radix {0} is outside 2..=36")]
    InvalidRadix(u32),

    #[error("share value is empty")]
    EmptyValue,

    #[error("division by zero")]
    DivisionByZero,

    #[error("threshold k must be at least 1, got {0}")]
    InvalidThreshold(usize),

    #[error("not enough shares: have {have}, need {need}")]
    NotEnoughShares { have: usize, need: usize },

    #[error("duplicate share for x = {0}")]
    DuplicatePoint(u64),

    /// The constant term came out as a proper fraction.
    #[error("constant term {0} is not an integer")]
    NonIntegralResult(Rational),

    /// Some `k`-subset of the shares interpolates to a different constant
    /// term than the primary subset.
    #[error("{disagreeing} of {checked} share subsets disagree with the primary result {primary}")]
    InconsistentShares {
        primary: Rational,
        checked: usize,
        disagreeing: usize,
    },

    /// The share-set container is malformed.
    #[error("share set format: {0}")]
    Format(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl ShareError {
    /// True for errors that only condemn one share.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ShareError::InvalidDigit { .. } | ShareError::InvalidRadix(_) | ShareError::EmptyValue
        )
    }
}

pub type Result<T> = std::result::Result<T, ShareError>;
