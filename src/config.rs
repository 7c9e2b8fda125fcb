//! Knobs for how a share set is turned into a secret.

use std::str::FromStr;

/// Subsets larger than this many are not enumerated under `Validation::Auto`.
pub const DEFAULT_MAX_EXHAUSTIVE_SUBSETS: usize = 256;

/// Which alternate `k`-subsets are re-interpolated when more than `k`
/// shares are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    /// Use only the primary subset.
    Off,
    /// Every later window of `k` consecutive shares in x order.
    Shifted,
    /// All `C(n, k)` subsets.
    Exhaustive,
    /// Exhaustive when small enough, shifted otherwise.
    Auto,
}

/// Which shares form the primary subset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The `k` shares with the smallest x.
    SmallestX,
    /// Exactly the shares numbered `1..=k`; all of them must be present.
    IndexRange,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub validation: Validation,
    pub selection: Selection,
    pub max_exhaustive_subsets: usize,
    /// Drop shares that fail to decode instead of failing the whole set.
    pub lenient: bool,
    /// Also solve the primary subset as a linear system and compare.
    pub cross_check: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            validation: Validation::Auto,
            selection: Selection::SmallestX,
            max_exhaustive_subsets: DEFAULT_MAX_EXHAUSTIVE_SUBSETS,
            lenient: false,
            cross_check: false,
        }
    }
}

impl FromStr for Validation {
    type Err = String;

    fn from_str(s: &str) -> Result<Validation, String> {
        match s {
            "off" | "none" => Ok(Validation::Off),
            "shifted" => Ok(Validation::Shifted),
            "exhaustive" | "all" => Ok(Validation::Exhaustive),
            "auto" => Ok(Validation::Auto),
            _ => Err(format!("unknown validation mode {:?}", s)),
        }
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Selection, String> {
        match s {
            "smallest" => Ok(Selection::SmallestX),
            "index" => Ok(Selection::IndexRange),
            _ => Err(format!("unknown selection {:?}", s)),
        }
    }
}
