// Secret reconstruction by Lagrange interpolation at zero.
//
// The shares are points on a polynomial of order o = k - 1:
//
// f(x) = a_0 * 1  +  a_1 * x  +  a_2 * x**2  +  ...  +  a_o * x**o
//
// and the secret is a_0 = f(0). With k points the polynomial is unique,
// and evaluating its Lagrange form at zero gives
//
// f(0) = sum_i y_i * L_i(0),   L_i(0) = prod_{j != i} (0 - x_j) / (x_i - x_j)
//
// All of this is done over exact rationals. Over the integers the result
// must come out whole; if it doesn't, the shares are wrong somewhere and we
// say so instead of rounding.
//
// When more than k shares are present we re-run the interpolation over
// other k-subsets and compare. Any subset that lands on a different a_0
// is reported.

use std::collections::HashMap;

use num_bigint::BigInt;
use tracing::{debug, warn};

use crate::config::{Config, Selection, Validation};
use crate::elimination;
use crate::error::{Result, ShareError};
use crate::rational::Rational;

/// A decoded share.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: u64,
    pub y: BigInt,
}

impl Point {
    pub fn new(x: u64, y: impl Into<BigInt>) -> Point {
        Point { x, y: y.into() }
    }
}

/// The constant term one validation subset interpolated to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubsetOutcome {
    /// x coordinates of the subset, ascending.
    pub xs: Vec<u64>,
    pub value: Rational,
}

#[derive(Clone, Debug)]
pub struct Reconstruction {
    /// f(0) from the primary subset.
    pub value: Rational,
    pub is_exact: bool,
    /// x coordinates of the primary subset, ascending.
    pub subset: Vec<u64>,
    /// Number of alternate subsets that were interpolated.
    pub checked: usize,
    /// None if no validation ran; otherwise the subsets that disagreed
    /// with `value` (possibly none).
    pub disagreeing: Option<Vec<SubsetOutcome>>,
}

impl Reconstruction {
    /// The secret, provided the constant term is an integer.
    pub fn secret(&self) -> Result<BigInt> {
        self.value
            .to_integer()
            .ok_or_else(|| ShareError::NonIntegralResult(self.value.clone()))
    }

    pub fn is_consistent(&self) -> bool {
        self.disagreeing.as_ref().map_or(true, |d| d.is_empty())
    }

    /// The secret, provided it is an integer and no checked subset
    /// disagreed with it.
    pub fn verified_secret(&self) -> Result<BigInt> {
        let secret = self.secret()?;
        if let Some(d) = &self.disagreeing {
            if !d.is_empty() {
                return Err(ShareError::InconsistentShares {
                    primary: self.value.clone(),
                    checked: self.checked,
                    disagreeing: d.len(),
                });
            }
        }
        Ok(secret)
    }

    /// Most common constant term across the primary and all checked
    /// subsets, with its vote count. Ties go to the primary value, then
    /// to the smaller value.
    pub fn majority(&self) -> (Rational, usize) {
        let disagreeing: &[SubsetOutcome] = self.disagreeing.as_deref().unwrap_or(&[]);
        let mut votes: HashMap<&Rational, usize> = HashMap::new();
        votes.insert(&self.value, 1 + self.checked - disagreeing.len());
        for outcome in disagreeing {
            *votes.entry(&outcome.value).or_insert(0) += 1;
        }
        let mut best: (&Rational, usize) = (&self.value, votes[&self.value]);
        for (value, count) in votes {
            let better = count > best.1
                || (count == best.1
                    && (value == &self.value || (best.0 != &self.value && value < best.0)));
            if better {
                best = (value, count);
            }
        }
        (best.0.clone(), best.1)
    }
}

/// f(0) of the unique polynomial through `points`.
///
/// Duplicate x values make a basis denominator vanish and come back as
/// `DivisionByZero`.
pub fn interpolate_at_zero(points: &[Point]) -> Result<Rational> {
    if points.is_empty() {
        return Err(ShareError::NotEnoughShares { have: 0, need: 1 });
    }
    let refs: Vec<&Point> = points.iter().collect();
    at_zero(&refs)
}

fn at_zero(points: &[&Point]) -> Result<Rational> {
    let mut sum = Rational::zero();
    for (i, pi) in points.iter().enumerate() {
        let xi = BigInt::from(pi.x);
        let mut numer = BigInt::from(1);
        let mut denom = BigInt::from(1);
        for (j, pj) in points.iter().enumerate() {
            if j == i {
                continue;
            }
            let xj = BigInt::from(pj.x);
            numer *= -&xj;
            denom *= &xi - &xj;
        }
        let basis = Rational::new(numer, denom)?;
        sum = &sum + &(&Rational::from_integer(pi.y.clone()) * &basis);
    }
    Ok(sum)
}

/// Reconstruct f(0) from at least `k` points.
///
/// The primary subset is picked by `config.selection`; with more than `k`
/// points the alternates named by `config.validation` are interpolated too
/// and any disagreement is recorded in the result. Neither a fractional
/// value nor a disagreement is an error here; see
/// [`Reconstruction::verified_secret`].
pub fn reconstruct(points: &[Point], k: usize, config: &Config) -> Result<Reconstruction> {
    if k == 0 {
        return Err(ShareError::InvalidThreshold(k));
    }
    if points.len() < k {
        return Err(ShareError::NotEnoughShares { have: points.len(), need: k });
    }

    let mut sorted: Vec<&Point> = points.iter().collect();
    sorted.sort_by_key(|p| p.x);
    for pair in sorted.windows(2) {
        if pair[0].x == pair[1].x {
            return Err(ShareError::DuplicatePoint(pair[0].x));
        }
    }

    let primary = select_primary(&sorted, k, config.selection)?;
    let subset: Vec<u64> = primary.iter().map(|p| p.x).collect();
    let value = at_zero(&primary)?;
    let is_exact = value.is_integer();
    debug!(subset = ?subset, value = %value, is_exact, "interpolated primary subset");

    if config.cross_check {
        let solved = elimination::solve_subset(&primary)?;
        if solved != value {
            warn!(lagrange = %value, elimination = %solved, "linear solve disagrees with interpolation");
            return Err(ShareError::InconsistentShares { primary: value, checked: 1, disagreeing: 1 });
        }
    }

    let mut checked = 0;
    let mut disagreeing = None;
    if sorted.len() > k && config.validation != Validation::Off {
        let mut bad = Vec::new();
        for alternate in alternate_subsets(sorted.len(), k, config) {
            let chosen: Vec<&Point> = alternate.iter().map(|&i| sorted[i]).collect();
            let xs: Vec<u64> = chosen.iter().map(|p| p.x).collect();
            if xs == subset {
                continue;
            }
            let alt_value = at_zero(&chosen)?;
            checked += 1;
            if alt_value != value {
                warn!(subset = ?xs, value = %alt_value, primary = %value, "share subset disagrees");
                bad.push(SubsetOutcome { xs, value: alt_value });
            }
        }
        debug!(checked, disagreeing = bad.len(), "validated redundant shares");
        disagreeing = Some(bad);
    }

    Ok(Reconstruction { value, is_exact, subset, checked, disagreeing })
}

fn select_primary<'a>(sorted: &[&'a Point], k: usize, selection: Selection) -> Result<Vec<&'a Point>> {
    match selection {
        Selection::SmallestX => Ok(sorted[..k].to_vec()),
        Selection::IndexRange => {
            let chosen: Vec<&Point> = (1..=k as u64)
                .filter_map(|x| sorted.binary_search_by_key(&x, |p| p.x).ok().map(|i| sorted[i]))
                .collect();
            if chosen.len() < k {
                return Err(ShareError::NotEnoughShares { have: chosen.len(), need: k });
            }
            Ok(chosen)
        }
    }
}

/// Index sets (into the x-sorted points) to validate against, produced
/// one at a time.
fn alternate_subsets(n: usize, k: usize, config: &Config) -> Box<dyn Iterator<Item = Vec<usize>>> {
    let exhaustive = match config.validation {
        Validation::Off => return Box::new(std::iter::empty()),
        Validation::Shifted => false,
        Validation::Exhaustive => true,
        Validation::Auto => binomial(n, k) <= config.max_exhaustive_subsets,
    };
    if exhaustive {
        Box::new(Combinations::new(n, k))
    } else {
        Box::new((0..=n - k).map(move |start| (start..start + k).collect()))
    }
}

/// C(n, k), saturating at usize::MAX.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut c: u128 = 1;
    for i in 0..k {
        // exact at every step: c * (n - i) is divisible by i + 1
        c = match c.checked_mul((n - i) as u128) {
            Some(v) => v / (i as u128 + 1),
            None => return usize::MAX,
        };
        if c > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    c as usize
}

/// k-combinations of 0..n in lexicographic order.
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Combinations {
        Combinations { n, indices: (0..k).collect(), done: k > n }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();
        let k = self.indices.len();
        // rightmost index that can still move up
        match (0..k).rev().find(|&i| self.indices[i] != i + self.n - k) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}
