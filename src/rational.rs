//! Exact rational numbers over big integers.
//!
//! Every value is kept in lowest terms with a positive denominator, so two
//! rationals are equal exactly when their fields are equal. Operations are
//! pure: they build a new normalised value and never touch their inputs.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{Result, ShareError};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    /// `numer / denom` in lowest terms. A zero denominator is refused.
    pub fn new(numer: BigInt, denom: BigInt) -> Result<Rational> {
        if denom.is_zero() {
            return Err(ShareError::DivisionByZero);
        }
        Ok(Rational::reduce(numer, denom))
    }

    // caller guarantees denom != 0
    fn reduce(numer: BigInt, denom: BigInt) -> Rational {
        let g = numer.gcd(&denom);
        let (mut numer, mut denom) = if g.is_one() {
            (numer, denom)
        } else {
            (numer / &g, denom / &g)
        };
        if denom.sign() == Sign::Minus {
            numer = -numer;
            denom = -denom;
        }
        if numer.is_zero() {
            denom = BigInt::one();
        }
        Rational { numer, denom }
    }

    pub fn from_integer(n: BigInt) -> Rational {
        Rational { numer: n, denom: BigInt::one() }
    }

    pub fn zero() -> Rational {
        Rational::from_integer(BigInt::zero())
    }

    pub fn one() -> Rational {
        Rational::from_integer(BigInt::one())
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    /// The value as an integer, if it is one.
    pub fn to_integer(&self) -> Option<BigInt> {
        if self.is_integer() {
            Some(self.numer.clone())
        } else {
            None
        }
    }

    pub fn abs(&self) -> Rational {
        Rational { numer: self.numer.abs(), denom: self.denom.clone() }
    }

    /// `self / rhs`, failing with `DivisionByZero` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Rational) -> Result<Rational> {
        if rhs.is_zero() {
            return Err(ShareError::DivisionByZero);
        }
        Ok(Rational::reduce(&self.numer * &rhs.denom, &self.denom * &rhs.numer))
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Rational {
        Rational::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Rational {
        Rational::from_integer(BigInt::from(n))
    }
}

impl<'a, 'b> Add<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn add(self, rhs: &'b Rational) -> Rational {
        if self.denom == rhs.denom {
            return Rational::reduce(&self.numer + &rhs.numer, self.denom.clone());
        }
        Rational::reduce(
            &self.numer * &rhs.denom + &rhs.numer * &self.denom,
            &self.denom * &rhs.denom,
        )
    }
}

impl<'a, 'b> Sub<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn sub(self, rhs: &'b Rational) -> Rational {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn mul(self, rhs: &'b Rational) -> Rational {
        Rational::reduce(&self.numer * &rhs.numer, &self.denom * &rhs.denom)
    }
}

impl<'a> Neg for &'a Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational { numer: -&self.numer, denom: self.denom.clone() }
    }
}

// Owned forms forward to the borrowed ones.
impl Add for Rational {
    type Output = Rational;
    fn add(self, rhs: Rational) -> Rational {
        &self + &rhs
    }
}

impl Sub for Rational {
    type Output = Rational;
    fn sub(self, rhs: Rational) -> Rational {
        &self - &rhs
    }
}

impl Mul for Rational {
    type Output = Rational;
    fn mul(self, rhs: Rational) -> Rational {
        &self * &rhs
    }
}

impl Neg for Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        -&self
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Rational) -> Ordering {
        // denominators are positive, so cross-multiplying keeps the order
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}
