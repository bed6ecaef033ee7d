//!
//! log-domain probability scalar
//! implements logaddexp
//!
//! Long marker chains multiply many small probabilities; carried as plain
//! `f64` the product underflows to zero. `Prob` stores the log probability
//! instead, so the high-precision recursion path keeps relative likelihood
//! ratios far past the `f64` range.
//!
use approx::AbsDiffEq;
use once_cell::sync::Lazy;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;

///
/// Wrapper of f64 that represents probability `0 <= p <= 1`,
/// stored as its natural logarithm
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, SerializeDisplay, DeserializeFromStr)]
pub struct Prob(f64);

///
/// short-hand of `Prob::from_prob`
///
pub fn p(p: f64) -> Prob {
    Prob::from_prob(p)
}

///
/// short-hand of `Prob::from_log_prob`
///
pub fn lp(lp: f64) -> Prob {
    Prob::from_log_prob(lp)
}

const MAX_PRECALCULATED_X: usize = 10;
static LN_TABLE: Lazy<[f64; MAX_PRECALCULATED_X]> = Lazy::new(|| {
    let mut v = [0f64; MAX_PRECALCULATED_X];
    for x in 0..MAX_PRECALCULATED_X {
        v[x] = (x as f64).ln();
    }
    v
});

///
/// Faster cached log function `(x as f64).ln()`
///
#[inline]
pub fn ln_int(x: usize) -> f64 {
    // if x is small, return the precalculated
    if x < MAX_PRECALCULATED_X {
        LN_TABLE[x]
    } else {
        (x as f64).ln()
    }
}

impl Prob {
    ///
    /// construct from the probability itself
    ///
    pub fn from_prob(value: f64) -> Prob {
        Prob(value.ln())
    }
    ///
    /// construct from the log probability
    ///
    pub fn from_log_prob(log_value: f64) -> Prob {
        Prob(log_value)
    }
    ///
    /// Get the probability (in `[0, 1]`)
    pub fn to_value(self) -> f64 {
        self.0.exp()
    }
    ///
    /// Get the log probability
    pub fn to_log_value(self) -> f64 {
        self.0
    }
    ///
    /// Is `p == 0` or not? (log p = -inf)
    ///
    pub fn is_zero(self) -> bool {
        self.0.is_infinite() && self.0.is_sign_negative()
    }
    ///
    /// Is `p == 1`? (log p = 0)
    ///
    pub fn is_one(self) -> bool {
        self.0 == 0.0
    }
    ///
    /// prob=0.0
    ///
    pub fn zero() -> Prob {
        Prob(f64::NEG_INFINITY)
    }
    ///
    /// prob=1.0
    ///
    pub fn one() -> Prob {
        Prob(0.0)
    }
    ///
    /// abs diff of two probs `= |p_a - p_b|`
    ///
    pub fn diff(&self, other: Prob) -> f64 {
        (self.to_value() - other.to_value()).abs()
    }
    ///
    /// abs diff of two log probs `= |log p_a - log p_b|`
    ///
    pub fn log_diff(&self, other: Prob) -> f64 {
        if self.is_zero() || other.is_zero() {
            if self.is_zero() && other.is_zero() {
                0.0
            } else {
                f64::INFINITY
            }
        } else {
            (self.to_log_value() - other.to_log_value()).abs()
        }
    }
}

/// p=0 (Prob(-inf)) as a default value
impl Default for Prob {
    fn default() -> Self {
        Prob(f64::NEG_INFINITY)
    }
}

///
/// Prob has multiplicative identity element
/// `num_traits::One`
///
impl num_traits::One for Prob {
    fn one() -> Self {
        Prob::one()
    }
}

///
/// Prob has additive identity element
/// `num_traits::Zero`
///
impl num_traits::Zero for Prob {
    fn zero() -> Self {
        Prob::zero()
    }
    fn is_zero(&self) -> bool {
        Prob::is_zero(*self)
    }
}

// display
impl std::fmt::Display for Prob {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}({:.4})", self.0, self.to_value())
    }
}
impl FromStr for Prob {
    type Err = std::num::ParseFloatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let front = match s.split_once('(') {
            Some((front, _)) => front,
            None => s,
        };
        front.parse::<f64>().map(Prob)
    }
}

/// Addition of two probabilities `px + py` in log space
///
/// If `px > py`:
///
/// ```text
/// log(exp(x) + exp(y))
///  = log(exp(x) (1 + exp(y-x)))
///  = x + log(1 + exp(y-x))
/// ```
impl std::ops::Add for Prob {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let x = self.0;
        let y = other.0;
        let (x, y) = if x >= y { (x, y) } else { (y, x) };
        if y == f64::NEG_INFINITY {
            // x + 0 = x
            Prob(x)
        } else if x == y {
            // x + x = 2x
            Prob(x + 2f64.ln())
        } else {
            Prob(x + (y - x).exp().ln_1p())
        }
    }
}

/// Multiplication of two probabilities `px * py` in log space
///
/// ```text
/// log(px * py) = log(px) + log(py)
/// ```
impl std::ops::Mul for Prob {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Prob(self.0 + other.0)
    }
}

/// Widening multiplication `p * t` by a standard-precision factor
///
/// The narrow operand is converted into log space at the use site, so a
/// `Prob` vector can be propagated through an `f64` transition matrix
/// without ever truncating the accumulator.
impl std::ops::Mul<f64> for Prob {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Prob(self.0 + rhs.ln())
    }
}

/// Division of two probabilities `px / py` in log space
///
/// ```text
/// log(px / py) = log(px) - log(py)
/// ```
impl std::ops::Div for Prob {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        Prob(self.0 - other.0)
    }
}

// assign
impl std::ops::AddAssign for Prob {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
impl std::ops::MulAssign for Prob {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}
// sum/prod
impl std::iter::Sum for Prob {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Prob::from_prob(0.0), |a, b| a + b)
    }
}
impl<'a> std::iter::Sum<&'a Self> for Prob {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Prob::from_prob(0.0), |a, b| a + *b)
    }
}
impl std::iter::Product for Prob {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Prob::from_prob(1.0), |a, b| a * b)
    }
}
impl<'a> std::iter::Product<&'a Self> for Prob {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Prob::from_prob(1.0), |a, b| a * *b)
    }
}

/// Multiplication of Prob and usize `p * c`
///
impl std::ops::Mul<usize> for Prob {
    type Output = Self;
    fn mul(self, rhs: usize) -> Self {
        Prob(self.0 + ln_int(rhs))
    }
}

/// Division of Prob and usize `p / c`
///
impl std::ops::Div<usize> for Prob {
    type Output = Self;
    fn div(self, rhs: usize) -> Self {
        if rhs == 0 {
            panic!("zero division error")
        } else {
            Prob(self.0 - ln_int(rhs))
        }
    }
}

/// for approx `assert_abs_diff_eq`
impl AbsDiffEq for Prob {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

impl Eq for Prob {}
impl Ord for Prob {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}
