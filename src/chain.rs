//!
//! forward/backward recursion over the marker chain
//!
//! # Overview of calculation
//!
//! loci k = 0,...,L-1, states s = 0,...,2^m - 1
//!
//! Forward
//! f_k1[j]
//!  = P(data up to locus k+1 and state j at locus k+1)
//!  = sum_{i} f_k[i] T[i][j]   restricted to the selected states
//!
//! Backward
//! b_k[i]
//!  = P(data after locus k | state i at locus k)
//!  = sum_{j} T[i][j] b_k1[j]  restricted to the selected states
//!
//! No rescaling happens inside a step, so long chains underflow the `f64`
//! path; that is the expected degradation the `_highprec` entry points
//! exist for, not an error.
//!
use crate::common::{check_order, n_states, Order};
use crate::error::{LinkageError, Result};
use crate::prob::Prob;
use itertools::izip;
use log::trace;
use num_traits::Zero;

///
/// Accumulator scalar of the recursion.
///
/// The transition matrix stays `f64` in both precision paths; the scalar
/// widens each matrix entry at the use site (`S * f64`), so the precision
/// of the running vector is chosen by the caller and never truncated.
///
pub trait Accumulator:
    Zero + Copy + std::ops::Mul<f64, Output = Self> + std::iter::Sum<Self>
{
}

impl Accumulator for f64 {}
impl Accumulator for Prob {}

///
/// One forward step, locus `k` to locus `k+1`.
///
/// ```text
/// fk1[j] = sum_{i: ik[i] != 0} fk[i] T[i][j]   (ik1[j] != 0)
///        = 0                                   (otherwise)
/// ```
///
/// `ik`/`ik1` are 0/1 selection vectors (rows of `index_func`), realizing
/// the indicator emission weight of the locus pair; real-valued weights
/// from `emit_poly` are folded into the vector by the caller between
/// steps. Generic over the accumulator scalar, see `Accumulator`.
///
pub fn forward_step<S: Accumulator>(
    m: Order,
    fk: &[S],
    ik: &[usize],
    ik1: &[usize],
    t: &[Vec<f64>],
) -> Result<Vec<S>> {
    check_order(m)?;
    let n = n_states(m);
    check_dims(n, fk.len(), ik, ik1, t)?;
    let fk1 = (0..n)
        .map(|j| {
            if ik1[j] == 0 {
                S::zero()
            } else {
                (0..n)
                    .filter(|&i| ik[i] != 0)
                    .map(|i| fk[i] * t[i][j])
                    .sum()
            }
        })
        .collect();
    Ok(fk1)
}

///
/// One backward step, locus `k+1` back to locus `k`.
///
/// ```text
/// bk[i] = sum_{j: ik1[j] != 0} T[i][j] bk1[j]  (ik[i] != 0)
///       = 0                                    (otherwise)
/// ```
///
pub fn backward_step<S: Accumulator>(
    m: Order,
    fk1: &[S],
    ik: &[usize],
    ik1: &[usize],
    t: &[Vec<f64>],
) -> Result<Vec<S>> {
    check_order(m)?;
    let n = n_states(m);
    check_dims(n, fk1.len(), ik, ik1, t)?;
    let bk = (0..n)
        .map(|i| {
            if ik[i] == 0 {
                S::zero()
            } else {
                (0..n)
                    .filter(|&j| ik1[j] != 0)
                    .map(|j| fk1[j] * t[i][j])
                    .sum()
            }
        })
        .collect();
    Ok(bk)
}

///
/// Forward step on standard-precision vectors.
///
pub fn forward(
    m: Order,
    fk: &[f64],
    ik: &[usize],
    ik1: &[usize],
    t: &[Vec<f64>],
) -> Result<Vec<f64>> {
    forward_step(m, fk, ik, ik1, t)
}

///
/// Backward step on standard-precision vectors.
///
pub fn backward(
    m: Order,
    fk1: &[f64],
    ik: &[usize],
    ik1: &[usize],
    t: &[Vec<f64>],
) -> Result<Vec<f64>> {
    backward_step(m, fk1, ik, ik1, t)
}

///
/// Forward step carrying the vector in the log-domain scalar.
///
/// Matrix entries stay `f64` and are widened on use; the extended vector
/// is returned as-is, never truncated back to standard precision.
///
pub fn forward_highprec(
    m: Order,
    fk: &[Prob],
    ik: &[usize],
    ik1: &[usize],
    t: &[Vec<f64>],
) -> Result<Vec<Prob>> {
    forward_step(m, fk, ik, ik1, t)
}

///
/// Backward step carrying the vector in the log-domain scalar.
///
pub fn backward_highprec(
    m: Order,
    fk1: &[Prob],
    ik: &[usize],
    ik1: &[usize],
    t: &[Vec<f64>],
) -> Result<Vec<Prob>> {
    backward_step(m, fk1, ik, ik1, t)
}

///
/// Run the forward recursion over the whole chain.
///
/// `index[k]` is the selection vector of locus `k`; `f0` the starting
/// vector at locus 0. Returns the vector after every step, `tables[k]`
/// belonging to locus `k+1`.
///
pub fn forward_chain<S: Accumulator>(
    m: Order,
    f0: &[S],
    index: &[Vec<usize>],
    t: &[Vec<f64>],
) -> Result<Vec<Vec<S>>> {
    check_order(m)?;
    if index.is_empty() {
        return Err(LinkageError::DimensionMismatch {
            what: "index",
            expected: 1,
            found: 0,
        });
    }
    let mut tables = Vec::with_capacity(index.len() - 1);
    let mut fk = f0.to_vec();
    for k in 0..index.len() - 1 {
        trace!("forward step k={}", k);
        fk = forward_step(m, &fk, &index[k], &index[k + 1], t)?;
        tables.push(fk.clone());
    }
    Ok(tables)
}

///
/// Run the backward recursion over the whole chain.
///
/// `bn` is the starting vector at the last locus. The loci are fed in
/// reverse and the tables re-reversed, so `tables[k]` belongs to locus `k`
/// for `k = 0,...,L-2`.
///
pub fn backward_chain<S: Accumulator>(
    m: Order,
    bn: &[S],
    index: &[Vec<usize>],
    t: &[Vec<f64>],
) -> Result<Vec<Vec<S>>> {
    check_order(m)?;
    if index.is_empty() {
        return Err(LinkageError::DimensionMismatch {
            what: "index",
            expected: 1,
            found: 0,
        });
    }
    let mut tables = Vec::with_capacity(index.len() - 1);
    let mut bk = bn.to_vec();
    for k in (0..index.len() - 1).rev() {
        trace!("backward step k={}", k);
        bk = backward_step(m, &bk, &index[k], &index[k + 1], t)?;
        tables.push(bk.clone());
    }
    // reorder the tables along the chain
    tables.reverse();
    Ok(tables)
}

///
/// Pointwise forward x backward combination at one locus, normalized into
/// a distribution when the total mass is positive.
///
/// Normalization is a downstream concern of the recursion steps, which is
/// why it lives here and not in them.
///
pub fn posterior(fk: &[f64], bk: &[f64]) -> Result<Vec<f64>> {
    if fk.len() != bk.len() {
        return Err(LinkageError::DimensionMismatch {
            what: "backward vector",
            expected: fk.len(),
            found: bk.len(),
        });
    }
    let mut post: Vec<f64> = izip!(fk, bk).map(|(f, b)| f * b).collect();
    let total: f64 = post.iter().sum();
    if total > 0.0 {
        for x in post.iter_mut() {
            *x /= total;
        }
    }
    Ok(post)
}

fn check_dims(
    n: usize,
    state_len: usize,
    ik: &[usize],
    ik1: &[usize],
    t: &[Vec<f64>],
) -> Result<()> {
    if state_len != n {
        return Err(LinkageError::DimensionMismatch {
            what: "state vector",
            expected: n,
            found: state_len,
        });
    }
    if ik.len() != n {
        return Err(LinkageError::DimensionMismatch {
            what: "ik",
            expected: n,
            found: ik.len(),
        });
    }
    if ik1.len() != n {
        return Err(LinkageError::DimensionMismatch {
            what: "ik1",
            expected: n,
            found: ik1.len(),
        });
    }
    if t.len() != n {
        return Err(LinkageError::DimensionMismatch {
            what: "transition rows",
            expected: n,
            found: t.len(),
        });
    }
    for row in t {
        if row.len() != n {
            return Err(LinkageError::DimensionMismatch {
                what: "transition columns",
                expected: n,
                found: row.len(),
            });
        }
    }
    Ok(())
}

//
// tests
//
