//!
//! recombination transition model
//!
use crate::common::{check_order, check_prob, hamming, n_states, Order};
use crate::error::{LinkageError, Result};
use crate::tables::{binomial, rec_num_no_denominator};
use log::debug;
use rayon::prelude::*;

///
/// Probability that exactly `l` of the `m` meioses recombine between two
/// adjacent loci with recombination fraction `rf`.
///
/// Each meiosis recombines independently, so the count follows the binomial
/// law
///
/// ```text
/// P(l | m, rf) = C(m, l) rf^l (1 - rf)^(m - l)
/// ```
///
/// Summed over `l = 0..=m` this is 1.
///
pub fn prob_k1_given_k_l_m(m: Order, l: usize, rf: f64) -> Result<f64> {
    check_order(m)?;
    check_prob(rf)?;
    if l > m {
        return Err(LinkageError::IndexOutOfRange {
            what: "l",
            index: l,
            len: m + 1,
        });
    }
    let c = binomial(m, l) as f64;
    Ok(c * rf.powi(l as i32) * (1.0 - rf).powi((m - l) as i32))
}

///
/// Full transition matrix between inheritance patterns for one locus step.
///
/// Entry `[i][j]` is the recombination-class probability spread uniformly
/// over the states of the class,
///
/// ```text
/// T[i][j] = P(d(i, j) | m, rf) / C(m, d(i, j))
///         = rf^d (1 - rf)^(m - d)
/// ```
///
/// with the class size taken from `rec_num_no_denominator`. Each row sums
/// to 1 and `transition(m, 0)` is the identity. Built once per `(m, rf)`
/// and reused across loci sharing the recombination fraction; rows are
/// filled in parallel.
///
pub fn transition(m: Order, rf: f64) -> Result<Vec<Vec<f64>>> {
    check_order(m)?;
    check_prob(rf)?;
    let n = n_states(m);
    debug!("building transition matrix m={} rf={}", m, rf);
    let prob_l: Vec<f64> = (0..=m)
        .map(|l| prob_k1_given_k_l_m(m, l, rf))
        .collect::<Result<_>>()?;
    let classes = rec_num_no_denominator(m)?;
    let t = (0..n)
        .into_par_iter()
        .map(|i| {
            (0..n)
                .map(|j| prob_l[hamming(i, j)] / classes[i][j] as f64)
                .collect::<Vec<f64>>()
        })
        .collect::<Vec<_>>();
    Ok(t)
}

//
// tests
//
