//!
//! combinatorial lookup tables of the recombination model
//!
//! Every table is rebuilt per call and its shape is a function of the model
//! order alone, so an orchestrator that reuses an order can cache the result
//! keyed by `m`. Nothing is memoized here.
//!
use crate::common::{check_order, check_pattern, hamming, n_states, Order, Pattern, Selection};
use crate::error::Result;
use itertools::Itertools;

///
/// binomial coefficient `C(n, k)`
///
/// multiplicative form, exact for every value reachable under `MAX_ORDER`
///
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut c = 1;
    for i in 0..k {
        // exact at every step: c * (n - i) is divisible by (i + 1)
        c = c * (n - i) / (i + 1);
    }
    c
}

///
/// Raw recombination-class counts between every pair of inheritance patterns.
///
/// Entry `[i][j]` is `C(m, d(i, j))`: the number of ways `d(i, j)`
/// recombination events can be placed among the `m` meioses, i.e. the size of
/// the recombination class connecting `i` and `j`. Integer-valued, for exact
/// arithmetic and diagnostics.
///
pub fn rec_num_no_denominator(m: Order) -> Result<Vec<Vec<usize>>> {
    check_order(m)?;
    let n = n_states(m);
    let table = (0..n)
        .map(|i| (0..n).map(|j| binomial(m, hamming(i, j))).collect())
        .collect();
    Ok(table)
}

///
/// Recombination-class weights: the counts of `rec_num_no_denominator`
/// divided by the normalizing denominator `2^m`.
///
/// Entry `[i][j] = C(m, d(i, j)) / 2^m` is the probability of the class
/// under free recombination (`rf = 1/2`), the numerator coefficient of the
/// transition formulas.
///
pub fn rec_num(m: Order) -> Result<Vec<Vec<f64>>> {
    check_order(m)?;
    let n = n_states(m);
    let denom = n as f64;
    let table = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| binomial(m, hamming(i, j)) as f64 / denom)
                .collect()
        })
        .collect();
    Ok(table)
}

///
/// State-selection table derived from the observation vectors.
///
/// Row `v` is the 0/1 selection vector (one flag per state) of a locus whose
/// observed pattern is `v`: state `s` is selected iff it agrees with the
/// phase-folded pattern on every meiosis that is informative anywhere on the
/// chain. Linkage phase is defined only up to a global flip, so the XOR-fold
/// of `p` is absorbed into the pattern; the OR-fold of `q` is the informative
/// mask. Rows of this table are the `ik`/`ik1` vectors of the recursions.
///
/// The shape is `2^m x 2^m`, a function of the order alone; `p` and `q`
/// content only changes the entries.
///
pub fn index_func(m: Order, p: &[Pattern], q: &[Pattern]) -> Result<Vec<Selection>> {
    check_order(m)?;
    for &x in p {
        check_pattern(m, x, "p")?;
    }
    for &x in q {
        check_pattern(m, x, "q")?;
    }
    let n = n_states(m);
    let flip = p.iter().fold(0, |acc, &v| acc ^ v);
    let mask = q.iter().fold(0, |acc, &v| acc | v);
    let mut table = vec![vec![0; n]; n];
    for (v, s) in (0..n).cartesian_product(0..n) {
        if ((v ^ flip) ^ s) & mask == 0 {
            table[v][s] = 1;
        }
    }
    Ok(table)
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinkageError;

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(0, 0), 1);
        assert_eq!(binomial(4, 0), 1);
        assert_eq!(binomial(4, 2), 6);
        assert_eq!(binomial(4, 4), 1);
        assert_eq!(binomial(10, 5), 252);
        assert_eq!(binomial(3, 5), 0);
    }

    #[test]
    fn binomial_row_sums() {
        for n in 0..=10 {
            let sum: usize = (0..=n).map(|k| binomial(n, k)).sum();
            assert_eq!(sum, 1 << n);
        }
    }

    #[test]
    fn rec_num_tables_agree() {
        for m in 1..=4 {
            let n = n_states(m);
            let counts = rec_num_no_denominator(m).unwrap();
            let weights = rec_num(m).unwrap();
            assert_eq!(counts.len(), n);
            assert_eq!(weights.len(), n);
            for i in 0..n {
                assert_eq!(counts[i].len(), n);
                assert_eq!(weights[i].len(), n);
                for j in 0..n {
                    assert_abs_diff_eq!(weights[i][j] * n as f64, counts[i][j] as f64);
                }
            }
        }
    }

    #[test]
    fn rec_num_diagonal_is_no_recombination_class() {
        let counts = rec_num_no_denominator(3).unwrap();
        for i in 0..8 {
            // d(i, i) = 0, a single way
            assert_eq!(counts[i][i], 1);
        }
        // one bit apart: C(3, 1) = 3
        assert_eq!(counts[0b000][0b001], 3);
        // all bits apart: C(3, 3) = 1
        assert_eq!(counts[0b000][0b111], 1);
    }

    #[test]
    fn rec_num_rejects_bad_order() {
        assert!(matches!(
            rec_num(0),
            Err(LinkageError::InvalidModelOrder { .. })
        ));
        assert!(matches!(
            rec_num_no_denominator(11),
            Err(LinkageError::InvalidModelOrder { .. })
        ));
    }

    #[test]
    fn index_func_fully_informative() {
        // all meioses informative at some locus: each pattern selects
        // exactly the matching state (no phase flip, p entries XOR to 0)
        let t = index_func(2, &[0b00, 0b00], &[0b11, 0b01]).unwrap();
        for v in 0..4 {
            for s in 0..4 {
                assert_eq!(t[v][s], if v == s { 1 } else { 0 });
            }
        }
    }

    #[test]
    fn index_func_uninformative_selects_everything() {
        let t = index_func(2, &[0b01, 0b10], &[0b00, 0b00]).unwrap();
        for row in &t {
            assert!(row.iter().all(|&flag| flag == 1));
        }
    }

    #[test]
    fn index_func_phase_flip() {
        // p XOR-folds to 0b1, so pattern v selects state v ^ 0b1
        let t = index_func(1, &[0b1, 0b0], &[0b1]).unwrap();
        assert_eq!(t[0], vec![0, 1]);
        assert_eq!(t[1], vec![1, 0]);
    }

    #[test]
    fn index_func_shape_is_order_only() {
        let t1 = index_func(3, &[0b101, 0b010], &[0b111, 0b011]).unwrap();
        let t2 = index_func(3, &[0, 0, 0, 0, 0], &[1, 1, 1, 1, 1]).unwrap();
        assert_eq!(t1.len(), t2.len());
        for (r1, r2) in t1.iter().zip(t2.iter()) {
            assert_eq!(r1.len(), r2.len());
        }
    }

    #[test]
    fn index_func_rejects_wide_patterns() {
        assert_eq!(
            index_func(2, &[0b100], &[0b00]),
            Err(LinkageError::IndexOutOfRange {
                what: "p",
                index: 0b100,
                len: 4
            })
        );
        assert!(index_func(2, &[0b11], &[0b111]).is_err());
    }
}
