//!
//! emission polynomial of the genotype observation model
//!
//! The weight of observing the genotype data of a locus pair under a joint
//! inheritance state is a product over meioses of coefficients drawn from
//! the externally supplied weight vector `g`, one coefficient per term
//! class. Which class a meiosis falls in is decided by its informativeness
//! and pattern agreement at the two loci.
//!
use crate::common::{check_order, check_pattern, n_states, Order, Pattern};
use crate::error::{LinkageError, Result};

///
/// number of emission term classes selectable per meiosis:
/// informativeness at the two loci (2 bits) x pattern agreement at the two
/// loci (2 bits)
///
pub const EMIT_TERMS: usize = 16;

///
/// term class of meiosis `j` for destination state `s`, given the observed
/// patterns `a0`/`a1` and informative masks `b0`/`b1` of the locus pair
///
fn term_index(j: usize, s: Pattern, a0: Pattern, a1: Pattern, b0: Pattern, b1: Pattern) -> usize {
    let inf0 = (b0 >> j) & 1;
    let inf1 = (b1 >> j) & 1;
    let agree0 = 1 - ((s ^ a0) >> j & 1);
    let agree1 = 1 - ((s ^ a1) >> j & 1);
    (inf0 << 3) | (inf1 << 2) | (agree0 << 1) | agree1
}

///
/// Base term of the emission polynomial: the weight of a fully
/// uninformative locus pair under a uniform coefficient vector,
///
/// ```text
/// init = d_g^(-m) 2^(-(d_p + d_q))
/// ```
///
/// `d_p`/`d_q` are the paternal and maternal phase degrees (their sum is
/// the `cte` exponent that usually accompanies this constant), `d_g` the
/// number of coefficients of the weight vector.
///
pub fn init_poly(m: Order, d_p: usize, d_q: usize, d_g: usize) -> Result<f64> {
    check_order(m)?;
    if d_g == 0 {
        return Err(LinkageError::DimensionMismatch {
            what: "d_g",
            expected: 1,
            found: 0,
        });
    }
    Ok((d_g as f64).powi(-(m as i32)) * 2f64.powi(-((d_p + d_q) as i32)))
}

///
/// Emission weights of one locus pair, one weight per destination state.
///
/// The polynomial in the coefficient vector `g` is the product over meioses
/// of the coefficient selected by the term class of the meiosis, scaled by
/// the phase-normalization exponent `cte`:
///
/// ```text
/// w[s] = 2^(-cte) prod_j g[t(j, s)]
/// ```
///
/// `ip_k`/`ip_k1` index the observed patterns of the two loci in `p`,
/// `iq_k`/`iq_k1` the informative masks in `q`. Purely functional of its
/// inputs; every index is bound-checked before use.
///
#[allow(clippy::too_many_arguments)]
pub fn emit_poly(
    m: Order,
    cte: i32,
    ip_k: usize,
    ip_k1: usize,
    iq_k: usize,
    iq_k1: usize,
    p: &[Pattern],
    q: &[Pattern],
    g: &[f64],
) -> Result<Vec<f64>> {
    check_order(m)?;
    let a0 = fetch(p, ip_k, "p")?;
    let a1 = fetch(p, ip_k1, "p")?;
    let b0 = fetch(q, iq_k, "q")?;
    let b1 = fetch(q, iq_k1, "q")?;
    check_pattern(m, a0, "p")?;
    check_pattern(m, a1, "p")?;
    check_pattern(m, b0, "q")?;
    check_pattern(m, b1, "q")?;
    if g.len() < EMIT_TERMS {
        return Err(LinkageError::DimensionMismatch {
            what: "g",
            expected: EMIT_TERMS,
            found: g.len(),
        });
    }
    let scale = 2f64.powi(-cte);
    let n = n_states(m);
    let weights = (0..n)
        .map(|s| {
            let poly: f64 = (0..m).map(|j| g[term_index(j, s, a0, a1, b0, b1)]).product();
            scale * poly
        })
        .collect();
    Ok(weights)
}

fn fetch(xs: &[Pattern], index: usize, what: &'static str) -> Result<Pattern> {
    xs.get(index)
        .copied()
        .ok_or(LinkageError::IndexOutOfRange {
            what,
            index,
            len: xs.len(),
        })
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_weight_per_state() {
        let p = vec![0b00, 0b01];
        let q = vec![0b11, 0b10];
        let g = vec![0.5; EMIT_TERMS];
        let w = emit_poly(2, 0, 0, 1, 0, 1, &p, &q, &g).unwrap();
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn scale_exponent() {
        let p = vec![0b0, 0b0];
        let q = vec![0b0, 0b0];
        let g = vec![1.0; EMIT_TERMS];
        let w0 = emit_poly(1, 0, 0, 1, 0, 1, &p, &q, &g).unwrap();
        let w2 = emit_poly(1, 2, 0, 1, 0, 1, &p, &q, &g).unwrap();
        for (x0, x2) in w0.iter().zip(w2.iter()) {
            assert_abs_diff_eq!(x2 * 4.0, *x0);
        }
    }

    #[test]
    fn matches_init_poly_when_uninformative() {
        let m = 3;
        let (d_p, d_q, d_g) = (2, 1, 4);
        let g = vec![1.0 / d_g as f64; EMIT_TERMS];
        let p = vec![0, 0];
        let q = vec![0, 0];
        let w = emit_poly(m, (d_p + d_q) as i32, 0, 1, 0, 1, &p, &q, &g).unwrap();
        let base = init_poly(m, d_p, d_q, d_g).unwrap();
        for &x in &w {
            assert_abs_diff_eq!(x, base, epsilon = 1e-15);
        }
    }

    #[test]
    fn ignores_unselected_coefficients() {
        // masks zero: only the inf0=inf1=0 classes (indices 0..4) are read
        let p = vec![0b00, 0b01];
        let q = vec![0b00, 0b00];
        let mut g: Vec<f64> = (0..EMIT_TERMS).map(|t| 0.1 + t as f64 * 0.05).collect();
        let w1 = emit_poly(2, 1, 0, 1, 0, 1, &p, &q, &g).unwrap();
        for x in g.iter_mut().skip(4) {
            *x = 999.0;
        }
        let w2 = emit_poly(2, 1, 0, 1, 0, 1, &p, &q, &g).unwrap();
        assert_eq!(w1, w2);
    }

    #[test]
    fn depends_on_selected_coefficients() {
        let p = vec![0b00, 0b01];
        let q = vec![0b11, 0b11];
        let mut g = vec![0.5; EMIT_TERMS];
        let w1 = emit_poly(2, 0, 0, 1, 0, 1, &p, &q, &g).unwrap();
        // both loci informative: classes 12..16 are selected
        g[15] = 0.9;
        let w2 = emit_poly(2, 0, 0, 1, 0, 1, &p, &q, &g).unwrap();
        assert_ne!(w1, w2);
    }

    #[test]
    fn bound_checks() {
        let p = vec![0b0, 0b0];
        let q = vec![0b0];
        let g = vec![1.0; EMIT_TERMS];
        // locus index past the end of p
        assert_eq!(
            emit_poly(1, 0, 0, 2, 0, 0, &p, &q, &g),
            Err(LinkageError::IndexOutOfRange {
                what: "p",
                index: 2,
                len: 2
            })
        );
        // locus index past the end of q
        assert!(emit_poly(1, 0, 0, 1, 0, 1, &p, &q, &g).is_err());
        // coefficient vector too short
        assert_eq!(
            emit_poly(1, 0, 0, 1, 0, 0, &p, &q, &g[..4]),
            Err(LinkageError::DimensionMismatch {
                what: "g",
                expected: EMIT_TERMS,
                found: 4
            })
        );
        // pattern with bits above the order
        let wide = vec![0b10, 0b0];
        assert!(emit_poly(1, 0, 0, 1, 0, 0, &wide, &q, &g).is_err());
    }

    #[test]
    fn init_poly_values() {
        assert_abs_diff_eq!(init_poly(1, 0, 0, 1).unwrap(), 1.0);
        assert_abs_diff_eq!(init_poly(2, 1, 1, 2).unwrap(), 0.0625);
        assert!(matches!(
            init_poly(2, 1, 1, 0),
            Err(LinkageError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            init_poly(0, 1, 1, 2),
            Err(LinkageError::InvalidModelOrder { .. })
        ));
    }
}
