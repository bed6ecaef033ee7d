//!
//! linkhmm: forward-backward primitives for multipoint linkage analysis
//!
//! # Overview of calculation
//!
//! loci k = 0,...,L-1 along a chromosome, recombination fraction rf between
//! adjacent loci, model order m meioses
//!
//! Transition
//! T[i][j]
//!  = P(inheritance pattern j at locus k+1 | pattern i at locus k)
//!  = rf^d (1-rf)^(m-d) with d = popcount(i ^ j)
//!
//! Emission
//! w[s]
//!  = weight of the genotype observations of a locus pair under state s,
//!    a polynomial in the external coefficient vector g
//!
//! Forward / Backward
//! f_k[s], b_k[s]
//!  = partial path probability up to / from locus k, one entry per state,
//!    propagated through T restricted to the selected states;
//!    combined pointwise into the posterior at each locus
//!
pub mod chain;
pub mod common;
pub mod emission;
pub mod error;
pub mod prelude;
pub mod prob;
pub mod tables;
pub mod transition;

#[macro_use]
extern crate approx;
