//!
//! globally-available parts
//!
pub use crate::chain::{
    backward, backward_chain, backward_highprec, forward, forward_chain, forward_highprec,
    posterior, Accumulator,
};
pub use crate::common::{n_states, Order, Pattern, Selection, MAX_ORDER};
pub use crate::emission::{emit_poly, init_poly, EMIT_TERMS};
pub use crate::error::{LinkageError, Result};
pub use crate::prob::{lp, p, Prob};
pub use crate::tables::{index_func, rec_num, rec_num_no_denominator};
pub use crate::transition::{prob_k1_given_k_l_m, transition};
