//! Deterministic sources the world draws from.
//!
//! Only randomness lives here today; the world owns one boxed [`RngOracle`]
//! through its [`Registry`](crate::state::Registry).
mod rng;

pub use rng::{PcgRng, RngOracle, RollStream, compute_seed};
