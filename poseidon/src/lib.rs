//! Poseidon over a 23-bit prime field.
//!
//! The permutation runs only full rounds with an inversion S-box and a Cauchy
//! MDS matrix `M[i][j] = 1 / (i + j + 1)`. Round constants come from a Grain
//! LFSR seeded with the permutation shape, so any two parties that agree on
//! [`PoseidonParams`] derive the same instance.
//!
//! # Example
//!
//! ```
//! use poseidon::{Poseidon, PoseidonParams};
//!
//! let mut sponge = Poseidon::new(PoseidonParams::DEFAULT);
//! sponge.write_ints(&[1, 2, 3]).unwrap();
//! let out = sponge.read(12);
//! assert_eq!(out.len(), 12);
//! ```

mod errors;
mod grain;
mod hasher;
mod params;
mod permutation;
mod sponge;

pub use errors::PoseidonError;
pub use grain::Grain;
pub use hasher::{PoseidonHash, DIGEST_FES};
pub use params::PoseidonParams;
pub use permutation::PoseidonPermutation;
pub use sponge::Poseidon;
