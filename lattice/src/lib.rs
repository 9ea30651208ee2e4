//! Ring arithmetic over `Z_q[x]/(x^256 + 1)` with `q = 7340033`.
//!
//! This crate provides polynomials with a fixed-table NTT, vectors and
//! matrices of polynomials, the bounded byte encodings used by the signature
//! wire format, and the SHAKE-based deterministic samplers. Coefficients are
//! always kept canonical in `[0, Q)`.

mod encoding;
mod errors;
mod field;
mod matrix;
mod ntt;
mod poly;
mod sample;
mod vec;

pub use encoding::{
    pack_fes, unpack_fes, unpack_fes_loose, POLY_BYTES, POLY_LEQ_ETA_BYTES, POLY_LE_GAMMA1_BYTES,
};
pub use errors::LatticeError;
pub use field::{centered_abs, inverse};
pub use matrix::Matrix;
pub use poly::Poly;
pub use sample::{
    sample_leq_eta, sample_mask, sample_matrix, sample_secret, sample_uniform, shake256, xof128,
    xof256,
};
pub use vec::PolyVec;

/// Field modulus, `2^23 - 2^20 + 1`. A primitive 512th root of unity exists.
pub const Q: u32 = 7_340_033;

/// Ring degree.
pub const N: usize = 256;

/// Bound on the coefficients of the secret vectors `s1` and `s2`.
pub const ETA: u32 = 2;

/// Bound on the coefficients of the masking vector and the response `z`.
pub const GAMMA1: u32 = 131_072;

/// Half of the decomposition modulus; `Q - 1 = 56 * 2 * GAMMA2`.
pub const GAMMA2: u32 = 65_536;
