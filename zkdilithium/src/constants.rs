//! Parameter sets and fixed sizes of the zkDilithium signature scheme.

use lattice::{GAMMA2, N, POLY_BYTES, POLY_LE_GAMMA1_BYTES, POLY_LEQ_ETA_BYTES, Q};
use poseidon::PoseidonParams;
use serde::{Deserialize, Serialize};

use crate::errors::SignatureError;

/// Size of the key generation seed in bytes.
pub const SEED_SIZE: usize = 32;

/// Size of the public matrix seed `rho` in bytes.
pub const RHO_SIZE: usize = 32;

/// Size of the private challenge-nonce seed in bytes.
pub const CNS_SIZE: usize = 32;

/// Size of `tr = H(rho || pack(t))` in bytes.
pub(crate) const TR_SIZE: usize = 32;

/// Size of the secret-vector seed `rho2` in bytes.
pub(crate) const RHO2_SIZE: usize = 64;

/// Size of the per-message masking seed `rho'` in bytes.
pub(crate) const RHO_PRIME_SIZE: usize = 64;

/// Domain tag absorbed before the message digest inputs.
pub(crate) const MU_DOMAIN: u32 = 0;

/// Domain tag absorbed before a challenge digest when expanding it.
pub(crate) const BALL_DOMAIN: u32 = 2;

/// Dimensions and bounds of one zkDilithium instance.
///
/// The ring (`Q`, `N`) and the encoding bounds (`ETA`, `GAMMA1`, `GAMMA2`)
/// are fixed by the `lattice` crate; everything that may vary between
/// instances lives here and is passed explicitly to key generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Params {
    /// Rows of the public matrix, length of `t` and `s2`.
    pub k: usize,
    /// Columns of the public matrix, length of `s1`, `y` and `z`.
    pub l: usize,
    /// Hamming weight of the challenge polynomial.
    pub tau: usize,
    /// `tau * ETA`, the largest coefficient of `c * s`.
    pub beta: u32,
    /// Field elements in the challenge digest.
    pub c_size: usize,
    /// Field elements in the message digest.
    pub mu_size: usize,
    /// Swaps per challenge sampling cycle; `tau` is rounded up to a multiple of it.
    pub cycle_len: usize,
    /// Shape of every Poseidon sponge used by the scheme.
    pub poseidon: PoseidonParams,
}

impl Params {
    /// The zkDilithium parameter set: `K = L = 4`.
    pub const ZK_DILITHIUM: Self = Params {
        k: 4,
        l: 4,
        tau: 40,
        beta: 80,
        c_size: 12,
        mu_size: 24,
        cycle_len: 8,
        poseidon: PoseidonParams::DEFAULT,
    };

    /// A smaller `K = L = 2` instance for tests and benchmarks.
    pub const TOY: Self = Params {
        k: 2,
        l: 2,
        ..Self::ZK_DILITHIUM
    };

    /// Checks that every derived quantity is in range.
    ///
    /// Keys only ever hold validated parameters, so signing and verification
    /// never divide by zero or overflow on a hostile parameter set.
    pub fn validate(&self) -> Result<(), SignatureError> {
        let invalid = |reason| Err(SignatureError::InvalidParams(reason));
        let pos = &self.poseidon;

        if self.k == 0 || self.l == 0 {
            return invalid("matrix dimensions must be nonzero");
        }
        if self.cycle_len == 0 || self.cycle_len >= u32::BITS as usize {
            return invalid("cycle length out of range");
        }
        if self.tau == 0 || self.tau > N || self.ntau() > N {
            return invalid("challenge weight out of range");
        }
        if self.beta >= GAMMA2 {
            return invalid("beta must be below GAMMA2");
        }
        if self.c_size == 0 || self.mu_size == 0 {
            return invalid("digest sizes must be nonzero");
        }
        if pos.modulus != Q {
            return invalid("Poseidon must run over the ring's field");
        }
        if pos.rate >= pos.width || 2 * pos.width >= pos.modulus as usize {
            return invalid("Poseidon width out of range");
        }
        if self.cycle_len >= pos.rate {
            return invalid("challenge cycle does not fit the Poseidon rate");
        }
        Ok(())
    }

    /// `tau` rounded up to a whole number of cycles.
    pub const fn ntau(&self) -> usize {
        self.tau.div_ceil(self.cycle_len) * self.cycle_len
    }

    /// `rho || pack(t)`
    pub const fn public_key_bytes(&self) -> usize {
        RHO_SIZE + self.k * POLY_BYTES
    }

    /// `public key || cns || pack_leq_eta(s1) || pack_leq_eta(s2)`
    pub const fn signing_key_bytes(&self) -> usize {
        self.public_key_bytes() + CNS_SIZE + (self.k + self.l) * POLY_LEQ_ETA_BYTES
    }

    /// `pack_fes(c_tilde) || pack_le_gamma1(z)`
    pub const fn signature_bytes(&self) -> usize {
        3 * self.c_size + self.l * POLY_LE_GAMMA1_BYTES
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::ZK_DILITHIUM
    }
}
