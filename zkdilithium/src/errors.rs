//! Error types for the zkDilithium signature scheme.

use lattice::LatticeError;
use poseidon::PoseidonError;

/// Errors that can occur while generating keys, signing or decoding.
///
/// Verification never returns one of these: a signature either verifies or
/// it does not.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// A ring encoding was the wrong size or out of bounds.
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// A Poseidon sponge was driven out of order.
    #[error(transparent)]
    Poseidon(#[from] PoseidonError),

    /// A seed, key or signature had the wrong length.
    #[error("malformed input: expected length {expected}, got {actual}")]
    MalformedInput { expected: usize, actual: usize },

    /// A parameter set would make signing or verification ill-defined.
    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),

    /// The challenge digest does not expand to a challenge polynomial.
    #[error("challenge digest does not expand to a challenge polynomial")]
    InvalidChallenge,

    /// Every 16-bit masking nonce was used before a signature was accepted.
    ///
    /// Nonces are never reused, so signing gives up instead of wrapping.
    #[error("masking nonces exhausted after {attempts} attempts")]
    NonceSpaceExhausted { attempts: usize },
}
