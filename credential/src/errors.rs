//! Error types for the credential layer.

use lattice::LatticeError;
use poseidon::PoseidonError;
use zkdilithium::SignatureError;

/// Errors raised while building attributes, commitments, witnesses and proofs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// An attribute value does not fit one leaf.
    #[error("attribute of {len} bytes exceeds the {max}-byte limit")]
    AttributeTooLong { len: usize, max: usize },

    /// A root, digest or nonce had the wrong length.
    #[error("malformed input: expected length {expected}, got {actual}")]
    MalformedInput { expected: usize, actual: usize },

    /// A commitment does not open to the root it is paired with.
    #[error("commitment does not open to the signed root")]
    CommitmentMismatch,

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Lattice(#[from] LatticeError),

    #[error(transparent)]
    Poseidon(#[from] PoseidonError),

    /// A proof could not be serialized or deserialized.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The external prover failed.
    #[error("prover error: {0}")]
    Prover(String),
}

impl From<postcard::Error> for CredentialError {
    fn from(err: postcard::Error) -> Self {
        CredentialError::Encoding(err.to_string())
    }
}
