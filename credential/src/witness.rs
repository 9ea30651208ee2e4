//! Witness data for proving knowledge of an issuer signature.

use serde::{Deserialize, Serialize};
use zkdilithium::{Signature, VerifyingKey};

use crate::commitment::{NONCE_LENGTH, RandomCommitment, root_fes};
use crate::errors::CredentialError;

/// Everything the signature circuit consumes, flattened to field elements.
///
/// `z`, `w`, `qw` and `c_tilde` come from the signature's
/// [verification transcript](VerifyingKey::verification_transcript); the
/// remaining fields tie the signed attribute-tree root to a public
/// commitment. `commitment` and `nonce` are public inputs, the rest private.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureWitness {
    /// The response vector, coefficient by coefficient
    pub z: Vec<u32>,
    /// Remainder half of `A z - t c`
    pub w: Vec<u32>,
    /// Quotient half of `A z - t c`
    pub qw: Vec<u32>,
    /// The challenge digest
    pub c_tilde: Vec<u32>,
    /// The signed attribute-tree root as 12 field elements
    pub message: Vec<u32>,
    /// `Poseidon(message || nonce)`
    pub commitment: Vec<u32>,
    /// Blinding input of the commitment gadget, always zero
    pub commitment_randomness: Vec<u32>,
    /// The commitment nonce
    pub nonce: Vec<u32>,
}

impl SignatureWitness {
    /// Creates a witness for `signature` on the 36-byte `root`.
    ///
    /// # Errors
    ///
    /// - [`CredentialError::MalformedInput`] if `root` is not 36 bytes
    /// - [`CredentialError::CommitmentMismatch`] if `commitment` does not
    ///   open to `root`
    /// - [`CredentialError::Signature`] if the signature's challenge digest
    ///   does not expand
    pub fn new(
        verifying_key: &VerifyingKey,
        signature: &Signature,
        root: &[u8],
        commitment: &RandomCommitment,
    ) -> Result<Self, CredentialError> {
        let message = root_fes(root)?;
        if !commitment.opens_to(&message) {
            return Err(CredentialError::CommitmentMismatch);
        }

        let transcript = verifying_key.verification_transcript(signature)?;
        Ok(SignatureWitness {
            z: transcript.z.to_u32s(),
            w: transcript.w.to_u32s(),
            qw: transcript.qw.to_u32s(),
            c_tilde: transcript.c_tilde,
            message,
            commitment: commitment.comm.clone(),
            commitment_randomness: vec![0; NONCE_LENGTH],
            nonce: commitment.nonce.clone(),
        })
    }
}
