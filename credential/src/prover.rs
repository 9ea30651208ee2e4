//! The seam to the external zero-knowledge signature prover.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zkdilithium::{Signature, VerifyingKey};

use crate::commitment::RandomCommitment;
use crate::errors::CredentialError;
use crate::witness::SignatureWitness;

/// A proof system for "I hold a valid issuer signature on the root that
/// this commitment opens to".
///
/// Implementations wrap an external prover; this crate only builds the
/// witness and carries the proof bytes.
pub trait SignatureProver {
    /// Produces an opaque proof for `witness`.
    fn prove(&self, witness: &SignatureWitness) -> Result<Vec<u8>, CredentialError>;

    /// Checks `proof` against the public commitment and its nonce.
    fn verify(&self, proof: &[u8], commitment: &[u32], nonce: &[u32]) -> bool;
}

/// A proof of signature possession, bound to a commitment of the signed root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureProof {
    pub proof: Vec<u8>,
    pub commitment: RandomCommitment,
}

impl SignatureProof {
    /// Commits to `root` under a fresh nonce and proves knowledge of
    /// `signature` on it.
    pub fn create<P, R>(
        prover: &P,
        verifying_key: &VerifyingKey,
        signature: &Signature,
        root: &[u8],
        rng: &mut R,
    ) -> Result<Self, CredentialError>
    where
        P: SignatureProver + ?Sized,
        R: Rng,
    {
        let commitment = RandomCommitment::random(root, rng)?;
        let witness = SignatureWitness::new(verifying_key, signature, root, &commitment)?;
        let proof = prover.prove(&witness)?;
        debug!(proof_len = proof.len(), "created signature proof");
        Ok(SignatureProof { proof, commitment })
    }

    pub fn verify<P: SignatureProver + ?Sized>(&self, prover: &P) -> bool {
        prover.verify(&self.proof, &self.commitment.comm, &self.commitment.nonce)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CredentialError> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CredentialError> {
        Ok(postcard::from_bytes(bytes)?)
    }
}
