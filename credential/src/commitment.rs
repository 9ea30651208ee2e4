//! Hiding commitment to an attribute-tree root.

use lattice::{Q, unpack_fes};
use poseidon::{Poseidon, PoseidonParams};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::attribute::ATTRIBUTE_BYTES;
use crate::errors::CredentialError;

/// Field elements in a committed root.
pub const ROOT_FES: usize = 12;

/// Field elements in a commitment nonce.
pub const NONCE_LENGTH: usize = 12;

/// Field elements in a commitment.
pub const COMMITMENT_LENGTH: usize = 24;

/// `comm = Poseidon(root || nonce)`, squeezed to [`COMMITMENT_LENGTH`] elements.
///
/// The nonce travels with the commitment so a verifier can pass both to the
/// proof system; it hides the root only as long as it is drawn at random.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomCommitment {
    pub comm: Vec<u32>,
    pub nonce: Vec<u32>,
}

impl RandomCommitment {
    /// Commits to `root_fes` under `nonce`.
    ///
    /// Both inputs must hold exactly 12 field elements.
    pub fn new(root_fes: &[u32], nonce: &[u32]) -> Result<Self, CredentialError> {
        if root_fes.len() != ROOT_FES {
            return Err(CredentialError::MalformedInput {
                expected: ROOT_FES,
                actual: root_fes.len(),
            });
        }
        if nonce.len() != NONCE_LENGTH {
            return Err(CredentialError::MalformedInput {
                expected: NONCE_LENGTH,
                actual: nonce.len(),
            });
        }

        let mut h = Poseidon::new(PoseidonParams::DEFAULT);
        h.write_ints(root_fes)?;
        h.write_ints(nonce)?;
        Ok(RandomCommitment {
            comm: h.read(COMMITMENT_LENGTH),
            nonce: nonce.to_vec(),
        })
    }

    /// Commits to a 36-byte root under a nonce drawn uniformly from `[0, Q)`.
    pub fn random<R: Rng>(root: &[u8], rng: &mut R) -> Result<Self, CredentialError> {
        let root_fes = root_fes(root)?;
        let nonce: Vec<u32> = (0..NONCE_LENGTH).map(|_| rng.random_range(0..Q)).collect();
        Self::new(&root_fes, &nonce)
    }

    /// Recomputes the commitment from a candidate root.
    pub fn opens_to(&self, root_fes: &[u32]) -> bool {
        RandomCommitment::new(root_fes, &self.nonce).is_ok_and(|c| c.comm == self.comm)
    }
}

/// Splits a 36-byte root into its 12 field elements.
pub(crate) fn root_fes(root: &[u8]) -> Result<Vec<u32>, CredentialError> {
    if root.len() != ATTRIBUTE_BYTES {
        return Err(CredentialError::MalformedInput {
            expected: ATTRIBUTE_BYTES,
            actual: root.len(),
        });
    }
    Ok(unpack_fes(root)?)
}
