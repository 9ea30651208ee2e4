//! Coefficient-domain view of a verification, as consumed by the external
//! signature prover.

use lattice::{Poly, PolyVec};
use poseidon::PoseidonPermutation;
use serde::{Deserialize, Serialize};

use crate::challenge::challenge_poly;
use crate::errors::SignatureError;
use crate::keys::VerifyingKey;
use crate::signatures::Signature;

/// The values a verifier computes, split around the reduction by `x^256 + 1`.
///
/// With `A z - t c` computed as an unreduced schoolbook product,
/// `A z - t c = w + (x^256 + 1) * qw`, where `w` is exactly the commitment
/// whose high bits hash to `c_tilde`. An arithmetic circuit can check this
/// relation without an NTT.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationTranscript {
    pub z: PolyVec,
    /// Remainders, `Az_r - t_r`.
    pub w: PolyVec,
    /// Quotients, `Az_q - t_q`.
    pub qw: PolyVec,
    pub c_tilde: Vec<u32>,
    pub c: Poly,
}

impl VerifyingKey {
    /// Expands `sig` into its [`VerificationTranscript`].
    ///
    /// Does not check the signature; call [`VerifyingKey::verify`] for that.
    ///
    /// # Errors
    ///
    /// - [`SignatureError::MalformedInput`] if `z` has the wrong number of
    ///   polynomials for this key
    /// - [`SignatureError::InvalidChallenge`] if `c_tilde` does not expand to
    ///   a challenge polynomial
    pub fn verification_transcript(
        &self,
        sig: &Signature,
    ) -> Result<VerificationTranscript, SignatureError> {
        let params = self.params();
        if sig.z.len() != params.l {
            return Err(SignatureError::MalformedInput {
                expected: params.l,
                actual: sig.z.len(),
            });
        }

        let perm = PoseidonPermutation::new(params.poseidon);
        let c = challenge_poly(&perm, &sig.c_tilde, params)?
            .ok_or(SignatureError::InvalidChallenge)?;

        let (az_q, az_r) = self.matrix().schoolbook_mul(&sig.z);
        let (t_q, t_r) = self.t().schoolbook_scalar_mul(&c);

        Ok(VerificationTranscript {
            z: sig.z.clone(),
            w: &az_r - &t_r,
            qw: &az_q - &t_q,
            c_tilde: sig.c_tilde.clone(),
            c,
        })
    }
}
