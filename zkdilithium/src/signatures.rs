//! Signature type and the Poseidon digests bound into it.

use lattice::{N, POLY_LE_GAMMA1_BYTES, PolyVec, pack_fes, unpack_fes, unpack_fes_loose};
use poseidon::{Poseidon, PoseidonPermutation};
use serde::{Deserialize, Serialize};

use crate::constants::{MU_DOMAIN, Params};
use crate::errors::SignatureError;

/// A zkDilithium signature `(c_tilde, z)`.
///
/// - `c_tilde` is the Poseidon challenge digest of the message digest and
///   the high bits of the commitment `w`
/// - `z = y + c * s1` is the response, with `||z|| < GAMMA1 - BETA`
///
/// The verifier recomputes `w1` from `A z - c t` and accepts if it hashes
/// back to `c_tilde`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub(crate) c_tilde: Vec<u32>,
    pub(crate) z: PolyVec,
}

impl Signature {
    /// The challenge digest.
    pub fn c_tilde(&self) -> &[u32] {
        &self.c_tilde
    }

    /// The response vector.
    pub fn z(&self) -> &PolyVec {
        &self.z
    }

    /// Wire encoding `pack_fes(c_tilde) || pack_le_gamma1(z)`.
    ///
    /// Fails only if `z` does not fit the 18-bit layout, which no signature
    /// produced by [`SigningKey::sign`](crate::SigningKey::sign) does.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SignatureError> {
        let mut out = pack_fes(&self.c_tilde);
        out.extend(self.z.pack_le_gamma1()?);
        Ok(out)
    }

    /// Decodes a signature for `params`, rejecting any `z` outside `GAMMA1`.
    pub fn from_bytes(params: &Params, bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != params.signature_bytes() {
            return Err(SignatureError::MalformedInput {
                expected: params.signature_bytes(),
                actual: bytes.len(),
            });
        }
        let (c_bytes, z_bytes) = bytes.split_at(3 * params.c_size);
        debug_assert_eq!(z_bytes.len(), params.l * POLY_LE_GAMMA1_BYTES);
        Ok(Signature {
            c_tilde: unpack_fes(c_bytes)?,
            z: PolyVec::unpack_le_gamma1(z_bytes, params.l)?,
        })
    }
}

/// Message digest `mu`.
///
/// Absorbs the domain tag and `tr` (loosely encoded), forces a permutation
/// boundary, then absorbs the message as 3-byte field elements.
pub(crate) fn message_digest(
    perm: &PoseidonPermutation,
    tr: &[u8],
    msg: &[u8],
    params: &Params,
) -> Result<Vec<u32>, SignatureError> {
    let msg_fes = unpack_fes(msg)?;

    let mut h = Poseidon::from_permutation(perm.clone());
    h.write_ints(&[MU_DOMAIN])?;
    h.write_ints(&unpack_fes_loose(tr))?;
    h.permute()?;
    h.write_ints(&msg_fes)?;
    Ok(h.read(params.mu_size))
}

/// Challenge digest `c_tilde = Poseidon(mu || w1)`.
///
/// `w1` is absorbed coefficient-major: coefficient `i` of every row before
/// coefficient `i + 1` of any row.
pub(crate) fn hash_challenge(
    perm: &PoseidonPermutation,
    mu: &[u32],
    w1: &PolyVec,
    params: &Params,
) -> Result<Vec<u32>, SignatureError> {
    let mut input = Vec::with_capacity(mu.len() + N * w1.len());
    input.extend_from_slice(mu);
    for i in 0..N {
        input.extend(w1.iter().map(|row| row.coeffs()[i]));
    }

    let mut h = Poseidon::from_permutation(perm.clone());
    h.write_ints(&input)?;
    Ok(h.read(params.c_size))
}
