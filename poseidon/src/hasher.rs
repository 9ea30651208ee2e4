//! Byte-oriented [`digest`] front end over the Poseidon sponge.

use digest::consts::U36;
use digest::{FixedOutput, HashMarker, Output, OutputSizeUser, Reset, Update};

use crate::params::PoseidonParams;
use crate::sponge::Poseidon;

/// Number of field elements squeezed for one digest.
pub const DIGEST_FES: usize = 12;

/// Poseidon as a 36-byte hash function over bytes.
///
/// Input bytes are absorbed 3 at a time as field elements; the digest is
/// [`DIGEST_FES`] squeezed elements, 3 little-endian bytes each.
///
/// ```
/// use digest::Digest;
/// use poseidon::PoseidonHash;
///
/// let a = PoseidonHash::digest(b"attribute");
/// let b = PoseidonHash::new().chain_update(b"attri").chain_update(b"bute").finalize();
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug)]
pub struct PoseidonHash {
    sponge: Poseidon,
}

impl PoseidonHash {
    pub fn with_params(params: PoseidonParams) -> Self {
        PoseidonHash {
            sponge: Poseidon::new(params),
        }
    }
}

impl Default for PoseidonHash {
    fn default() -> Self {
        Self::with_params(PoseidonParams::DEFAULT)
    }
}

impl HashMarker for PoseidonHash {}

impl OutputSizeUser for PoseidonHash {
    type OutputSize = U36;
}

impl Update for PoseidonHash {
    fn update(&mut self, data: &[u8]) {
        // finalisation consumes the hasher, so the sponge is always absorbing here
        self.sponge.absorb_bytes_unchecked(data);
    }
}

impl FixedOutput for PoseidonHash {
    fn finalize_into(mut self, out: &mut Output<Self>) {
        let fes = self.sponge.read(DIGEST_FES);
        for (chunk, fe) in out.chunks_exact_mut(3).zip(fes) {
            chunk.copy_from_slice(&fe.to_le_bytes()[..3]);
        }
    }
}

impl Reset for PoseidonHash {
    fn reset(&mut self) {
        self.sponge.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest::Digest;

    #[test]
    fn test_digest_packs_squeezed_elements() {
        let mut sponge = Poseidon::default();
        sponge.write_ints(&[0x030201, 0x060504]).unwrap();
        let fes = sponge.read(DIGEST_FES);

        let out = PoseidonHash::digest([1u8, 2, 3, 4, 5, 6]);
        assert_eq!(out.len(), 36);
        for (i, fe) in fes.iter().enumerate() {
            assert_eq!(&out[3 * i..3 * i + 3], &fe.to_le_bytes()[..3]);
        }
    }

    #[test]
    fn test_reset_matches_fresh() {
        let mut h = PoseidonHash::new();
        Digest::update(&mut h, b"garbage");
        Digest::reset(&mut h);
        Digest::update(&mut h, b"abc");
        assert_eq!(h.finalize(), PoseidonHash::digest(b"abc"));
    }
}
