//! Duplex-free Poseidon sponge with an absorbing and a squeezing phase.

use crate::errors::PoseidonError;
use crate::params::PoseidonParams;
use crate::permutation::PoseidonPermutation;

/// A Poseidon sponge over field elements.
///
/// The sponge starts out absorbing. The first [`read`](Poseidon::read)
/// switches it to squeezing for good; absorbing after that is an error.
///
/// Two entry points feed the same state: [`write_ints`](Poseidon::write_ints)
/// takes field elements, [`absorb_bytes`](Poseidon::absorb_bytes) takes bytes
/// and turns every 3 of them into one element.
#[derive(Clone, Debug)]
pub struct Poseidon {
    perm: PoseidonPermutation,
    state: Vec<u32>,
    cursor: usize,
    absorbing: bool,
    /// Up to two bytes waiting for a third.
    pending: Vec<u8>,
}

impl Poseidon {
    /// Empty sponge for `params`.
    pub fn new(params: PoseidonParams) -> Self {
        Self::from_permutation(PoseidonPermutation::new(params))
    }

    /// Sponge that has already absorbed `initial`.
    pub fn with_initial(params: PoseidonParams, initial: &[u32]) -> Self {
        let mut sponge = Self::new(params);
        sponge.absorb(initial);
        sponge
    }

    /// Empty sponge reusing already derived constants.
    pub fn from_permutation(perm: PoseidonPermutation) -> Self {
        let width = perm.params().width;
        Poseidon {
            perm,
            state: vec![0; width],
            cursor: 0,
            absorbing: true,
            pending: Vec::new(),
        }
    }

    pub fn params(&self) -> &PoseidonParams {
        self.perm.params()
    }

    pub fn permutation(&self) -> &PoseidonPermutation {
        &self.perm
    }

    pub fn is_absorbing(&self) -> bool {
        self.absorbing
    }

    /// Adds field elements into the rate, permuting every time it fills up.
    pub fn write_ints(&mut self, fes: &[u32]) -> Result<(), PoseidonError> {
        self.ensure_absorbing()?;
        self.flush_bytes();
        self.absorb(fes);
        Ok(())
    }

    /// Absorbs bytes, 3 little-endian bytes per element, reduced mod the field.
    ///
    /// A trailing partial group is held back until more bytes arrive or the
    /// sponge permutes, at which point it is zero-padded.
    pub fn absorb_bytes(&mut self, bytes: &[u8]) -> Result<(), PoseidonError> {
        self.ensure_absorbing()?;
        self.absorb_bytes_unchecked(bytes);
        Ok(())
    }

    pub(crate) fn absorb_bytes_unchecked(&mut self, bytes: &[u8]) {
        let mut buf = core::mem::take(&mut self.pending);
        buf.extend_from_slice(bytes);
        let full = buf.len() - buf.len() % 3;
        let fes: Vec<u32> = buf[..full]
            .chunks_exact(3)
            .map(|b| self.to_fe(b))
            .collect();
        self.absorb(&fes);
        self.pending = buf[full..].to_vec();
    }

    /// Forces a permutation if anything was absorbed since the last one.
    ///
    /// Used to separate two absorbed segments.
    pub fn permute(&mut self) -> Result<(), PoseidonError> {
        self.ensure_absorbing()?;
        self.flush_bytes();
        if self.cursor != 0 {
            self.perm.permute_slice(&mut self.state);
            self.cursor = 0;
        }
        Ok(())
    }

    /// Squeezes `n` field elements.
    pub fn read(&mut self, mut n: usize) -> Vec<u32> {
        let rate = self.params().rate;
        if self.absorbing {
            self.flush_bytes();
            self.absorbing = false;
            if self.cursor != 0 {
                self.perm.permute_slice(&mut self.state);
                self.cursor = 0;
            }
        }

        let mut out = Vec::with_capacity(n);
        while n > 0 {
            let take = n.min(rate - self.cursor);
            out.extend_from_slice(&self.state[self.cursor..self.cursor + take]);
            n -= take;
            self.cursor += take;
            if self.cursor == rate {
                self.cursor = 0;
                self.perm.permute_slice(&mut self.state);
            }
        }
        out
    }

    /// The first `n` state words as they are, without moving the cursor or
    /// changing phase.
    pub fn read_raw(&self, n: usize) -> Result<&[u32], PoseidonError> {
        let rate = self.params().rate;
        if n > rate {
            return Err(PoseidonError::ReadTooWide { requested: n, rate });
        }
        Ok(&self.state[..n])
    }

    /// Permutes the state unconditionally, regardless of phase and cursor.
    pub fn permute_state(&mut self) {
        self.perm.permute_slice(&mut self.state);
    }

    /// Back to an empty absorbing sponge with the same constants.
    pub fn reset(&mut self) {
        self.state.iter_mut().for_each(|s| *s = 0);
        self.cursor = 0;
        self.absorbing = true;
        self.pending.clear();
    }

    fn ensure_absorbing(&self) -> Result<(), PoseidonError> {
        if !self.absorbing {
            return Err(PoseidonError::AbsorbAfterSqueeze);
        }
        Ok(())
    }

    fn absorb(&mut self, fes: &[u32]) {
        let q = self.params().modulus as u64;
        let rate = self.params().rate;
        for &fe in fes {
            let slot = &mut self.state[self.cursor];
            *slot = ((*slot as u64 + fe as u64) % q) as u32;
            self.cursor += 1;
            if self.cursor == rate {
                self.perm.permute_slice(&mut self.state);
                self.cursor = 0;
            }
        }
    }

    fn flush_bytes(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut group = [0u8; 3];
        group[..self.pending.len()].copy_from_slice(&self.pending);
        self.pending.clear();
        let fe = self.to_fe(&group);
        self.absorb(&[fe]);
    }

    fn to_fe(&self, b: &[u8]) -> u32 {
        u32::from_le_bytes([b[0], b[1], b[2], 0]) % self.params().modulus
    }
}

impl Default for Poseidon {
    fn default() -> Self {
        Self::new(PoseidonParams::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_output() {
        let mut h = Poseidon::default();
        h.write_ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        assert_eq!(
            h.read(12),
            vec![
                6536030, 3314963, 2650912, 4721503, 6059075, 2587541, 3086713, 2570528, 6708627,
                5606978, 2115938, 1138181
            ]
        );
    }

    #[test]
    fn test_initial_values_match_write() {
        let mut a = Poseidon::with_initial(PoseidonParams::DEFAULT, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let mut b = Poseidon::default();
        b.write_ints(&[1, 2, 3, 4, 5]).unwrap();
        b.write_ints(&[6, 7, 8, 9]).unwrap();
        assert_eq!(a.read(30), b.read(30));
    }

    #[test]
    fn test_empty_read_is_zero() {
        // nothing absorbed, so the first read does not permute
        assert_eq!(Poseidon::default().read(4), vec![0; 4]);
    }

    #[test]
    fn test_full_block_permutes_on_write() {
        let mut h = Poseidon::default();
        h.write_ints(&[0; 24]).unwrap();
        assert_eq!(h.read(3), vec![2920311, 150621, 4042159]);
    }

    #[test]
    fn test_read_spans_blocks() {
        let mut a = Poseidon::default();
        a.write_ints(&[5]).unwrap();
        let long = a.read(30);

        let mut b = Poseidon::default();
        b.write_ints(&[5]).unwrap();
        let mut split = b.read(20);
        split.extend(b.read(10));
        assert_eq!(long, split);
    }

    #[test]
    fn test_no_absorb_after_squeeze() {
        let mut h = Poseidon::default();
        h.write_ints(&[1]).unwrap();
        let _ = h.read(1);
        assert!(!h.is_absorbing());
        assert_eq!(h.write_ints(&[2]), Err(PoseidonError::AbsorbAfterSqueeze));
        assert_eq!(h.permute(), Err(PoseidonError::AbsorbAfterSqueeze));
        assert_eq!(h.absorb_bytes(b"x"), Err(PoseidonError::AbsorbAfterSqueeze));
    }

    #[test]
    fn test_permute_separates_segments() {
        let mut a = Poseidon::default();
        a.write_ints(&[1, 2]).unwrap();
        a.permute().unwrap();
        a.write_ints(&[3]).unwrap();

        let mut b = Poseidon::default();
        b.write_ints(&[1, 2, 3]).unwrap();
        assert_ne!(a.read(4), b.read(4));

        // a forced permutation with nothing pending is a no-op
        let mut c = Poseidon::default();
        c.permute().unwrap();
        c.write_ints(&[1, 2, 3]).unwrap();
        let mut d = Poseidon::default();
        d.write_ints(&[1, 2, 3]).unwrap();
        assert_eq!(c.read(4), d.read(4));
    }

    #[test]
    fn test_read_raw() {
        let mut h = Poseidon::with_initial(PoseidonParams::DEFAULT, &[7, 8]);
        assert_eq!(h.read_raw(3).unwrap(), &[7, 8, 0]);
        assert_eq!(
            h.read_raw(25),
            Err(PoseidonError::ReadTooWide {
                requested: 25,
                rate: 24
            })
        );
        h.permute_state();
        let raw = h.read_raw(24).unwrap().to_vec();
        assert_ne!(raw[..2], [7, 8]);
        // still absorbing after an explicit state permutation
        assert!(h.is_absorbing());
    }

    #[test]
    fn test_bytes_match_ints() {
        let mut a = Poseidon::default();
        a.absorb_bytes(&[1, 0]).unwrap();
        a.absorb_bytes(&[0, 2, 0, 0]).unwrap();

        let mut b = Poseidon::default();
        b.write_ints(&[1, 2]).unwrap();
        assert_eq!(a.read(12), b.read(12));

        // a dangling byte is zero-padded into one element
        let mut c = Poseidon::default();
        c.absorb_bytes(&[9]).unwrap();
        let mut d = Poseidon::default();
        d.write_ints(&[9]).unwrap();
        assert_eq!(c.read(12), d.read(12));
    }

    #[test]
    fn test_reset() {
        let mut h = Poseidon::default();
        h.write_ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        let first = h.read(12);
        h.reset();
        h.write_ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        assert_eq!(h.read(12), first);
    }
}
