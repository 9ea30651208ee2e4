//! Grain LFSR used to derive Poseidon round constants.

use crate::params::PoseidonParams;

const MASK_80: u128 = (1 << 80) - 1;

/// Number of clocks discarded after seeding.
const WARMUP: usize = 160;

/// An 80-bit Grain self-shrinking generator.
#[derive(Clone, Debug)]
pub struct Grain {
    state: u128,
}

impl Grain {
    /// Seeds the register from the permutation shape and runs the warm-up.
    pub fn new(params: &PoseidonParams) -> Self {
        let state = ((1u128 << 30) - 1)
            | (params.full_rounds as u128) << 40
            | (params.width as u128) << 50
            | (params.rate as u128) << 62
            | 2u128 << 74
            | 1u128 << 78;

        let mut grain = Grain {
            state: state & MASK_80,
        };
        for _ in 0..WARMUP {
            grain.clock();
        }
        grain
    }

    /// Clocks the register once and returns the new bit.
    fn clock(&mut self) -> u64 {
        let s = self.state;
        let bit = ((s >> 17) ^ (s >> 28) ^ (s >> 41) ^ (s >> 56) ^ (s >> 66) ^ (s >> 79)) & 1;
        self.state = ((s << 1) & MASK_80) | bit;
        bit as u64
    }

    /// Reads `n <= 64` bits, most significant first.
    ///
    /// Bits are clocked in pairs and the second bit is kept only when the
    /// first one is set.
    pub fn read_bits(&mut self, n: u32) -> u64 {
        debug_assert!(n <= 64);
        let mut out = 0u64;
        let mut got = 0;
        while got < n {
            let keep = self.clock();
            let bit = self.clock();
            if keep == 1 {
                out = (out << 1) | bit;
                got += 1;
            }
        }
        out
    }

    /// Next field element, rejecting values `>= modulus`.
    pub fn read_fe(&mut self, params: &PoseidonParams) -> u32 {
        loop {
            let x = self.read_bits(params.field_bits());
            if x < params.modulus as u64 {
                return x as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits_after_warmup() {
        let mut grain = Grain::new(&PoseidonParams::DEFAULT);
        assert_eq!(grain.read_bits(16), 5171);
    }

    #[test]
    fn test_first_field_elements() {
        let params = PoseidonParams::DEFAULT;
        let mut grain = Grain::new(&params);
        let fes: Vec<u32> = (0..4).map(|_| grain.read_fe(&params)).collect();
        assert_eq!(fes, vec![662000, 7104925, 2304656, 2330809]);
    }

    #[test]
    fn test_seed_depends_on_shape() {
        let params = PoseidonParams::DEFAULT;
        let other = PoseidonParams {
            full_rounds: 8,
            ..params
        };
        let a = Grain::new(&params).read_fe(&params);
        let b = Grain::new(&other).read_fe(&other);
        assert_ne!(a, b);
    }
}
