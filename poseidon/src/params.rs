use serde::{Deserialize, Serialize};

/// Shape of a Poseidon instance.
///
/// The round constants are a pure function of these four values, so two
/// sponges built from equal parameters always agree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoseidonParams {
    /// Number of full rounds.
    pub full_rounds: usize,
    /// State width in field elements.
    pub width: usize,
    /// Number of state slots absorbed or squeezed per permutation.
    pub rate: usize,
    /// Prime field modulus.
    pub modulus: u32,
}

impl PoseidonParams {
    /// 21 full rounds over a 35-element state with rate 24, modulo `7340033`.
    pub const DEFAULT: Self = PoseidonParams {
        full_rounds: 21,
        width: 35,
        rate: 24,
        modulus: 7_340_033,
    };

    /// Bit length of the modulus; the width of every constant drawn from Grain.
    pub const fn field_bits(&self) -> u32 {
        u32::BITS - (self.modulus - 1).leading_zeros()
    }
}

impl Default for PoseidonParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_bits() {
        assert_eq!(PoseidonParams::DEFAULT.field_bits(), 23);
    }
}
