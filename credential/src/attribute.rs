//! Credential attributes and their leaf hash.

use digest::Digest;
use poseidon::PoseidonHash;
use serde::{Deserialize, Serialize};

use crate::errors::CredentialError;

/// Largest attribute value, and the size of a leaf hash, in bytes.
pub const ATTRIBUTE_BYTES: usize = 36;

/// One attribute of a credential, a leaf of the attribute tree.
///
/// Two attributes are equal when their stored bytes are equal; values that
/// differ only in trailing zeros are distinct attributes with the same hash.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    value: Vec<u8>,
}

impl Attribute {
    /// Wraps `value`, which must fit in [`ATTRIBUTE_BYTES`].
    pub fn new(value: impl Into<Vec<u8>>) -> Result<Self, CredentialError> {
        let value = value.into();
        if value.len() > ATTRIBUTE_BYTES {
            return Err(CredentialError::AttributeTooLong {
                len: value.len(),
                max: ATTRIBUTE_BYTES,
            });
        }
        Ok(Attribute { value })
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Leaf hash of the attribute.
    ///
    /// The value is zero-padded to 36 bytes, read as 12 field elements,
    /// absorbed into a fresh Poseidon sponge, and 12 squeezed elements are
    /// packed back into 36 bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use credential::Attribute;
    ///
    /// let short = Attribute::new(b"name".to_vec()).unwrap();
    /// let padded = Attribute::new(b"name\0\0".to_vec()).unwrap();
    /// assert_ne!(short, padded);
    /// assert_eq!(short.calculate_hash(), padded.calculate_hash());
    /// ```
    pub fn calculate_hash(&self) -> [u8; ATTRIBUTE_BYTES] {
        let mut padded = [0u8; ATTRIBUTE_BYTES];
        padded[..self.value.len()].copy_from_slice(&self.value);
        let mut out = [0u8; ATTRIBUTE_BYTES];
        out.copy_from_slice(&PoseidonHash::digest(padded));
        out
    }
}

impl TryFrom<&[u8]> for Attribute {
    type Error = CredentialError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Attribute::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice::{pack_fes, unpack_fes};
    use poseidon::{Poseidon, PoseidonParams};

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_hash_vectors() {
        let attr = Attribute::new(b"attr0".to_vec()).unwrap();
        assert_eq!(
            hex(&attr.calculate_hash()),
            "635f66a1225ed7e3552e1c4772ed69ed990b1f3a6fc8fa465aed31e4354f61d311d79631"
        );

        let empty = Attribute::new(Vec::new()).unwrap();
        assert_eq!(
            hex(&empty.calculate_hash()),
            "778f2c5d4c02afad3dce76178e1d079b4b2e2e0748c886307aa405b1c866ad7f6d84a717"
        );
    }

    #[test]
    fn test_hash_matches_field_sponge() {
        let attr = Attribute::new(b"date-of-birth:1990-01-01".to_vec()).unwrap();

        let mut padded = attr.value().to_vec();
        padded.resize(ATTRIBUTE_BYTES, 0);
        let mut sponge = Poseidon::new(PoseidonParams::DEFAULT);
        sponge.write_ints(&unpack_fes(&padded).unwrap()).unwrap();
        let expected = pack_fes(&sponge.read(12));

        assert_eq!(attr.calculate_hash().as_slice(), expected.as_slice());
    }

    #[test]
    fn test_padding_equivalence() {
        let a = Attribute::new(b"x".to_vec()).unwrap();
        let b = Attribute::new(b"x\0\0\0".to_vec()).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.calculate_hash(), b.calculate_hash());
        assert_ne!(
            a.calculate_hash(),
            Attribute::new(b"y".to_vec()).unwrap().calculate_hash()
        );
    }

    #[test]
    fn test_too_long() {
        assert!(Attribute::new(vec![1u8; ATTRIBUTE_BYTES]).is_ok());
        assert_eq!(
            Attribute::new(vec![1u8; ATTRIBUTE_BYTES + 1]),
            Err(CredentialError::AttributeTooLong { len: 37, max: 36 })
        );
        assert!(Attribute::try_from([0u8; 40].as_slice()).is_err());
    }
}
