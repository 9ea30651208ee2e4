//! Error types for ring encodings and vector construction.

/// Errors raised at the byte-encoding boundary of the ring types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LatticeError {
    /// A packed buffer did not have the length its layout requires.
    ///
    /// This is a contract violation of the caller (or the peer that produced
    /// the bytes); nothing is truncated or padded to make it fit.
    #[error("malformed input: expected {expected} bytes, got {actual}")]
    MalformedInput { expected: usize, actual: usize },

    /// A coefficient lies outside the range its encoding covers.
    ///
    /// `le_gamma1` covers `(-bound, bound]`, so `-GAMMA1` is refused with
    /// `norm == bound`.
    #[error("coefficient norm {norm} out of range for bound {bound}")]
    NormExceeded { norm: u32, bound: u32 },
}
