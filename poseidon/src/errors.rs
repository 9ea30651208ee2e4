//! Error types for the Poseidon sponge.

/// Misuse of the sponge state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoseidonError {
    /// Input was offered after the first read switched the sponge to squeezing.
    #[error("sponge is no longer absorbing")]
    AbsorbAfterSqueeze,

    /// A raw read asked for more words than the rate exposes.
    #[error("raw read of {requested} words exceeds rate {rate}")]
    ReadTooWide { requested: usize, rate: usize },
}
