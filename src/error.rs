use thiserror::Error;

/// Configuration and construction errors.
/// GNSS domain failures (failed batch solve, lost filter tracking) are never
/// reported through [Error]: they are encoded in the tracker's validity flags.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// UERE scale must be strictly positive.
    #[error("invalid uere scale (must be > 0)")]
    InvalidUere,

    /// The nominal oscillator frequency must be strictly positive.
    #[error("invalid oscillator frequency (must be > 0)")]
    InvalidOscFrequency,
}
