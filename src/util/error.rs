use thiserror::Error;

/// Construction-time validation failures.
///
/// Nothing in the per-frame path returns these; once a pool, timer or layer exists its
/// operations cannot fail.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("pool capacity must be non-zero")]
    ZeroCapacity,

    #[error("spawn threshold must be positive and finite, got {0}")]
    InvalidThreshold(f32),

    #[error("spawn range {min}..{max} is empty")]
    EmptyRange { min: f32, max: f32 },

    #[error("a parallax group needs at least 2 sprites, got {0}")]
    GroupTooSmall(usize),

    #[error("sprite width {width} must exceed the overlap {overlap}")]
    OverlapTooWide { width: f32, overlap: f32 },
}
