//! Errors the library can surface at construction time.

use thiserror::Error;

/// Precondition violations detected when building bitmaps and models.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A bitmap was requested with a zero width or height.
    #[error("bitmap dimensions must be positive, got {width}x{height}")]
    EmptyBitmap {
        /// The requested width.
        width: u32,
        /// The requested height.
        height: u32,
    },

    /// A raw pixel buffer does not hold exactly `4 * width * height` bytes.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch {
        /// The number of bytes implied by the dimensions.
        expected: usize,
        /// The number of bytes actually provided.
        actual: usize,
    },

    /// The initial canvas passed to a model does not match the target size.
    #[error(
        "initial canvas is {initial_width}x{initial_height}, \
         but the target is {target_width}x{target_height}"
    )]
    DimensionMismatch {
        /// Width of the target bitmap.
        target_width: u32,
        /// Height of the target bitmap.
        target_height: u32,
        /// Width of the initial canvas.
        initial_width: u32,
        /// Height of the initial canvas.
        initial_height: u32,
    },
}
