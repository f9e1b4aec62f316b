//! Error types for loading volumes and writing images.

use thiserror::Error;

/// Errors that can occur while constructing a volume.
#[derive(Error, Debug)]
pub enum VolumeError {
    /// I/O error reading a metadata or voxel file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The metadata text doesn't follow the record syntax.
    #[error("Malformed volume metadata: {0}")]
    Metadata(String),

    /// A required record is absent from the metadata.
    #[error("Missing {0} record in volume metadata")]
    MissingRecord(&'static str),

    /// A resolution component is zero or the voxel count overflows.
    #[error("Invalid resolution {0:?}")]
    InvalidResolution([usize; 3]),

    /// A slice thickness component is not a positive finite number.
    #[error("Invalid slice thickness {0:?}")]
    InvalidThickness([f64; 3]),

    /// The world-space scale is not a positive finite number.
    #[error("Invalid scale {0}")]
    InvalidScale(f64),

    /// The voxel payload doesn't match the resolution.
    #[error("Expected {expected} voxel bytes, got {actual}")]
    VoxelCount {
        /// Product of the three resolution components.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },
}

/// Errors that can occur while rendering or storing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Width or height is zero.
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Encoding or writing the output image failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A render worker thread panicked.
    #[error("Render worker panicked")]
    WorkerPanic,
}
