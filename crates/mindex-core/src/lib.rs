#[macro_use]
pub mod macros;

pub mod collections;
pub mod config;
pub mod error;
pub mod frame;

// Re-export commonly used items for convenience
pub use eyre;
pub use tracing;

pub use frame::{FrameBits, FrameField, FrameFieldCodec, FrameFieldSet, PackedFrameFields};

// Alias for error types
pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;
