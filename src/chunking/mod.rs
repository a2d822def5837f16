//! Chunking helpers.
//!
//! - **Chunks**: lazy fixed-size chunking of a slice
//! - **Reduce**: folding over chunks rather than single items

pub mod chunks;
pub mod reduce;

pub use chunks::{Chunks, checked_chunk_size, chunks};
pub use reduce::{reduce_in_chunks, try_reduce_in_chunks};
