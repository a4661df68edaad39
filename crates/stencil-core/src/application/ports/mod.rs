//! Application ports (traits) for external dependencies.
//!
//! Adapters in `stencil-adapters` implement these.
//!
//! - `Filesystem`: file operations against the output tree
//! - `AssetSource`: where scaffold template text comes from

pub mod output;

pub use output::{AssetSource, Filesystem};

#[cfg(test)]
pub use output::{MockAssetSource, MockFilesystem};
