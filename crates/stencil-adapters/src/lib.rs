//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all I/O: the local and in-memory filesystems and the scaffold
//! asset sources.

pub mod assets;
pub mod filesystem;

// Re-export commonly used adapters
pub use assets::{ASSETS_DIR_ENV, DirectoryAssets, EmbeddedAssets, resolve_asset_source};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
