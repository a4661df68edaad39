//! Scaffold asset sources.
//!
//! # Resolution order
//!
//! 1. An explicit directory (`--assets-dir` or the `base_assets_directory`
//!    option)
//! 2. **`$STENCIL_ASSETS_DIR`**
//! 3. The assets compiled into the binary
//!
//! A directory source is expected to mirror the built-in layout:
//!
//! ```text
//! assets/
//! └── cdk-construct/
//!     ├── src_index.ts
//!     ├── test_index.test.ts
//!     └── ...
//! ```

mod directory;
mod embedded;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use stencil_core::{application::ports::AssetSource, error::StencilResult};

pub use directory::DirectoryAssets;
pub use embedded::EmbeddedAssets;

/// Environment variable naming an asset directory.
pub const ASSETS_DIR_ENV: &str = "STENCIL_ASSETS_DIR";

/// Pick the asset source following the documented order.
#[instrument(skip_all)]
pub fn resolve_asset_source(explicit: Option<&Path>) -> StencilResult<Box<dyn AssetSource>> {
    resolve_with(explicit, std::env::var_os(ASSETS_DIR_ENV))
}

fn resolve_with(
    explicit: Option<&Path>,
    env_dir: Option<OsString>,
) -> StencilResult<Box<dyn AssetSource>> {
    let candidate = explicit.map(Path::to_path_buf).or_else(|| {
        env_dir
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .inspect(|p| debug!(path = %p.display(), "candidate from $STENCIL_ASSETS_DIR"))
    });

    match candidate {
        Some(base) => {
            let source = DirectoryAssets::new(base)?;
            info!(source = %source.describe(), "Using asset directory");
            Ok(Box::new(source))
        }
        None => {
            debug!("Using built-in assets");
            Ok(Box::new(EmbeddedAssets::new()))
        }
    }
}
