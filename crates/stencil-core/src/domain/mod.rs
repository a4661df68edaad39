//! Domain layer for Stencil.
//!
//! Pure generation rules: project types, options, output locations, legacy
//! migrations and the managed file declarations of each preset. Nothing in
//! here touches the filesystem; I/O goes through the ports defined in
//! [`crate::application::ports`].

pub mod asset;
pub mod common;
pub mod declaration;
pub mod error;
pub mod location;
pub mod migration;
pub mod options;
pub mod presets;
pub mod project_type;

pub use asset::{AssetSpec, AssetTemplate};
pub use common::RelativePath;
pub use declaration::{FileDeclaration, FileKind, GenerationContext, MANAGED_MARKER, Snapshot};
pub use error::DomainError;
pub use location::{LocationKind, MaterializationDecision, OutputLocation, SkipReason, owner_of};
pub use migration::{LegacyDefault, Marker};
pub use options::{OPTION_KEYS, ProjectOptions, ProjectOverrides};
pub use project_type::ProjectType;
