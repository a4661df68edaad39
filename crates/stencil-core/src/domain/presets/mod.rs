//! Managed file presets, one per project type.

mod cdk_construct;

use crate::domain::{DomainError, GenerationContext, ProjectType};

/// Declare every managed file of the context's project type.
///
/// Declarations made before this call for the same paths are replaced.
pub fn declare(ctx: &mut GenerationContext) -> Result<(), DomainError> {
    match ctx.project_type {
        ProjectType::CdkConstruct => cdk_construct::declare(ctx),
    }
}
