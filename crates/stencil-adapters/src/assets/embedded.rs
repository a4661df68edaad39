//! Assets compiled into the binary.

use std::path::PathBuf;

use stencil_core::{
    application::{ApplicationError, ports::AssetSource},
    error::StencilResult,
};

macro_rules! asset {
    ($project:literal, $file:literal) => {
        (
            $project,
            $file,
            include_str!(concat!("../../assets/", $project, "/", $file)),
        )
    };
}

/// `(project_dir, file, content)` for every built-in asset.
const BUILTIN: &[(&str, &str, &str)] = &[
    asset!("cdk-construct", "src_index.ts"),
    asset!("cdk-construct", "src_placeholder.ts"),
    asset!("cdk-construct", "test_index.test.ts"),
    asset!("cdk-construct", "integ_integ.placeholder.ts"),
    asset!("cdk-construct", "integ_test-handler.ts"),
    asset!("cdk-construct", "docs_placeholder.drawio"),
    asset!("cdk-construct", "examples_simple_main.ts"),
    asset!("cdk-construct", "src_crd-example.ts"),
    asset!("cdk-construct", "src_crd-example.lambda.ts"),
    asset!("cdk-construct", "test_crd-example.test.ts"),
];

/// The built-in asset set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl EmbeddedAssets {
    pub fn new() -> Self {
        Self
    }
}

impl AssetSource for EmbeddedAssets {
    fn read(&self, project_dir: &str, file: &str) -> StencilResult<String> {
        BUILTIN
            .iter()
            .find(|(d, f, _)| *d == project_dir && *f == file)
            .map(|(_, _, content)| content.to_string())
            .ok_or_else(|| {
                ApplicationError::AssetMissing {
                    path: PathBuf::from(project_dir).join(file),
                    reason: "not a built-in asset".into(),
                }
                .into()
            })
    }

    fn describe(&self) -> String {
        "built-in".into()
    }
}
