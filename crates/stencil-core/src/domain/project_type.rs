//! Project types: named presets of managed files and scaffold assets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainError, ProjectOptions,
    asset::AssetSpec,
    location::{LocationKind, OutputLocation},
    migration::{self, LegacyDefault},
};

/// Built-in project types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// AWS CDK construct library published to npm.
    CdkConstruct,
}

impl ProjectType {
    pub const ALL: &'static [ProjectType] = &[ProjectType::CdkConstruct];

    pub const fn id(self) -> &'static str {
        match self {
            Self::CdkConstruct => "cdk-construct",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::CdkConstruct => "CDK construct library with integ tests, docs and examples",
        }
    }

    /// Sub-directory of the assets base holding this type's files.
    pub const fn asset_dir(self) -> &'static str {
        self.id()
    }

    /// Scaffold locations in materialization order.
    pub fn locations(self) -> Vec<OutputLocation> {
        match self {
            Self::CdkConstruct => vec![
                OutputLocation::new(LocationKind::Source, "src", ".ts"),
                OutputLocation::new(LocationKind::SourceExample, "src/crd-example", ".ts")
                    .gated_by(LocationKind::Source),
                OutputLocation::new(LocationKind::Test, "test", ".ts"),
                OutputLocation::new(LocationKind::TestExample, "test/crd-example", ".ts")
                    .gated_by(LocationKind::Test),
                OutputLocation::new(LocationKind::IntegTest, "integ-tests", ".ts"),
                OutputLocation::new(
                    LocationKind::IntegTestFunctions,
                    "integ-tests/functions",
                    ".ts",
                )
                .gated_by(LocationKind::IntegTest),
                OutputLocation::new(LocationKind::Docs, "docs", ".drawio"),
                OutputLocation::new(LocationKind::Examples, "examples", ".ts"),
            ],
        }
    }

    /// Scaffold assets written by default.
    pub fn asset_manifest(self) -> &'static [AssetSpec] {
        match self {
            Self::CdkConstruct => CDK_CONSTRUCT_ASSETS,
        }
    }

    /// Assets of the optional custom-resource example.
    pub fn example_manifest(self) -> &'static [AssetSpec] {
        match self {
            Self::CdkConstruct => CDK_CONSTRUCT_CRD_EXAMPLE,
        }
    }

    /// Specs to load for `options`, in manifest order.
    pub fn selected_assets(self, options: &ProjectOptions) -> Vec<AssetSpec> {
        let mut specs = self.asset_manifest().to_vec();
        if options.crd_example {
            specs.extend_from_slice(self.example_manifest());
        }
        specs
    }

    pub fn migrations(self) -> &'static [LegacyDefault] {
        match self {
            Self::CdkConstruct => migration::PROJEN_HELLO,
        }
    }
}

const CDK_CONSTRUCT_ASSETS: &[AssetSpec] = &[
    AssetSpec::new("index source", "src_index.ts", "src/index.ts"),
    AssetSpec::new("placeholder source", "src_placeholder.ts", "src/placeholder.ts"),
    AssetSpec::new("placeholder test", "test_index.test.ts", "test/index.test.ts"),
    AssetSpec::new(
        "integration test",
        "integ_integ.placeholder.ts",
        "integ-tests/integ.placeholder.ts",
    ),
    AssetSpec::new(
        "integration handler",
        "integ_test-handler.ts",
        "integ-tests/functions/test-handler.ts",
    ),
    AssetSpec::new(
        "architecture diagram",
        "docs_placeholder.drawio",
        "docs/placeholder.drawio",
    ),
    AssetSpec::new("simple example", "examples_simple_main.ts", "examples/simple/main.ts"),
];

const CDK_CONSTRUCT_CRD_EXAMPLE: &[AssetSpec] = &[
    AssetSpec::new(
        "custom resource example",
        "src_crd-example.ts",
        "src/crd-example/crd-example.ts",
    ),
    AssetSpec::new(
        "custom resource handler",
        "src_crd-example.lambda.ts",
        "src/crd-example/crd-example.lambda.ts",
    ),
    AssetSpec::new(
        "custom resource test",
        "test_crd-example.test.ts",
        "test/crd-example/crd-example.test.ts",
    ),
];

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cdk-construct" | "cdk" | "awscdk-construct" => Ok(Self::CdkConstruct),
            other => Err(DomainError::UnknownProjectType(other.into())),
        }
    }
}
