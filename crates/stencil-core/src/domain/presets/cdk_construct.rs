//! Managed files of the CDK construct library preset.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;

use crate::domain::{
    DomainError, FileDeclaration, GenerationContext, ProjectOptions, declaration::MANAGED_MARKER,
};

const BUG_REPORT: &str = include_str!("../../../files/github_bug_report.md");
const FEATURE_REQUEST: &str = include_str!("../../../files/github_feature_request.md");
const PULL_REQUEST: &str = include_str!("../../../files/github_pull_request.md");
const README_CTA: &str = include_str!("../../../files/github_readme_cta.md");

const GITIGNORE_BASE: &[&str] = &[
    "node_modules/",
    "lib/",
    "dist/",
    "coverage/",
    "cdk.out/",
    "test-reports/",
    "junit.xml",
    ".jsii",
    "tsconfig.json",
    "*.tsbuildinfo",
    "tmp",
    ".codegpt",
];

/// Commit types that make a push to the release branch publish.
const RELEASABLE_COMMIT_TYPES: &[&str] = &["feat", "fix", "chore", "refactor", "perf"];

/// `(type, changelog section)`; `None` hides the type from the changelog.
const CHANGELOG_TYPES: &[(&str, Option<&str>)] = &[
    ("feat", Some("Features")),
    ("fix", Some("Bug Fixes")),
    ("chore", Some("Chores")),
    ("docs", Some("Docs")),
    ("style", None),
    ("refactor", None),
    ("perf", Some("Performance")),
    ("test", None),
];

/// Index in the build job's steps where `Run awslint` is inserted.
const LINT_STEP_INDEX: usize = 4;

pub(crate) fn declare(ctx: &mut GenerationContext) -> Result<(), DomainError> {
    let options = ctx.options.clone();
    let name = options.require_name()?.to_string();

    ctx.declare(readme(&name));
    ctx.declare(FileDeclaration::lines(
        ".commitlintrc.js",
        ["module.exports = { extends: ['@commitlint/config-conventional'] };"],
    ));
    ctx.declare(FileDeclaration::lines(
        ".github/ISSUE_TEMPLATE/bug_report.md",
        [BUG_REPORT],
    ));
    ctx.declare(FileDeclaration::lines(
        ".github/ISSUE_TEMPLATE/feature_request.md",
        [FEATURE_REQUEST],
    ));
    ctx.declare(FileDeclaration::lines(
        ".github/pull_request_template.md",
        [PULL_REQUEST],
    ));
    if !options.funding_github.trim().is_empty() {
        ctx.declare(FileDeclaration::lines(
            ".github/FUNDING.yaml",
            [format!("github: {}", options.funding_github.trim())],
        ));
    }
    ctx.declare(gitignore(&options));
    ctx.declare(FileDeclaration::lines(
        "NOTICE",
        [
            name.clone(),
            format!("Copyright {} {}", options.copyright_period, options.copyright_owner),
        ],
    ));
    ctx.declare(package_json(&name, &options)?);
    ctx.declare(FileDeclaration::yaml(
        ".github/workflows/build.yml",
        &build_workflow(),
    )?);
    ctx.declare(FileDeclaration::yaml(
        ".github/workflows/release.yml",
        &release_workflow(&options.default_release_branch),
    )?);
    ctx.declare(FileDeclaration::json(".versionrc.json", &versionrc())?);
    ctx.declare(FileDeclaration::yaml(
        ".github/dependabot.yml",
        &dependabot(),
    )?);
    Ok(())
}

fn readme(name: &str) -> FileDeclaration {
    FileDeclaration::lines(
        "README.md",
        [
            format!("# {name}"),
            String::new(),
            "TODO: describe what this construct provisions.".into(),
            String::new(),
            README_CTA.trim_end().to_string(),
        ],
    )
}

fn gitignore(options: &ProjectOptions) -> FileDeclaration {
    let mut lines = vec![format!("# {MANAGED_MARKER}")];
    lines.extend(GITIGNORE_BASE.iter().map(|s| s.to_string()));
    for extra in &options.extra_gitignore {
        if !lines.contains(extra) {
            lines.push(extra.clone());
        }
    }
    FileDeclaration::lines(".gitignore", lines)
}

fn package_json(name: &str, options: &ProjectOptions) -> Result<FileDeclaration, DomainError> {
    let cdk = &options.cdk_version;
    let alpha = format!("^{cdk}-alpha.0");

    let value = json!({
        "name": name,
        "description": options.description,
        "repository": { "type": "git", "url": options.repository_url },
        "author": {
            "name": options.author,
            "email": options.author_address,
            "organization": true,
        },
        "license": options.license,
        "stability": "experimental",
        "publishConfig": { "access": "public" },
        "scripts": {
            "prepare": "husky",
            "awslint": "awslint",
            "integ-test": "integ-runner --directory ./integ-tests --parallel-regions eu-west-1 --parallel-regions eu-west-2 --update-on-failed",
        },
        "dependencies": { "cdk-nag": "*" },
        "devDependencies": {
            "@aws-cdk/integ-runner": alpha,
            "@aws-cdk/integ-tests-alpha": alpha,
            "@commitlint/cli": "*",
            "@commitlint/config-conventional": "*",
            "aws-cdk-lib": cdk,
            "awslint": "*",
            "husky": "*",
        },
        "peerDependencies": {
            "aws-cdk-lib": format!("^{cdk}"),
            "constructs": "^10.0.5",
        },
    });
    FileDeclaration::json("package.json", &value)
}

#[derive(Debug, Clone, Serialize)]
struct Step {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    run: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    with: BTreeMap<&'static str, String>,
}

impl Step {
    fn uses(name: &str, action: &str) -> Self {
        Self {
            id: None,
            condition: None,
            name: name.into(),
            uses: Some(action.into()),
            run: None,
            with: BTreeMap::new(),
        }
    }

    fn run(name: &str, command: &str) -> Self {
        Self {
            id: None,
            condition: None,
            name: name.into(),
            uses: None,
            run: Some(command.into()),
            with: BTreeMap::new(),
        }
    }

    fn with(mut self, key: &'static str, value: &str) -> Self {
        self.with.insert(key, value.into());
        self
    }

    fn id(mut self, id: &str) -> Self {
        self.id = Some(id.into());
        self
    }

    fn when(mut self, condition: &str) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

fn build_steps() -> Vec<Step> {
    let mut steps = vec![
        Step::uses("Checkout", "actions/checkout@v4"),
        Step::uses("Setup Node.js", "actions/setup-node@v4").with("node-version", "lts/*"),
        Step::run("Install dependencies", "npm install"),
        Step::run("build", "npx projen build"),
        Step::run("Find mutations", "git add . && git diff --staged --patch --exit-code"),
    ];
    let at = LINT_STEP_INDEX.min(steps.len());
    steps.insert(at, Step::run("Run awslint", "npm run awslint"));
    steps
}

fn build_workflow() -> serde_json::Value {
    json!({
        "name": "build",
        "on": { "pull_request": {}, "workflow_dispatch": {} },
        "jobs": {
            "build": {
                "runs-on": "ubuntu-latest",
                "permissions": { "contents": "write" },
                "steps": build_steps(),
            }
        }
    })
}

/// `git log --grep -E` pattern for a conventional commit of a releasable type.
fn releasable_commit_pattern() -> String {
    format!(
        "^({})(\\([^()[:space:]]+\\))?(!)?:[[:blank:]]+.+",
        RELEASABLE_COMMIT_TYPES.join("|")
    )
}

fn release_steps() -> Vec<Step> {
    let check = format!(
        "LATEST_TAG=$(git describe --tags --abbrev=0 2>/dev/null || true)\n\
         if git log --no-merges --oneline \"${{LATEST_TAG:+$LATEST_TAG..}}HEAD\" -E --grep '{}' | grep -q .; then\n  \
         echo \"found=true\" >> \"$GITHUB_OUTPUT\"\n\
         else\n  \
         echo \"found=false\" >> \"$GITHUB_OUTPUT\"\n\
         fi\n",
        releasable_commit_pattern()
    );
    vec![
        Step::uses("Checkout", "actions/checkout@v4").with("fetch-depth", "0"),
        Step::uses("Setup Node.js", "actions/setup-node@v4").with("node-version", "lts/*"),
        Step::run("Install dependencies", "npm install"),
        Step::run("Check for releasable commits", &check).id("releasable"),
        Step::run("release", "npx projen release").when("steps.releasable.outputs.found == 'true'"),
    ]
}

fn release_workflow(branch: &str) -> serde_json::Value {
    json!({
        "name": "release",
        "on": { "push": { "branches": [branch] }, "workflow_dispatch": {} },
        "jobs": {
            "release": {
                "runs-on": "ubuntu-latest",
                "permissions": { "contents": "write" },
                "steps": release_steps(),
            }
        }
    })
}

fn versionrc() -> serde_json::Value {
    let types: Vec<_> = CHANGELOG_TYPES
        .iter()
        .map(|(kind, section)| match section {
            Some(section) => json!({ "type": kind, "section": section }),
            None => json!({ "type": kind, "hidden": true }),
        })
        .collect();
    json!({ "types": types })
}

fn dependabot() -> serde_json::Value {
    json!({
        "version": 2,
        "updates": [{
            "package-ecosystem": "npm",
            "directory": "/",
            "schedule": { "interval": "weekly" },
            "labels": ["dependencies", "auto-approve"],
            "groups": {
                "default": {
                    "patterns": ["*"],
                    "exclude-patterns": ["aws-cdk*", "projen"],
                }
            },
            "ignore": [
                { "dependency-name": "aws-cdk-lib" },
                { "dependency-name": "aws-cdk" },
            ],
        }]
    })
}
