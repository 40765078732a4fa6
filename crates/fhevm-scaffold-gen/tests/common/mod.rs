// crates/fhevm-scaffold-gen/tests/common/mod.rs
// =============================================================================
// Module: Generator Test Fixtures
// Description: Builds throwaway project roots with a template and a catalog.
// Purpose: Share fixture setup across generator integration tests.
// =============================================================================

#![allow(dead_code, reason = "Each test binary uses a different subset of fixtures.")]

use std::fs;
use std::path::Path;

use fhevm_scaffold_catalog::Catalog;
use tempfile::TempDir;

/// Catalog with a `review` category of two members and a `basics` category.
pub const CATALOG: &str = r#"
[project]
homepage = "https://example.invalid/fhevm"

[[categories]]
key = "basics"
name = "FHE Basics"
description = "Getting started."
members = ["counter"]

[[categories]]
key = "review"
name = "Peer Review"
description = "Review workflow contracts."
members = ["registry", "review"]

[[examples]]
key = "counter"
description = "An encrypted counter."
category = "basics"
concepts = ["Counters hold hashed state."]
sources = [
    { role = "contract", path = "src/contracts/Counter.sol" },
    { role = "test", path = "src/test/Counter.test.ts" },
]

[[examples]]
key = "registry"
title = "Reviewer Registry"
description = "Registers reviewers."
category = "review"
sources = [
    { role = "contract", path = "src/contracts/ReviewerRegistry.sol" },
    { role = "test", path = "src/test/ReviewerRegistry.test.ts" },
]

[[examples]]
key = "review"
description = "Collects blind reviews."
category = "review"
sources = [
    { role = "contract", path = "src/contracts/PrivatePeerReview.sol" },
    { role = "test", path = "src/test/PrivatePeerReview.test.ts" },
]
"#;

/// Template package metadata.
pub const TEMPLATE_PACKAGE: &str = r#"{
  "name": "fhevm-hardhat-template",
  "description": "Template",
  "version": "0.1.0",
  "devDependencies": {
    "hardhat": "^2.26.0"
  }
}
"#;

/// Writes a file, creating parent directories.
pub fn write(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Creates a project root holding the template, sources, and catalog file.
pub fn project_root() -> std::io::Result<TempDir> {
    let temp = tempfile::tempdir()?;
    let root = temp.path();
    write(root, "project/base-template/package.json", TEMPLATE_PACKAGE)?;
    write(root, "project/base-template/hardhat.config.ts", "export default {};\n")?;
    write(root, "project/base-template/contracts/FHECounter.sol", "contract FHECounter {\n}\n")?;
    write(root, "project/base-template/test/FHECounter.ts", "// template test\n")?;
    write(root, "project/base-template/deploy/deploy.ts", "// template deploy\n")?;
    write(root, "project/base-template/node_modules/hardhat/index.js", "module.exports = {};\n")?;
    write(root, "project/base-template/artifacts/build-info.json", "{}\n")?;
    write(root, "src/contracts/Counter.sol", "pragma solidity ^0.8.24;\n\ncontract Counter {\n}\n")?;
    write(root, "src/test/Counter.test.ts", "describe(\"Counter\", () => {});\n")?;
    write(
        root,
        "src/contracts/ReviewerRegistry.sol",
        "pragma solidity ^0.8.24;\n\ncontract ReviewerRegistry {\n}\n",
    )?;
    write(root, "src/test/ReviewerRegistry.test.ts", "describe(\"ReviewerRegistry\", () => {});\n")?;
    write(
        root,
        "src/contracts/PrivatePeerReview.sol",
        "pragma solidity ^0.8.24;\n\ncontract PrivatePeerReview is SepoliaConfig {\n}\n",
    )?;
    write(root, "src/test/PrivatePeerReview.test.ts", "describe(\"PrivatePeerReview\", () => {});\n")?;
    write(root, "fhevm-scaffold.toml", CATALOG)?;
    Ok(temp)
}

/// Loads the fixture catalog from a project root.
pub fn load_catalog(root: &Path) -> Result<Catalog, Box<dyn std::error::Error>> {
    Ok(Catalog::load(Some(&root.join("fhevm-scaffold.toml")))?)
}
