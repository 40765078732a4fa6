// crates/fhevm-scaffold-gen/src/readme.rs
// ============================================================================
// Module: README and Deploy Script Rendering
// Description: Pure renderers for generated project documents.
// Purpose: Produce byte-stable READMEs and Hardhat deploy scripts.
// Dependencies: fhevm-scaffold-catalog, std
// ============================================================================

//! ## Overview
//! Everything here is a pure function of its arguments: no clock, no
//! environment, no file-system access. Equal inputs produce byte-identical
//! output, which keeps generated projects reproducible.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use fhevm_scaffold_catalog::title_from_key;

use crate::GenerateError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Notice stating that the encryption in these examples is simulated.
const SIMULATION_NOTICE: &str = "> **Note:** the encrypted values in this example are simulated with \
                                 `keccak256` hashing and hash-chained aggregation. It demonstrates \
                                 the FHEVM programming model only and offers no cryptographic \
                                 guarantees.";

/// Concepts listed when the catalog supplies none.
const DEFAULT_KEY_CONCEPTS: &[&str] = &[
    "**Encrypted inputs**: values are submitted as opaque handles instead of plaintext.",
    "**Homomorphic aggregation**: results are combined without revealing individual inputs.",
    "**Access control**: only authorized accounts may submit or reveal data.",
    "**Selective disclosure**: aggregated results are revealed once a threshold is met.",
];

// ============================================================================
// SECTION: Types
// ============================================================================

/// A contract listed in a category README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeContract {
    /// Declared contract name.
    pub name: String,
    /// Source file name inside the generated `contracts` directory.
    pub source: String,
    /// One-line summary, usually the example description.
    pub summary: String,
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Renders the README for a single-example project.
///
/// `concepts` fills the Key Concepts section; an empty slice falls back to
/// the generic FHEVM concepts.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidInput`] when `example_name` is empty.
pub fn generate_readme(
    example_name: &str,
    description: &str,
    primary_contract_name: &str,
    concepts: &[String],
) -> Result<String, GenerateError> {
    let title = readme_title(example_name)?;
    let mut out = String::new();
    push_heading(&mut out, &title, description);
    push_setup_sections(&mut out);
    out.push_str("## Contract\n\n");
    let _ = writeln!(
        out,
        "The main contract is `{primary_contract_name}`. Its source lives in `contracts/` and its \
         tests in `test/`."
    );
    out.push('\n');
    push_key_concepts(&mut out, concepts);
    Ok(out)
}

/// Renders the README for a category project listing every member contract.
///
/// `concepts` behaves as in [`generate_readme`].
///
/// # Errors
///
/// Returns [`GenerateError::InvalidInput`] when `category_name` is empty or
/// `contracts` is empty.
pub fn generate_category_readme(
    category_name: &str,
    description: &str,
    contracts: &[ReadmeContract],
    concepts: &[String],
) -> Result<String, GenerateError> {
    let title = readme_title(category_name)?;
    if contracts.is_empty() {
        return Err(GenerateError::InvalidInput(format!(
            "category `{category_name}` has no contracts to list"
        )));
    }
    let mut out = String::new();
    push_heading(&mut out, &title, description);
    out.push_str("## Contracts\n\n");
    for contract in contracts {
        let _ = writeln!(
            out,
            "- **{}** (`contracts/{}`): {}",
            contract.name, contract.source, contract.summary
        );
    }
    out.push('\n');
    push_setup_sections(&mut out);
    push_key_concepts(&mut out, concepts);
    Ok(out)
}

/// Renders a `hardhat-deploy` script deploying each contract in order.
#[must_use]
pub fn render_deploy_script(contract_names: &[String]) -> String {
    let mut out = String::new();
    out.push_str("import { DeployFunction } from \"hardhat-deploy/types\";\n");
    out.push_str("import { HardhatRuntimeEnvironment } from \"hardhat/types\";\n\n");
    out.push_str(
        "const func: DeployFunction = async function (hre: HardhatRuntimeEnvironment) {\n",
    );
    out.push_str("  const { deployer } = await hre.getNamedAccounts();\n");
    out.push_str("  const { deploy } = hre.deployments;\n");
    for name in contract_names {
        let _ = write!(
            out,
            "\n  const deployed{name} = await deploy(\"{name}\", {{\n    from: deployer,\n    log: \
             true,\n  }});\n\n  console.log(`{name} contract: `, deployed{name}.address);\n"
        );
    }
    out.push_str("};\n\nexport default func;\n");
    let id = contract_names.iter().map(|name| name.to_lowercase()).collect::<Vec<_>>().join("_");
    let _ = writeln!(out, "func.id = \"deploy_{id}\";");
    let tags =
        contract_names.iter().map(|name| format!("\"{name}\"")).collect::<Vec<_>>().join(", ");
    let _ = writeln!(out, "func.tags = [{tags}];");
    out
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Derives the README title, rejecting empty names.
fn readme_title(name: &str) -> Result<String, GenerateError> {
    if name.trim().is_empty() {
        return Err(GenerateError::InvalidInput("readme name must be non-empty".to_string()));
    }
    Ok(title_from_key(name.trim()))
}

/// Writes the title, description, and simulation notice.
fn push_heading(out: &mut String, title: &str, description: &str) {
    let _ = writeln!(out, "# {title}\n");
    let _ = writeln!(out, "{description}\n");
    let _ = writeln!(out, "{SIMULATION_NOTICE}\n");
}

/// Writes the fixed prerequisite, install, build, and deploy sections.
fn push_setup_sections(out: &mut String) {
    out.push_str("## Prerequisites\n\n");
    out.push_str("- Node.js 20 or later\n");
    out.push_str("- npm 7 or later\n\n");
    out.push_str("## Installation\n\n");
    out.push_str("```bash\nnpm install\n```\n\n");
    out.push_str("## Compile and Test\n\n");
    out.push_str("```bash\nnpm run compile\nnpm run test\n```\n\n");
    out.push_str("## Deploy to a Local Network\n\n");
    out.push_str("```bash\nnpx hardhat node\nnpx hardhat deploy --network localhost\n```\n\n");
    out.push_str("## Deploy to Sepolia\n\n");
    out.push_str(
        "```bash\nnpx hardhat vars set MNEMONIC\nnpx hardhat vars set INFURA_API_KEY\nnpx \
         hardhat deploy --network sepolia\n```\n\n",
    );
}

/// Writes the key concepts list, falling back to the generic concepts.
fn push_key_concepts(out: &mut String, concepts: &[String]) {
    out.push_str("## Key Concepts\n\n");
    if concepts.is_empty() {
        for concept in DEFAULT_KEY_CONCEPTS {
            let _ = writeln!(out, "- {concept}");
        }
        return;
    }
    for concept in concepts {
        let _ = writeln!(out, "- {concept}");
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
