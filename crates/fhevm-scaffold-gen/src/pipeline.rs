// crates/fhevm-scaffold-gen/src/pipeline.rs
// ============================================================================
// Module: Generation Pipelines
// Description: Orchestrates project generation and documentation runs.
// Purpose: Turn a catalog key into a standalone project or documentation pages.
// Dependencies: fhevm-scaffold-catalog, tracing, std
// ============================================================================

//! ## Overview
//! Project generation plans first and writes second: sources are verified,
//! contract names extracted, and target collisions detected before the
//! template is copied. Documentation runs render every page in memory before
//! the first write, so a missing source aborts a `--all` run with the docs
//! directory untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use fhevm_scaffold_catalog::Catalog;
use fhevm_scaffold_catalog::ExampleEntry;
use fhevm_scaffold_catalog::SourceRole;
use tracing::info;

use crate::GenerateError;
use crate::copier::CopyReport;
use crate::copier::copy_tree;
use crate::docs::DocsConfig;
use crate::docs::DocumentationPage;
use crate::docs::build_documentation_page;
use crate::docs::extract_contract_name;
use crate::docs::render_documentation_page;
use crate::docs::write_page;
use crate::index::prune_stale_pages;
use crate::index::render_index;
use crate::index::write_index;
use crate::metadata::rewrite_package_metadata;
use crate::output::DocsOutput;
use crate::readme::ReadmeContract;
use crate::readme::generate_category_readme;
use crate::readme::generate_readme;
use crate::readme::render_deploy_script;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// README file name inside a generated project.
const README_FILE: &str = "README.md";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of a project generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReport {
    /// Example or category key.
    pub key: String,
    /// Generated project root.
    pub destination: PathBuf,
    /// Package name written into `package.json`.
    pub package_name: String,
    /// Contract names in deployment order.
    pub contracts: Vec<String>,
    /// Template copy statistics.
    pub copy: CopyReport,
}

/// Outcome of a full documentation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsReport {
    /// Pages written, in catalog order.
    pub pages: Vec<DocumentationPage>,
    /// Path of the rebuilt index.
    pub index_path: PathBuf,
    /// Stale generated pages that were removed.
    pub pruned: Vec<String>,
}

/// A source file scheduled for copying into a project.
#[derive(Debug)]
struct PlannedSource {
    /// Absolute source path.
    from: PathBuf,
    /// Target path relative to the project root.
    to: PathBuf,
}

/// A contract discovered while planning.
#[derive(Debug)]
struct PlannedContract {
    /// Declared contract name.
    name: String,
    /// Source file name.
    file_name: String,
    /// Description of the owning example.
    summary: String,
}

/// Everything needed to materialize a project, gathered before any write.
#[derive(Debug, Default)]
struct ProjectPlan {
    /// Sources to copy.
    sources: Vec<PlannedSource>,
    /// Contracts in declaration order.
    contracts: Vec<PlannedContract>,
}

/// Identity and README for one project.
struct ProjectIdentity<'a> {
    /// Example or category key.
    key: &'a str,
    /// Package name.
    package_name: String,
    /// Package description.
    description: &'a str,
    /// Rendered README.
    readme: String,
}

// ============================================================================
// SECTION: Project Pipeline
// ============================================================================

/// Generates a standalone project for one example.
///
/// `output_dir` defaults to `<output_dir>/<package_prefix>-<key>` under the
/// catalog root.
///
/// # Errors
///
/// Returns [`GenerateError`] when the key does not resolve, a source is
/// missing, the destination exists, or any write fails.
pub fn generate_example(
    catalog: &Catalog,
    key: &str,
    output_dir: Option<&Path>,
) -> Result<ProjectReport, GenerateError> {
    let entry = catalog.resolve(key)?;
    let package_name = format!("{}-{}", catalog.project().package_prefix, entry.key);
    let destination = destination(catalog, &package_name, output_dir);
    info!(key = %entry.key, destination = %destination.display(), "generating example project");

    let plan = plan_project(catalog, &[entry])?;
    let primary = plan.contracts.first().map(|contract| contract.name.as_str()).ok_or_else(|| {
        GenerateError::InvalidInput(format!("example `{}` has no contract source", entry.key))
    })?;
    let readme = generate_readme(&entry.key, &entry.description, primary, &entry.concepts)?;
    let identity = ProjectIdentity {
        key: &entry.key,
        package_name,
        description: &entry.description,
        readme,
    };
    materialize(catalog, &plan, &identity, destination)
}

/// Generates one project bundling every member of a category.
///
/// `output_dir` defaults to `<output_dir>/<package_prefix>s-<key>` under the
/// catalog root.
///
/// # Errors
///
/// Returns [`GenerateError`] when the key does not resolve, a member source is
/// missing, two sources collide, the destination exists, or any write fails.
pub fn generate_category(
    catalog: &Catalog,
    key: &str,
    output_dir: Option<&Path>,
) -> Result<ProjectReport, GenerateError> {
    let category = catalog.resolve_category(key)?;
    let members = catalog.category_members(category)?;
    let package_name = format!("{}s-{}", catalog.project().package_prefix, category.key);
    let destination = destination(catalog, &package_name, output_dir);
    info!(
        key = %category.key,
        members = members.len(),
        destination = %destination.display(),
        "generating category project"
    );

    let plan = plan_project(catalog, &members)?;
    let listed: Vec<ReadmeContract> = plan
        .contracts
        .iter()
        .map(|contract| ReadmeContract {
            name: contract.name.clone(),
            source: contract.file_name.clone(),
            summary: contract.summary.clone(),
        })
        .collect();
    let mut concepts: Vec<String> = Vec::new();
    for concept in members.iter().flat_map(|member| &member.concepts) {
        if !concepts.contains(concept) {
            concepts.push(concept.clone());
        }
    }
    let readme =
        generate_category_readme(&category.name, &category.description, &listed, &concepts)?;
    let identity = ProjectIdentity {
        key: &category.key,
        package_name,
        description: &category.description,
        readme,
    };
    materialize(catalog, &plan, &identity, destination)
}

/// Resolves the project destination.
fn destination(catalog: &Catalog, package_name: &str, output_dir: Option<&Path>) -> PathBuf {
    output_dir.map_or_else(|| catalog.output_dir().join(package_name), Path::to_path_buf)
}

/// Verifies sources and extracts contract names without writing anything.
fn plan_project(catalog: &Catalog, examples: &[&ExampleEntry]) -> Result<ProjectPlan, GenerateError> {
    let settings = catalog.project();
    let mut plan = ProjectPlan::default();
    let mut targets = BTreeSet::new();
    let mut names = BTreeSet::new();
    for example in examples {
        catalog.verify_sources(example)?;
        for source in &example.sources {
            let from = catalog.source_path(source);
            let file_name = source.file_name();
            let to = match source.role {
                SourceRole::Contract => settings.contracts_dir.join(&file_name),
                SourceRole::Test => settings.tests_dir.join(&file_name),
            };
            if !targets.insert(to.clone()) {
                return Err(GenerateError::InvalidInput(format!(
                    "two sources would be written to {}",
                    to.display()
                )));
            }
            if source.role == SourceRole::Contract {
                let text = fs::read_to_string(&from)
                    .map_err(|_| GenerateError::SourceFileMissing(from.clone()))?;
                let name = extract_contract_name(&text)
                    .ok_or_else(|| GenerateError::NoDeclarationFound(from.clone()))?;
                if !names.insert(name.clone()) {
                    return Err(GenerateError::InvalidInput(format!(
                        "contract `{name}` is declared by more than one source"
                    )));
                }
                plan.contracts.push(PlannedContract {
                    name,
                    file_name,
                    summary: example.description.clone(),
                });
            }
            plan.sources.push(PlannedSource {
                from,
                to,
            });
        }
    }
    Ok(plan)
}

/// Copies the template and writes sources, metadata, README, and deploy script.
fn materialize(
    catalog: &Catalog,
    plan: &ProjectPlan,
    identity: &ProjectIdentity<'_>,
    destination: PathBuf,
) -> Result<ProjectReport, GenerateError> {
    let settings = catalog.project();
    let copy = copy_tree(&catalog.template_dir(), &destination, &settings.excluded_dirs)?;

    reset_dir(&destination.join(&settings.contracts_dir))?;
    reset_dir(&destination.join(&settings.tests_dir))?;
    for source in &plan.sources {
        let target = destination.join(&source.to);
        fs::copy(&source.from, &target).map_err(|err| GenerateError::io(&target, &err))?;
    }
    info!(key = identity.key, sources = plan.sources.len(), "copied example sources");

    rewrite_package_metadata(
        &destination,
        &identity.package_name,
        identity.description,
        &settings.homepage,
    )?;
    write_file(&destination.join(README_FILE), &identity.readme)?;

    let contracts: Vec<String> =
        plan.contracts.iter().map(|contract| contract.name.clone()).collect();
    if let Some(script) = settings.deploy_script() {
        write_file(&destination.join(script), &render_deploy_script(&contracts))?;
    }
    info!(key = identity.key, destination = %destination.display(), "project generated");

    Ok(ProjectReport {
        key: identity.key.to_string(),
        destination,
        package_name: identity.package_name.clone(),
        contracts,
        copy,
    })
}

/// Empties a directory copied from the template, creating it when absent.
fn reset_dir(path: &Path) -> Result<(), GenerateError> {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(GenerateError::io(path, &err)),
    }
    fs::create_dir_all(path).map_err(|err| GenerateError::io(path, &err))
}

/// Writes a text file, creating parent directories.
fn write_file(path: &Path, content: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| GenerateError::io(parent, &err))?;
    }
    fs::write(path, content.as_bytes()).map_err(|err| GenerateError::io(path, &err))
}

// ============================================================================
// SECTION: Documentation Pipeline
// ============================================================================

/// Regenerates the page for one example without touching the index.
///
/// # Errors
///
/// Returns [`GenerateError`] when the key does not resolve or the page cannot
/// be rendered or written.
pub fn generate_docs(catalog: &Catalog, key: &str) -> Result<DocumentationPage, GenerateError> {
    let entry = catalog.resolve(key)?;
    let config = DocsConfig::from_entry(entry);
    build_documentation_page(&config, catalog.root(), &catalog.docs_dir())
}

/// Regenerates every page, prunes stale generated pages, and rebuilds the index.
///
/// Every page and the index are rendered before the first write.
///
/// # Errors
///
/// Returns [`GenerateError`] when any page fails to render (nothing is
/// written) or a write fails.
pub fn generate_all_docs(catalog: &Catalog) -> Result<DocsReport, GenerateError> {
    let pages = catalog
        .examples()
        .iter()
        .map(|entry| render_documentation_page(&DocsConfig::from_entry(entry), catalog.root()))
        .collect::<Result<Vec<_>, _>>()?;
    let index = render_index(catalog, &pages)?;
    info!(pages = pages.len(), "rendered documentation");

    let output = DocsOutput::open(&catalog.docs_dir())?;
    for page in &pages {
        write_page(&output, page)?;
    }
    let index_file = catalog.project().index_file.as_str();
    let pruned = prune_stale_pages(&output, index_file, &pages)?;
    let index_path = write_index(&output, index_file, &index)?;
    Ok(DocsReport {
        pages,
        index_path,
        pruned,
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
