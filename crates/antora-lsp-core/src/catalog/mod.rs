//! The Antora content catalog.
//!
//! A catalog is built from a [`Playbook`] in two steps,
//! [`aggregate_content`] then [`classify_content`], and answers two kinds
//! of queries: lookup of a file by its path inside a component version,
//! and resolution of a resource id relative to a referencing document.

pub mod aggregate;
pub mod classify;
pub mod playbook;
pub mod resource_id;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub use aggregate::{ComponentVersionBucket, VirtualFile, aggregate_content};
pub use classify::classify_content;
pub use playbook::{ContentSource, ContentSpec, Playbook};
pub use resource_id::{ParsedResourceId, ResourceContext, parse_resource_id};

use crate::types::{Family, ResourceIdentity};

/// A file in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFile {
    pub src: ResourceIdentity,
    /// Path relative to the component's start path (e.g. `modules/ROOT/pages/index.adoc`).
    pub path: String,
    pub abspath: PathBuf,
}

/// A queryable index of classified files.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    files: Vec<CatalogFile>,
    /// Versions per component, newest first.
    components: BTreeMap<String, Vec<String>>,
}

/// Order versions newest first. Unversioned (`""`) sorts before all others,
/// then dotted versions compare segment by segment, numerically where both
/// segments are numbers.
fn compare_versions(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    let a_parts = a.trim_start_matches('v').split('.');
    let b_parts = b.trim_start_matches('v').split('.');
    for (x, y) in a_parts.zip(b_parts) {
        let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
            (Ok(x), Ok(y)) => y.cmp(&x),
            _ => y.cmp(x),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    b.split('.').count().cmp(&a.split('.').count())
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a component version, keeping versions ordered newest first.
    pub fn register_component_version(&mut self, name: &str, version: &str) {
        let versions = self.components.entry(name.to_string()).or_default();
        if versions.iter().any(|v| v == version) {
            return;
        }
        versions.push(version.to_string());
        versions.sort_by(|a, b| compare_versions(a, b));
    }

    pub fn add_file(&mut self, file: CatalogFile) {
        self.files.push(file);
    }

    pub fn files(&self) -> &[CatalogFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The newest version of `component`.
    pub fn latest_version(&self, component: &str) -> Option<&str> {
        self.components
            .get(component)?
            .first()
            .map(String::as_str)
    }

    /// Find a file by its path inside a component version.
    pub fn get_by_path(&self, component: &str, version: &str, path: &str) -> Option<&CatalogFile> {
        self.files.iter().find(|f| {
            f.src.component == component && f.src.version == version && f.path == path
        })
    }

    /// Find a file by its full identity.
    pub fn get_by_id(&self, id: &ResourceIdentity) -> Option<&CatalogFile> {
        self.files.iter().find(|f| &f.src == id)
    }

    /// Resolve a resource id relative to `context`.
    ///
    /// `default_family` applies when the id carries no `family$` part; ids
    /// resolving to a family outside `permitted` are not found.
    pub fn resolve_resource(
        &self,
        spec: &str,
        context: &ResourceContext,
        default_family: Family,
        permitted: &[Family],
    ) -> Option<&CatalogFile> {
        let id = parse_resource_id(spec, context, default_family, permitted)?;
        let version = match id.version {
            Some(version) => version,
            None => self.latest_version(&id.component)?.to_string(),
        };
        self.get_by_id(&ResourceIdentity {
            component: id.component,
            version,
            module: id.module,
            family: id.family,
            relative: id.relative,
        })
    }
}
