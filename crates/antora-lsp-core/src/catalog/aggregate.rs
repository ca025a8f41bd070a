/*
 * catalog/aggregate.rs
 * Copyright (c) 2025 Antora Assist Contributors
 *
 * Content aggregation for local worktrees.
 */

//! Collect the files of each component version named by a playbook.
//!
//! Sources are read straight from the worktree on disk (the `HEAD`
//! branch marker); nothing is cloned or fetched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::playbook::{ContentSource, HEAD_BRANCH, Playbook};
use crate::config::AntoraConfig;
use crate::error::{AntoraError, Result};
use crate::locator::{ANTORA_CONFIG_FILENAME, slash_path};

/// A file picked up from a content source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFile {
    /// Path relative to the start path, `/`-separated
    /// (e.g. `modules/ROOT/pages/index.adoc`).
    pub path: String,
    pub abspath: PathBuf,
}

/// All files for one component version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentVersionBucket {
    pub name: String,
    pub version: String,
    pub title: Option<String>,
    pub nav: Vec<String>,
    pub files: Vec<VirtualFile>,
}

/// Resolve a source URL to a local directory.
fn local_root(url: &str) -> Result<PathBuf> {
    if let Some(path) = url.strip_prefix("file://") {
        return Ok(PathBuf::from(path));
    }
    if url.contains("://") || url.starts_with("git@") {
        return Err(AntoraError::UnsupportedSource(url.to_string()));
    }
    Ok(PathBuf::from(url))
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

fn collect_files(start_dir: &Path) -> Result<Vec<VirtualFile>> {
    let modules_dir = start_dir.join("modules");
    if !modules_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(&modules_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(&entry.file_name().to_string_lossy()));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(start_dir) else {
            continue;
        };
        files.push(VirtualFile {
            path: slash_path(relative),
            abspath: entry.path().to_path_buf(),
        });
    }
    Ok(files)
}

fn read_source(source: &ContentSource) -> Result<ComponentVersionBucket> {
    if let Some(branch) = source.branches.iter().find(|b| b.as_str() != HEAD_BRANCH) {
        return Err(AntoraError::UnsupportedSource(format!(
            "{} (branch {})",
            source.url, branch
        )));
    }

    let root = local_root(&source.url)?;
    let start_dir = if source.start_path.is_empty() {
        root
    } else {
        root.join(&source.start_path)
    };

    let descriptor_path = start_dir.join(ANTORA_CONFIG_FILENAME);
    let descriptor = AntoraConfig::try_load(&descriptor_path)?;
    let name = descriptor
        .name()
        .ok_or_else(|| AntoraError::ComponentDescriptor {
            path: descriptor_path.clone(),
            message: "missing name".to_string(),
        })?;
    let version = descriptor
        .version()
        .ok_or_else(|| AntoraError::ComponentDescriptor {
            path: descriptor_path.clone(),
            message: "missing version".to_string(),
        })?;

    let files = collect_files(&start_dir)?;
    tracing::debug!(
        component = %name,
        version = %version,
        files = files.len(),
        start = %start_dir.display(),
        "Aggregated content source"
    );

    Ok(ComponentVersionBucket {
        name,
        version,
        title: descriptor.title(),
        nav: descriptor.nav(),
        files,
    })
}

/// Read every source of the playbook, merging sources that contribute to
/// the same component version.
pub fn aggregate_content(playbook: &Playbook) -> Result<Vec<ComponentVersionBucket>> {
    let mut buckets: BTreeMap<(String, String), ComponentVersionBucket> = BTreeMap::new();

    for source in &playbook.content.sources {
        let bucket = read_source(source)?;
        match buckets.get_mut(&(bucket.name.clone(), bucket.version.clone())) {
            Some(existing) => {
                existing.files.extend(bucket.files);
                existing.nav.extend(bucket.nav);
                if existing.title.is_none() {
                    existing.title = bucket.title;
                }
            }
            None => {
                buckets.insert((bucket.name.clone(), bucket.version.clone()), bucket);
            }
        }
    }

    Ok(buckets.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn aggregates_worktree_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(&root.join("docs/antora.yml"), "name: docs\nversion: '1.0'\n");
        write(&root.join("docs/modules/ROOT/pages/index.adoc"), "= Home");
        write(&root.join("docs/modules/ROOT/pages/_draft.adoc"), "= Draft");
        write(&root.join("docs/modules/ROOT/images/.hidden.png"), "");
        write(&root.join("docs/modules/ROOT/images/logo.png"), "");

        let playbook = Playbook::single_source(ContentSource::local(
            root.to_string_lossy().into_owned(),
            "docs",
        ));
        let buckets = aggregate_content(&playbook).unwrap();

        assert_eq!(buckets.len(), 1);
        let bucket = &buckets[0];
        assert_eq!(bucket.name, "docs");
        assert_eq!(bucket.version, "1.0");
        let paths: Vec<&str> = bucket.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["modules/ROOT/images/logo.png", "modules/ROOT/pages/index.adoc"]
        );
    }

    #[test]
    fn descriptor_without_name_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join("antora.yml"), "version: '1.0'\n");

        let playbook = Playbook::single_source(ContentSource::local(
            tmp.path().to_string_lossy().into_owned(),
            "",
        ));
        let err = aggregate_content(&playbook).unwrap_err();
        assert!(matches!(err, AntoraError::ComponentDescriptor { .. }));
    }

    #[test]
    fn remote_sources_are_rejected() {
        let playbook = Playbook::single_source(ContentSource::local(
            "https://example.org/docs.git",
            "",
        ));
        let err = aggregate_content(&playbook).unwrap_err();
        assert!(matches!(err, AntoraError::UnsupportedSource(_)));
    }

    #[test]
    fn file_urls_are_local() {
        assert_eq!(local_root("file:///ws").unwrap(), PathBuf::from("/ws"));
        assert_eq!(local_root("/ws").unwrap(), PathBuf::from("/ws"));
        assert!(local_root("git@github.com:org/repo.git").is_err());
    }
}
