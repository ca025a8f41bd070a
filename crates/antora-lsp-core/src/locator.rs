//! Locating the `antora.yml` that owns a document.
//!
//! A document belongs to an Antora site iff some `antora.yml` in the
//! workspace sits at `<dir>/antora.yml` and the document lives under
//! `<dir>/modules/<module>/pages/`. The search itself goes through the
//! [`WorkspaceSearch`] trait so the editor host can supply its own file
//! index; [`FsWorkspace`] is the native implementation.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use walkdir::WalkDir;

use crate::cancellation::Cancellation;
use crate::error::{AntoraError, Result};

/// File name of an Antora component descriptor.
pub const ANTORA_CONFIG_FILENAME: &str = "antora.yml";

/// Directory name that is never searched for descriptors.
pub const EXCLUDED_DIR: &str = "node_modules";

/// Maximum number of descriptor candidates considered per search.
pub const CONFIG_SEARCH_LIMIT: usize = 100;

/// Search access to the files of an editor workspace.
#[async_trait]
pub trait WorkspaceSearch: Send + Sync {
    /// Find files named `file_name` anywhere in the workspace, skipping any
    /// directory named `exclude_dir`, returning at most `max_results` paths.
    ///
    /// Implementations must stop and return [`AntoraError::Cancelled`] once
    /// `cancel` fires.
    async fn find_files(
        &self,
        file_name: &str,
        exclude_dir: &str,
        max_results: usize,
        cancel: &Cancellation,
    ) -> Result<Vec<PathBuf>>;

    /// The workspace folder that contains `path`, if any.
    fn workspace_folder(&self, path: &Path) -> Option<PathBuf>;
}

/// A workspace made of one or more folders on the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsWorkspace {
    folders: Vec<PathBuf>,
}

impl FsWorkspace {
    pub fn new(folders: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            folders: folders.into_iter().collect(),
        }
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn add_folder(&mut self, folder: PathBuf) {
        if !self.folders.contains(&folder) {
            self.folders.push(folder);
        }
    }

    pub fn remove_folder(&mut self, folder: &Path) {
        self.folders.retain(|f| f != folder);
    }
}

fn walk_folders(
    folders: &[PathBuf],
    file_name: &str,
    exclude_dir: &str,
    max_results: usize,
    cancel: &Cancellation,
) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for folder in folders {
        let walker = WalkDir::new(folder)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir() && entry.file_name() == exclude_dir)
            });

        for entry in walker {
            if cancel.is_cancelled() {
                tracing::info!(folder = %folder.display(), "Workspace search cancelled");
                return Err(AntoraError::Cancelled);
            }
            let entry = entry?;
            if entry.file_type().is_file() && entry.file_name() == file_name {
                found.push(entry.into_path());
                if found.len() >= max_results {
                    return Ok(found);
                }
            }
        }
    }

    Ok(found)
}

#[async_trait]
impl WorkspaceSearch for FsWorkspace {
    async fn find_files(
        &self,
        file_name: &str,
        exclude_dir: &str,
        max_results: usize,
        cancel: &Cancellation,
    ) -> Result<Vec<PathBuf>> {
        let folders = self.folders.clone();
        let file_name = file_name.to_string();
        let exclude_dir = exclude_dir.to_string();
        let task_cancel = cancel.clone();

        let walk = tokio::task::spawn_blocking(move || {
            walk_folders(&folders, &file_name, &exclude_dir, max_results, &task_cancel)
        });

        tokio::select! {
            joined = walk => joined.map_err(|e| AntoraError::Task(e.to_string()))?,
            _ = cancel.cancelled() => {
                tracing::info!("Workspace search cancelled");
                Err(AntoraError::Cancelled)
            }
        }
    }

    fn workspace_folder(&self, path: &Path) -> Option<PathBuf> {
        // Deepest folder wins for nested workspace folders.
        self.folders
            .iter()
            .filter(|folder| path.starts_with(folder))
            .max_by_key(|folder| folder.components().count())
            .cloned()
    }
}

/// Render a path with `/` separators for pattern matching.
pub(crate) fn slash_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

fn module_pages_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^/[^/]+/pages/.*").expect("valid module pages pattern"))
}

/// Whether `document` lives under `<config dir>/modules/<module>/pages/`.
pub fn is_in_module_tree(config_file: &Path, document: &Path) -> bool {
    let Some(config_dir) = config_file.parent() else {
        return false;
    };
    let modules_path = format!("{}/modules", slash_path(config_dir));
    let document = slash_path(document);

    match document.strip_prefix(&modules_path) {
        Some(rest) => module_pages_re().is_match(rest),
        None => false,
    }
}

/// Find the `antora.yml` whose module tree contains `document`.
///
/// Candidates are checked in search order and the first match wins.
pub async fn find_antora_config_file(
    search: &dyn WorkspaceSearch,
    document: &Path,
    cancel: &Cancellation,
) -> Result<Option<PathBuf>> {
    let candidates = search
        .find_files(
            ANTORA_CONFIG_FILENAME,
            EXCLUDED_DIR,
            CONFIG_SEARCH_LIMIT,
            cancel,
        )
        .await?;

    let found = candidates
        .into_iter()
        .find(|candidate| is_in_module_tree(candidate, document));

    if let Some(config_file) = &found {
        tracing::debug!(
            config = %config_file.display(),
            document = %document.display(),
            "Found an Antora configuration file"
        );
    }
    Ok(found)
}

/// Whether any `antora.yml` in the workspace owns `document`.
pub async fn antora_config_file_exists(
    search: &dyn WorkspaceSearch,
    document: &Path,
    cancel: &Cancellation,
) -> Result<bool> {
    Ok(find_antora_config_file(search, document, cancel)
        .await?
        .is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn module_tree_requires_module_and_pages_segments() {
        let config = Path::new("/ws/docs/antora.yml");

        assert!(is_in_module_tree(
            config,
            Path::new("/ws/docs/modules/ROOT/pages/index.adoc")
        ));
        assert!(is_in_module_tree(
            config,
            Path::new("/ws/docs/modules/admin/pages/nested/dir/page.adoc")
        ));
        assert!(!is_in_module_tree(
            config,
            Path::new("/ws/docs/modules/pages/x")
        ));
        assert!(!is_in_module_tree(
            config,
            Path::new("/ws/docs/modules/m/notpages/x")
        ));
        assert!(!is_in_module_tree(
            config,
            Path::new("/ws/docs/modules/m/partials/x.adoc")
        ));
        assert!(!is_in_module_tree(
            config,
            Path::new("/ws/other/modules/ROOT/pages/index.adoc")
        ));
    }

    #[test]
    fn module_tree_rejects_empty_module_segment() {
        let config = Path::new("/ws/antora.yml");
        assert!(!is_in_module_tree(
            config,
            Path::new("/ws/modules//pages/index.adoc")
        ));
    }

    #[tokio::test]
    async fn finds_config_owning_the_document() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(&root.join("a/antora.yml"));
        touch(&root.join("b/antora.yml"));
        touch(&root.join("b/modules/ROOT/pages/index.adoc"));

        let ws = FsWorkspace::new([root.to_path_buf()]);
        let found = find_antora_config_file(
            &ws,
            &root.join("b/modules/ROOT/pages/index.adoc"),
            &Cancellation::new(),
        )
        .await
        .unwrap();

        assert_eq!(found, Some(root.join("b/antora.yml")));
    }

    #[tokio::test]
    async fn returns_none_outside_any_module_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(&root.join("docs/antora.yml"));
        touch(&root.join("README.adoc"));

        let ws = FsWorkspace::new([root.to_path_buf()]);
        let exists =
            antora_config_file_exists(&ws, &root.join("README.adoc"), &Cancellation::new())
                .await
                .unwrap();
        assert!(!exists);
    }

    #[tokio::test]
    async fn skips_node_modules() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(&root.join("node_modules/pkg/antora.yml"));
        touch(&root.join("docs/antora.yml"));

        let ws = FsWorkspace::new([root.to_path_buf()]);
        let found = ws
            .find_files(
                ANTORA_CONFIG_FILENAME,
                EXCLUDED_DIR,
                CONFIG_SEARCH_LIMIT,
                &Cancellation::new(),
            )
            .await
            .unwrap();

        assert_eq!(found, vec![root.join("docs/antora.yml")]);
    }

    #[tokio::test]
    async fn search_respects_result_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for i in 0..5 {
            touch(&root.join(format!("c{}/antora.yml", i)));
        }

        let ws = FsWorkspace::new([root.to_path_buf()]);
        let found = ws
            .find_files(ANTORA_CONFIG_FILENAME, EXCLUDED_DIR, 3, &Cancellation::new())
            .await
            .unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn cancelled_search_aborts() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("docs/antora.yml"));

        let ws = FsWorkspace::new([tmp.path().to_path_buf()]);
        let cancel = Cancellation::new();
        cancel.cancel();

        let result = find_antora_config_file(
            &ws,
            &tmp.path().join("docs/modules/ROOT/pages/index.adoc"),
            &cancel,
        )
        .await;
        assert!(matches!(result, Err(AntoraError::Cancelled)));
    }

    #[test]
    fn workspace_folder_prefers_deepest() {
        let ws = FsWorkspace::new([PathBuf::from("/ws"), PathBuf::from("/ws/nested")]);
        assert_eq!(
            ws.workspace_folder(Path::new("/ws/nested/docs/antora.yml")),
            Some(PathBuf::from("/ws/nested"))
        );
        assert_eq!(
            ws.workspace_folder(Path::new("/ws/docs/antora.yml")),
            Some(PathBuf::from("/ws"))
        );
        assert_eq!(ws.workspace_folder(Path::new("/elsewhere/antora.yml")), None);
    }
}
