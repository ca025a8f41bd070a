//! Command implementations for the antora-assist CLI
//!
//! `lsp` hands stdio to the language server. The other commands are
//! diagnostics over a single document: they run the same core pipeline the
//! server uses, with Antora support treated as enabled.

pub mod attributes;
pub mod locate;
pub mod lsp;
pub mod resolve;
pub mod src;

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};

use antora_lsp_core::{Cancellation, FsWorkspace};

/// The document a diagnostic command inspects and the folders to search.
#[derive(Debug)]
pub struct SiteArgs {
    pub document: PathBuf,
    pub workspace: FsWorkspace,
}

impl SiteArgs {
    /// Canonicalize the document and workspace folders. With no folders
    /// given, the current directory is the workspace.
    pub fn new(document: PathBuf, workspaces: Vec<PathBuf>) -> Result<Self> {
        let document = std::fs::canonicalize(&document)
            .with_context(|| format!("Document not found: {}", document.display()))?;

        let workspaces = if workspaces.is_empty() {
            vec![std::env::current_dir().context("Failed to get current directory")?]
        } else {
            workspaces
        };
        let folders = workspaces
            .iter()
            .map(|folder| {
                std::fs::canonicalize(folder)
                    .with_context(|| format!("Workspace folder not found: {}", folder.display()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            document,
            workspace: FsWorkspace::new(folders),
        })
    }
}

/// Run a diagnostic to completion on a fresh runtime.
pub(crate) fn block_on<F, T>(run: impl FnOnce(Cancellation) -> F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(Cancellation::new()))
}
