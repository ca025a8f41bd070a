//! Antora context for a document: catalog construction and resolution.
//!
//! Everything here is pull-based. Each call re-locates the descriptor that
//! owns the document and, for [`get_content_catalog`], rebuilds the
//! catalog from scratch.

use std::path::{Path, PathBuf};

use crate::cancellation::Cancellation;
use crate::catalog::{
    ContentCatalog, ContentSource, Playbook, ResourceContext, aggregate_content, classify_content,
};
use crate::config::AntoraConfig;
use crate::error::{AntoraError, Result};
use crate::locator::{WorkspaceSearch, find_antora_config_file, slash_path};
use crate::opt_in::OptInState;
use crate::types::{Family, RESOLVABLE_FAMILIES, ResourceIdentity};

/// A document's Antora site, when support applies to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSite {
    pub config_file: PathBuf,
    pub workspace_folder: PathBuf,
}

impl ActiveSite {
    /// The directory holding `antora.yml`.
    pub fn config_dir(&self) -> &Path {
        self.config_file.parent().unwrap_or(&self.config_file)
    }

    /// The path from the workspace folder to the descriptor directory.
    pub fn start_path(&self) -> String {
        self.config_dir()
            .strip_prefix(&self.workspace_folder)
            .map(slash_path)
            .unwrap_or_default()
    }
}

/// Whether Antora support applies to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AntoraSupport {
    Active(ActiveSite),
    Inactive,
}

/// Decide whether support applies: the user opted in and a descriptor
/// owns the document.
pub async fn resolve_support(
    state: OptInState,
    document: &Path,
    search: &dyn WorkspaceSearch,
    cancel: &Cancellation,
) -> Result<AntoraSupport> {
    if !state.is_enabled() {
        return Ok(AntoraSupport::Inactive);
    }
    let Some(config_file) = find_antora_config_file(search, document, cancel).await? else {
        return Ok(AntoraSupport::Inactive);
    };
    let workspace_folder = search
        .workspace_folder(&config_file)
        .ok_or_else(|| AntoraError::NoWorkspaceFolder(config_file.clone()))?;

    Ok(AntoraSupport::Active(ActiveSite {
        config_file,
        workspace_folder,
    }))
}

/// The playbook for a single local site: one source at the workspace
/// folder, starting at the descriptor directory.
pub fn site_playbook(site: &ActiveSite) -> Playbook {
    Playbook::single_source(ContentSource::local(
        site.workspace_folder.to_string_lossy().into_owned(),
        site.start_path(),
    ))
}

async fn build_catalog(site: &ActiveSite) -> Result<ContentCatalog> {
    let playbook = site_playbook(site);
    tokio::task::spawn_blocking(move || -> Result<ContentCatalog> {
        let aggregate = aggregate_content(&playbook)?;
        Ok(classify_content(aggregate))
    })
    .await
    .map_err(|e| AntoraError::Task(e.to_string()))?
}

async fn catalog_for(
    state: OptInState,
    document: &Path,
    search: &dyn WorkspaceSearch,
    cancel: &Cancellation,
) -> Result<Option<ContentCatalog>> {
    match resolve_support(state, document, search, cancel).await? {
        AntoraSupport::Inactive => Ok(None),
        AntoraSupport::Active(site) => build_catalog(&site).await.map(Some),
    }
}

/// Build the content catalog for the site owning `document`.
///
/// Returns `Ok(None)` when support doesn't apply. Failures while building
/// the catalog are logged and returned.
pub async fn get_content_catalog(
    state: OptInState,
    document: &Path,
    search: &dyn WorkspaceSearch,
    cancel: &Cancellation,
) -> Result<Option<ContentCatalog>> {
    let result = catalog_for(state, document, search, cancel).await;

    if let Err(e) = &result {
        tracing::error!(document = %document.display(), error = %e, "Unable to create content catalog");
    }
    result
}

/// The catalog identity of `document` itself.
///
/// Any miss (no catalog, no descriptor, not cataloged) yields `None`.
pub async fn get_src(
    document: &Path,
    catalog: Option<&ContentCatalog>,
    search: &dyn WorkspaceSearch,
    cancel: &Cancellation,
) -> Option<ResourceIdentity> {
    let catalog = catalog?;
    let config_file = match find_antora_config_file(search, document, cancel).await {
        Ok(found) => found?,
        Err(e) => {
            tracing::debug!(error = %e, "No Antora configuration for document");
            return None;
        }
    };
    let config = AntoraConfig::load(&config_file);
    let config_dir = config_file.parent()?;
    let relative = slash_path(document.strip_prefix(config_dir).ok()?);

    let file = catalog.get_by_path(&config.name()?, &config.version()?, &relative)?;
    Some(file.src.clone())
}

/// Resolve a resource id referenced from the document identified by `src`
/// to an absolute file path.
///
/// Resolution is restricted to [`RESOLVABLE_FAMILIES`].
pub fn resolve_antora_resource_ids(
    id: &str,
    catalog: Option<&ContentCatalog>,
    src: &ResourceIdentity,
    family: Family,
) -> Option<PathBuf> {
    catalog?
        .resolve_resource(id, &ResourceContext::from(src), family, &RESOLVABLE_FAMILIES)
        .map(|file| file.abspath.clone())
}
