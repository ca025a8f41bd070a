//! `antora-assist resolve`: where a resource id points from a document.

use std::path::PathBuf;

use anyhow::{Result, bail};

use antora_lsp_core::{
    Cancellation, Family, OptInState, get_content_catalog, get_src, resolve_antora_resource_ids,
};

use super::{SiteArgs, block_on};

async fn resolve(
    site: &SiteArgs,
    id: &str,
    family: Family,
    cancel: &Cancellation,
) -> Result<Option<PathBuf>> {
    let catalog =
        get_content_catalog(OptInState::Enabled, &site.document, &site.workspace, cancel).await?;
    let Some(src) = get_src(&site.document, catalog.as_ref(), &site.workspace, cancel).await
    else {
        bail!("{} is not in the content catalog", site.document.display());
    };
    tracing::debug!(%src, id, %family, "Resolving resource id");
    Ok(resolve_antora_resource_ids(id, catalog.as_ref(), &src, family))
}

pub fn execute(args: SiteArgs, id: &str, family: Family) -> Result<()> {
    let site = &args;
    let target = block_on(|cancel| async move { resolve(site, id, family, &cancel).await })?;

    match target {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => bail!("Unable to resolve {} as a {}", id, family),
    }
}
