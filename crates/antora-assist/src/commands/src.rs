//! `antora-assist src`: a document's identity in the content catalog.

use anyhow::{Result, bail};

use antora_lsp_core::{Cancellation, OptInState, ResourceIdentity, get_content_catalog, get_src};

use super::{SiteArgs, block_on};

async fn document_src(site: &SiteArgs, cancel: &Cancellation) -> Result<Option<ResourceIdentity>> {
    let catalog =
        get_content_catalog(OptInState::Enabled, &site.document, &site.workspace, cancel).await?;
    Ok(get_src(&site.document, catalog.as_ref(), &site.workspace, cancel).await)
}

pub fn execute(args: SiteArgs) -> Result<()> {
    let site = &args;
    let src = block_on(|cancel| async move { document_src(site, &cancel).await })?;

    match src {
        Some(src) => {
            println!("{}", src);
            Ok(())
        }
        None => bail!("{} is not in the content catalog", args.document.display()),
    }
}
