//! `antora-assist attributes`: the attributes completion would offer.

use anyhow::Result;

use antora_lsp_core::get_attributes;

use super::{SiteArgs, block_on};

pub fn execute(args: SiteArgs) -> Result<()> {
    let site = &args;
    let attributes = block_on(|cancel| async move {
        get_attributes(&site.workspace, &site.document, &cancel)
            .await
            .map_err(anyhow::Error::from)
    })?;

    if attributes.is_empty() {
        tracing::info!(document = %args.document.display(), "No AsciiDoc attributes declared");
    }
    for (name, value) in &attributes {
        println!(":{}: {}", name, value);
    }
    Ok(())
}
