//! `antora-assist locate`: which antora.yml owns a document.

use anyhow::{Result, bail};

use antora_lsp_core::find_antora_config_file;

use super::{SiteArgs, block_on};

pub fn execute(args: SiteArgs) -> Result<()> {
    let config_file = block_on(|cancel| async move {
        find_antora_config_file(&args.workspace, &args.document, &cancel)
            .await
            .map_err(anyhow::Error::from)
    })?;

    match config_file {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => bail!("Not part of an Antora module tree"),
    }
}
