//! `antora-assist lsp`: serve JSON-RPC on stdin/stdout until the client exits.

use anyhow::Result;

/// Run the Antora language server. Logging stays on stderr.
pub fn execute() -> Result<()> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Antora language server on stdio"
    );
    super::block_on(|_cancel| async {
        antora_lsp::run_server().await;
        Ok(())
    })?;
    tracing::info!("Antora language server exited");
    Ok(())
}
