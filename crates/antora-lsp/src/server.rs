//! LSP server implementation using tower-lsp.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{OnceCell, RwLock};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

use antora_lsp_core::{
    Activation, Cancellation, Document, DocumentStore, FsWorkspace, MemoryStateStore, OptInGate,
    OptInState, StateStore, attribute_completions, get_attributes, get_content_catalog, get_src,
    reference_at, resolve_antora_resource_ids,
};

use crate::capabilities::{completion_registration, server_capabilities};
use crate::convert;
use crate::prompt::ClientPrompter;
use crate::state::{DEFAULT_STATE_FILE, JsonStateStore};

type Gate = OptInGate<Arc<dyn StateStore>>;

/// Options the client may pass in `initializationOptions`.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializationOptions {
    /// Where to persist the Antora opt-in decision.
    pub state_file: Option<PathBuf>,
}

/// State shared between request handlers and spawned tasks.
struct Inner {
    client: Client,
    documents: RwLock<DocumentStore>,
    workspace: RwLock<FsWorkspace>,
    gate: OnceCell<Gate>,
    features_registered: AtomicBool,
    /// Parent of every request's cancellation; fired on shutdown.
    shutdown: Cancellation,
}

impl Inner {
    async fn workspace_snapshot(&self) -> FsWorkspace {
        self.workspace.read().await.clone()
    }

    async fn opt_in_state(&self) -> OptInState {
        match self.gate.get() {
            Some(gate) => gate.state().await,
            None => OptInState::Undecided,
        }
    }

    /// Register the Antora editor features with the client, once.
    async fn register_features(&self) {
        if self.features_registered.swap(true, Ordering::SeqCst) {
            return;
        }
        match self
            .client
            .register_capability(vec![completion_registration()])
            .await
        {
            Ok(()) => tracing::info!("Registered Antora attribute completion"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to register Antora attribute completion");
                self.features_registered.store(false, Ordering::SeqCst);
            }
        }
    }

    async fn handle_document_opened(&self, path: PathBuf) {
        let Some(gate) = self.gate.get() else {
            return;
        };
        if !gate.is_listening() {
            return;
        }

        let workspace = self.workspace_snapshot().await;
        let prompter = ClientPrompter::new(self.client.clone());
        let cancel = self.shutdown.child();
        match gate
            .on_document_opened(&path, &workspace, &prompter, &cancel)
            .await
        {
            Ok(Activation::Activate) => self.register_features().await,
            Ok(Activation::Skip) => {}
            Err(e) => {
                tracing::warn!(document = %path.display(), error = %e, "Antora detection failed")
            }
        }
    }

    async fn document_line(&self, uri: &Url, line: u32) -> Option<(PathBuf, String)> {
        let documents = self.documents.read().await;
        let doc = documents.get(uri.as_str())?;
        Some((doc.path()?.to_path_buf(), doc.line(line)?.to_string()))
    }
}

/// The Antora language server.
pub struct AntoraLanguageServer {
    inner: Arc<Inner>,
}

impl AntoraLanguageServer {
    /// Create a new language server instance.
    pub fn new(client: Client) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                documents: RwLock::new(DocumentStore::new()),
                workspace: RwLock::new(FsWorkspace::default()),
                gate: OnceCell::new(),
                features_registered: AtomicBool::new(false),
                shutdown: Cancellation::new(),
            }),
        }
    }
}

/// Workspace folders from the initialize request, falling back to the root URI.
#[allow(deprecated)]
fn workspace_roots(params: &InitializeParams) -> Vec<PathBuf> {
    if let Some(folders) = &params.workspace_folders {
        return folders
            .iter()
            .filter_map(|f| convert::uri_to_path(&f.uri))
            .collect();
    }
    params
        .root_uri
        .as_ref()
        .and_then(convert::uri_to_path)
        .into_iter()
        .collect()
}

async fn open_state_store(
    options: &InitializationOptions,
    roots: &[PathBuf],
) -> Arc<dyn StateStore> {
    let path = options
        .state_file
        .clone()
        .or_else(|| roots.first().map(|root| root.join(DEFAULT_STATE_FILE)));
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Using state file");
            Arc::new(JsonStateStore::open(path).await)
        }
        None => {
            tracing::debug!("No workspace root; opt-in state is kept in memory");
            Arc::new(MemoryStateStore::new())
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for AntoraLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let options: InitializationOptions = params
            .initialization_options
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();
        let roots = workspace_roots(&params);

        let store = open_state_store(&options, &roots).await;
        let gate = OptInGate::load(store).await;
        let _ = self.inner.gate.set(gate);
        *self.inner.workspace.write().await = FsWorkspace::new(roots);

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: "antora-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.inner
            .client
            .log_message(MessageType::INFO, "Antora LSP server initialized")
            .await;

        if let Some(gate) = self.inner.gate.get() {
            if gate.initial_activation().await == Activation::Activate {
                self.inner.register_features().await;
            }
        }
    }

    async fn shutdown(&self) -> Result<()> {
        self.inner.shutdown.cancel();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let path = convert::uri_to_path(&uri);

        {
            let mut documents = self.inner.documents.write().await;
            documents.open(Document::with_version(
                uri.as_str(),
                path.clone(),
                params.text_document.text,
                params.text_document.version,
            ));
        }

        // The opt-in prompt waits on the user; don't hold up the notification queue.
        if let Some(path) = path {
            let inner = self.inner.clone();
            tokio::spawn(async move { inner.handle_document_opened(path).await });
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // We're using full document sync, so take the last change
        if let Some(change) = params.content_changes.into_iter().last() {
            let mut documents = self.inner.documents.write().await;
            documents.change(uri.as_str(), change.text, version);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let mut documents = self.inner.documents.write().await;
        documents.close(params.text_document.uri.as_str());
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        let mut workspace = self.inner.workspace.write().await;
        for removed in &params.event.removed {
            if let Some(path) = convert::uri_to_path(&removed.uri) {
                workspace.remove_folder(&path);
            }
        }
        for added in params.event.added {
            if let Some(path) = convert::uri_to_path(&added.uri) {
                workspace.add_folder(path);
            }
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        if !self.inner.opt_in_state().await.is_enabled() {
            return Ok(None);
        }
        let position = params.text_document_position;
        let (path, prefix) = {
            let documents = self.inner.documents.read().await;
            let Some(doc) = documents.get(position.text_document.uri.as_str()) else {
                return Ok(None);
            };
            let Some(path) = doc.path() else {
                return Ok(None);
            };
            let Some(prefix) = doc.line_prefix(convert::position_from_lsp(&position.position)) else {
                return Ok(None);
            };
            (path.to_path_buf(), prefix.to_string())
        };

        let workspace = self.inner.workspace_snapshot().await;
        let cancel = self.inner.shutdown.child();
        let attributes = match get_attributes(&workspace, &path, &cancel).await {
            Ok(attributes) => attributes,
            Err(e) => {
                tracing::warn!(document = %path.display(), error = %e, "Unable to read Antora attributes");
                return Ok(None);
            }
        };

        let items: Vec<CompletionItem> = attribute_completions(&prefix, &attributes)
            .iter()
            .map(convert::completion_item_to_lsp)
            .collect();
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let position = params.text_document_position_params;
        let Some((path, line)) = self
            .inner
            .document_line(&position.text_document.uri, position.position.line)
            .await
        else {
            return Ok(None);
        };
        let Some(reference) = reference_at(&line, position.position.character as usize) else {
            return Ok(None);
        };

        let state = self.inner.opt_in_state().await;
        let workspace = self.inner.workspace_snapshot().await;
        let cancel = self.inner.shutdown.child();
        let catalog = match get_content_catalog(state, &path, &workspace, &cancel).await {
            Ok(catalog) => catalog,
            // Already logged by the catalog builder.
            Err(_) => return Ok(None),
        };
        let Some(src) = get_src(&path, catalog.as_ref(), &workspace, &cancel).await else {
            return Ok(None);
        };

        let target =
            resolve_antora_resource_ids(&reference.id, catalog.as_ref(), &src, reference.family);
        Ok(target
            .as_deref()
            .and_then(convert::file_location)
            .map(GotoDefinitionResponse::Scalar))
    }
}

/// Run the LSP server over stdio.
pub async fn run_server() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(AntoraLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
