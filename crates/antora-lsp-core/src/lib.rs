//! Transport-agnostic Antora support for AsciiDoc editors.
//!
//! This crate decides whether an open document belongs to an Antora site,
//! owns the user's opt-in to Antora features, builds the site's content
//! catalog and resolves resource ids against it. It has no LSP protocol
//! dependencies; the editor host is reached through the
//! [`WorkspaceSearch`], [`StateStore`] and [`Prompter`] traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        antora-lsp-core                          │
//! │                                                                 │
//! │  locator ──► config ──► context ──► catalog (aggregate,         │
//! │     ▲                      │          classify, resource ids)   │
//! │     │                      ▼                                    │
//! │  opt_in              completion / references                    │
//! └─────────────────────────────────────────────────────────────────┘
//!             │                                    │
//!             ▼                                    ▼
//! ┌───────────────────────┐          ┌─────────────────────────────┐
//! │     antora-lsp        │          │       antora-assist         │
//! │  (Native LSP server)  │          │   (CLI diagnostics, `lsp`)  │
//! └───────────────────────┘          └─────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use antora_lsp_core::{Cancellation, FsWorkspace, OptInState};
//!
//! let workspace = FsWorkspace::new([root]);
//! let cancel = Cancellation::new();
//! let catalog = get_content_catalog(OptInState::Enabled, &page, &workspace, &cancel).await?;
//! let src = get_src(&page, catalog.as_ref(), &workspace, &cancel).await;
//! ```

pub mod cancellation;
pub mod catalog;
pub mod completion;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod locator;
pub mod opt_in;
pub mod references;
pub mod types;

// Re-export main types and functions for convenience
pub use cancellation::Cancellation;
pub use catalog::{CatalogFile, ContentCatalog, ResourceContext};
pub use completion::attribute_completions;
pub use config::{AntoraConfig, get_antora_config, get_attributes};
pub use context::{
    ActiveSite, AntoraSupport, get_content_catalog, get_src, resolve_antora_resource_ids,
    resolve_support,
};
pub use document::{Document, DocumentStore};
pub use error::{AntoraError, Result};
pub use locator::{
    FsWorkspace, WorkspaceSearch, antora_config_file_exists, find_antora_config_file,
    is_in_module_tree,
};
pub use opt_in::{
    Activation, MemoryStateStore, OptInGate, OptInState, PromptAnswer, Prompter, StateStore,
};
pub use references::{ResourceReference, reference_at};
pub use types::{
    CompletionItem, CompletionItemKind, Family, Position, RESOLVABLE_FAMILIES, Range,
    ResourceIdentity,
};
