//! Antora Language Server Protocol implementation.
//!
//! This crate provides the LSP server for Antora documentation sites,
//! wrapping `antora-lsp-core` with the tower-lsp framework.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          antora-lsp                           │
//! │  tower-lsp wrapper, JSON-RPC/stdio, `antora-assist lsp`       │
//! │                                                               │
//! │  ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌────────────┐  │
//! │  │ server.rs  │ │ convert.rs │ │ prompt.rs  │ │  state.rs  │  │
//! │  │  handlers  │ │ Core ↔ LSP │ │  yes / no  │ │ JSON flags │  │
//! │  └─────┬──────┘ └─────┬──────┘ └─────┬──────┘ └─────┬──────┘  │
//! │        └──────────────┴──────┬───────┴──────────────┘         │
//! │  ┌───────────────────────────▼───────────────────────────┐    │
//! │  │                   antora-lsp-core                     │    │
//! │  │   (site detection, opt-in, catalog, resource ids)     │    │
//! │  └───────────────────────────────────────────────────────┘    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Completion is registered dynamically (`client/registerCapability`) once
//! the workspace has opted in to Antora support; definition requests are
//! answered only while support is enabled.
//!
//! # Usage
//!
//! ```bash
//! antora-assist lsp
//! ```
//!
//! Or programmatically:
//!
//! ```rust,ignore
//! antora_lsp::run_server().await;
//! ```

pub mod capabilities;
pub mod convert;
pub mod prompt;
pub mod server;
pub mod state;

pub use server::{AntoraLanguageServer, run_server};
