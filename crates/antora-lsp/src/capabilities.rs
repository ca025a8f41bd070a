//! LSP capability negotiation.

use tower_lsp::lsp_types::{
    CompletionOptions, CompletionRegistrationOptions, DocumentFilter, OneOf, Registration,
    ServerCapabilities, TextDocumentRegistrationOptions, TextDocumentSyncCapability,
    TextDocumentSyncKind, TextDocumentSyncOptions, WorkDoneProgressOptions,
    WorkspaceFoldersServerCapabilities, WorkspaceServerCapabilities,
};

use antora_lsp_core::completion::ATTRIBUTE_TRIGGER;

/// Language id of the documents Antora features apply to.
pub const ASCIIDOC_LANGUAGE_ID: &str = "asciidoc";

/// Registration id of the attribute completion provider.
pub const COMPLETION_REGISTRATION_ID: &str = "antora-attribute-completion";

/// Get the server capabilities to report to the client.
///
/// Completion is not listed here: it is registered dynamically once the
/// user has opted in to Antora support.
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                // Full document sync
                change: Some(TextDocumentSyncKind::FULL),
                will_save: None,
                will_save_wait_until: None,
                save: None,
            },
        )),

        // Resource id navigation (xref, include, image targets)
        definition_provider: Some(OneOf::Left(true)),

        workspace: Some(WorkspaceServerCapabilities {
            workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                supported: Some(true),
                change_notifications: Some(OneOf::Left(true)),
            }),
            file_operations: None,
        }),
        ..Default::default()
    }
}

/// The dynamic registration for attribute completion in AsciiDoc files.
pub fn completion_registration() -> Registration {
    let options = CompletionRegistrationOptions {
        text_document_registration_options: TextDocumentRegistrationOptions {
            document_selector: Some(vec![DocumentFilter {
                language: Some(ASCIIDOC_LANGUAGE_ID.to_string()),
                scheme: Some("file".to_string()),
                pattern: None,
            }]),
        },
        completion_options: CompletionOptions {
            trigger_characters: Some(vec![ATTRIBUTE_TRIGGER.to_string()]),
            resolve_provider: Some(false),
            all_commit_characters: None,
            work_done_progress_options: WorkDoneProgressOptions::default(),
            completion_item: None,
        },
    };

    Registration {
        id: COMPLETION_REGISTRATION_ID.to_string(),
        method: "textDocument/completion".to_string(),
        register_options: serde_json::to_value(options).ok(),
    }
}
