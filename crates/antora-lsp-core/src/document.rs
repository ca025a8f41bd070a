//! Open documents.
//!
//! The editor owns document content; the server mirrors what it has been
//! told through open/change/close notifications. Antora features need the
//! document's filesystem path (to locate `antora.yml`) and the text of the
//! line under the cursor.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::Position;

/// An open document.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document's URI, as sent by the editor.
    uri: String,
    /// Filesystem path, for `file:` documents.
    path: Option<PathBuf>,
    content: String,
    version: Option<i32>,
}

impl Document {
    /// Create a new document with the given URI and content.
    pub fn new(uri: impl Into<String>, path: Option<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            path,
            content: content.into(),
            version: None,
        }
    }

    /// Create a new document with a version number.
    pub fn with_version(
        uri: impl Into<String>,
        path: Option<PathBuf>,
        content: impl Into<String>,
        version: i32,
    ) -> Self {
        Self {
            version: Some(version),
            ..Self::new(uri, path, content)
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    /// Update the document content with a new version.
    pub fn set_content_with_version(&mut self, content: impl Into<String>, version: i32) {
        self.content = content.into();
        self.version = Some(version);
    }

    /// The text of a zero-based line, without its line ending.
    pub fn line(&self, line: u32) -> Option<&str> {
        self.content
            .lines()
            .nth(line as usize)
            .or_else(|| {
                // A trailing newline opens an empty last line.
                (line as usize == self.content.lines().count() && self.content.ends_with('\n'))
                    .then_some("")
            })
    }

    /// The text of the cursor's line up to the cursor.
    ///
    /// `position.character` counts UTF-16 code units, as LSP positions do.
    /// A cursor inside a surrogate pair stops before that character.
    pub fn line_prefix(&self, position: Position) -> Option<&str> {
        let line = self.line(position.line)?;
        let target = position.character as usize;
        let mut units = 0;
        let mut end = line.len();
        for (i, c) in line.char_indices() {
            if units + c.len_utf16() > target {
                end = i;
                break;
            }
            units += c.len_utf16();
        }
        Some(&line[..end])
    }
}

/// A document store for managing open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<String, Document>,
}

impl DocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open or replace a document in the store.
    pub fn open(&mut self, document: Document) {
        self.documents.insert(document.uri().to_string(), document);
    }

    /// Update a document's content.
    pub fn change(&mut self, uri: &str, content: impl Into<String>, version: i32) {
        if let Some(doc) = self.documents.get_mut(uri) {
            doc.set_content_with_version(content, version);
        }
    }

    /// Close a document (remove from store).
    pub fn close(&mut self, uri: &str) {
        self.documents.remove(uri);
    }

    /// Get a document by URI.
    pub fn get(&self, uri: &str) -> Option<&Document> {
        self.documents.get(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
