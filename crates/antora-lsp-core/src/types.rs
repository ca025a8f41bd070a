//! Core types shared by the locator, catalog and editor features.
//!
//! These types are designed to be:
//! - Transport-agnostic (no LSP protocol dependencies)
//! - Easily serializable to JSON
//! - Easily convertible to `lsp-types` (for the native LSP server)
//!
//! All positions use 0-based line and character indices, matching the LSP specification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A position in a text document, expressed as zero-based line and character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based character offset.
    pub character: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A range in a text document, expressed as start and end positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Range {
    /// The range's start position (inclusive).
    pub start: Position,
    /// The range's end position (exclusive).
    pub end: Position,
}

impl Range {
    /// Create a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a range spanning a single position (zero-width).
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

/// The family of a cataloged Antora file.
///
/// A family is determined by the directory a file lives in under
/// `modules/<module>/` (or, for `nav`, by the component descriptor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Attachment,
    Example,
    Image,
    Nav,
    Page,
    Partial,
}

/// Families that a cross-reference is allowed to resolve to.
pub const RESOLVABLE_FAMILIES: [Family; 5] = [
    Family::Attachment,
    Family::Example,
    Family::Image,
    Family::Page,
    Family::Partial,
];

impl Family {
    /// The family name as it appears in resource ids (`image$`, `page$`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Attachment => "attachment",
            Family::Example => "example",
            Family::Image => "image",
            Family::Nav => "nav",
            Family::Page => "page",
            Family::Partial => "partial",
        }
    }

    /// Map a directory name under `modules/<module>/` to its family.
    pub fn from_dir_name(dir: &str) -> Option<Self> {
        match dir {
            "attachments" => Some(Family::Attachment),
            "examples" => Some(Family::Example),
            "images" => Some(Family::Image),
            "pages" => Some(Family::Page),
            "partials" => Some(Family::Partial),
            _ => None,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attachment" => Ok(Family::Attachment),
            "example" => Ok(Family::Example),
            "image" => Ok(Family::Image),
            "nav" => Ok(Family::Nav),
            "page" => Ok(Family::Page),
            "partial" => Ok(Family::Partial),
            _ => Err(format!("Unknown family: {}", s)),
        }
    }
}

/// The canonical address of a cataloged document or asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentity {
    pub component: String,
    pub version: String,
    pub module: String,
    pub family: Family,
    /// Path relative to the family directory (e.g. `topic/intro.adoc`).
    pub relative: String,
}

impl fmt::Display for ResourceIdentity {
    /// Formats as a fully qualified resource id: `version@component:module:family$relative`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}:{}${}",
            self.version, self.component, self.module, self.family, self.relative
        )
    }
}

/// Completion item kinds used by this crate, matching LSP CompletionItemKind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionItemKind {
    Variable = 6,
}

/// A completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    /// The label shown in the completion list.
    pub label: String,
    /// The item kind.
    pub kind: CompletionItemKind,
    /// Extra information shown next to the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The text inserted when the item is accepted.
    pub insert_text: String,
}
