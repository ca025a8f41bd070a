//! Conversion between antora-lsp-core types and tower_lsp::lsp_types.

use std::path::{Path, PathBuf};

use tower_lsp::lsp_types::{
    CompletionItem as LspCompletionItem, CompletionItemKind as LspCompletionItemKind,
    InsertTextFormat, Location, Position as LspPosition, Range as LspRange, Url,
};

use antora_lsp_core::types::{CompletionItem, CompletionItemKind, Position, Range};

/// Convert an lsp-types Position to an antora-lsp-core Position.
pub fn position_from_lsp(pos: &LspPosition) -> Position {
    Position::new(pos.line, pos.character)
}

/// Convert an antora-lsp-core Position to an lsp-types Position.
pub fn position_to_lsp(pos: &Position) -> LspPosition {
    LspPosition {
        line: pos.line,
        character: pos.character,
    }
}

/// Convert an antora-lsp-core Range to an lsp-types Range.
pub fn range_to_lsp(range: &Range) -> LspRange {
    LspRange {
        start: position_to_lsp(&range.start),
        end: position_to_lsp(&range.end),
    }
}

/// Convert an antora-lsp-core CompletionItemKind to an lsp-types CompletionItemKind.
pub fn completion_kind_to_lsp(kind: &CompletionItemKind) -> LspCompletionItemKind {
    match kind {
        CompletionItemKind::Variable => LspCompletionItemKind::VARIABLE,
    }
}

/// Convert an antora-lsp-core CompletionItem to an lsp-types CompletionItem.
pub fn completion_item_to_lsp(item: &CompletionItem) -> LspCompletionItem {
    LspCompletionItem {
        label: item.label.clone(),
        kind: Some(completion_kind_to_lsp(&item.kind)),
        detail: item.detail.clone(),
        insert_text: Some(item.insert_text.clone()),
        insert_text_format: Some(InsertTextFormat::PLAIN_TEXT),
        ..Default::default()
    }
}

/// The filesystem path of a `file:` URI.
pub fn uri_to_path(uri: &Url) -> Option<PathBuf> {
    if uri.scheme() != "file" {
        return None;
    }
    uri.to_file_path().ok()
}

/// A location pointing at the start of a file.
pub fn file_location(path: &Path) -> Option<Location> {
    let uri = Url::from_file_path(path).ok()?;
    Some(Location {
        uri,
        range: range_to_lsp(&Range::point(Position::new(0, 0))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_conversion() {
        let lsp_pos = position_to_lsp(&Position::new(10, 5));
        assert_eq!(lsp_pos.line, 10);
        assert_eq!(lsp_pos.character, 5);
        assert_eq!(position_from_lsp(&lsp_pos), Position::new(10, 5));
    }

    #[test]
    fn test_completion_conversion() {
        let item = CompletionItem {
            label: "product".to_string(),
            kind: CompletionItemKind::Variable,
            detail: Some("Widget".to_string()),
            insert_text: "product}".to_string(),
        };
        let lsp_item = completion_item_to_lsp(&item);
        assert_eq!(lsp_item.label, "product");
        assert_eq!(lsp_item.kind, Some(LspCompletionItemKind::VARIABLE));
        assert_eq!(lsp_item.detail.as_deref(), Some("Widget"));
        assert_eq!(lsp_item.insert_text.as_deref(), Some("product}"));
    }

    #[cfg(unix)]
    #[test]
    fn test_uri_to_path() {
        let uri = Url::parse("file:///ws/docs/modules/ROOT/pages/index.adoc").unwrap();
        assert_eq!(
            uri_to_path(&uri),
            Some(PathBuf::from("/ws/docs/modules/ROOT/pages/index.adoc"))
        );
        let untitled = Url::parse("untitled:Untitled-1").unwrap();
        assert_eq!(uri_to_path(&untitled), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_location() {
        let location = file_location(Path::new("/ws/a.adoc")).unwrap();
        assert_eq!(location.uri.as_str(), "file:///ws/a.adoc");
        assert_eq!(location.range.start, LspPosition::new(0, 0));
    }
}
