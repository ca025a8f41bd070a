//! Attribute completion for documents in an Antora site.
//!
//! Typing `{` offers the attributes declared under `asciidoc.attributes`
//! in the component descriptor.

use std::collections::BTreeMap;

use crate::types::{CompletionItem, CompletionItemKind};

/// The character that triggers attribute completion.
pub const ATTRIBUTE_TRIGGER: char = '{';

/// Completion items for the text before the cursor.
///
/// Items are only produced when the character immediately before the
/// cursor is [`ATTRIBUTE_TRIGGER`]. Accepting an item inserts the attribute
/// name and the closing brace.
pub fn attribute_completions(
    line_prefix: &str,
    attributes: &BTreeMap<String, String>,
) -> Vec<CompletionItem> {
    if !line_prefix.ends_with(ATTRIBUTE_TRIGGER) {
        return Vec::new();
    }

    attributes
        .iter()
        .map(|(name, value)| CompletionItem {
            label: name.clone(),
            kind: CompletionItemKind::Variable,
            detail: (!value.is_empty()).then(|| value.clone()),
            insert_text: format!("{}}}", name),
        })
        .collect()
}
