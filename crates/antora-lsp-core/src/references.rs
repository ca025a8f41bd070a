//! Finding Antora resource references in AsciiDoc source.
//!
//! Recognizes the macros whose target is a resource id: `xref:`,
//! `include::` and block or inline `image:`.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::Family;

/// A resource id referenced from a line of AsciiDoc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReference {
    /// The macro target, as written.
    pub id: String,
    /// Family assumed when the id has no `family$` part.
    pub family: Family,
    /// Range of the target on the line, in UTF-16 code units.
    pub start: usize,
    pub end: usize,
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(xref:|include::|image::?)([^\[\s]+)\[").expect("valid reference pattern")
    })
}

fn macro_family(name: &str) -> Family {
    match name {
        "xref:" => Family::Page,
        "include::" => Family::Partial,
        _ => Family::Image,
    }
}

/// All references on `line`.
pub fn references_in_line(line: &str) -> Vec<ResourceReference> {
    reference_re()
        .captures_iter(line)
        .filter_map(|caps| {
            let name = caps.get(1)?;
            let target = caps.get(2)?;
            // `include::` targets outside the catalog (attribute paths, URLs) are skipped.
            if target.as_str().contains('{') || target.as_str().contains("://") {
                return None;
            }
            let start = line[..target.start()].encode_utf16().count();
            let end = start + target.as_str().encode_utf16().count();
            Some(ResourceReference {
                id: target.as_str().to_string(),
                family: macro_family(name.as_str()),
                start,
                end,
            })
        })
        .collect()
}

/// The reference whose target spans `character` (a UTF-16 offset).
pub fn reference_at(line: &str, character: usize) -> Option<ResourceReference> {
    references_in_line(line)
        .into_iter()
        .find(|r| r.start <= character && character <= r.end)
}
