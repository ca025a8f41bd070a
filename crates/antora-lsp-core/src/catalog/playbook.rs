//! The playbook handed to content aggregation.
//!
//! Only the pieces the editor needs are modelled: a list of content
//! sources plus opaque runtime and site option maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The worktree marker: read files as they are on disk.
pub const HEAD_BRANCH: &str = "HEAD";

/// One content source: a repository and where the component lives in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSource {
    /// Repository root, a local path or `file://` URL.
    pub url: String,
    pub branches: Vec<String>,
    /// Path from the repository root to the directory holding `antora.yml`.
    /// Empty when the descriptor sits at the root.
    #[serde(default)]
    pub start_path: String,
}

impl ContentSource {
    /// A source reading the worktree of a local repository.
    pub fn local(url: impl Into<String>, start_path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            branches: vec![HEAD_BRANCH.to_string()],
            start_path: start_path.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSpec {
    pub sources: Vec<ContentSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playbook {
    pub content: ContentSpec,
    #[serde(default)]
    pub runtime: Map<String, Value>,
    #[serde(default)]
    pub site: Map<String, Value>,
}

impl Playbook {
    /// A playbook with one source and empty runtime and site options.
    pub fn single_source(source: ContentSource) -> Self {
        Self {
            content: ContentSpec {
                sources: vec![source],
            },
            ..Default::default()
        }
    }
}
