//! The per-workspace Antora support opt-in.
//!
//! The decision is stored through a [`StateStore`] under two keys: one
//! recording that the user has been asked, one mirroring the user-facing
//! `antora.enableAntoraSupport` setting. [`OptInGate`] is the only component
//! that reads or writes them.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cancellation::Cancellation;
use crate::error::Result;
use crate::locator::{WorkspaceSearch, find_antora_config_file};

/// State key recording that the opt-in question has been answered.
pub const DECIDED_KEY: &str = "antoraSupportSetting";

/// Setting key mirroring whether Antora support is enabled.
pub const ENABLED_SETTING_KEY: &str = "antora.enableAntoraSupport";

/// The prompt shown on first detection.
pub const PROMPT_MESSAGE: &str =
    "We detect that you are working with Antora. Do you want to activate Antora support?";
pub const PROMPT_YES: &str = "Yes";
pub const PROMPT_NO: &str = "No";

/// Whether Antora support is active for this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptInState {
    /// The user hasn't been asked yet.
    #[default]
    Undecided,
    Enabled,
    Disabled,
}

impl OptInState {
    fn from_flags(decided: Option<bool>, enabled: Option<bool>) -> Self {
        match (decided, enabled) {
            (Some(true), Some(true)) => OptInState::Enabled,
            (Some(true), _) => OptInState::Disabled,
            _ => OptInState::Undecided,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, OptInState::Enabled)
    }
}

/// Persisted key-value storage for boolean flags.
///
/// Writing `None` removes the key.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get_flag(&self, key: &str) -> Option<bool>;
    async fn set_flag(&self, key: &str, value: Option<bool>) -> Result<()>;
}

#[async_trait]
impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    async fn get_flag(&self, key: &str) -> Option<bool> {
        (**self).get_flag(key).await
    }

    async fn set_flag(&self, key: &str, value: Option<bool>) -> Result<()> {
        (**self).set_flag(key, value).await
    }
}

/// In-memory [`StateStore`], for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    flags: RwLock<HashMap<String, bool>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get_flag(&self, key: &str) -> Option<bool> {
        self.flags.read().await.get(key).copied()
    }

    async fn set_flag(&self, key: &str, value: Option<bool>) -> Result<()> {
        let mut flags = self.flags.write().await;
        match value {
            Some(value) => flags.insert(key.to_string(), value),
            None => flags.remove(key),
        };
        Ok(())
    }
}

/// The user's answer to a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Yes,
    No,
    /// The prompt was closed without picking an option.
    Dismissed,
}

/// Asks the user a yes/no question through the editor.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn ask_yes_no(&self, message: &str) -> PromptAnswer;
}

/// What the caller should do after the gate has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Register the Antora editor features.
    Activate,
    /// Leave the features off.
    Skip,
}

/// Owns the opt-in decision and prompts for it at most once.
pub struct OptInGate<S: StateStore> {
    store: S,
    state: RwLock<OptInState>,
    listening: AtomicBool,
}

impl<S: StateStore> OptInGate<S> {
    /// Read the persisted state. The gate listens for document opens only
    /// while the state is undecided.
    pub async fn load(store: S) -> Self {
        let decided = store.get_flag(DECIDED_KEY).await;
        let enabled = store.get_flag(ENABLED_SETTING_KEY).await;
        let state = OptInState::from_flags(decided, enabled);
        tracing::debug!(?state, "Loaded Antora support opt-in state");

        Self {
            store,
            state: RwLock::new(state),
            listening: AtomicBool::new(state == OptInState::Undecided),
        }
    }

    /// The current decision.
    pub async fn state(&self) -> OptInState {
        *self.state.read().await
    }

    /// Whether Antora support is enabled.
    pub async fn is_enabled(&self) -> bool {
        self.state().await.is_enabled()
    }

    /// Whether the gate still reacts to document opens.
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    /// Activation to apply at startup, before any document is opened.
    pub async fn initial_activation(&self) -> Activation {
        if self.is_enabled().await {
            Activation::Activate
        } else {
            Activation::Skip
        }
    }

    /// React to a document being opened.
    ///
    /// Prompts once, on the first opened document that belongs to an Antora
    /// site, and persists the answer. A dismissed prompt counts as decided
    /// and leaves the setting unset, which reads as disabled. A failed write
    /// is logged; the answer still applies for this session.
    pub async fn on_document_opened(
        &self,
        document: &Path,
        search: &dyn WorkspaceSearch,
        prompter: &dyn Prompter,
        cancel: &Cancellation,
    ) -> Result<Activation> {
        if !self.is_listening() {
            return Ok(Activation::Skip);
        }
        if find_antora_config_file(search, document, cancel)
            .await?
            .is_none()
        {
            return Ok(Activation::Skip);
        }
        // Another open may have won the race while we were searching.
        if !self.listening.swap(false, Ordering::SeqCst) {
            return Ok(Activation::Skip);
        }

        let answer = prompter.ask_yes_no(PROMPT_MESSAGE).await;
        let enabled = match answer {
            PromptAnswer::Yes => Some(true),
            PromptAnswer::No => Some(false),
            PromptAnswer::Dismissed => None,
        };
        tracing::info!(?answer, document = %document.display(), "Antora support decision");

        let state = OptInState::from_flags(Some(true), enabled);
        *self.state.write().await = state;

        // The decided flag goes last so a partial write reads back as undecided.
        if let Err(e) = self.persist(enabled).await {
            tracing::error!(error = %e, "Failed to persist Antora support decision");
        }

        Ok(if state.is_enabled() {
            Activation::Activate
        } else {
            Activation::Skip
        })
    }

    async fn persist(&self, enabled: Option<bool>) -> Result<()> {
        self.store.set_flag(ENABLED_SETTING_KEY, enabled).await?;
        self.store.set_flag(DECIDED_KEY, Some(true)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AntoraError;
    use crate::locator::FsWorkspace;
    use std::sync::atomic::AtomicUsize;

    struct ScriptedPrompter {
        answer: PromptAnswer,
        asked: AtomicUsize,
    }

    impl ScriptedPrompter {
        fn new(answer: PromptAnswer) -> Self {
            Self {
                answer,
                asked: AtomicUsize::new(0),
            }
        }

        fn times_asked(&self) -> usize {
            self.asked.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Prompter for ScriptedPrompter {
        async fn ask_yes_no(&self, _message: &str) -> PromptAnswer {
            self.asked.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    fn antora_site() -> (tempfile::TempDir, FsWorkspace, std::path::PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        std::fs::create_dir_all(root.join("docs/modules/ROOT/pages")).unwrap();
        std::fs::write(root.join("docs/antora.yml"), "name: docs\nversion: ~\n").unwrap();
        std::fs::write(root.join("docs/modules/ROOT/pages/index.adoc"), "= Home\n").unwrap();
        let page = root.join("docs/modules/ROOT/pages/index.adoc");
        (tmp, FsWorkspace::new([root]), page)
    }

    #[tokio::test]
    async fn yes_enables_and_never_asks_again() {
        let (_tmp, ws, page) = antora_site();
        let gate = OptInGate::load(MemoryStateStore::new()).await;
        let prompter = ScriptedPrompter::new(PromptAnswer::Yes);
        let cancel = Cancellation::new();

        assert_eq!(gate.state().await, OptInState::Undecided);
        let first = gate
            .on_document_opened(&page, &ws, &prompter, &cancel)
            .await
            .unwrap();
        assert_eq!(first, Activation::Activate);
        assert_eq!(gate.state().await, OptInState::Enabled);

        let second = gate
            .on_document_opened(&page, &ws, &prompter, &cancel)
            .await
            .unwrap();
        assert_eq!(second, Activation::Skip);
        assert_eq!(prompter.times_asked(), 1);
        assert!(!gate.is_listening());
    }

    #[tokio::test]
    async fn no_persists_disabled() {
        let (_tmp, ws, page) = antora_site();
        let gate = OptInGate::load(MemoryStateStore::new()).await;
        let prompter = ScriptedPrompter::new(PromptAnswer::No);

        let activation = gate
            .on_document_opened(&page, &ws, &prompter, &Cancellation::new())
            .await
            .unwrap();
        assert_eq!(activation, Activation::Skip);
        assert_eq!(gate.state().await, OptInState::Disabled);
        assert_eq!(gate.store.get_flag(DECIDED_KEY).await, Some(true));
        assert_eq!(gate.store.get_flag(ENABLED_SETTING_KEY).await, Some(false));
    }

    #[tokio::test]
    async fn dismissal_is_decided_but_disabled() {
        let (_tmp, ws, page) = antora_site();
        let gate = OptInGate::load(MemoryStateStore::new()).await;
        let prompter = ScriptedPrompter::new(PromptAnswer::Dismissed);

        gate.on_document_opened(&page, &ws, &prompter, &Cancellation::new())
            .await
            .unwrap();
        assert_eq!(gate.state().await, OptInState::Disabled);
        assert_eq!(gate.store.get_flag(ENABLED_SETTING_KEY).await, None);
        assert!(!gate.is_listening());
    }

    #[tokio::test]
    async fn non_antora_document_does_not_prompt() {
        let (tmp, ws, _page) = antora_site();
        let readme = tmp.path().join("README.adoc");
        std::fs::write(&readme, "= Readme\n").unwrap();
        let gate = OptInGate::load(MemoryStateStore::new()).await;
        let prompter = ScriptedPrompter::new(PromptAnswer::Yes);

        let activation = gate
            .on_document_opened(&readme, &ws, &prompter, &Cancellation::new())
            .await
            .unwrap();
        assert_eq!(activation, Activation::Skip);
        assert_eq!(prompter.times_asked(), 0);
        assert!(gate.is_listening());
    }

    /// Rejects every write.
    struct ReadOnlyStore;

    #[async_trait]
    impl StateStore for ReadOnlyStore {
        async fn get_flag(&self, _key: &str) -> Option<bool> {
            None
        }

        async fn set_flag(&self, key: &str, _value: Option<bool>) -> Result<()> {
            Err(AntoraError::State {
                path: "state.json".into(),
                message: format!("read-only, cannot write {key}"),
            })
        }
    }

    #[tokio::test]
    async fn failed_persist_still_activates() {
        let (_tmp, ws, page) = antora_site();
        let gate = OptInGate::load(ReadOnlyStore).await;
        let prompter = ScriptedPrompter::new(PromptAnswer::Yes);
        let cancel = Cancellation::new();

        let activation = gate
            .on_document_opened(&page, &ws, &prompter, &cancel)
            .await
            .unwrap();
        assert_eq!(activation, Activation::Activate);
        assert_eq!(gate.state().await, OptInState::Enabled);
        assert!(!gate.is_listening());

        let again = gate
            .on_document_opened(&page, &ws, &prompter, &cancel)
            .await
            .unwrap();
        assert_eq!(again, Activation::Skip);
        assert_eq!(prompter.times_asked(), 1);
    }

    #[tokio::test]
    async fn concurrent_opens_prompt_once() {
        let (_tmp, ws, page) = antora_site();
        let gate = OptInGate::load(MemoryStateStore::new()).await;
        let prompter = ScriptedPrompter::new(PromptAnswer::Yes);
        let cancel = Cancellation::new();

        let (a, b) = tokio::join!(
            gate.on_document_opened(&page, &ws, &prompter, &cancel),
            gate.on_document_opened(&page, &ws, &prompter, &cancel),
        );
        let mut activations = [a.unwrap(), b.unwrap()];
        activations.sort_by_key(|a| *a == Activation::Skip);
        assert_eq!(activations, [Activation::Activate, Activation::Skip]);
        assert_eq!(prompter.times_asked(), 1);
        assert_eq!(gate.state().await, OptInState::Enabled);
    }

    #[tokio::test]
    async fn previously_enabled_activates_without_prompt() {
        let store = MemoryStateStore::new();
        store.set_flag(DECIDED_KEY, Some(true)).await.unwrap();
        store.set_flag(ENABLED_SETTING_KEY, Some(true)).await.unwrap();

        let gate = OptInGate::load(store).await;
        assert_eq!(gate.initial_activation().await, Activation::Activate);
        assert!(!gate.is_listening());
    }

    #[tokio::test]
    async fn enabled_setting_without_decision_is_undecided() {
        let store = MemoryStateStore::new();
        store.set_flag(ENABLED_SETTING_KEY, Some(true)).await.unwrap();

        let gate = OptInGate::load(store).await;
        assert_eq!(gate.state().await, OptInState::Undecided);
        assert_eq!(gate.initial_activation().await, Activation::Skip);
    }
}
