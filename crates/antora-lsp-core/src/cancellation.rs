/*
 * cancellation.rs
 * Copyright (c) 2025 Antora Assist Contributors
 *
 * Cancellation for workspace searches.
 *
 * Wraps tokio_util::sync::CancellationToken so the trait seams in this
 * crate don't leak the tokio_util type.
 */

//! Cancellation for workspace searches.
//!
//! A [`Cancellation`] is handed to every [`crate::locator::WorkspaceSearch`]
//! call. Implementations are expected to stop walking and return
//! [`crate::AntoraError::Cancelled`] once it fires.

use tokio_util::sync::CancellationToken;

/// A cloneable cancellation token shared between a request and its search.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    inner: CancellationToken,
}

impl Cancellation {
    /// Create a new cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// Request cancellation.
    ///
    /// After this is called, `is_cancelled()` will return `true` on every clone.
    pub fn cancel(&self) {
        self.inner.cancel()
    }

    /// A token that is cancelled with this one but can also be cancelled alone.
    pub fn child(&self) -> Self {
        Self {
            inner: self.inner.child_token(),
        }
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&self) {
        self.inner.cancelled().await
    }
}

impl From<CancellationToken> for Cancellation {
    fn from(token: CancellationToken) -> Self {
        Self { inner: token }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_not_cancelled() {
        let token = Cancellation::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_clone_shares_state() {
        let token1 = Cancellation::new();
        let token2 = token1.clone();

        token1.cancel();

        assert!(token1.is_cancelled());
        assert!(token2.is_cancelled());
    }

    #[test]
    fn test_child_follows_parent_but_not_reverse() {
        let parent = Cancellation::new();
        let child = parent.child();

        child.cancel();
        assert!(!parent.is_cancelled());

        let other = parent.child();
        parent.cancel();
        assert!(other.is_cancelled());
    }
}
