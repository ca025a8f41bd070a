//! Prompting the user through `window/showMessageRequest`.

use async_trait::async_trait;
use tower_lsp::Client;
use tower_lsp::lsp_types::{MessageActionItem, MessageType};

use antora_lsp_core::opt_in::{PROMPT_NO, PROMPT_YES, PromptAnswer, Prompter};

/// A [`Prompter`] that asks through the LSP client.
pub struct ClientPrompter {
    client: Client,
}

impl ClientPrompter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Map the action the client returned to an answer.
pub fn answer_from_action(action: Option<&MessageActionItem>) -> PromptAnswer {
    match action.map(|a| a.title.as_str()) {
        Some(PROMPT_YES) => PromptAnswer::Yes,
        Some(PROMPT_NO) => PromptAnswer::No,
        _ => PromptAnswer::Dismissed,
    }
}

fn action(title: &str) -> MessageActionItem {
    MessageActionItem {
        title: title.to_string(),
        properties: Default::default(),
    }
}

#[async_trait]
impl Prompter for ClientPrompter {
    async fn ask_yes_no(&self, message: &str) -> PromptAnswer {
        let response = self
            .client
            .show_message_request(
                MessageType::INFO,
                message,
                Some(vec![action(PROMPT_YES), action(PROMPT_NO)]),
            )
            .await;

        match response {
            Ok(action) => answer_from_action(action.as_ref()),
            Err(e) => {
                tracing::warn!(error = %e, "Prompt request failed");
                PromptAnswer::Dismissed
            }
        }
    }
}
