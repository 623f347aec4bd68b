//! Free-text conversation with the crop assistant.

use std::sync::Arc;

use crate::backend::ChatBackend;
use crate::notice::{Notice, NoticeLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Ordered transcript of one conversation.
pub struct ChatSession<B> {
    backend: Arc<B>,
    transcript: Vec<ChatMessage>,
    notices: Vec<Notice>,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            transcript: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Sends `input` and appends the reply. Returns the reply, or `None`
    /// when the input was blank or the call failed.
    ///
    /// A failed call keeps the user's message in the transcript.
    pub async fn send(&mut self, input: &str) -> Option<&str> {
        let prompt = input.trim();
        if prompt.is_empty() {
            return None;
        }
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            content: prompt.to_string(),
        });

        match self.backend.chat(prompt).await {
            Ok(reply) => {
                tracing::debug!(turns = self.transcript.len(), "chat reply received");
                self.transcript.push(ChatMessage {
                    role: ChatRole::Assistant,
                    content: reply,
                });
                self.transcript.last().map(|m| m.content.as_str())
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                self.notices.push(Notice::from_client(
                    NoticeLevel::Error,
                    "Failed to get a response",
                    &err,
                ));
                None
            }
        }
    }
}
