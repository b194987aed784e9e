//! "Ask Brewer" chat session.
//!
//! Replies come from an [`Assistant`] after a fixed delay. The delay runs on
//! a [`ReplyWorker`] thread so front-ends can keep rendering while they
//! poll for the answer.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use uuid::Uuid;

use crate::error::StoreError;

/// Placeholder answer given by [`CannedAssistant`]
pub const CANNED_REPLY: &str = "I'm analyzing your question and will provide a detailed \
response. For now, this is a placeholder response that demonstrates the chat interface. In \
the real implementation, this would be replaced with an actual AI-generated response based \
on your project's requirements and context.";

/// Prompts offered on an empty chat
pub const QUICK_SUGGESTIONS: [&str; 2] = [
    "What are the best practices for writing requirements?",
    "How can I improve my requirement's clarity?",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub role: MessageRole,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// A past conversation listed in the sidebar, keyed by its first message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatHistoryEntry {
    pub id: Uuid,
    pub first_message: String,
    pub timestamp: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
}

/// Answers chat questions
pub trait Assistant: Send + Sync {
    fn name(&self) -> &str;

    /// Produces a reply to `question`; `transcript` includes the question
    fn reply(&self, question: &str, transcript: &[ChatMessage]) -> String;
}

/// Answers everything with [`CANNED_REPLY`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedAssistant;

impl Assistant for CannedAssistant {
    fn name(&self) -> &str {
        "Brewer (canned)"
    }

    fn reply(&self, _question: &str, _transcript: &[ChatMessage]) -> String {
        CANNED_REPLY.to_string()
    }
}

/// A question handed to the assistant
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub chat_id: Uuid,
    pub question: String,
    pub transcript: Vec<ChatMessage>,
}

impl PendingReply {
    /// Asks `assistant` immediately, without the delay
    pub fn answer(&self, assistant: &dyn Assistant) -> AssistantReply {
        AssistantReply {
            chat_id: self.chat_id,
            content: assistant.reply(&self.question, &self.transcript),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub chat_id: Uuid,
    pub content: String,
}

/// State of the chat page
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    project_id: Option<u32>,
    messages: Vec<ChatMessage>,
    /// Newest first
    history: Vec<ChatHistoryEntry>,
    selected: Option<Uuid>,
    awaiting: Option<Uuid>,
    /// Text box contents
    pub input: String,
}

impl ChatSession {
    pub fn new(project_id: Option<u32>) -> Self {
        Self {
            project_id,
            ..Self::default()
        }
    }

    pub fn project_id(&self) -> Option<u32> {
        self.project_id
    }

    /// Messages of the open conversation
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn history(&self) -> &[ChatHistoryEntry] {
        &self.history
    }

    pub fn selected_chat(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Whether the send button is enabled
    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty() && self.awaiting.is_none()
    }

    /// Posts a user message. The first message of a fresh conversation
    /// opens a new history entry.
    pub fn submit(&mut self, text: &str) -> Result<PendingReply, StoreError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        if self.awaiting.is_some() {
            return Err(StoreError::ReplyInFlight);
        }

        self.messages.push(ChatMessage::user(content));
        let open_chat = self
            .selected
            .filter(|id| self.history.iter().any(|entry| entry.id == *id));
        let chat_id = match open_chat {
            Some(id) => {
                let messages = self.messages.clone();
                if let Some(entry) = self.history.iter_mut().find(|entry| entry.id == id) {
                    entry.messages = messages;
                }
                id
            }
            None => {
                let entry = ChatHistoryEntry {
                    id: Uuid::new_v4(),
                    first_message: content.to_string(),
                    timestamp: Utc::now(),
                    messages: self.messages.clone(),
                };
                let id = entry.id;
                self.history.insert(0, entry);
                self.selected = Some(id);
                debug!("Started chat {}", id);
                id
            }
        };

        self.awaiting = Some(chat_id);
        self.input.clear();
        Ok(PendingReply {
            chat_id,
            question: content.to_string(),
            transcript: self.messages.clone(),
        })
    }

    /// Records the assistant's answer against the conversation it belongs
    /// to, even if the user has since switched chats
    pub fn complete_reply(&mut self, reply: AssistantReply) -> Result<(), StoreError> {
        if self.awaiting != Some(reply.chat_id) {
            return Err(StoreError::NoReplyPending);
        }
        let message = ChatMessage::assistant(reply.content);
        if let Some(entry) = self.history.iter_mut().find(|e| e.id == reply.chat_id) {
            entry.messages.push(message.clone());
        }
        if self.selected == Some(reply.chat_id) {
            self.messages.push(message);
        }
        self.awaiting = None;
        Ok(())
    }

    pub fn new_chat(&mut self) {
        self.messages.clear();
        self.selected = None;
        self.input.clear();
    }

    /// Opens a past conversation; returns false for an unknown id
    pub fn load_chat(&mut self, id: Uuid) -> bool {
        match self.history.iter().find(|e| e.id == id) {
            Some(entry) => {
                self.messages = entry.messages.clone();
                self.selected = Some(id);
                true
            }
            None => false,
        }
    }
}

/// Delivers one assistant reply from a background thread after a delay
pub struct ReplyWorker {
    thread_handle: Option<JoinHandle<()>>,
    reply_rx: mpsc::Receiver<AssistantReply>,
}

impl ReplyWorker {
    pub fn spawn(assistant: Arc<dyn Assistant>, pending: PendingReply, delay: Duration) -> Self {
        let (reply_tx, reply_rx) = mpsc::channel();
        let thread_handle = thread::spawn(move || {
            thread::sleep(delay);
            let reply = pending.answer(assistant.as_ref());
            // The receiver is gone if the page was closed; nothing to do then
            let _ = reply_tx.send(reply);
        });
        Self {
            thread_handle: Some(thread_handle),
            reply_rx,
        }
    }

    /// Returns the reply if it has arrived
    pub fn poll(&self) -> Option<AssistantReply> {
        self.reply_rx.try_recv().ok()
    }

    /// Blocks until the reply arrives
    pub fn wait(mut self) -> Option<AssistantReply> {
        let reply = self.reply_rx.recv().ok();
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoAssistant;

    impl Assistant for EchoAssistant {
        fn name(&self) -> &str {
            "echo"
        }

        fn reply(&self, question: &str, transcript: &[ChatMessage]) -> String {
            format!("{} ({} messages)", question, transcript.len())
        }
    }

    #[test]
    fn test_submit_rejects_blank_and_in_flight() {
        let mut chat = ChatSession::new(Some(1));
        assert_eq!(chat.submit("   ").unwrap_err(), StoreError::EmptyMessage);

        chat.submit("Hello").unwrap();
        assert!(chat.is_awaiting_reply());
        assert_eq!(chat.submit("Again").unwrap_err(), StoreError::ReplyInFlight);
    }

    #[test]
    fn test_first_message_creates_history_entry() {
        let mut chat = ChatSession::new(Some(1));
        chat.input = "  What is a value statement?  ".to_string();
        let input = chat.input.clone();
        let pending = chat.submit(&input).unwrap();

        assert!(chat.input.is_empty());
        assert_eq!(chat.history().len(), 1);
        assert_eq!(chat.history()[0].first_message, "What is a value statement?");
        assert_eq!(chat.selected_chat(), Some(pending.chat_id));

        chat.complete_reply(pending.answer(&CannedAssistant)).unwrap();
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].role, MessageRole::Assistant);
        assert_eq!(chat.history()[0].messages.len(), 2);

        chat.submit("Follow up").unwrap();
        assert_eq!(chat.history().len(), 1);
        assert_eq!(chat.history()[0].messages.len(), 3);
    }

    #[test]
    fn test_reply_lands_in_original_chat_after_switching() {
        let mut chat = ChatSession::new(None);
        let pending = chat.submit("First chat").unwrap();
        chat.new_chat();
        assert!(chat.messages().is_empty());

        chat.complete_reply(pending.answer(&EchoAssistant)).unwrap();
        assert!(chat.messages().is_empty());
        assert_eq!(chat.history()[0].messages.len(), 2);
        assert_eq!(chat.history()[0].messages[1].content, "First chat (1 messages)");

        assert!(chat.load_chat(pending.chat_id));
        assert_eq!(chat.messages().len(), 2);
        assert!(!chat.load_chat(Uuid::new_v4()));
    }

    #[test]
    fn test_unexpected_reply_is_rejected() {
        let mut chat = ChatSession::new(None);
        let reply = AssistantReply {
            chat_id: Uuid::new_v4(),
            content: "?".to_string(),
        };
        assert_eq!(chat.complete_reply(reply).unwrap_err(), StoreError::NoReplyPending);
    }

    #[test]
    fn test_worker_delivers_reply() {
        let mut chat = ChatSession::new(None);
        let pending = chat.submit("Hi").unwrap();
        let worker = ReplyWorker::spawn(Arc::new(CannedAssistant), pending, Duration::from_millis(5));

        let reply = worker.wait().unwrap();
        assert_eq!(reply.content, CANNED_REPLY);
        chat.complete_reply(reply).unwrap();
        assert!(!chat.is_awaiting_reply());
    }
}
