//! Rule-based chat widget.
//!
//! A [`ChatSession`] keeps the visitor's transcript. Sending a message
//! appends it at once and schedules the canned reply after a short delay; the
//! reply task belongs to the session and dies with it.

pub mod render;
pub mod responder;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;

use crate::task::TaskGuard;

use render::Segment;

/// Delay before the reply appears.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

/// First message of every transcript.
pub const WELCOME: &str = "Bonjour ! 👋 Je suis l'assistant virtuel SUNBAG. Je peux vous aider à choisir le kit solaire idéal pour votre prochaine aventure ou répondre à vos questions sur nos batteries. Comment puis-je vous aider ?";

/// Quick questions offered under the input.
pub const SUGGESTIONS: [&str; 4] = [
    "Quel kit pour le GR20 ?",
    "Délai de livraison ?",
    "Comment installer le panneau ?",
    "Différence entre Kit Expédition et Essentiel ?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// `text` split into styled lines.
    pub lines: Vec<Vec<Segment>>,
}

impl Message {
    fn new(sender: Sender, text: &str) -> Self {
        Self {
            sender,
            text: text.to_owned(),
            lines: render::segments(text),
        }
    }
}

type Transcript = Arc<Mutex<Vec<Message>>>;

fn lock(transcript: &Transcript) -> MutexGuard<'_, Vec<Message>> {
    transcript.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A visitor's conversation with the assistant.
#[derive(Debug)]
pub struct ChatSession {
    transcript: Transcript,
    pending: Option<TaskGuard>,
    delay: Duration,
}

impl ChatSession {
    /// Start a conversation with the welcome message.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            transcript: Arc::new(Mutex::new(vec![Message::new(Sender::Bot, WELCOME)])),
            pending: None,
            delay,
        }
    }

    /// Send a visitor message.
    ///
    /// Blank input and input sent while a reply is still pending are
    /// ignored. Returns whether the message was accepted.
    pub fn send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() || self.is_loading() {
            return false;
        }

        lock(&self.transcript).push(Message::new(Sender::User, text));

        let answer = responder::reply(text);
        let transcript = Arc::clone(&self.transcript);
        let delay = self.delay;
        self.pending = Some(TaskGuard::spawn(async move {
            tokio::time::sleep(delay).await;
            lock(&transcript).push(Message::new(Sender::Bot, answer));
        }));
        true
    }

    /// Wait until the pending reply (if any) has been appended.
    pub async fn wait_reply(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.join().await;
        }
    }

    /// Collect a finished reply without waiting. Returns whether nothing is
    /// pending anymore.
    pub fn poll_reply(&mut self) -> bool {
        if self.pending.as_ref().is_some_and(TaskGuard::is_finished) {
            self.pending = None;
        }
        self.pending.is_none()
    }

    /// A reply is scheduled but not yet in the transcript.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Drop any pending reply; it will never be appended.
    pub fn close(&mut self) {
        self.pending = None;
    }

    /// Copy of the transcript, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        lock(&self.transcript).clone()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::{Instant, sleep};

    use super::*;

    fn texts(chat: &ChatSession) -> Vec<(Sender, String)> {
        chat.messages()
            .into_iter()
            .map(|m| (m.sender, m.text))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_with_welcome() {
        let chat = ChatSession::default();
        assert_eq!(texts(&chat), vec![(Sender::Bot, WELCOME.to_owned())]);
        assert!(!chat.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let mut chat = ChatSession::default();
        let started = Instant::now();

        assert!(chat.send("Délai de livraison ?"));
        assert!(chat.is_loading());
        assert_eq!(chat.messages().len(), 2);

        chat.wait_reply().await;
        assert!(started.elapsed() >= DEFAULT_REPLY_DELAY);
        assert!(!chat.is_loading());

        let messages = chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[2].sender, Sender::Bot);
        assert_eq!(messages[2].text, responder::reply("Délai de livraison ?"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ignores_blank_and_busy() {
        let mut chat = ChatSession::default();
        assert!(!chat.send("   "));
        assert_eq!(chat.messages().len(), 1);

        assert!(chat.send("merci"));
        assert!(!chat.send("encore"));
        assert_eq!(chat.messages().len(), 2);

        sleep(Duration::from_secs(1)).await;
        assert!(chat.poll_reply());
        assert!(chat.send("encore"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_suppresses_late_reply() {
        let mut chat = ChatSession::default();
        chat.send("bonjour");
        chat.close();
        assert!(!chat.is_loading());

        sleep(Duration::from_secs(2)).await;
        assert_eq!(chat.messages().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_suppresses_late_reply() {
        let mut chat = ChatSession::default();
        chat.send("bonjour");
        let transcript = Arc::clone(&chat.transcript);
        drop(chat);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(lock(&transcript).len(), 2);
    }

    #[test]
    fn test_welcome_is_rendered() {
        let message = Message::new(Sender::Bot, "**Nos tarifs :**");
        assert_eq!(
            message.lines,
            vec![vec![Segment::Bold("Nos tarifs :".to_owned())]]
        );
    }
}
