//! # Chat Echo Simulator
//!
//! Appends the user's message, then answers with a canned persona reply
//! after a random delay.
//!
//! ```text
//! Idle ──send──► Typing ──delay──► Idle   (+1 persona message)
//! ```
//!
//! ## Concurrency Model
//!
//! The message log is one slice behind a `tokio::sync::Mutex`. Each reply
//! runs as a detached task that sleeps without holding the lock and then
//! re-acquires it to append. Replies are never cancelled or merged: two
//! sends produce two independent replies. The typing indicator stays on
//! while any reply is still pending.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::{Result, SimError};
use crate::types::ChatMessage;

/// Sender name for messages typed by the local user.
pub const USER_SENDER: &str = "You";

const DEFAULT_PERSONA: &str = "Alex";
const DEFAULT_REPLY: &str = "That's an interesting point! I'll look into it.";
const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(1_000);
const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(2_500);

/// Initials avatar for a display name.
pub fn avatar_for(name: &str) -> String {
    format!("https://api.dicebear.com/9.x/initials/svg?seed={name}")
}

fn now_hh_mm() -> String {
    Local::now().format("%H:%M").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub persona: String,
    pub reply_text: String,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            reply_text: DEFAULT_REPLY.to_string(),
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl ChatConfig {
    /// Default reply text with a custom persona and delay window.
    pub fn new(
        persona: impl Into<String>,
        min_delay: Duration,
        max_delay: Duration,
    ) -> Result<Self> {
        if min_delay > max_delay {
            return Err(SimError::InvalidDelay {
                min_ms: min_delay.as_millis() as u64,
                max_ms: max_delay.as_millis() as u64,
            });
        }
        Ok(Self {
            persona: persona.into(),
            min_delay,
            max_delay,
            ..Self::default()
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatSnapshot {
    pub messages: Vec<ChatMessage>,
    pub is_typing: bool,
}

struct ChatLog {
    messages: Vec<ChatMessage>,
    pending_replies: usize,
    rng: StdRng,
}

/// Cheap to clone; all clones share one log.
#[derive(Clone)]
pub struct ChatRoom {
    log: Arc<Mutex<ChatLog>>,
    config: Arc<ChatConfig>,
}

impl ChatRoom {
    pub fn new(config: ChatConfig, rng: StdRng) -> Self {
        Self {
            log: Arc::new(Mutex::new(ChatLog {
                messages: Vec::new(),
                pending_replies: 0,
                rng,
            })),
            config: Arc::new(config),
        }
    }

    pub fn from_seed(config: ChatConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Append a user message and schedule the persona reply.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the handle of
    /// the reply task is returned; dropping it does not cancel the reply.
    pub async fn send_message(&self, text: &str) -> Option<JoinHandle<()>> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank chat message");
            return None;
        }

        let delay = {
            let mut log = self.log.lock().await;
            log.messages.push(ChatMessage {
                sender: USER_SENDER.to_string(),
                text: text.to_string(),
                timestamp: now_hh_mm(),
                avatar_url: avatar_for("User"),
            });
            log.pending_replies += 1;
            let (min, max) = (self.config.min_delay, self.config.max_delay);
            log.rng.gen_range(min..=max)
        };

        debug!(delay_ms = delay.as_millis() as u64, "Persona reply scheduled");
        let room = self.clone();
        Some(tokio::spawn(async move { room.persona_reply(delay).await }))
    }

    async fn persona_reply(self, delay: Duration) {
        tokio::time::sleep(delay).await;
        let mut log = self.log.lock().await;
        log.messages.push(ChatMessage {
            sender: self.config.persona.clone(),
            text: self.config.reply_text.clone(),
            timestamp: now_hh_mm(),
            avatar_url: avatar_for(&self.config.persona),
        });
        log.pending_replies = log.pending_replies.saturating_sub(1);
    }

    pub async fn is_typing(&self) -> bool {
        self.log.lock().await.pending_replies > 0
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.log.lock().await.messages.clone()
    }

    pub async fn snapshot(&self) -> ChatSnapshot {
        let log = self.log.lock().await;
        ChatSnapshot {
            messages: log.messages.clone(),
            is_typing: log.pending_replies > 0,
        }
    }
}
