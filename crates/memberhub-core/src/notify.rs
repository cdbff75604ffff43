//! User-facing notification center.
//!
//! The interceptor and the data-access callers both surface messages here;
//! the embedding UI renders and dismisses them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::directives::MessageText;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational confirmation, e.g. "The door is open".
    Info,
    /// User-facing error, e.g. a rejected login.
    Error,
}

/// A single user-facing message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    /// The message text, trimmed and never empty.
    pub text: String,
    /// Presentation severity.
    pub severity: Severity,
    /// When the notice was added.
    pub created_at: DateTime<Utc>,
}

/// Receiver of user-facing messages.
///
/// The response interceptor writes through this seam, so tests can capture
/// messages without a real notice list.
pub trait NotificationSink: Send + Sync {
    /// Record one or many messages at the given severity.
    fn notify(&self, severity: Severity, messages: MessageText);
}

/// The shared notice list.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeBoard {
    /// Create an empty notice board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add informational message(s).
    pub fn add_info(&self, messages: impl Into<MessageText>) {
        self.push(Severity::Info, messages.into());
    }

    /// Add error message(s).
    pub fn add_error(&self, messages: impl Into<MessageText>) {
        self.push(Severity::Error, messages.into());
    }

    fn push(&self, severity: Severity, messages: MessageText) {
        let mut notices = self.notices.lock().expect("notice lock poisoned");
        for text in messages.into_vec() {
            let text = text.trim();
            // Blank messages are dropped, matching how the UI treats them
            if text.is_empty() {
                continue;
            }
            debug!(severity = ?severity, text = %text, "adding notice");
            notices.push(Notice {
                text: text.to_string(),
                severity,
                created_at: Utc::now(),
            });
        }
    }

    /// Dismiss the notice at `index`.
    ///
    /// # Returns
    /// The removed notice, or `None` when the index is out of range.
    pub fn dismiss(&self, index: usize) -> Option<Notice> {
        let mut notices = self.notices.lock().expect("notice lock poisoned");
        if index < notices.len() {
            Some(notices.remove(index))
        } else {
            None
        }
    }

    /// Dismiss the first notice with exactly this text.
    ///
    /// # Returns
    /// `true` if a notice was removed.
    pub fn dismiss_by_text(&self, text: &str) -> bool {
        let mut notices = self.notices.lock().expect("notice lock poisoned");
        match notices.iter().position(|n| n.text == text) {
            Some(idx) => {
                notices.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the current notices.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice lock poisoned").clone()
    }

    /// Number of notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.lock().expect("notice lock poisoned").len()
    }

    /// Whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for NoticeBoard {
    fn notify(&self, severity: Severity, messages: MessageText) {
        self.push(severity, messages);
    }
}
