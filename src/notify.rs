//! Status and score notifications pushed to the host UI
//!
//! Fire-and-forget: the core never waits for, or reads back, UI state.

use crossbeam_channel::{Receiver, Sender, unbounded};

/// A UI update produced by the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Status line text and whether it should be shown
    Status { text: String, visible: bool },
    /// Score line text
    Score(String),
}

/// Sending side of the notification channel
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    tx: Option<Sender<Notification>>,
}

impl Notifier {
    /// Create a notifier together with the receiver the host drains
    pub fn channel() -> (Self, Receiver<Notification>) {
        let (tx, rx) = unbounded();
        (Self { tx: Some(tx) }, rx)
    }

    /// Notifier that drops everything
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn show_status(&self, text: &str) {
        self.send(Notification::Status {
            text: text.to_string(),
            visible: true,
        });
    }

    pub fn hide_status(&self) {
        self.send(Notification::Status {
            text: String::new(),
            visible: false,
        });
    }

    pub fn score(&self, human: u32, computer: u32) {
        self.send(Notification::Score(format!("{human}    {computer}")));
    }

    fn send(&self, notification: Notification) {
        if let Some(tx) = &self.tx {
            if tx.send(notification).is_err() {
                log::debug!("Notification receiver gone, dropping update");
            }
        }
    }
}
