//! Event and subscription types.

use crate::editor::EditField;
use crate::types::AchievementId;
use serde::{Deserialize, Serialize};

/// Event bus configuration.
#[derive(Clone, Debug)]
pub struct EventBusConfig {
    /// Max buffered events per subscriber before it is dropped.
    /// Default: 256
    pub buffer_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self { buffer_size: 256 }
    }
}

/// Which events a subscriber receives.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// Record changes (loaded, created, updated, deleted).
    pub include_records: bool,

    /// User-facing notifications.
    pub include_notifications: bool,
}

impl EventFilter {
    pub fn records() -> Self {
        Self {
            include_records: true,
            ..Default::default()
        }
    }

    pub fn notifications() -> Self {
        Self {
            include_notifications: true,
            ..Default::default()
        }
    }

    pub fn all() -> Self {
        Self {
            include_records: true,
            include_notifications: true,
        }
    }

    pub(crate) fn accepts(&self, event: &LedgerEvent) -> bool {
        match event {
            LedgerEvent::Notification(_) => self.include_notifications,
            LedgerEvent::Dropped { .. } => true,
            _ => self.include_records,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Events published by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// The snapshot was (re)loaded from the store.
    Loaded { count: usize },

    Created { id: AchievementId },

    Updated {
        id: AchievementId,
        /// The edited field, `None` for a whole-record update.
        field: Option<EditField>,
    },

    Deleted { id: AchievementId },

    Notification(Notification),

    /// The subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Receiving end of a subscription.
pub struct EventHandle {
    pub id: SubscriptionId,
    pub receiver: crossbeam_channel::Receiver<LedgerEvent>,
}

impl EventHandle {
    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<LedgerEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<LedgerEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything buffered right now.
    pub fn drain(&self) -> Vec<LedgerEvent> {
        self.receiver.try_iter().collect()
    }
}
