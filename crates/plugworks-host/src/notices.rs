//! Admin notice board.
//!
//! Notices are rendered on admin requests. Transient notices are dropped
//! after they render once; persistent notices survive across requests until
//! dismissed, which is how missing-dependency errors stay visible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Severity level of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Informational.
    Info,
    /// Operation succeeded.
    Success,
    /// Something needs attention but nothing is broken.
    Warning,
    /// Something is broken.
    Error,
}

impl NoticeLevel {
    /// Returns the string name of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single admin notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    /// Unique notice identifier, used for dismissal.
    pub id: Uuid,
    /// Severity level.
    pub level: NoticeLevel,
    /// Plugin or subsystem that posted the notice.
    pub source: String,
    /// Message shown to the administrator.
    pub message: String,
    /// Whether the notice survives across requests until dismissed.
    pub persistent: bool,
    /// When the notice was posted.
    pub created_at: DateTime<Utc>,
}

impl Notice {
    /// Creates a transient notice.
    pub fn new(level: NoticeLevel, source: &str, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            source: source.to_string(),
            message: message.to_string(),
            persistent: false,
            created_at: Utc::now(),
        }
    }

    /// Marks the notice as persistent.
    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }
}

/// Board holding the notices pending display.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: RwLock<Vec<Notice>>,
}

impl NoticeBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a notice. Returns its identifier.
    pub async fn post(&self, notice: Notice) -> Uuid {
        let id = notice.id;
        info!(
            level = %notice.level,
            source = %notice.source,
            persistent = notice.persistent,
            "Notice posted: {}",
            notice.message
        );
        self.notices.write().await.push(notice);
        id
    }

    /// Returns all notices currently pending display, oldest first.
    pub async fn render_queue(&self) -> Vec<Notice> {
        self.notices.read().await.clone()
    }

    /// Returns only the persistent notices.
    pub async fn persistent(&self) -> Vec<Notice> {
        self.notices
            .read()
            .await
            .iter()
            .filter(|n| n.persistent)
            .cloned()
            .collect()
    }

    /// Returns whether any persistent notice is pending.
    pub async fn has_persistent(&self) -> bool {
        self.notices.read().await.iter().any(|n| n.persistent)
    }

    /// Returns the number of pending notices.
    pub async fn len(&self) -> usize {
        self.notices.read().await.len()
    }

    /// Returns whether the board is empty.
    pub async fn is_empty(&self) -> bool {
        self.notices.read().await.is_empty()
    }

    /// Dismisses a notice by identifier. Returns false if it was not found.
    pub async fn dismiss(&self, id: Uuid) -> bool {
        let mut notices = self.notices.write().await;
        let before = notices.len();
        notices.retain(|n| n.id != id);
        notices.len() < before
    }

    /// Ends a rendered request: transient notices are dropped, persistent
    /// notices stay for the next request.
    pub async fn end_request(&self) {
        let mut notices = self.notices.write().await;
        notices.retain(|n| n.persistent);
    }

    /// Removes every notice, persistent or not.
    pub async fn clear_all(&self) {
        self.notices.write().await.clear();
    }
}
