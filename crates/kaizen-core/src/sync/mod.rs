//! Cross-collection synchronization.
//!
//! Boards, projects and meetings are stored independently. These operations
//! propagate a change made in one collection into the others. They are not
//! transactional: when one step fails the earlier steps stay applied, and the
//! caller re-runs the operation. Re-running against a consistent workspace
//! changes nothing.
//!
//! Every operation returns a [`SyncOutcome`]; nothing here returns `Err`.

pub mod meeting_sync;
pub mod project_sync;
pub mod reconcile;

pub use meeting_sync::{add_kanban_card_to_meeting, sync_kanban_card_with_meeting};
pub use project_sync::{sync_card_status_with_project, sync_project_status_with_cards};
pub use reconcile::{reconcile, ReconcileReport};

use serde::{Deserialize, Serialize};

use crate::error::KaizenError;

/// Result of a synchronization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub success: bool,
    pub message: String,
    /// Records touched: projects synced, cards relocated or copies updated.
    pub affected: usize,
}

impl SyncOutcome {
    pub fn success(message: impl Into<String>, affected: usize) -> Self {
        Self {
            success: true,
            message: message.into(),
            affected,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            affected: 0,
        }
    }
}

impl From<KaizenError> for SyncOutcome {
    fn from(err: KaizenError) -> Self {
        Self::failure(err.to_string())
    }
}
