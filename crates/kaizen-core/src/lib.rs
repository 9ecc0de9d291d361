//! Kaizen Core Library
//!
//! Department boards, projects and meeting outcomes, and the synchronization
//! engine that keeps their denormalized references consistent.

pub mod board;
pub mod column;
pub mod error;
pub mod mapping;
pub mod meeting;
pub mod progress;
pub mod project;
pub mod sync;
pub mod workspace;

pub use error::{KaizenError, KaizenResult};
pub use sync::SyncOutcome;
pub use workspace::Workspace;
