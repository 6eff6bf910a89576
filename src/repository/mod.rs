//! Repository layer for database operations

pub mod hours;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::row::{DailyIntervalRow, IntervalDraft, ServiceHoursRow, WindowDraft};

/// Persistence abstraction over the service hours tables.
///
/// The engine consumes the store as an external collaborator; the
/// surrounding application owns the transaction boundary and rollback.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HoursStore: Send + Sync {
    /// All opening-window rows of one channel version
    async fn windows(&self, channel_version_id: Uuid) -> AppResult<Vec<ServiceHoursRow>>;

    /// Interval rows belonging to the given windows
    async fn intervals(&self, window_ids: &[i32]) -> AppResult<Vec<DailyIntervalRow>>;

    async fn create_window(
        &self,
        channel_version_id: Uuid,
        draft: &WindowDraft,
    ) -> AppResult<ServiceHoursRow>;

    async fn update_window(&self, id: i32, draft: &WindowDraft) -> AppResult<ServiceHoursRow>;

    /// Delete a window (cascade deletes its interval rows)
    async fn delete_window(&self, id: i32) -> AppResult<()>;

    /// Replace the interval children of one window wholesale
    async fn replace_intervals(
        &self,
        window_id: i32,
        drafts: &[IntervalDraft],
    ) -> AppResult<Vec<DailyIntervalRow>>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}
