//! Service hours persistence on the Repository (windows and interval rows)

use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use super::{HoursStore, Repository};
use crate::{
    error::{AppError, AppResult},
    models::row::{DailyIntervalRow, IntervalDraft, ServiceHoursRow, WindowDraft},
};

#[async_trait]
impl HoursStore for Repository {
    /// List all opening-window rows of a channel version, ordered by
    /// order number with creation time as the stable tie-break
    async fn windows(&self, channel_version_id: Uuid) -> AppResult<Vec<ServiceHoursRow>> {
        let rows = sqlx::query_as::<_, ServiceHoursRow>(
            "SELECT * FROM service_hours WHERE channel_version_id = $1 ORDER BY order_number, created",
        )
        .bind(channel_version_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn intervals(&self, window_ids: &[i32]) -> AppResult<Vec<DailyIntervalRow>> {
        let rows = sqlx::query_as::<_, DailyIntervalRow>(
            "SELECT * FROM daily_opening_times WHERE service_hours_id = ANY($1) ORDER BY service_hours_id, order_number",
        )
        .bind(window_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_window(
        &self,
        channel_version_id: Uuid,
        draft: &WindowDraft,
    ) -> AppResult<ServiceHoursRow> {
        let row = sqlx::query_as::<_, ServiceHoursRow>(
            r#"
            INSERT INTO service_hours
                (channel_version_id, kind, holiday_id, date_from, date_to,
                 is_closed, order_number, additional_information)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(channel_version_id)
        .bind(draft.kind)
        .bind(draft.holiday_id)
        .bind(draft.date_from)
        .bind(draft.date_to)
        .bind(draft.is_closed)
        .bind(draft.order_number)
        .bind(Json(&draft.additional_information))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_window(&self, id: i32, draft: &WindowDraft) -> AppResult<ServiceHoursRow> {
        let row = sqlx::query_as::<_, ServiceHoursRow>(
            r#"
            UPDATE service_hours
            SET holiday_id = $1, date_from = $2, date_to = $3, is_closed = $4,
                order_number = $5, additional_information = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(draft.holiday_id)
        .bind(draft.date_from)
        .bind(draft.date_to)
        .bind(draft.is_closed)
        .bind(draft.order_number)
        .bind(Json(&draft.additional_information))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Opening hours window {} not found", id)))?;
        Ok(row)
    }

    /// Delete a window (interval rows go with it via ON DELETE CASCADE)
    async fn delete_window(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM service_hours WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Opening hours window {} not found",
                id
            )));
        }
        Ok(())
    }

    async fn replace_intervals(
        &self,
        window_id: i32,
        drafts: &[IntervalDraft],
    ) -> AppResult<Vec<DailyIntervalRow>> {
        sqlx::query("DELETE FROM daily_opening_times WHERE service_hours_id = $1")
            .bind(window_id)
            .execute(&self.pool)
            .await?;

        let mut rows = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let row = sqlx::query_as::<_, DailyIntervalRow>(
                r#"
                INSERT INTO daily_opening_times
                    (service_hours_id, day_from, day_to, time_from, time_to, order_number)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(window_id)
            .bind(i16::from(draft.day_from))
            .bind(draft.day_to.map(i16::from))
            .bind(draft.time_from)
            .bind(draft.time_to)
            .bind(draft.order_number)
            .fetch_one(&self.pool)
            .await?;
            rows.push(row);
        }
        Ok(rows)
    }
}
