//! Schedules service: load and save the full opening hours of one service
//! channel version
//!
//! A save replaces the persisted schedule wholesale: each of the four hour
//! kinds is translated to its entity shape and reconciled against its own
//! bucket of persisted rows, so rewriting one kind never touches rows of
//! another kind sharing the same table.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        hours::{HourVariant, Schedule},
        row::{DailyIntervalRow, HoursRowKind, ServiceHoursRow, WindowDraft},
    },
    repository::HoursStore,
    services::{
        codes::CodeCache,
        reconcile::{reconcile, ReconcilePlan},
        translator::HoursTranslator,
    },
};

#[derive(Clone)]
pub struct SchedulesService {
    store: Arc<dyn HoursStore>,
    translator: HoursTranslator,
}

impl SchedulesService {
    pub fn new(store: Arc<dyn HoursStore>, codes: Arc<CodeCache>) -> Self {
        Self {
            store,
            translator: HoursTranslator::new(codes),
        }
    }

    /// Load all opening hours of a channel version as the four-kind view
    /// model, each kind ordered by stored order number then creation time
    pub async fn get_schedule(&self, channel_version_id: Uuid) -> AppResult<Schedule> {
        let mut windows = self.store.windows(channel_version_id).await?;
        windows.sort_by_key(|w| (w.order_number, w.created));

        let window_ids: Vec<i32> = windows.iter().map(|w| w.id).collect();
        let mut by_window: HashMap<i32, Vec<DailyIntervalRow>> = HashMap::new();
        for row in self.store.intervals(&window_ids).await? {
            by_window.entry(row.service_hours_id).or_default().push(row);
        }

        let mut schedule = Schedule::default();
        for window in &windows {
            let children = by_window.remove(&window.id).unwrap_or_default();
            match self.translator.read_variant(window, &children)? {
                HourVariant::Standard(h) => schedule.standard.push(h),
                HourVariant::Exceptional(h) => schedule.exceptional.push(h),
                HourVariant::Special(h) => schedule.special.push(h),
                HourVariant::Holiday(h) => schedule.holiday.push(h),
            }
        }
        Ok(schedule)
    }

    /// Replace the persisted schedule of a channel version with the incoming
    /// one and return the re-read result.
    ///
    /// All four kinds are translated and planned before anything is applied,
    /// so a failed translation or an uncomputable identity leaves the
    /// persisted rows untouched.
    pub async fn save_schedule(
        &self,
        channel_version_id: Uuid,
        schedule: &Schedule,
    ) -> AppResult<Schedule> {
        let persisted = self.store.windows(channel_version_id).await?;

        let mut standard = Vec::with_capacity(schedule.standard.len());
        for (order, hours) in schedule.standard.iter().enumerate() {
            standard.push(numbered(self.translator.write_standard(hours)?, order));
        }
        let mut special = Vec::with_capacity(schedule.special.len());
        for (order, hours) in schedule.special.iter().enumerate() {
            special.push(numbered(self.translator.write_special(hours)?, order));
        }
        let mut exceptional = Vec::with_capacity(schedule.exceptional.len());
        for (order, hours) in schedule.exceptional.iter().enumerate() {
            exceptional.push(numbered(self.translator.write_exceptional(hours)?, order));
        }
        let mut holiday = Vec::with_capacity(schedule.holiday.len());
        for (order, hours) in schedule.holiday.iter().enumerate() {
            holiday.push(numbered(self.translator.write_holiday(hours)?, order));
        }

        let plans = vec![
            plan_bucket(standard, &persisted, |r| r.kind == HoursRowKind::Standard)?,
            plan_bucket(special, &persisted, |r| r.kind == HoursRowKind::Special)?,
            plan_bucket(exceptional, &persisted, |r| {
                r.kind == HoursRowKind::Exception && !r.is_holiday()
            })?,
            plan_holiday_bucket(holiday, &persisted)?,
        ];

        for plan in plans {
            self.apply(channel_version_id, plan).await?;
        }

        tracing::debug!(
            "Saved schedule for channel version {}: {} standard, {} exceptional, {} special, {} holiday",
            channel_version_id,
            schedule.standard.len(),
            schedule.exceptional.len(),
            schedule.special.len(),
            schedule.holiday.len()
        );

        self.get_schedule(channel_version_id).await
    }

    async fn apply(
        &self,
        channel_version_id: Uuid,
        plan: ReconcilePlan<WindowDraft, ServiceHoursRow>,
    ) -> AppResult<()> {
        for row in &plan.to_delete {
            tracing::debug!("Removing opening hours window id={}", row.id);
            self.store.delete_window(row.id).await?;
        }
        for (row, draft) in &plan.to_update {
            self.store.update_window(row.id, draft).await?;
            self.store.replace_intervals(row.id, &draft.intervals).await?;
        }
        for draft in &plan.to_create {
            let row = self.store.create_window(channel_version_id, draft).await?;
            self.store.replace_intervals(row.id, &draft.intervals).await?;
        }
        Ok(())
    }
}

fn numbered(mut draft: WindowDraft, order: usize) -> WindowDraft {
    draft.order_number = order as i32;
    draft
}

/// Reconcile one kind bucket on window row identity
fn plan_bucket(
    drafts: Vec<WindowDraft>,
    persisted: &[ServiceHoursRow],
    scope: impl Fn(&ServiceHoursRow) -> bool,
) -> AppResult<ReconcilePlan<WindowDraft, ServiceHoursRow>> {
    reconcile(drafts, persisted, scope, |r| r.id, |d: &WindowDraft| Ok(d.id))
}

/// The holiday bucket keys on the holiday marker instead of the row id,
/// since the view model identifies these records by holiday code
fn plan_holiday_bucket(
    drafts: Vec<WindowDraft>,
    persisted: &[ServiceHoursRow],
) -> AppResult<ReconcilePlan<WindowDraft, ServiceHoursRow>> {
    reconcile(
        drafts,
        persisted,
        |r| r.kind == HoursRowKind::Exception && r.is_holiday(),
        |r| r.holiday_id,
        |d: &WindowDraft| match d.holiday_id {
            Some(id) => Ok(Some(Some(id))),
            None => Err(AppError::Reconciliation(
                "Holiday hours without a resolved holiday identity".into(),
            )),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hours::HolidayHours;
    use crate::repository::MockHoursStore;
    use chrono::Utc;
    use sqlx::types::Json;

    fn codes() -> Arc<CodeCache> {
        Arc::new(CodeCache::new(&[(1, "Midsummer")], &[(1, "fi")]))
    }

    fn row(id: i32, kind: HoursRowKind, holiday_id: Option<i32>) -> ServiceHoursRow {
        ServiceHoursRow {
            id,
            channel_version_id: Uuid::nil(),
            kind,
            holiday_id,
            date_from: None,
            date_to: None,
            is_closed: false,
            order_number: id,
            additional_information: Json(Default::default()),
            created: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_schedule_partitions_kinds() {
        let mut store = MockHoursStore::new();
        let rows = vec![
            row(1, HoursRowKind::Standard, None),
            row(2, HoursRowKind::Special, None),
            row(3, HoursRowKind::Exception, None),
            row(4, HoursRowKind::Exception, Some(1)),
        ];
        store.expect_windows().returning(move |_| Ok(rows.clone()));
        store.expect_intervals().returning(|_| Ok(Vec::new()));

        let service = SchedulesService::new(Arc::new(store), codes());
        let schedule = service.get_schedule(Uuid::nil()).await.unwrap();

        assert_eq!(schedule.standard.len(), 1);
        assert_eq!(schedule.special.len(), 1);
        assert_eq!(schedule.exceptional.len(), 1);
        assert_eq!(schedule.holiday.len(), 1);
        assert_eq!(schedule.holiday[0].holiday_code, "Midsummer");
        // zero stored intervals for a standard window mean non-stop
        assert!(schedule.standard[0].is_non_stop);
    }

    #[tokio::test]
    async fn test_unknown_holiday_code_applies_nothing() {
        let mut store = MockHoursStore::new();
        store.expect_windows().returning(|_| Ok(Vec::new()));
        // no create/update/delete expectations: any write would panic

        let service = SchedulesService::new(Arc::new(store), codes());
        let schedule = Schedule {
            holiday: vec![HolidayHours {
                holiday_code: "NoSuchHoliday".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let result = service.save_schedule(Uuid::nil(), &schedule).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
