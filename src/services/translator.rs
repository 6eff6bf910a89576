//! Bidirectional translation between persisted opening-window rows and the
//! per-kind view models
//!
//! The entity side is one row per window plus child interval rows; the view
//! side is the four hour kinds of [`crate::models::hours`]. Times are
//! `NaiveTime` on the entity side and epoch-milliseconds-of-day on the view
//! side.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{
        hours::{
            DailyInterval, ExceptionalHours, HolidayHours, HourVariant, SpecialHours,
            StandardHours, Window,
        },
        row::{DailyIntervalRow, HoursRowKind, IntervalDraft, ServiceHoursRow, WindowDraft},
        time::{days_between, from_epoch_time_of_day, to_epoch_time_of_day, weekday_of, WeekDay},
    },
    services::codes::CodeCache,
};

/// Weekdays honored by a period-bound standard week, or `None` when the
/// period is long enough to cover every weekday.
///
/// A range of fewer than 6 whole days cannot reach all 7 weekdays, so hours
/// configured for weekdays outside the range are dropped rather than applied
/// on dates that do not exist in the period. The covered set is the forward
/// circular walk from the start weekday to the end weekday, which handles
/// wraparound (Friday to Monday covers Fri, Sat, Sun, Mon).
pub fn period_weekday_filter(date_from: NaiveDate, date_to: NaiveDate) -> Option<Vec<WeekDay>> {
    if days_between(date_from, date_to) >= 6 {
        return None;
    }
    Some(WeekDay::covered_range(
        weekday_of(date_from),
        weekday_of(date_to),
    ))
}

/// Opening hours translator for one service channel version
#[derive(Clone)]
pub struct HoursTranslator {
    codes: Arc<CodeCache>,
}

impl HoursTranslator {
    pub fn new(codes: Arc<CodeCache>) -> Self {
        Self { codes }
    }

    // ---- Entity to view ----

    /// Translate one persisted window and its interval rows into the view
    /// model kind selected by the row discriminator and holiday marker
    pub fn read_variant(
        &self,
        row: &ServiceHoursRow,
        intervals: &[DailyIntervalRow],
    ) -> AppResult<HourVariant> {
        match (row.kind, row.is_holiday()) {
            (HoursRowKind::Standard, _) => {
                Ok(HourVariant::Standard(self.read_standard(row, intervals)?))
            }
            (HoursRowKind::Special, _) => {
                Ok(HourVariant::Special(self.read_special(row, intervals)?))
            }
            (HoursRowKind::Exception, false) => Ok(HourVariant::Exceptional(
                self.read_exceptional(row, intervals)?,
            )),
            (HoursRowKind::Exception, true) => {
                Ok(HourVariant::Holiday(self.read_holiday(row, intervals)?))
            }
        }
    }

    /// Weekly recurring hours: interval rows grouped by weekday; zero rows
    /// mean non-stop, otherwise all 7 weekday keys are exposed
    pub fn read_standard(
        &self,
        row: &ServiceHoursRow,
        intervals: &[DailyIntervalRow],
    ) -> AppResult<StandardHours> {
        self.expect_kind(row, HoursRowKind::Standard, None)?;
        let window = self.read_window(row)?;
        let is_non_stop = intervals.is_empty();

        let mut daily_hours: BTreeMap<WeekDay, Option<Vec<DailyInterval>>> = BTreeMap::new();
        if !is_non_stop {
            for day in WeekDay::ALL {
                daily_hours.insert(day, None);
            }
            for interval_row in ordered(intervals) {
                let day = WeekDay::try_from(interval_row.day_from)?;
                let interval = read_interval(interval_row)?;
                daily_hours
                    .entry(day)
                    .or_insert(None)
                    .get_or_insert_with(Vec::new)
                    .push(interval);
            }
        }

        Ok(StandardHours {
            window,
            is_non_stop,
            daily_hours,
        })
    }

    pub fn read_exceptional(
        &self,
        row: &ServiceHoursRow,
        intervals: &[DailyIntervalRow],
    ) -> AppResult<ExceptionalHours> {
        self.expect_kind(row, HoursRowKind::Exception, Some(false))?;
        let opening_period = match ordered(intervals).into_iter().next() {
            Some(interval_row) => Some(read_interval(interval_row)?),
            None => None,
        };
        Ok(ExceptionalHours {
            window: self.read_window(row)?,
            closed_for_period: row.is_closed,
            opening_period,
        })
    }

    /// Special hours always expose exactly one interval; a window persisted
    /// without one gets the Monday-to-Monday placeholder
    pub fn read_special(
        &self,
        row: &ServiceHoursRow,
        intervals: &[DailyIntervalRow],
    ) -> AppResult<SpecialHours> {
        self.expect_kind(row, HoursRowKind::Special, None)?;
        let opening_period = match ordered(intervals).into_iter().next() {
            Some(interval_row) => read_interval(interval_row)?,
            None => DailyInterval::default(),
        };
        Ok(SpecialHours {
            window: self.read_window(row)?,
            opening_period,
        })
    }

    pub fn read_holiday(
        &self,
        row: &ServiceHoursRow,
        intervals: &[DailyIntervalRow],
    ) -> AppResult<HolidayHours> {
        self.expect_kind(row, HoursRowKind::Exception, Some(true))?;
        let holiday_id = row
            .holiday_id
            .ok_or_else(|| AppError::Validation("Holiday record without holiday id".into()))?;
        let holiday_code = self.codes.holiday_code(holiday_id)?.to_string();

        let mut result = Vec::with_capacity(intervals.len());
        for interval_row in ordered(intervals) {
            result.push(read_interval(interval_row)?);
        }

        Ok(HolidayHours {
            window: self.read_window(row)?,
            holiday_code,
            closed: row.is_closed,
            intervals: result,
        })
    }

    // ---- View to entity ----

    /// Weekly recurring hours to a window draft: non-stop emits zero
    /// intervals; a short period drops weekdays outside the date range;
    /// the rest flattens Monday-to-Sunday with order numbers assigned
    /// monotonically across the whole flattened output
    pub fn write_standard(&self, hours: &StandardHours) -> AppResult<WindowDraft> {
        let mut draft = self.write_window(&hours.window, HoursRowKind::Standard, None, false)?;
        if hours.is_non_stop {
            return Ok(draft);
        }

        let covered = hours
            .window
            .period_dates()
            .and_then(|(from, to)| period_weekday_filter(from, to));

        let mut order = 0;
        for (day, entry) in &hours.daily_hours {
            let Some(intervals) = entry else {
                continue; // inactive weekday
            };
            if let Some(covered) = &covered {
                if !covered.contains(day) {
                    continue;
                }
            }
            for interval in intervals {
                // the map key is authoritative for the weekday
                draft.intervals.push(write_interval(*day, interval, order)?);
                order += 1;
            }
        }
        Ok(draft)
    }

    pub fn write_exceptional(&self, hours: &ExceptionalHours) -> AppResult<WindowDraft> {
        let mut draft = self.write_window(
            &hours.window,
            HoursRowKind::Exception,
            None,
            hours.closed_for_period,
        )?;
        if hours.closed_for_period {
            return Ok(draft);
        }
        let interval = hours.opening_period.as_ref().ok_or_else(|| {
            AppError::Validation(
                "Exceptional hours open for a period require an opening interval".into(),
            )
        })?;
        draft
            .intervals
            .push(write_interval(interval.day_from, interval, 0)?);
        Ok(draft)
    }

    pub fn write_special(&self, hours: &SpecialHours) -> AppResult<WindowDraft> {
        let mut draft = self.write_window(&hours.window, HoursRowKind::Special, None, false)?;
        let interval = &hours.opening_period;
        draft
            .intervals
            .push(write_interval(interval.day_from, interval, 0)?);
        Ok(draft)
    }

    pub fn write_holiday(&self, hours: &HolidayHours) -> AppResult<WindowDraft> {
        let holiday_id = self.codes.holiday_id(&hours.holiday_code)?;
        let mut draft = self.write_window(
            &hours.window,
            HoursRowKind::Exception,
            Some(holiday_id),
            hours.closed,
        )?;
        if hours.closed {
            return Ok(draft);
        }
        for (order, interval) in hours.intervals.iter().enumerate() {
            draft
                .intervals
                .push(write_interval(interval.day_from, interval, order as i32)?);
        }
        Ok(draft)
    }

    // ---- Shared window translation ----

    fn read_window(&self, row: &ServiceHoursRow) -> AppResult<Window> {
        let mut additional_information = HashMap::new();
        for (language_id, text) in row.additional_information.0.iter() {
            let code = self.codes.language_code(*language_id)?;
            additional_information.insert(code.to_string(), text.clone());
        }
        Ok(Window {
            id: Some(row.id),
            date_from: row.date_from,
            date_to: row.date_to,
            is_period: row.date_from.is_some() && row.date_to.is_some(),
            order_number: row.order_number,
            additional_information,
        })
    }

    fn write_window(
        &self,
        window: &Window,
        kind: HoursRowKind,
        holiday_id: Option<i32>,
        is_closed: bool,
    ) -> AppResult<WindowDraft> {
        if window.is_period && (window.date_from.is_none() || window.date_to.is_none()) {
            return Err(AppError::Validation(
                "Period-bound hours require both a start and an end date".into(),
            ));
        }
        let mut additional_information = HashMap::new();
        for (code, text) in &window.additional_information {
            additional_information.insert(self.codes.language_id(code)?, text.clone());
        }
        Ok(WindowDraft {
            id: window.id,
            kind,
            holiday_id,
            date_from: window.date_from,
            date_to: window.date_to,
            is_closed,
            order_number: window.order_number,
            additional_information,
            intervals: Vec::new(),
        })
    }

    /// Guard against reading a row through the wrong per-kind path; the
    /// holiday marker only discriminates `Exception` rows
    fn expect_kind(
        &self,
        row: &ServiceHoursRow,
        kind: HoursRowKind,
        holiday: Option<bool>,
    ) -> AppResult<()> {
        if row.kind != kind || holiday.is_some_and(|h| row.is_holiday() != h) {
            return Err(AppError::NotSupported(format!(
                "Cannot read a {:?} row (holiday: {}) through this translation path",
                row.kind,
                row.is_holiday()
            )));
        }
        Ok(())
    }
}

fn read_interval(row: &DailyIntervalRow) -> AppResult<DailyInterval> {
    Ok(DailyInterval {
        day_from: WeekDay::try_from(row.day_from)?,
        day_to: row.day_to.map(WeekDay::try_from).transpose()?,
        time_from: row.time_from.map(to_epoch_time_of_day),
        time_to: row.time_to.map(to_epoch_time_of_day),
        order: row.order_number,
    })
}

fn write_interval(
    day_from: WeekDay,
    interval: &DailyInterval,
    order_number: i32,
) -> AppResult<IntervalDraft> {
    Ok(IntervalDraft {
        day_from,
        day_to: interval.day_to,
        time_from: interval.time_from.map(from_epoch_time_of_day).transpose()?,
        time_to: interval.time_to.map(from_epoch_time_of_day).transpose()?,
        order_number,
    })
}

/// Interval rows in stored order
fn ordered(intervals: &[DailyIntervalRow]) -> Vec<&DailyIntervalRow> {
    let mut rows: Vec<&DailyIntervalRow> = intervals.iter().collect();
    rows.sort_by_key(|r| r.order_number);
    rows
}
