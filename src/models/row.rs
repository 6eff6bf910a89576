//! Persisted row shapes for the service hours tables, plus the write-side
//! drafts produced by the translator
//!
//! The kind discriminator and the holiday marker live only here; the view
//! models carry the distinction in their types instead.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::time::WeekDay;

/// Type discriminator stored on each opening-window row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
pub enum HoursRowKind {
    Standard = 0,
    Special = 1,
    Exception = 2,
}

/// One persisted opening-window row
#[derive(Debug, Clone, FromRow)]
pub struct ServiceHoursRow {
    pub id: i32,
    pub channel_version_id: Uuid,
    pub kind: HoursRowKind,
    /// Holiday marker; an `Exception` row with it set is a holiday record
    pub holiday_id: Option<i32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub is_closed: bool,
    pub order_number: i32,
    /// Localized note keyed by language id
    pub additional_information: Json<HashMap<i16, String>>,
    pub created: DateTime<Utc>,
}

impl ServiceHoursRow {
    pub fn is_holiday(&self) -> bool {
        self.holiday_id.is_some()
    }
}

/// One persisted interval row, owned by its parent window
#[derive(Debug, Clone, FromRow)]
pub struct DailyIntervalRow {
    pub id: i32,
    pub service_hours_id: i32,
    pub day_from: i16,
    pub day_to: Option<i16>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
    pub order_number: i32,
}

/// Desired state for one window and its interval children
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDraft {
    /// Persisted id of the row this draft replaces; `None` for a new row
    pub id: Option<i32>,
    pub kind: HoursRowKind,
    pub holiday_id: Option<i32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub is_closed: bool,
    pub order_number: i32,
    pub additional_information: HashMap<i16, String>,
    pub intervals: Vec<IntervalDraft>,
}

/// Desired state for one interval row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalDraft {
    pub day_from: WeekDay,
    pub day_to: Option<WeekDay>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
    pub order_number: i32,
}
