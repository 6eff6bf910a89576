//! Opening hours view models (the hierarchical shapes exchanged with the UI)

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::WeekDay;

// ---------------------------------------------------------------------------
// DailyInterval
// ---------------------------------------------------------------------------

/// One contiguous or overnight time span on a weekday range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInterval {
    pub day_from: WeekDay,
    /// End weekday for overnight spans; same day as `day_from` when absent
    pub day_to: Option<WeekDay>,
    /// Opening time, milliseconds since midnight
    pub time_from: Option<i64>,
    /// Closing time, milliseconds since midnight; may be numerically smaller
    /// than `time_from` only for an overnight span paired with `day_to`
    pub time_to: Option<i64>,
    #[serde(default)]
    pub order: i32,
}

impl Default for DailyInterval {
    /// Monday-to-Monday with empty times, the placeholder exposed for a
    /// special hours window that has no persisted interval
    fn default() -> Self {
        Self {
            day_from: WeekDay::Monday,
            day_to: Some(WeekDay::Monday),
            time_from: None,
            time_to: None,
            order: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// Common fields shared by every opening hours record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Persisted row id; `None` until the record has been saved
    pub id: Option<i32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// True when the record is bound to a date range (requires both dates)
    pub is_period: bool,
    #[serde(default)]
    pub order_number: i32,
    /// Localized note keyed by language code
    #[serde(default)]
    pub additional_information: HashMap<String, String>,
}

impl Window {
    /// Both bounds of the date range, when this window is period-bound
    pub fn period_dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.is_period, self.date_from, self.date_to) {
            (true, Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Hour kinds
// ---------------------------------------------------------------------------

/// Weekly recurring schedule, optionally non-stop (24/7) or period-bound
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardHours {
    #[serde(flatten)]
    pub window: Window,
    /// "Always open"; persisted as a window with zero interval rows
    pub is_non_stop: bool,
    /// Intervals per weekday; `None` marks the weekday inactive.
    /// Empty when `is_non_stop`, otherwise all 7 keys are present after read.
    #[serde(default)]
    pub daily_hours: BTreeMap<WeekDay, Option<Vec<DailyInterval>>>,
}

/// One-off date-bounded override, either fully closed or with one opening
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExceptionalHours {
    #[serde(flatten)]
    pub window: Window,
    pub closed_for_period: bool,
    /// Present iff the window is open for the period
    pub opening_period: Option<DailyInterval>,
}

/// One-off date-bounded window that always carries exactly one interval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialHours {
    #[serde(flatten)]
    pub window: Window,
    pub opening_period: DailyInterval,
}

/// Hours tied to a named calendar holiday rather than a weekday
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HolidayHours {
    #[serde(flatten)]
    pub window: Window,
    pub holiday_code: String,
    pub closed: bool,
    /// Ignored when `closed`; no weekday grouping since the holiday date
    /// fixes the day
    #[serde(default)]
    pub intervals: Vec<DailyInterval>,
}

/// One opening hours record of any kind
#[derive(Debug, Clone)]
pub enum HourVariant {
    Standard(StandardHours),
    Exceptional(ExceptionalHours),
    Special(SpecialHours),
    Holiday(HolidayHours),
}

impl HourVariant {
    pub fn window(&self) -> &Window {
        match self {
            HourVariant::Standard(h) => &h.window,
            HourVariant::Exceptional(h) => &h.window,
            HourVariant::Special(h) => &h.window,
            HourVariant::Holiday(h) => &h.window,
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// All opening hours of one service channel version, read wholesale and
/// replaced wholesale on save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub standard: Vec<StandardHours>,
    #[serde(default)]
    pub exceptional: Vec<ExceptionalHours>,
    #[serde(default)]
    pub special: Vec<SpecialHours>,
    #[serde(default)]
    pub holiday: Vec<HolidayHours>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_hours_serialize_with_flattened_window() {
        let hours = StandardHours {
            window: Window {
                id: Some(7),
                order_number: 2,
                ..Default::default()
            },
            is_non_stop: false,
            daily_hours: BTreeMap::from([(
                WeekDay::Tuesday,
                Some(vec![DailyInterval {
                    day_from: WeekDay::Tuesday,
                    day_to: None,
                    time_from: Some(32_400_000),
                    time_to: Some(61_200_000),
                    order: 0,
                }]),
            )]),
        };

        let json = serde_json::to_value(&hours).unwrap();

        // Window fields sit at the top level, not under a nested object
        assert_eq!(json["id"], 7);
        assert_eq!(json["order_number"], 2);
        assert!(json.get("window").is_none());
        assert_eq!(json["daily_hours"]["Tuesday"][0]["time_from"], 32_400_000);
    }

    #[test]
    fn test_schedule_deserialize_defaults_missing_buckets() {
        let schedule: Schedule = serde_json::from_str(
            r#"{"special": [{"is_period": false, "opening_period": {"day_from": "Friday"}}]}"#,
        )
        .unwrap();

        assert!(schedule.standard.is_empty());
        assert!(schedule.exceptional.is_empty());
        assert!(schedule.holiday.is_empty());
        assert_eq!(schedule.special.len(), 1);
        assert_eq!(schedule.special[0].opening_period.day_from, WeekDay::Friday);
    }
}
