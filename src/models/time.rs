//! Temporal primitives: weekday ordinals and epoch-time-of-day arithmetic

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Milliseconds in one day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

// ---------------------------------------------------------------------------
// WeekDay
// ---------------------------------------------------------------------------

/// Day of week (0=Monday, 6=Sunday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum WeekDay {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl WeekDay {
    /// All weekdays in Monday-first order
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
            WeekDay::Sunday => "Sunday",
        }
    }

    /// Next day in circular order (the day after Sunday is Monday)
    pub fn succ(self) -> WeekDay {
        match self {
            WeekDay::Monday => WeekDay::Tuesday,
            WeekDay::Tuesday => WeekDay::Wednesday,
            WeekDay::Wednesday => WeekDay::Thursday,
            WeekDay::Thursday => WeekDay::Friday,
            WeekDay::Friday => WeekDay::Saturday,
            WeekDay::Saturday => WeekDay::Sunday,
            WeekDay::Sunday => WeekDay::Monday,
        }
    }

    /// Inclusive forward walk from `from` to `to` in circular order.
    ///
    /// `covered_range(Friday, Monday)` is `[Friday, Saturday, Sunday, Monday]`,
    /// which is the wraparound union of Friday..Sunday and Monday..Monday.
    pub fn covered_range(from: WeekDay, to: WeekDay) -> Vec<WeekDay> {
        let mut days = vec![from];
        let mut current = from;
        while current != to {
            current = current.succ();
            days.push(current);
        }
        days
    }
}

impl TryFrom<i16> for WeekDay {
    type Error = AppError;

    fn try_from(v: i16) -> AppResult<Self> {
        match v {
            0 => Ok(WeekDay::Monday),
            1 => Ok(WeekDay::Tuesday),
            2 => Ok(WeekDay::Wednesday),
            3 => Ok(WeekDay::Thursday),
            4 => Ok(WeekDay::Friday),
            5 => Ok(WeekDay::Saturday),
            6 => Ok(WeekDay::Sunday),
            _ => Err(AppError::Validation(format!("Invalid weekday ordinal: {}", v))),
        }
    }
}

impl From<WeekDay> for i16 {
    fn from(d: WeekDay) -> Self {
        d as i16
    }
}

impl std::fmt::Display for WeekDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Weekday of a calendar date
pub fn weekday_of(date: NaiveDate) -> WeekDay {
    match date.weekday() {
        Weekday::Mon => WeekDay::Monday,
        Weekday::Tue => WeekDay::Tuesday,
        Weekday::Wed => WeekDay::Wednesday,
        Weekday::Thu => WeekDay::Thursday,
        Weekday::Fri => WeekDay::Friday,
        Weekday::Sat => WeekDay::Saturday,
        Weekday::Sun => WeekDay::Sunday,
    }
}

/// Signed count of calendar days from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Time of day as milliseconds since midnight
pub fn to_epoch_time_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) * 1000
        + i64::from(time.nanosecond() / 1_000_000)
}

/// Parse a milliseconds-since-midnight value back into a time of day
pub fn from_epoch_time_of_day(millis: i64) -> AppResult<NaiveTime> {
    if !(0..MILLIS_PER_DAY).contains(&millis) {
        return Err(AppError::Validation(format!(
            "Time of day out of range: {} ms",
            millis
        )));
    }
    let secs = (millis / 1000) as u32;
    let nanos = ((millis % 1000) * 1_000_000) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        .ok_or_else(|| AppError::Validation(format!("Time of day out of range: {} ms", millis)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succ_wraps() {
        assert_eq!(WeekDay::Sunday.succ(), WeekDay::Monday);
        assert_eq!(WeekDay::Wednesday.succ(), WeekDay::Thursday);
    }

    #[test]
    fn test_covered_range_no_wrap() {
        assert_eq!(
            WeekDay::covered_range(WeekDay::Tuesday, WeekDay::Wednesday),
            vec![WeekDay::Tuesday, WeekDay::Wednesday]
        );
    }

    #[test]
    fn test_covered_range_wraparound() {
        assert_eq!(
            WeekDay::covered_range(WeekDay::Friday, WeekDay::Monday),
            vec![WeekDay::Friday, WeekDay::Saturday, WeekDay::Sunday, WeekDay::Monday]
        );
    }

    #[test]
    fn test_covered_range_single_day() {
        assert_eq!(
            WeekDay::covered_range(WeekDay::Sunday, WeekDay::Sunday),
            vec![WeekDay::Sunday]
        );
    }

    #[test]
    fn test_epoch_time_of_day_round_trip() {
        let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        let millis = to_epoch_time_of_day(time);
        assert_eq!(millis, 34_200_000);
        assert_eq!(from_epoch_time_of_day(millis).unwrap(), time);
    }

    #[test]
    fn test_epoch_time_of_day_rejects_out_of_range() {
        assert!(from_epoch_time_of_day(-1).is_err());
        assert!(from_epoch_time_of_day(MILLIS_PER_DAY).is_err());
    }

    #[test]
    fn test_weekday_of() {
        // 2025-06-02 is a Monday
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(weekday_of(date), WeekDay::Monday);
        assert_eq!(weekday_of(date + chrono::Days::new(5)), WeekDay::Saturday);
    }

    #[test]
    fn test_days_between() {
        let from = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        assert_eq!(days_between(from, to), 2);
        assert_eq!(days_between(to, from), -2);
    }

    #[test]
    fn test_weekday_ordinal_conversion() {
        assert_eq!(WeekDay::try_from(4).unwrap(), WeekDay::Friday);
        assert!(WeekDay::try_from(7).is_err());
        assert_eq!(i16::from(WeekDay::Sunday), 6);
    }
}
