//! Domain models for the opening hours engine

pub mod hours;
pub mod row;
pub mod time;

pub use hours::{
    DailyInterval, ExceptionalHours, HolidayHours, HourVariant, Schedule, SpecialHours,
    StandardHours, Window,
};
pub use row::{DailyIntervalRow, HoursRowKind, IntervalDraft, ServiceHoursRow, WindowDraft};
pub use time::WeekDay;
