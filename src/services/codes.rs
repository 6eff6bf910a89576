//! Code cache: holiday, language and weekday code resolution
//!
//! Backed by the shared code tables of the surrounding catalog and passed
//! into the translator explicitly (constructor injection, no globals).

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{AppError, AppResult};
use crate::models::time::WeekDay;

static WEEKDAY_CODES: Lazy<HashMap<&'static str, WeekDay>> =
    Lazy::new(|| WeekDay::ALL.iter().map(|d| (d.as_str(), *d)).collect());

/// Lookup tables for the code values used at the persistence boundary
#[derive(Debug, Clone, Default)]
pub struct CodeCache {
    holiday_ids: HashMap<String, i32>,
    holiday_codes: HashMap<i32, String>,
    language_ids: HashMap<String, i16>,
    language_codes: HashMap<i16, String>,
}

impl CodeCache {
    /// Build the cache from `(id, code)` pairs of the holiday and language
    /// code tables
    pub fn new(holidays: &[(i32, &str)], languages: &[(i16, &str)]) -> Self {
        let mut cache = Self::default();
        for (id, code) in holidays {
            cache.holiday_ids.insert((*code).to_string(), *id);
            cache.holiday_codes.insert(*id, (*code).to_string());
        }
        for (id, code) in languages {
            cache.language_ids.insert((*code).to_string(), *id);
            cache.language_codes.insert(*id, (*code).to_string());
        }
        cache
    }

    pub fn holiday_id(&self, code: &str) -> AppResult<i32> {
        self.holiday_ids
            .get(code)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("Unknown holiday code: {}", code)))
    }

    pub fn holiday_code(&self, id: i32) -> AppResult<&str> {
        self.holiday_codes
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| AppError::Validation(format!("Unknown holiday id: {}", id)))
    }

    pub fn language_id(&self, code: &str) -> AppResult<i16> {
        self.language_ids
            .get(code)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("Unknown language code: {}", code)))
    }

    pub fn language_code(&self, id: i16) -> AppResult<&str> {
        self.language_codes
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| AppError::Validation(format!("Unknown language id: {}", id)))
    }

    /// Resolve a weekday code string ("Monday".."Sunday") to its ordinal
    pub fn weekday_from_code(code: &str) -> AppResult<WeekDay> {
        WEEKDAY_CODES
            .get(code)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("Unknown weekday code: {}", code)))
    }
}
