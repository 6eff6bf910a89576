//! Business logic services

pub mod codes;
pub mod reconcile;
pub mod schedules;
pub mod translator;

use std::sync::Arc;

use crate::{repository::HoursStore, services::codes::CodeCache};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub schedules: schedules::SchedulesService,
}

impl Services {
    /// Create all services with the given store and code tables
    pub fn new(store: Arc<dyn HoursStore>, codes: Arc<CodeCache>) -> Self {
        Self {
            schedules: schedules::SchedulesService::new(store, codes),
        }
    }
}
