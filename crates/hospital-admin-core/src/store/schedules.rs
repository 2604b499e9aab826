//! Doctor schedule collection.

use chrono::NaiveDate;

use super::{RecordStore, StoreRecord, Stored};
use crate::forms::to_input_time;
use crate::models::{ScheduleEntry, ScheduleStatus};

impl StoreRecord for ScheduleEntry {
    fn own_id(&self) -> Option<&str> {
        Some(self.id.as_str())
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.doctor_name.as_str(), self.department.as_str(), self.details.as_str()]
    }
}

impl RecordStore<ScheduleEntry> {
    /// Entries on a given day, earliest start first.
    pub fn for_date(&self, date: NaiveDate) -> Vec<&Stored<ScheduleEntry>> {
        let mut entries = self.filter(|entry| entry.date == date);
        entries.sort_by_cached_key(|s| to_input_time(&s.record.start_time).ok());
        entries
    }

    /// Entries assigned to a doctor (case-insensitive).
    pub fn for_doctor(&self, name: &str) -> Vec<&Stored<ScheduleEntry>> {
        let name = name.trim();
        self.filter(|entry| entry.doctor_name.eq_ignore_ascii_case(name))
    }

    /// Entries carrying the given status.
    pub fn with_status(&self, status: ScheduleStatus) -> Vec<&Stored<ScheduleEntry>> {
        self.filter(|entry| entry.status == status)
    }
}
