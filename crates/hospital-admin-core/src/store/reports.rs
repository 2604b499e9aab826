//! Report collection.

use super::{RecordStore, StoreError, StoreRecord, StoreResult, Stored};
use crate::models::{Report, ReportStatus, ReportType};

impl StoreRecord for Report {
    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str(), self.description.as_str()]
    }
}

impl RecordStore<Report> {
    pub fn by_type(&self, report_type: ReportType) -> Vec<&Stored<Report>> {
        self.filter(|r| r.report_type == report_type)
    }

    pub fn by_category(&self, category: &str) -> Vec<&Stored<Report>> {
        let category = category.trim();
        self.filter(|r| r.category.eq_ignore_ascii_case(category))
    }

    /// Reports still waiting to be generated.
    pub fn pending(&self) -> Vec<&Stored<Report>> {
        self.filter(|r| r.status == ReportStatus::Pending)
    }

    /// Mark a report as generated.
    pub fn complete_report(&mut self, id: &str) -> StoreResult<()> {
        let mut report = self
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        report.status = ReportStatus::Completed;
        self.update(id, report)
    }
}
