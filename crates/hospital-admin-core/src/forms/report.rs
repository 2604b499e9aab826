//! Report request form.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{EntityForm, FormError, FormResult};
use crate::models::{Report, ReportStatus, ReportType};

/// Editable fields of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    Name,
    Category,
    Type,
    Description,
}

impl ReportField {
    pub const ALL: [ReportField; 4] = [
        ReportField::Name,
        ReportField::Category,
        ReportField::Type,
        ReportField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportField::Name => "name",
            ReportField::Category => "category",
            ReportField::Type => "type",
            ReportField::Description => "description",
        }
    }
}

impl FromStr for ReportField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// In-progress report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub description: String,
    pub status: ReportStatus,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: Report::DEFAULT_CATEGORY.to_string(),
            report_type: ReportType::Chart,
            description: String::new(),
            status: ReportStatus::Pending,
        }
    }
}

impl From<&Report> for ReportDraft {
    fn from(report: &Report) -> Self {
        Self {
            name: report.name.clone(),
            category: report.category.clone(),
            report_type: report.report_type,
            description: report.description.clone(),
            status: report.status,
        }
    }
}

/// Controller for the new-report form. Identifiers are assigned by the
/// collection that receives the report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReportForm;

impl EntityForm for ReportForm {
    type Record = Report;
    type Draft = ReportDraft;
    type Field = ReportField;

    fn initialize(&self, seed: Option<&Report>) -> ReportDraft {
        seed.map(ReportDraft::from).unwrap_or_default()
    }

    fn set_field(
        &self,
        draft: &ReportDraft,
        field: ReportField,
        value: &str,
    ) -> FormResult<ReportDraft> {
        let mut next = draft.clone();
        match field {
            ReportField::Name => next.name = value.to_string(),
            ReportField::Category => next.category = value.to_string(),
            ReportField::Type => {
                next.report_type = value.parse().map_err(FormError::InvalidReportType)?
            }
            ReportField::Description => next.description = value.to_string(),
        }
        Ok(next)
    }

    fn finalize(&self, draft: &ReportDraft) -> FormResult<Report> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingField("name"));
        }

        let category = match draft.category.trim() {
            "" => Report::DEFAULT_CATEGORY,
            category => category,
        };

        let report = Report {
            name: name.to_string(),
            category: category.to_string(),
            report_type: draft.report_type,
            description: draft.description.trim().to_string(),
            status: draft.status,
        };

        tracing::debug!(name = %report.name, kind = %report.report_type, "finalized report");
        Ok(report)
    }
}
