//! Report models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a report is presented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Chart,
    Document,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Chart => "chart",
            ReportType::Document => "document",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chart" => Ok(ReportType::Chart),
            "document" => Ok(ReportType::Document),
            other => Err(other.to_string()),
        }
    }
}

/// Report generation status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Every new report starts here
    #[default]
    Pending,
    /// Generated and ready to view
    Completed,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStatus::Pending => f.write_str("pending"),
            ReportStatus::Completed => f.write_str("completed"),
        }
    }
}

/// A finalized report request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Report title
    pub name: String,
    /// Category (e.g., "Analytics", "Financial")
    pub category: String,
    /// Chart or document
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// Free-text description
    pub description: String,
    /// Generation status
    pub status: ReportStatus,
}

impl Report {
    /// Category assigned to new reports.
    pub const DEFAULT_CATEGORY: &'static str = "Analytics";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_parse() {
        assert_eq!("Chart".parse::<ReportType>(), Ok(ReportType::Chart));
        assert_eq!(" document ".parse::<ReportType>(), Ok(ReportType::Document));
        assert!("spreadsheet".parse::<ReportType>().is_err());
    }

    #[test]
    fn test_report_serializes_type_key() {
        let report = Report {
            name: "Monthly Admissions".into(),
            category: Report::DEFAULT_CATEGORY.into(),
            report_type: ReportType::Chart,
            description: String::new(),
            status: ReportStatus::Pending,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["type"], "chart");
        assert_eq!(json["status"], "pending");
    }
}
