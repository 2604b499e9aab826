//! Doctor schedule form.
//!
//! Handles:
//! - Department lookup when a rostered doctor is selected
//! - 24-hour → 12-hour time conversion as each time field changes
//! - Identifier minting on creation only

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{EntityForm, FormError, FormResult};
use crate::config::AdminConfig;
use crate::models::{Roster, ScheduleEntry, ScheduleStatus};

/// Format produced by the date input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Editable fields of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleField {
    DoctorName,
    Date,
    StartTime,
    EndTime,
    Department,
    Details,
    Status,
}

impl ScheduleField {
    pub const ALL: [ScheduleField; 7] = [
        ScheduleField::DoctorName,
        ScheduleField::Date,
        ScheduleField::StartTime,
        ScheduleField::EndTime,
        ScheduleField::Department,
        ScheduleField::Details,
        ScheduleField::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleField::DoctorName => "doctor_name",
            ScheduleField::Date => "date",
            ScheduleField::StartTime => "start_time",
            ScheduleField::EndTime => "end_time",
            ScheduleField::Department => "department",
            ScheduleField::Details => "details",
            ScheduleField::Status => "status",
        }
    }
}

impl FromStr for ScheduleField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// In-progress schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleDraft {
    /// Carried from the seed when editing; minted on finalize otherwise
    pub id: Option<String>,
    pub doctor_name: String,
    /// Raw date input (YYYY-MM-DD)
    pub date: String,
    /// Already in 12-hour display form
    pub start_time: String,
    /// Already in 12-hour display form
    pub end_time: String,
    pub department: String,
    pub details: String,
    pub status: ScheduleStatus,
}

impl From<&ScheduleEntry> for ScheduleDraft {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            id: Some(entry.id.clone()),
            doctor_name: entry.doctor_name.clone(),
            date: entry.date.format(DATE_FORMAT).to_string(),
            start_time: entry.start_time.clone(),
            end_time: entry.end_time.clone(),
            department: entry.department.clone(),
            details: entry.details.clone(),
            status: entry.status,
        }
    }
}

/// Controller for the add/edit schedule form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleForm {
    roster: Roster,
}

impl ScheduleForm {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.roster.clone())
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

impl EntityForm for ScheduleForm {
    type Record = ScheduleEntry;
    type Draft = ScheduleDraft;
    type Field = ScheduleField;

    fn initialize(&self, seed: Option<&ScheduleEntry>) -> ScheduleDraft {
        seed.map(ScheduleDraft::from).unwrap_or_default()
    }

    fn set_field(
        &self,
        draft: &ScheduleDraft,
        field: ScheduleField,
        value: &str,
    ) -> FormResult<ScheduleDraft> {
        let mut next = draft.clone();
        match field {
            ScheduleField::DoctorName => {
                next.doctor_name = value.to_string();
                if let Some(department) = self.roster.department_for(value) {
                    next.department = department.to_string();
                }
            }
            ScheduleField::Date => next.date = value.to_string(),
            ScheduleField::StartTime => next.start_time = to_display_time(value)?,
            ScheduleField::EndTime => next.end_time = to_display_time(value)?,
            ScheduleField::Department => next.department = value.to_string(),
            ScheduleField::Details => next.details = value.to_string(),
            ScheduleField::Status => next.status = value.parse()?,
        }
        Ok(next)
    }

    fn finalize(&self, draft: &ScheduleDraft) -> FormResult<ScheduleEntry> {
        let doctor_name = required(&draft.doctor_name, "doctor_name")?;
        let date = required(&draft.date, "date")?;
        let start_time = required(&draft.start_time, "start_time")?;
        let end_time = required(&draft.end_time, "end_time")?;

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| FormError::InvalidDate(draft.date.clone()))?;

        let id = match &draft.id {
            Some(id) => id.clone(),
            None => uuid::Uuid::new_v4().to_string(),
        };

        let entry = ScheduleEntry {
            id,
            doctor_name: doctor_name.to_string(),
            date,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            department: draft.department.clone(),
            details: draft.details.clone(),
            status: draft.status,
        };

        tracing::debug!(
            id = %entry.id,
            doctor = %entry.doctor_name,
            date = %entry.date,
            status = %entry.status,
            "finalized schedule entry"
        );
        Ok(entry)
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> FormResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// Convert a 24-hour time input ("14:30") to 12-hour display form ("02:30 PM").
///
/// Seconds, if present, are dropped. Input already in 12-hour form is rejected.
pub fn to_display_time(input: &str) -> FormResult<String> {
    let trimmed = input.trim();
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| FormError::InvalidTime(input.to_string()))?;
    Ok(time.format("%I:%M %p").to_string())
}

/// Convert a display time ("02:30 PM") back to 24-hour input form ("14:30"),
/// for seeding a time input when an entry is edited.
pub fn to_input_time(display: &str) -> FormResult<String> {
    let time = NaiveTime::parse_from_str(display.trim(), "%I:%M %p")
        .map_err(|_| FormError::InvalidTime(display.to_string()))?;
    Ok(time.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityStatus, SlotStatus};

    fn filled_draft(form: &ScheduleForm) -> ScheduleDraft {
        let draft = form.initialize(None);
        let draft = form
            .set_field(&draft, ScheduleField::DoctorName, "Dr. James Wilson")
            .unwrap();
        let draft = form.set_field(&draft, ScheduleField::Date, "2024-03-15").unwrap();
        let draft = form
            .set_field(&draft, ScheduleField::StartTime, "09:00")
            .unwrap();
        form.set_field(&draft, ScheduleField::EndTime, "17:00")
            .unwrap()
    }

    #[test]
    fn test_time_scenarios() {
        assert_eq!(to_display_time("14:30").unwrap(), "02:30 PM");
        assert_eq!(to_display_time("00:15").unwrap(), "12:15 AM");
        assert_eq!(to_display_time("12:00").unwrap(), "12:00 PM");
        assert_eq!(to_display_time("13:05").unwrap(), "01:05 PM");
        assert_eq!(to_display_time("09:45:30").unwrap(), "09:45 AM");
    }

    #[test]
    fn test_invalid_time_rejected() {
        assert_eq!(
            to_display_time("25:00"),
            Err(FormError::InvalidTime("25:00".into()))
        );
        assert!(to_display_time("02:30 PM").is_err());
        assert!(to_display_time("").is_err());
    }

    #[test]
    fn test_to_input_time() {
        assert_eq!(to_input_time("02:30 PM").unwrap(), "14:30");
        assert_eq!(to_input_time("12:15 AM").unwrap(), "00:15");
        assert!(to_input_time("14:30").is_err());
    }

    #[test]
    fn test_doctor_selection_sets_department_only() {
        let form = ScheduleForm::default();
        let draft = form.initialize(None);
        let next = form
            .set_field(&draft, ScheduleField::DoctorName, "Dr. James Wilson")
            .unwrap();

        assert_eq!(next.department, "Cardiology");
        assert_eq!(next.doctor_name, "Dr. James Wilson");
        assert_eq!(
            ScheduleDraft {
                doctor_name: draft.doctor_name.clone(),
                department: draft.department.clone(),
                ..next.clone()
            },
            draft
        );
    }

    #[test]
    fn test_unknown_doctor_keeps_department() {
        let form = ScheduleForm::default();
        let draft = form.initialize(None);
        let draft = form
            .set_field(&draft, ScheduleField::Department, "Radiology")
            .unwrap();
        let next = form
            .set_field(&draft, ScheduleField::DoctorName, "Dr. Locum")
            .unwrap();

        assert_eq!(next.department, "Radiology");
    }

    #[test]
    fn test_time_normalized_on_change() {
        let form = ScheduleForm::default();
        let draft = form.initialize(None);
        let next = form
            .set_field(&draft, ScheduleField::StartTime, "14:30")
            .unwrap();
        assert_eq!(next.start_time, "02:30 PM");
    }

    #[test]
    fn test_status_field_accepts_both_vocabularies() {
        let form = ScheduleForm::default();
        let draft = form.initialize(None);
        assert_eq!(
            draft.status,
            ScheduleStatus::Availability(AvailabilityStatus::Available)
        );

        let draft = form
            .set_field(&draft, ScheduleField::Status, "Surgery")
            .unwrap();
        assert_eq!(
            draft.status,
            ScheduleStatus::Availability(AvailabilityStatus::Surgery)
        );

        let draft = form
            .set_field(&draft, ScheduleField::Status, "in-progress")
            .unwrap();
        assert_eq!(draft.status, ScheduleStatus::Slot(SlotStatus::InProgress));

        assert!(form
            .set_field(&draft, ScheduleField::Status, "asleep")
            .is_err());
    }

    #[test]
    fn test_finalize_mints_id_on_create() {
        let form = ScheduleForm::default();
        let draft = filled_draft(&form);

        let a = form.finalize(&draft).unwrap();
        let b = form.finalize(&draft).unwrap();

        assert_eq!(a.id.len(), 36);
        assert_ne!(a.id, b.id);
        assert_eq!(a.department, "Cardiology");
        assert_eq!(a.start_time, "09:00 AM");
        assert_eq!(a.end_time, "05:00 PM");
    }

    #[test]
    fn test_finalize_keeps_id_on_edit() {
        let form = ScheduleForm::default();
        let created = form.finalize(&filled_draft(&form)).unwrap();

        let draft = form.initialize(Some(&created));
        let draft = form
            .set_field(&draft, ScheduleField::Details, "Covering ER")
            .unwrap();
        let edited = form.finalize(&draft).unwrap();

        assert_eq!(edited.id, created.id);
        assert_eq!(edited.details, "Covering ER");
        assert_eq!(edited.date, created.date);
    }

    #[test]
    fn test_required_fields() {
        let form = ScheduleForm::default();
        let draft = form.initialize(None);
        assert_eq!(
            form.finalize(&draft),
            Err(FormError::MissingField("doctor_name"))
        );

        let draft = filled_draft(&form);
        let draft = ScheduleDraft {
            end_time: String::new(),
            ..draft
        };
        assert_eq!(form.finalize(&draft), Err(FormError::MissingField("end_time")));
    }

    #[test]
    fn test_invalid_date() {
        let form = ScheduleForm::default();
        let draft = filled_draft(&form);
        let draft = form.set_field(&draft, ScheduleField::Date, "15/03/2024").unwrap();
        assert_eq!(
            form.finalize(&draft),
            Err(FormError::InvalidDate("15/03/2024".into()))
        );
    }
}
