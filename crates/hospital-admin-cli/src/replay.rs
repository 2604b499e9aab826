//! Scripted form sessions.
//!
//! A script is a list of steps. Each step opens one form (create, or edit when
//! it names a `target`), applies its field changes in order, and then submits
//! or cancels. A step can `bind` a label to the id of the record it produced
//! so later steps can edit it.

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use hospital_admin_core::forms::{FormResult, FormSink};
use hospital_admin_core::store::{StockSummary, StoreRecord};
use hospital_admin_core::{
    AdminConfig, EntityForm, FormDialog, FormError, FormMode, Medication, MedicationForm,
    RecordStore, Report, ReportForm, ScheduleEntry, ScheduleForm,
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Medication,
    Schedule,
    Report,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    #[default]
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub form: FormKind,
    #[serde(default)]
    pub action: StepAction,
    /// Label (or raw id) of the record to edit; omitted to create
    #[serde(default)]
    pub target: Option<String>,
    /// Label to bind to the resulting record id
    #[serde(default)]
    pub bind: Option<String>,
    /// Ordered `[field, value]` pairs
    #[serde(default)]
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

/// Collections a script writes into.
#[derive(Debug, Default)]
pub struct Workspace {
    pub medications: RecordStore<Medication>,
    pub schedules: RecordStore<ScheduleEntry>,
    pub reports: RecordStore<Report>,
    labels: HashMap<String, String>,
}

/// Serializable view of a workspace.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub stock_summary: StockSummary,
    pub medications: &'a RecordStore<Medication>,
    pub schedules: &'a RecordStore<ScheduleEntry>,
    pub reports: &'a RecordStore<Report>,
}

impl Workspace {
    pub fn run(&mut self, config: &AdminConfig, script: &Script) -> Result<()> {
        let Workspace {
            medications,
            schedules,
            reports,
            labels,
        } = self;

        for (index, step) in script.steps.iter().enumerate() {
            let produced = match step.form {
                FormKind::Medication => {
                    run_step(MedicationForm::from_config(config), medications, labels, step)
                }
                FormKind::Schedule => {
                    run_step(ScheduleForm::from_config(config), schedules, labels, step)
                }
                FormKind::Report => run_step(ReportForm, reports, labels, step),
            }
            .with_context(|| format!("step {} ({:?})", index + 1, step.form))?;

            if let (Some(label), Some(id)) = (&step.bind, produced) {
                labels.insert(label.clone(), id);
            }
        }

        tracing::info!(
            steps = script.steps.len(),
            medications = self.medications.len(),
            schedules = self.schedules.len(),
            reports = self.reports.len(),
            "replay finished"
        );
        Ok(())
    }

    /// Resolve a bound label to its record id.
    pub fn id_of(&self, label: &str) -> Option<&str> {
        self.labels.get(label).map(String::as_str)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            stock_summary: self.medications.status_summary(),
            medications: &self.medications,
            schedules: &self.schedules,
            reports: &self.reports,
        }
    }
}

/// Sink that forwards to a store and remembers the id it touched.
struct Capture<'a, R> {
    store: &'a mut RecordStore<R>,
    last_id: Option<String>,
}

impl<R: StoreRecord> FormSink<R> for Capture<'_, R> {
    fn on_add(&mut self, record: R) -> FormResult<()> {
        self.last_id = Some(self.store.insert(record)?);
        Ok(())
    }

    fn on_update(&mut self, id: &str, record: R) -> FormResult<()> {
        self.store.update(id, record)?;
        self.last_id = Some(id.to_string());
        Ok(())
    }

    fn on_cancel(&mut self) {
        tracing::debug!("form cancelled");
    }
}

fn run_step<F>(
    form: F,
    store: &mut RecordStore<F::Record>,
    labels: &HashMap<String, String>,
    step: &Step,
) -> Result<Option<String>>
where
    F: EntityForm,
    F::Record: StoreRecord,
    F::Field: FromStr<Err = FormError>,
{
    let mode = match &step.target {
        Some(target) => {
            let id = labels.get(target).cloned().unwrap_or_else(|| target.clone());
            let seed = store
                .get(&id)
                .cloned()
                .with_context(|| format!("no record for target {}", target))?;
            FormMode::edit(id, seed)
        }
        None => FormMode::Create,
    };

    let mut dialog = FormDialog::open(form, mode);
    for (name, value) in &step.fields {
        let field: F::Field = name.parse()?;
        dialog
            .set_field(field, value)
            .with_context(|| format!("setting {}", name))?;
    }

    let mut sink = Capture {
        store,
        last_id: None,
    };
    match step.action {
        StepAction::Submit => dialog.submit(&mut sink).map_err(|rejected| rejected.error)?,
        StepAction::Cancel => dialog.cancel(&mut sink),
    }
    Ok(sink.last_id)
}
