//! Hospital Admin Core Library
//!
//! Form controllers, record collections and navigation state for the hospital
//! administration app. Rendering stays in the UI host; everything the host
//! needs to decide lives here.
//!
//! # Architecture
//!
//! ```text
//!   Host opens form ──▶ FormDialog::open(Create | Edit { id, seed })
//!                                   │
//!                        initialize(seed) → Draft
//!                                   │
//!                 input change ──▶ set_field(draft, field, value) → Draft
//!                                   │   (time normalization, department lookup)
//!                                   │
//!                   confirm ──▶ finalize(draft) → Record
//!                                   │   (stock status, price symbol, id minting)
//!                                   ▼
//!                    ┌──────────────────────────────┐
//!                    │  FormSink (RecordStore<R>)   │
//!                    │  on_add / on_update          │
//!                    └──────────────┬───────────────┘
//!                                   │
//!                         search / filter for display
//!
//!   Location change ──▶ Router::resolve(&Session, path) → Render | Redirect | NotFound
//! ```
//!
//! # Core Principle
//!
//! **Derived fields are never user input.** Stock status is recomputed from
//! stock on every finalize; schedule ids are minted once and carried through
//! edits.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Medication, ScheduleEntry, Report, Roster)
//! - [`forms`]: Entity form controllers and the dialog host
//! - [`store`]: In-memory record collections
//! - [`navigation`]: Destinations, router, command palette, sidebar
//! - [`session`]: Authentication state machine
//! - [`config`]: Runtime configuration

pub mod config;
pub mod forms;
pub mod models;
pub mod navigation;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use config::AdminConfig;
pub use forms::{
    EntityForm, FormDialog, FormError, FormMode, FormSink, MedicationForm, ReportForm,
    ScheduleForm,
};
pub use models::{Medication, Report, ScheduleEntry, ScheduleStatus, StockStatus};
pub use navigation::{CommandPalette, Destination, RouteOutcome, Router};
pub use session::Session;
pub use store::{RecordStore, Stored};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use forms::{MedicationField, ReportField, ScheduleField};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HospitalAdminError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<FormError> for HospitalAdminError {
    fn from(e: FormError) -> Self {
        match e {
            FormError::Store(store_err) => store_err.into(),
            other => HospitalAdminError::InvalidInput(other.to_string()),
        }
    }
}

impl From<store::StoreError> for HospitalAdminError {
    fn from(e: store::StoreError) -> Self {
        match e {
            store::StoreError::NotFound(id) => HospitalAdminError::NotFound(id),
            other => HospitalAdminError::InvalidInput(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for HospitalAdminError {
    fn from(e: config::ConfigError) -> Self {
        HospitalAdminError::ConfigError(e.to_string())
    }
}

impl From<session::SessionError> for HospitalAdminError {
    fn from(e: session::SessionError) -> Self {
        HospitalAdminError::SessionError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HospitalAdminError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HospitalAdminError::InternalError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a core with the given JSON config, or defaults when absent.
#[uniffi::export]
pub fn open_core(config_json: Option<String>) -> Result<Arc<HospitalAdminCore>, HospitalAdminError> {
    let config = match config_json {
        Some(json) => AdminConfig::from_json(&json)?,
        None => AdminConfig::default(),
    };
    Ok(Arc::new(HospitalAdminCore::new(config)))
}

/// Convert a 24-hour time input to its 12-hour display form.
#[uniffi::export]
pub fn display_time(input: String) -> Result<String, HospitalAdminError> {
    Ok(forms::to_display_time(&input)?)
}

/// List destinations matching a palette query, best first.
#[uniffi::export]
pub fn search_destinations(query: String) -> Vec<FfiDestination> {
    navigation::rank_destinations(&query)
        .into_iter()
        .map(FfiDestination::from)
        .collect()
}

// =========================================================================
// Main API Object
// =========================================================================

#[derive(Default)]
struct CoreState {
    medications: RecordStore<Medication>,
    schedules: RecordStore<ScheduleEntry>,
    reports: RecordStore<Report>,
    session: Session,
}

/// Thread-safe core handle for the UI host.
#[derive(uniffi::Object)]
pub struct HospitalAdminCore {
    config: AdminConfig,
    router: Router,
    state: Mutex<CoreState>,
}

impl HospitalAdminCore {
    pub fn new(config: AdminConfig) -> Self {
        Self {
            config,
            router: Router::new(),
            state: Mutex::new(CoreState::default()),
        }
    }
}

#[uniffi::export]
impl HospitalAdminCore {
    // =========================================================================
    // Medication Operations
    // =========================================================================

    /// Finalize a medication draft without storing it.
    pub fn finalize_medication(
        &self,
        draft: FfiMedicationDraft,
    ) -> Result<FfiMedication, HospitalAdminError> {
        let form = MedicationForm::from_config(&self.config);
        let record = apply_fields(&form, None, draft.fields())?;
        Ok(FfiMedication::from_stored(None, record))
    }

    /// Create (no id) or update (with id) a medication.
    pub fn save_medication(
        &self,
        id: Option<String>,
        draft: FfiMedicationDraft,
    ) -> Result<FfiMedication, HospitalAdminError> {
        let mut state = self.state.lock()?;
        let form = MedicationForm::from_config(&self.config);
        let seed = lookup(&state.medications, id.as_deref())?;
        let record = apply_fields(&form, seed.as_ref(), draft.fields())?;
        let id = upsert(&mut state.medications, id, record.clone())?;
        Ok(FfiMedication::from_stored(Some(id), record))
    }

    pub fn remove_medication(&self, id: String) -> Result<(), HospitalAdminError> {
        let mut state = self.state.lock()?;
        state.medications.remove(&id)?;
        Ok(())
    }

    /// Search medications by name, category or supplier.
    pub fn list_medications(&self, query: String) -> Result<Vec<FfiMedication>, HospitalAdminError> {
        let state = self.state.lock()?;
        Ok(state
            .medications
            .search(&query)
            .into_iter()
            .map(|s| FfiMedication::from_stored(Some(s.id.clone()), s.record.clone()))
            .collect())
    }

    pub fn stock_summary(&self) -> Result<FfiStockSummary, HospitalAdminError> {
        let state = self.state.lock()?;
        Ok(state.medications.status_summary().into())
    }

    // =========================================================================
    // Schedule Operations
    // =========================================================================

    /// Department of a rostered doctor.
    pub fn department_for_doctor(&self, name: String) -> Option<String> {
        self.config.roster.department_for(&name).map(str::to_string)
    }

    /// Create (no id) or update (with id) a schedule entry.
    pub fn save_schedule(
        &self,
        draft: FfiScheduleDraft,
    ) -> Result<FfiScheduleEntry, HospitalAdminError> {
        let mut state = self.state.lock()?;
        let form = ScheduleForm::from_config(&self.config);
        let seed = lookup(&state.schedules, draft.id.as_deref())?;
        let record = apply_fields(&form, seed.as_ref(), draft.fields())?;
        upsert(&mut state.schedules, draft.id.clone(), record.clone())?;
        Ok(record.into())
    }

    pub fn list_schedules(&self, query: String) -> Result<Vec<FfiScheduleEntry>, HospitalAdminError> {
        let state = self.state.lock()?;
        Ok(state
            .schedules
            .search(&query)
            .into_iter()
            .map(|s| s.record.clone().into())
            .collect())
    }

    // =========================================================================
    // Report Operations
    // =========================================================================

    /// Create (no id) or update (with id) a report.
    pub fn save_report(
        &self,
        id: Option<String>,
        draft: FfiReportDraft,
    ) -> Result<FfiReport, HospitalAdminError> {
        let mut state = self.state.lock()?;
        let seed = lookup(&state.reports, id.as_deref())?;
        let record = apply_fields(&ReportForm, seed.as_ref(), draft.fields())?;
        let id = upsert(&mut state.reports, id, record.clone())?;
        Ok(FfiReport::from_stored(id, record))
    }

    pub fn complete_report(&self, id: String) -> Result<(), HospitalAdminError> {
        let mut state = self.state.lock()?;
        state.reports.complete_report(&id)?;
        Ok(())
    }

    pub fn list_reports(&self, query: String) -> Result<Vec<FfiReport>, HospitalAdminError> {
        let state = self.state.lock()?;
        Ok(state
            .reports
            .search(&query)
            .into_iter()
            .map(|s| FfiReport::from_stored(s.id.clone(), s.record.clone()))
            .collect())
    }

    // =========================================================================
    // Session & Navigation
    // =========================================================================

    pub fn login(&self, user: String) -> Result<(), HospitalAdminError> {
        let mut state = self.state.lock()?;
        state.session.login(&user)?;
        Ok(())
    }

    pub fn logout(&self) -> Result<(), HospitalAdminError> {
        let mut state = self.state.lock()?;
        state.session.logout()?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> Result<bool, HospitalAdminError> {
        let state = self.state.lock()?;
        Ok(state.session.is_authenticated())
    }

    /// Resolve a location path against the current session.
    pub fn resolve_route(&self, path: String) -> Result<FfiRouteOutcome, HospitalAdminError> {
        let state = self.state.lock()?;
        Ok(self.router.resolve(&state.session, &path).into())
    }
}

/// Seed a draft, apply each field change in order, and finalize.
fn apply_fields<F: EntityForm>(
    form: &F,
    seed: Option<&F::Record>,
    fields: Vec<(F::Field, String)>,
) -> Result<F::Record, FormError> {
    let mut draft = form.initialize(seed);
    for (field, value) in fields {
        draft = form.set_field(&draft, field, &value)?;
    }
    form.finalize(&draft)
}

fn lookup<R: store::StoreRecord>(
    store: &RecordStore<R>,
    id: Option<&str>,
) -> Result<Option<R>, HospitalAdminError> {
    match id {
        Some(id) => store
            .get(id)
            .cloned()
            .map(Some)
            .ok_or_else(|| HospitalAdminError::NotFound(id.to_string())),
        None => Ok(None),
    }
}

fn upsert<R: store::StoreRecord>(
    store: &mut RecordStore<R>,
    id: Option<String>,
    record: R,
) -> Result<String, HospitalAdminError> {
    match id {
        Some(id) => {
            store.update(&id, record)?;
            Ok(id)
        }
        None => Ok(store.insert(record)?),
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe medication input. Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiMedicationDraft {
    pub name: Option<String>,
    pub category: Option<String>,
    pub stock: Option<String>,
    pub price: Option<String>,
    pub supplier: Option<String>,
}

impl FfiMedicationDraft {
    fn fields(self) -> Vec<(MedicationField, String)> {
        [
            (MedicationField::Name, self.name),
            (MedicationField::Category, self.category),
            (MedicationField::Stock, self.stock),
            (MedicationField::Price, self.price),
            (MedicationField::Supplier, self.supplier),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

/// FFI-safe medication.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub stock: u32,
    pub price: String,
    pub supplier: String,
    pub status: String,
}

impl FfiMedication {
    fn from_stored(id: Option<String>, med: Medication) -> Self {
        Self {
            id,
            name: med.name,
            category: med.category,
            stock: med.stock,
            price: med.price,
            supplier: med.supplier,
            status: med.status.to_string(),
        }
    }
}

/// FFI-safe stock counts.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStockSummary {
    pub total: u64,
    pub in_stock: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
}

impl From<store::StockSummary> for FfiStockSummary {
    fn from(summary: store::StockSummary) -> Self {
        Self {
            total: count(summary.total),
            in_stock: count(summary.in_stock),
            low_stock: count(summary.low_stock),
            out_of_stock: count(summary.out_of_stock),
        }
    }
}

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// FFI-safe schedule input. Times are 24-hour ("14:30"). Fields left as
/// `None` keep their current value.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiScheduleDraft {
    /// Set when editing an existing entry
    pub id: Option<String>,
    pub doctor_name: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub department: Option<String>,
    pub details: Option<String>,
    pub status: Option<String>,
}

impl FfiScheduleDraft {
    fn fields(&self) -> Vec<(ScheduleField, String)> {
        // Department before doctor so a rostered doctor's department wins
        [
            (ScheduleField::Department, &self.department),
            (ScheduleField::DoctorName, &self.doctor_name),
            (ScheduleField::Date, &self.date),
            (ScheduleField::StartTime, &self.start_time),
            (ScheduleField::EndTime, &self.end_time),
            (ScheduleField::Details, &self.details),
            (ScheduleField::Status, &self.status),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .collect()
    }
}

/// FFI-safe schedule entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiScheduleEntry {
    pub id: String,
    pub doctor_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub department: String,
    pub details: String,
    pub status: String,
}

impl From<ScheduleEntry> for FfiScheduleEntry {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            id: entry.id,
            doctor_name: entry.doctor_name,
            date: entry.date.format(forms::DATE_FORMAT).to_string(),
            start_time: entry.start_time,
            end_time: entry.end_time,
            department: entry.department,
            details: entry.details,
            status: entry.status.to_string(),
        }
    }
}

/// FFI-safe report input. Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiReportDraft {
    pub name: Option<String>,
    pub category: Option<String>,
    pub report_type: Option<String>,
    pub description: Option<String>,
}

impl FfiReportDraft {
    fn fields(self) -> Vec<(ReportField, String)> {
        [
            (ReportField::Name, self.name),
            (ReportField::Category, self.category),
            (ReportField::Type, self.report_type),
            (ReportField::Description, self.description),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

/// FFI-safe report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReport {
    pub id: String,
    pub name: String,
    pub category: String,
    pub report_type: String,
    pub description: String,
    pub status: String,
}

impl FfiReport {
    fn from_stored(id: String, report: Report) -> Self {
        Self {
            id,
            name: report.name,
            category: report.category,
            report_type: report.report_type.to_string(),
            description: report.description,
            status: report.status.to_string(),
        }
    }
}

/// FFI-safe destination.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDestination {
    pub path: String,
    pub label: String,
}

impl From<Destination> for FfiDestination {
    fn from(dest: Destination) -> Self {
        Self {
            path: dest.path().to_string(),
            label: dest.label().to_string(),
        }
    }
}

/// FFI-safe routing decision.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum FfiRouteOutcome {
    Render { path: String },
    Redirect { path: String },
    NotFound { path: String },
}

impl From<RouteOutcome> for FfiRouteOutcome {
    fn from(outcome: RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::Render(dest) => FfiRouteOutcome::Render {
                path: dest.path().to_string(),
            },
            RouteOutcome::Redirect(dest) => FfiRouteOutcome::Redirect {
                path: dest.path().to_string(),
            },
            RouteOutcome::NotFound(path) => FfiRouteOutcome::NotFound { path },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> Arc<HospitalAdminCore> {
        open_core(None).unwrap()
    }

    #[test]
    fn test_save_and_edit_medication() {
        let core = core();
        let created = core
            .save_medication(
                None,
                FfiMedicationDraft {
                    name: Some("Amoxicillin".into()),
                    stock: Some("40".into()),
                    price: Some("12.50".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(created.status, "low-stock");
        assert_eq!(created.price, "$12.50");

        let id = created.id.clone().unwrap();
        let edited = core
            .save_medication(
                Some(id.clone()),
                FfiMedicationDraft {
                    stock: Some("75".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.id.as_deref(), Some(id.as_str()));
        assert_eq!(edited.name, "Amoxicillin");
        assert_eq!(edited.status, "in-stock");

        let summary = core.stock_summary().unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.in_stock, 1);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_stock_summary_counts_widen() {
        let summary = store::StockSummary {
            total: usize::MAX,
            in_stock: usize::MAX,
            low_stock: 0,
            out_of_stock: 7,
        };
        let ffi = FfiStockSummary::from(summary);
        assert_eq!(ffi.total, usize::MAX as u64);
        assert!(ffi.in_stock > u64::from(u32::MAX));
        assert_eq!(ffi.out_of_stock, 7);
    }

    #[test]
    fn test_edit_unknown_medication() {
        let err = core()
            .save_medication(Some("missing".into()), FfiMedicationDraft::default())
            .unwrap_err();
        assert!(matches!(err, HospitalAdminError::NotFound(_)));
    }

    #[test]
    fn test_save_schedule_department_and_times() {
        let core = core();
        let entry = core
            .save_schedule(FfiScheduleDraft {
                doctor_name: Some("Dr. James Wilson".into()),
                department: Some("Radiology".into()),
                date: Some("2024-03-15".into()),
                start_time: Some("14:30".into()),
                end_time: Some("18:00".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(entry.department, "Cardiology");
        assert_eq!(entry.start_time, "02:30 PM");
        assert_eq!(entry.end_time, "06:00 PM");
        assert_eq!(entry.status, "Available");

        let edited = core
            .save_schedule(FfiScheduleDraft {
                id: Some(entry.id.clone()),
                status: Some("in-progress".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(edited.id, entry.id);
        assert_eq!(edited.status, "in-progress");
        assert_eq!(core.list_schedules(String::new()).unwrap().len(), 1);
    }

    #[test]
    fn test_report_lifecycle() {
        let core = core();
        let report = core
            .save_report(
                None,
                FfiReportDraft {
                    name: Some("Bed Occupancy".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(report.category, "Analytics");
        assert_eq!(report.report_type, "chart");
        assert_eq!(report.status, "pending");

        core.complete_report(report.id.clone()).unwrap();
        let reports = core.list_reports("occupancy".into()).unwrap();
        assert_eq!(reports[0].status, "completed");
    }

    #[test]
    fn test_routing_follows_session() {
        let core = core();
        assert!(matches!(
            core.resolve_route("/pharmacy".into()).unwrap(),
            FfiRouteOutcome::Redirect { path } if path == "/login"
        ));

        core.login("admin".into()).unwrap();
        assert!(core.is_authenticated().unwrap());
        assert!(matches!(
            core.resolve_route("/pharmacy".into()).unwrap(),
            FfiRouteOutcome::Render { path } if path == "/pharmacy"
        ));

        core.logout().unwrap();
        assert!(matches!(
            core.logout().unwrap_err(),
            HospitalAdminError::SessionError(_)
        ));
    }

    #[test]
    fn test_open_core_with_bad_config() {
        let err = open_core(Some(r#"{"currency_symbol": ""}"#.into())).err().unwrap();
        assert!(matches!(err, HospitalAdminError::ConfigError(_)));
    }

    #[test]
    fn test_free_functions() {
        assert_eq!(display_time("00:15".into()).unwrap(), "12:15 AM");
        assert!(display_time("bad".into()).is_err());
        assert_eq!(search_destinations("pharm".into())[0].path, "/pharmacy");
    }
}
