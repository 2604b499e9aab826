//! Entity form controllers.
//!
//! Lifecycle: Open (create or edit) → field-by-field updates → Finalize → Sink
//!
//! A controller never holds state of its own. Every operation takes the
//! current draft and returns a new one, so the dialog that owns the draft can
//! swap it wholesale on each change. Derived fields (stock status, minted
//! identifiers, department from the roster) are computed here and never
//! accepted as direct input.

mod medication;
mod report;
mod schedule;

pub use medication::*;
pub use report::*;
pub use schedule::*;

use std::fmt;

use thiserror::Error;

use crate::models::UnknownStatus;
use crate::store::StoreError;

/// Form errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid stock quantity: {0}")]
    InvalidStock(String),

    #[error("Invalid time (expected 24-hour HH:MM): {0}")]
    InvalidTime(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid report type: {0}")]
    InvalidReportType(String),

    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type FormResult<T> = Result<T, FormError>;

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode<R> {
    Create,
    Edit {
        /// Collection id of the record being edited
        id: String,
        /// Current values of the record
        seed: R,
    },
}

impl<R> FormMode<R> {
    pub fn edit(id: impl Into<String>, seed: R) -> Self {
        FormMode::Edit {
            id: id.into(),
            seed,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }

    pub fn seed(&self) -> Option<&R> {
        match self {
            FormMode::Create => None,
            FormMode::Edit { seed, .. } => Some(seed),
        }
    }
}

/// A controller for one kind of record.
pub trait EntityForm {
    /// The finalized, immutable record.
    type Record: Clone;
    /// The in-progress copy of the record's fields.
    type Draft: Clone + PartialEq + fmt::Debug;
    /// Names of the user-editable fields.
    type Field: Copy + fmt::Debug;

    /// Build a draft, empty or seeded from an existing record.
    fn initialize(&self, seed: Option<&Self::Record>) -> Self::Draft;

    /// Return a new draft with one field changed. The input is left untouched.
    fn set_field(
        &self,
        draft: &Self::Draft,
        field: Self::Field,
        value: &str,
    ) -> FormResult<Self::Draft>;

    /// Compute derived fields and produce the finalized record.
    fn finalize(&self, draft: &Self::Draft) -> FormResult<Self::Record>;
}

/// Receiver of finalized records, typically the collection that owns them.
pub trait FormSink<R> {
    /// A record was created.
    fn on_add(&mut self, record: R) -> FormResult<()>;

    /// An existing record was edited.
    fn on_update(&mut self, id: &str, record: R) -> FormResult<()>;

    /// The user dismissed the form without submitting.
    fn on_cancel(&mut self) {}
}

/// Host for one open form: owns the controller and the current draft until
/// the form is submitted or cancelled.
#[derive(Debug)]
pub struct FormDialog<F: EntityForm> {
    form: F,
    editing: Option<String>,
    draft: F::Draft,
}

impl<F: EntityForm> FormDialog<F> {
    /// Open a form, seeding the draft when editing.
    pub fn open(form: F, mode: FormMode<F::Record>) -> Self {
        let (editing, draft) = match mode {
            FormMode::Create => (None, form.initialize(None)),
            FormMode::Edit { id, seed } => {
                let draft = form.initialize(Some(&seed));
                (Some(id), draft)
            }
        };
        Self {
            form,
            editing,
            draft,
        }
    }

    pub fn draft(&self) -> &F::Draft {
        &self.draft
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Collection id of the record being edited, if any.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Apply one input change. On error the current draft is kept.
    pub fn set_field(&mut self, field: F::Field, value: &str) -> FormResult<()> {
        self.draft = self.form.set_field(&self.draft, field, value)?;
        Ok(())
    }

    /// Finalize the draft and hand the record to the sink, closing the dialog.
    ///
    /// On error the dialog comes back inside [`Rejected`] with its draft
    /// intact so the user can correct it and submit again.
    pub fn submit<S>(self, sink: &mut S) -> Result<(), Rejected<F>>
    where
        S: FormSink<F::Record> + ?Sized,
    {
        let outcome = self
            .form
            .finalize(&self.draft)
            .and_then(|record| match &self.editing {
                Some(id) => sink.on_update(id, record),
                None => sink.on_add(record),
            });
        match outcome {
            Ok(()) => Ok(()),
            Err(error) => Err(Rejected {
                dialog: self,
                error,
            }),
        }
    }

    /// Dismiss the form, discarding the draft.
    pub fn cancel<S>(self, sink: &mut S)
    where
        S: FormSink<F::Record> + ?Sized,
    {
        sink.on_cancel();
    }

    /// Close the dialog and take the draft.
    pub fn into_draft(self) -> F::Draft {
        self.draft
    }
}

/// A submit that did not go through.
#[derive(Debug)]
pub struct Rejected<F: EntityForm> {
    /// The still-open dialog
    pub dialog: FormDialog<F>,
    pub error: FormError,
}

impl<F: EntityForm> Rejected<F> {
    pub fn into_dialog(self) -> FormDialog<F> {
        self.dialog
    }
}

impl<F: EntityForm> From<Rejected<F>> for FormError {
    fn from(rejected: Rejected<F>) -> Self {
        rejected.error
    }
}
