//! Doctor roster used to fill in departments on the schedule form.

use serde::{Deserialize, Serialize};

/// A doctor known to the hospital.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    /// Display name (e.g., "Dr. James Wilson")
    pub name: String,
    /// Department the doctor belongs to
    pub department: String,
}

impl Doctor {
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
        }
    }
}

/// The set of doctors a schedule entry can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Roster {
    doctors: Vec<Doctor>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            doctors: Self::default_doctors(),
        }
    }
}

impl Roster {
    /// Create an empty roster.
    pub fn empty() -> Self {
        Self {
            doctors: Vec::new(),
        }
    }

    /// Look up a doctor by name (case-insensitive, surrounding whitespace ignored).
    pub fn find(&self, name: &str) -> Option<&Doctor> {
        let name = name.trim();
        self.doctors
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Department for a known doctor.
    pub fn department_for(&self, name: &str) -> Option<&str> {
        self.find(name).map(|d| d.department.as_str())
    }

    /// Add a doctor, replacing any existing entry with the same name.
    pub fn add_doctor(&mut self, doctor: Doctor) {
        match self
            .doctors
            .iter_mut()
            .find(|d| d.name.eq_ignore_ascii_case(&doctor.name))
        {
            Some(existing) => *existing = doctor,
            None => self.doctors.push(doctor),
        }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    fn default_doctors() -> Vec<Doctor> {
        vec![
            Doctor::new("Dr. James Wilson", "Cardiology"),
            Doctor::new("Dr. Sarah Johnson", "Neurology"),
            Doctor::new("Dr. Michael Chen", "Pediatrics"),
            Doctor::new("Dr. Emily Davis", "Orthopedics"),
            Doctor::new("Dr. Robert Taylor", "Dermatology"),
            Doctor::new("Dr. Lisa Anderson", "Oncology"),
        ]
    }
}
