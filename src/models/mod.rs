pub mod config;
pub mod prescription;

pub use prescription::{Extraction, FieldSource, FieldSources, Prescription, PrescriptionStatus};
