use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNSPECIFIED_DOSAGE: &str = "Not specified";
pub const DEFAULT_FREQUENCY: &str = "As directed";
pub const DEFAULT_DURATION: &str = "As prescribed";
pub const UNKNOWN_DOCTOR: &str = "Unknown";

// ---------------------------------------------------------------------------
// PrescriptionStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionStatus {
    Active,
    Expired,
    Upcoming,
}

impl FromStr for PrescriptionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            "upcoming" => Ok(Self::Upcoming),
            other => Err(anyhow::anyhow!(
                "unknown status: {other} (expected active/expired/upcoming)"
            )),
        }
    }
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Expired => write!(f, "expired"),
            Self::Upcoming => write!(f, "upcoming"),
        }
    }
}

// ---------------------------------------------------------------------------
// Prescription
// ---------------------------------------------------------------------------

/// A prescription as read off a scanned document.
///
/// Every field is always populated: anything the extractor could not find is
/// filled with its placeholder (`Unknown`, `Not specified`, ...), and `date`
/// falls back to the day of extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub doctor: String,
    pub date: String,
    pub status: PrescriptionStatus,
    pub created_at: DateTime<Utc>,
}

impl Prescription {
    /// A record with every field at its placeholder, dated `today`.
    pub fn placeholder(today: NaiveDate) -> Self {
        Self {
            id: new_id(),
            name: UNKNOWN_NAME.to_string(),
            dosage: UNSPECIFIED_DOSAGE.to_string(),
            frequency: DEFAULT_FREQUENCY.to_string(),
            duration: DEFAULT_DURATION.to_string(),
            doctor: UNKNOWN_DOCTOR.to_string(),
            date: today.format("%Y-%m-%d").to_string(),
            status: PrescriptionStatus::Active,
            created_at: Utc::now(),
        }
    }
}

/// Generate a fresh prescription id (`rx-` followed by a v4 UUID).
pub fn new_id() -> String {
    format!("rx-{}", Uuid::new_v4().simple())
}

// ---------------------------------------------------------------------------
// FieldSource / FieldSources
// ---------------------------------------------------------------------------

/// How a single field of an extracted prescription was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Name found in the medication dictionary.
    Dictionary,
    /// Name taken from an `Rx:` / `Prescription:` / `Med:` label.
    Label,
    /// Name guessed from the first capitalized phrase.
    Title,
    /// Matched by the field's own pattern.
    Pattern,
    /// Nothing matched; the placeholder was used.
    Default,
}

impl FieldSource {
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dictionary => write!(f, "dictionary"),
            Self::Label => write!(f, "label"),
            Self::Title => write!(f, "title"),
            Self::Pattern => write!(f, "pattern"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSources {
    pub name: FieldSource,
    pub dosage: FieldSource,
    pub frequency: FieldSource,
    pub duration: FieldSource,
    pub doctor: FieldSource,
    pub date: FieldSource,
}

impl FieldSources {
    pub fn all_default() -> Self {
        Self {
            name: FieldSource::Default,
            dosage: FieldSource::Default,
            frequency: FieldSource::Default,
            duration: FieldSource::Default,
            doctor: FieldSource::Default,
            date: FieldSource::Default,
        }
    }

    /// Names of the fields that fell back to their placeholder.
    pub fn defaulted(&self) -> Vec<&'static str> {
        [
            ("name", self.name),
            ("dosage", self.dosage),
            ("frequency", self.frequency),
            ("duration", self.duration),
            ("doctor", self.doctor),
            ("date", self.date),
        ]
        .into_iter()
        .filter(|(_, s)| s.is_default())
        .map(|(field, _)| field)
        .collect()
    }
}

/// An extracted prescription together with where each field came from.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub prescription: Prescription,
    pub sources: FieldSources,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
