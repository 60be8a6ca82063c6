//! Turn raw OCR text from a prescription into a [`Prescription`].
//!
//! Extraction is best-effort and never fails: every field that cannot be
//! found is filled with its placeholder, and [`extract_detailed`] reports
//! which fields were actually matched.

use chrono::{NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::core::dictionary::MedicationDictionary;
use crate::models::prescription::{Extraction, FieldSource, FieldSources, Prescription};

/// Normalized text shorter than this is treated as an empty scan.
pub const MIN_TEXT_LEN: usize = 10;

static BUILTIN_DICTIONARY: LazyLock<MedicationDictionary> =
    LazyLock::new(MedicationDictionary::builtin);

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Rx|Prescription|Med)(?:\s*:|\s+)([A-Za-z\s]+(?:\d+\s*mg)?)")
        .expect("label pattern")
});

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2}").expect("title pattern")
});

static DOSAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+\s?(?:mg/ml|mcg|mg|ml|g)\b").expect("dosage pattern")
});

static FREQUENCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:once|twice|three\s+times|four\s+times)(?:\s+(?:daily|a\s+day|per\s+day))?|\d+\s+times\s+per\s+day|every\s+\d+\s+hours|every\s+day|daily|weekly)\b",
    )
    .expect("frequency pattern")
});

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:for\s)?\d+\s?(?:days|weeks|months|years|year)\b")
        .expect("duration pattern")
});

static DOCTOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:dr)\.?\s+([A-Za-z]+\s+[A-Za-z]+)\b").expect("doctor pattern")
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}\b|\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}\b",
    )
    .expect("date pattern")
});

/// Collapse every run of whitespace into a single space and trim the ends.
/// A byte-order mark counts as whitespace.
pub fn normalize(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{feff}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract a prescription using the built-in dictionary and today's date.
pub fn extract(text: &str) -> Prescription {
    extract_on(text, Utc::now().date_naive())
}

/// Extract a prescription, using `today` when the text carries no date.
pub fn extract_on(text: &str, today: NaiveDate) -> Prescription {
    extract_detailed(text, today).prescription
}

/// Like [`extract_on`], but also report how each field was obtained.
pub fn extract_detailed(text: &str, today: NaiveDate) -> Extraction {
    Extractor::new(&BUILTIN_DICTIONARY).extract_detailed(text, today)
}

/// Prescription extractor bound to a medication dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'d> {
    dictionary: &'d MedicationDictionary,
}

impl<'d> Extractor<'d> {
    pub fn new(dictionary: &'d MedicationDictionary) -> Self {
        Self { dictionary }
    }

    pub fn extract_on(&self, text: &str, today: NaiveDate) -> Prescription {
        self.extract_detailed(text, today).prescription
    }

    pub fn extract_detailed(&self, text: &str, today: NaiveDate) -> Extraction {
        let mut prescription = Prescription::placeholder(today);
        let mut sources = FieldSources::all_default();

        let cleaned = normalize(text);
        if cleaned.chars().count() < MIN_TEXT_LEN {
            tracing::debug!(len = cleaned.len(), "insufficient text to parse");
            return Extraction {
                prescription,
                sources,
            };
        }

        if let Some((name, source)) = self.medication_name(&cleaned) {
            prescription.name = name;
            sources.name = source;
        }

        let fields = [
            (&DOSAGE_PATTERN, &mut prescription.dosage, &mut sources.dosage),
            (
                &FREQUENCY_PATTERN,
                &mut prescription.frequency,
                &mut sources.frequency,
            ),
            (
                &DURATION_PATTERN,
                &mut prescription.duration,
                &mut sources.duration,
            ),
            (&DATE_PATTERN, &mut prescription.date, &mut sources.date),
        ];
        for (pattern, value, source) in fields {
            if let Some(m) = pattern.find(&cleaned) {
                *value = m.as_str().to_string();
                *source = FieldSource::Pattern;
            }
        }

        if let Some(caps) = DOCTOR_PATTERN.captures(&cleaned) {
            prescription.doctor = caps[1].to_string();
            sources.doctor = FieldSource::Pattern;
        }

        tracing::debug!(
            name = %prescription.name,
            name_source = %sources.name,
            defaulted = ?sources.defaulted(),
            "prescription extracted"
        );

        Extraction {
            prescription,
            sources,
        }
    }

    /// Dictionary first, then an `Rx:`-style label, then the first
    /// capitalized phrase.
    fn medication_name(&self, text: &str) -> Option<(String, FieldSource)> {
        if let Some(found) = self.dictionary.find_in(text) {
            tracing::debug!(medication = found, "medication found in dictionary");
            return Some((capitalize(found), FieldSource::Dictionary));
        }

        let labelled = LABEL_PATTERN
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().split_whitespace().next());
        if let Some(word) = labelled {
            tracing::debug!(medication = word, "medication taken from label");
            return Some((capitalize(word), FieldSource::Label));
        }

        TITLE_PATTERN.find(text).map(|m| {
            tracing::debug!(title = m.as_str(), "using title as medication name");
            (m.as_str().to_string(), FieldSource::Title)
        })
    }
}

/// Upper-case the first character and keep the rest as is.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_keeps_tail() {
        assert_eq!(capitalize("amoxicillin"), "Amoxicillin");
        assert_eq!(capitalize("LISINOPRIL"), "LISINOPRIL");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  Rx:\n\tAspirin   81 mg \r\n"), "Rx: Aspirin 81 mg");
    }

    #[test]
    fn normalize_treats_bom_as_whitespace() {
        assert_eq!(normalize("\u{feff}Rx: Aspirin"), "Rx: Aspirin");
        assert_eq!(normalize("a\u{feff}\u{feff} b"), "a b");
    }

    #[test]
    fn label_capture_without_word_falls_through() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let extraction = extract_detailed("rx: 12345 67890 qwerty", today);
        assert_ne!(extraction.sources.name, FieldSource::Label);
    }
}
