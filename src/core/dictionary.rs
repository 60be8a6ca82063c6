use regex::Regex;
use std::collections::BTreeSet;

/// Generic names recognised out of the box.
pub const BUILTIN_MEDICATIONS: &[&str] = &[
    "amoxicillin",
    "lisinopril",
    "metformin",
    "atorvastatin",
    "amlodipine",
    "sertraline",
    "omeprazole",
    "levothyroxine",
    "simvastatin",
    "losartan",
    "aspirin",
    "acetaminophen",
    "paracetamol",
    "ibuprofen",
    "albuterol",
    "hydrochlorothiazide",
    "gabapentin",
    "fluoxetine",
    "citalopram",
    "escitalopram",
];

/// A closed vocabulary of medication names.
///
/// Names are stored lower-cased. Lookup is whole-word and case-insensitive.
#[derive(Debug, Clone)]
pub struct MedicationDictionary {
    names: BTreeSet<String>,
    matcher: Option<Regex>,
}

impl Default for MedicationDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MedicationDictionary {
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
            matcher: None,
        }
    }

    pub fn builtin() -> Self {
        Self::with_names(BUILTIN_MEDICATIONS.iter().copied())
    }

    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::empty();
        dict.extend(names);
        dict
    }

    /// Built-in names plus the given extras (typically from config).
    pub fn builtin_with<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::builtin();
        dict.extend(extra);
        dict
    }

    /// Add a name. Returns `false` if it was blank or already present.
    pub fn insert(&mut self, name: &str) -> bool {
        let added = self.insert_name(name);
        if added {
            self.rebuild();
        }
        added
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut changed = false;
        for name in names {
            changed |= self.insert_name(name.as_ref());
        }
        if changed {
            self.rebuild();
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Leftmost dictionary name occurring in `text` as a whole word.
    /// Returns the matched slice of `text`, with its original casing.
    pub fn find_in<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.matcher.as_ref()?.find(text).map(|m| m.as_str())
    }

    fn insert_name(&mut self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        !name.is_empty() && self.names.insert(name)
    }

    fn rebuild(&mut self) {
        // Longest first so a name is never shadowed by one of its prefixes.
        let mut names: Vec<&String> = self.names.iter().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"(?i)\b(?:{alternation})\b");
        self.matcher = match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(error = %e, "medication dictionary pattern failed to compile");
                None
            }
        };
    }
}
