//! Canned prescription texts standing in for OCR output when no recognition
//! engine is available. The sample is picked from keywords in the image name.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Sample {
    pub key: &'static str,
    pub text: &'static str,
    pub medication: &'static str,
    pub dosage: &'static str,
    pub frequency: &'static str,
}

pub static LISINOPRIL: Sample = Sample {
    key: "lisinopril",
    text: "PRESCRIPTION
Dr. Robert Johnson
123 Medical Center Avenue
Patient: John Doe
Date: 05/15/2023

Rx: Lisinopril 10mg
Take once daily with or without food
Refills: 3
Duration: 30 days

Dispense: 30 tablets
Prescriber Signature: [signature]
DEA#: AB1234567
",
    medication: "Lisinopril",
    dosage: "10mg",
    frequency: "once daily",
};

pub static AMOXICILLIN: Sample = Sample {
    key: "amoxicillin",
    text: "PRESCRIPTION
Dr. Emily Chen
City Medical Clinic
123 Healthcare Ave
Patient: Jane Smith
Date: 06/10/2023

Rx: Amoxicillin 500mg
Take three times daily with food
Refills: 0
Duration: 10 days

Dispense: 30 capsules
Prescriber Signature: [signature]
",
    medication: "Amoxicillin",
    dosage: "500mg",
    frequency: "three times daily",
};

pub static ATORVASTATIN: Sample = Sample {
    key: "atorvastatin",
    text: "PRESCRIPTION
Dr. Michael Williams
Heart & Vascular Center
Patient: Robert Brown
Date: 04/22/2023

Rx: Atorvastatin 20mg
Take once daily in the evening
Refills: 5
Duration: 90 days

Dispense: 90 tablets
Prescriber Signature: [signature]
",
    medication: "Atorvastatin",
    dosage: "20mg",
    frequency: "once daily",
};

pub static METFORMIN: Sample = Sample {
    key: "metformin",
    text: "PRESCRIPTION
Dr. Robert Johnson
123 Medical Center Avenue
Patient: John Doe
Date: 05/15/2023

Rx: Metformin 500mg
Take twice daily with meals
Refills: 3
Duration: 30 days

Dispense: 60 tablets
Prescriber Signature: [signature]
DEA#: AB1234567
",
    medication: "Metformin",
    dosage: "500mg",
    frequency: "twice daily",
};

pub static ALL: [&Sample; 4] = [&LISINOPRIL, &AMOXICILLIN, &ATORVASTATIN, &METFORMIN];

/// Pick a sample by keywords in an image file name. Metformin is the fallback.
pub fn sample_for_filename(file_name: &str) -> &'static Sample {
    let name = file_name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

    if has(&["lisinopril", "heart", "bp"]) {
        &LISINOPRIL
    } else if has(&["amoxicillin", "antibiotic"]) {
        &AMOXICILLIN
    } else if has(&["atorvastatin", "cholesterol"]) {
        &ATORVASTATIN
    } else {
        &METFORMIN
    }
}
