use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};

use crate::models::prescription::{Extraction, FieldSource, Prescription, PrescriptionStatus};

fn status_color(status: PrescriptionStatus) -> Color {
    match status {
        PrescriptionStatus::Active => Color::Green,
        PrescriptionStatus::Expired => Color::Red,
        PrescriptionStatus::Upcoming => Color::Blue,
    }
}

/// Pretty-print a single prescription, one field per line.
pub fn format_prescription(rx: &Prescription) -> String {
    let mut out = format!("{} [{}]\n", rx.name.bold(), rx.status);
    out.push_str(&format!("  id:        {}\n", rx.id));
    out.push_str(&format!("  dosage:    {}\n", rx.dosage));
    out.push_str(&format!("  frequency: {}\n", rx.frequency));
    out.push_str(&format!("  duration:  {}\n", rx.duration));
    out.push_str(&format!("  doctor:    {}\n", rx.doctor));
    out.push_str(&format!("  date:      {}", rx.date));
    out
}

/// Pretty-print an extraction. Fields that fell back to a placeholder are
/// flagged with `?` so they get reviewed before saving.
pub fn format_extraction(e: &Extraction) -> String {
    let rx = &e.prescription;
    let mark = |s: FieldSource| {
        if s.is_default() {
            format!(" {}", "?".yellow())
        } else {
            String::new()
        }
    };

    let mut out = format!("{}{} [{}]\n", rx.name.bold(), mark(e.sources.name), rx.status);
    out.push_str(&format!("  id:        {}\n", rx.id));
    out.push_str(&format!("  dosage:    {}{}\n", rx.dosage, mark(e.sources.dosage)));
    out.push_str(&format!(
        "  frequency: {}{}\n",
        rx.frequency,
        mark(e.sources.frequency)
    ));
    out.push_str(&format!(
        "  duration:  {}{}\n",
        rx.duration,
        mark(e.sources.duration)
    ));
    out.push_str(&format!("  doctor:    {}{}\n", rx.doctor, mark(e.sources.doctor)));
    out.push_str(&format!("  date:      {}{}", rx.date, mark(e.sources.date)));

    let defaulted = e.sources.defaulted();
    if !defaulted.is_empty() {
        out.push_str(&format!("\nNot found, please verify: {}", defaulted.join(", ")));
    }
    out
}

/// Table of prescriptions with a colored status column.
pub fn format_prescription_table(list: &[Prescription]) -> String {
    if list.is_empty() {
        return "No prescriptions saved.".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "ID",
        "Medication",
        "Dosage",
        "Frequency",
        "Doctor",
        "Date",
        "Status",
    ]);
    for rx in list {
        table.add_row(vec![
            Cell::new(&rx.id),
            Cell::new(&rx.name),
            Cell::new(&rx.dosage),
            Cell::new(&rx.frequency),
            Cell::new(&rx.doctor),
            Cell::new(&rx.date),
            Cell::new(rx.status).fg(status_color(rx.status)),
        ]);
    }
    table.to_string()
}

pub fn format_remove(id: &str) -> String {
    format!("Removed prescription: {}", id)
}
