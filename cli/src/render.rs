//! Plain-text rendering of the client screens.

use std::fmt::Write;

use petclinic_core::{PetRecord, RecordForm};

const HEADERS: [&str; 6] = ["ID", "PET", "OWNER", "BREED", "AGE", "NOTES"];

/// One row per record, columns padded to the widest cell.
pub fn record_table(rows: &[PetRecord]) -> String {
    if rows.is_empty() {
        return "No pet records.\n".to_string();
    }

    let cells: Vec<[String; 6]> = rows.iter().map(row_cells).collect();
    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn row_cells(record: &PetRecord) -> [String; 6] {
    [
        record.id.clone(),
        record.pet_name.clone().unwrap_or_default(),
        record.owner_name.clone().unwrap_or_default(),
        record.pet_breed.clone().unwrap_or_default(),
        record
            .pet_age
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        record.special_notes.clone().unwrap_or_default(),
    ]
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// The update form as labelled fields.
pub fn form(form: &RecordForm) -> String {
    let mut out = String::new();
    for (label, value) in [
        ("Pet Name", &form.pet_name),
        ("Owner Name", &form.owner_name),
        ("Pet Breed", &form.pet_breed),
        ("Pet Age", &form.pet_age),
        ("Special Notes", &form.special_notes),
    ] {
        let _ = writeln!(out, "{label:<14}{value}");
    }
    out
}
