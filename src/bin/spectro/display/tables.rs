use std::io::{self, Write};

use spectroscopy::db::henke::{FilterQuery, TransmissionCurve};
use spectroscopy::db::nist::{IonizationEnergy, ValueKind};

use crate::util::text::truncate;

const INDENT: &str = "      ";
const TABLE_WIDTH: usize = 56;
const BAR_WIDTH: usize = 16;

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

/// A titled box-drawn table written to stderr.
struct Table<'a> {
    title: &'a str,
    columns: Vec<(&'a str, usize, Align)>,
    rows: Vec<Vec<String>>,
}

impl<'a> Table<'a> {
    fn new(title: &'a str) -> Self {
        Self {
            title,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn column(mut self, header: &'a str, width: usize, align: Align) -> Self {
        self.columns.push((header, width, align));
        self
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn rule(&self, left: &str, mid: &str, right: &str) -> String {
        let segments: Vec<String> = self.columns.iter().map(|(_, w, _)| "─".repeat(w + 2)).collect();
        format!("{INDENT}{left}{}{right}", segments.join(mid))
    }

    fn line(&self, cells: &[String]) -> String {
        let mut out = String::from(INDENT);
        out.push('│');
        for ((_, width, align), cell) in self.columns.iter().zip(cells) {
            let cell = truncate(cell, *width);
            match align {
                Align::Left => out.push_str(&format!(" {cell:<width$} │")),
                Align::Right => out.push_str(&format!(" {cell:>width$} │")),
            }
        }
        out
    }

    fn print(&self) {
        let mut out = io::stderr().lock();
        let headers: Vec<String> = self.columns.iter().map(|(h, _, _)| h.to_string()).collect();

        let _ = writeln!(out);
        let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate(self.title, TABLE_WIDTH - 6));
        let _ = writeln!(out, "{}", self.rule("┌", "┬", "┐"));
        let _ = writeln!(out, "{}", self.line(&headers));
        let _ = writeln!(out, "{}", self.rule("├", "┼", "┤"));
        for row in &self.rows {
            let _ = writeln!(out, "{}", self.line(row));
        }
        let _ = writeln!(out, "{}", self.rule("└", "┴", "┘"));
    }
}

fn key_value(title: &str, rows: &[(&str, String)]) {
    let mut table = Table::new(title)
        .column("Property", 18, Align::Left)
        .column("Value", TABLE_WIDTH - 18 - 7, Align::Right);
    for (key, value) in rows {
        table.row(vec![key.to_string(), value.clone()]);
    }
    table.print();
}

pub fn print_ionization_summary(rows: &[IonizationEnergy]) {
    let Some(first) = rows.first() else {
        return;
    };
    let element = first.ion.element();
    let total: f64 = rows.iter().map(|r| r.energy_ev).sum();

    let mut summary = vec![
        ("Element", format!("{} ({})", element.name(), element.symbol())),
        ("Atomic number", element.atomic_number().to_string()),
        ("Charge states", format!("{} of {}", rows.len(), element.atomic_number())),
        ("First IE", format!("{:.4} eV", first.energy_ev)),
    ];
    if let Some(last) = rows.last().filter(|_| rows.len() > 1) {
        summary.push(("Last IE", format!("{:.4} eV ({})", last.energy_ev, last.ion)));
    }
    if rows.len() == usize::from(element.atomic_number()) {
        summary.push(("Total binding", format!("{total:.3} eV")));
    }
    key_value("Ionization Energies", &summary);

    let mut kinds = Table::new("Value Provenance")
        .column("Kind", 26, Align::Left)
        .column("Count", 5, Align::Right)
        .column("Share", BAR_WIDTH + 8, Align::Left);
    for kind in [ValueKind::Measured, ValueKind::Interpolated, ValueKind::Theoretical] {
        let count = rows.iter().filter(|r| r.kind == kind).count();
        if count == 0 {
            continue;
        }
        let share = count as f64 / rows.len() as f64 * 100.0;
        kinds.row(vec![
            kind.label().to_string(),
            count.to_string(),
            format!("{}  {share:>5.1}%", bar(share)),
        ]);
    }
    kinds.print();
}

pub fn print_transmission_summary(query: &FilterQuery, curve: &TransmissionCurve) {
    let unit = curve.axis.unit();
    let mut rows = vec![
        ("Formula", curve.formula.clone()),
        ("Density", format!("{} g/cm³", curve.density)),
        ("Thickness", format!("{} µm", curve.thickness_um)),
        ("Scan", format!("{} ({})", curve.axis, query.scaling)),
        ("Points", curve.len().to_string()),
    ];
    if let (Some((x0, _)), Some((x1, _))) = (curve.points.first(), curve.points.last()) {
        rows.push(("Range", format!("{x0} – {x1} {unit}")));
    }
    if let Some((lo, hi)) = curve.transmission_range() {
        rows.push(("Transmission", format!("{lo:.4} – {hi:.4}")));
    }
    key_value("Filter Transmission", &rows);
}

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_fixed_width() {
        for pct in [0.0, 12.5, 50.0, 100.0, 140.0] {
            assert_eq!(bar(pct).chars().count(), BAR_WIDTH);
        }
        assert_eq!(bar(50.0), format!("{}{}", "█".repeat(8), "░".repeat(8)));
    }

    #[test]
    fn table_lines_share_one_width() {
        let mut table = Table::new("t")
            .column("A", 4, Align::Left)
            .column("B", 6, Align::Right);
        table.row(vec!["2p⁶".into(), "12345678".into()]);
        let top = table.rule("┌", "┬", "┐");
        let body = table.line(&table.rows[0]);
        assert_eq!(top.chars().count(), body.chars().count());
        assert!(body.contains("12345…"));
    }
}
