use std::io::Write;

use anyhow::Result;
use serde_json::{Map, Value};

use spectroscopy::export::Format;

/// Result of a local calculation, rendered in any output [`Format`].
#[derive(Debug)]
pub enum Report {
    /// One record of named fields.
    Record {
        title: String,
        fields: Vec<(&'static str, Value)>,
    },
    /// Rows under named columns.
    Table {
        title: String,
        columns: Vec<&'static str>,
        rows: Vec<Vec<Value>>,
    },
}

impl Report {
    pub fn record(title: impl Into<String>) -> Self {
        Report::Record {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn table(title: impl Into<String>, columns: Vec<&'static str>) -> Self {
        Report::Table {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Adds a field to a record; ignored for tables.
    pub fn field(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        if let Report::Record { fields, .. } = &mut self {
            fields.push((key, value.into()));
        }
        self
    }

    /// Adds a row to a table; ignored for records.
    pub fn push_row(&mut self, row: Vec<Value>) {
        if let Report::Table { rows, .. } = self {
            rows.push(row);
        }
    }

    pub fn write<W: Write>(&self, mut out: W, format: Format) -> Result<()> {
        match format {
            Format::Text => self.write_text(&mut out),
            Format::Csv => self.write_delimited(&mut out, ','),
            Format::Tsv => self.write_delimited(&mut out, '\t'),
            Format::Json => {
                serde_json::to_writer_pretty(&mut out, &self.to_json())?;
                writeln!(out)?;
                Ok(())
            }
        }
    }

    fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        match self {
            Report::Record { title, fields } => {
                writeln!(out, "# {title}")?;
                let key_w = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
                for (key, value) in fields {
                    writeln!(out, "  {key:<key_w$}  {}", plain(value))?;
                }
            }
            Report::Table {
                title,
                columns,
                rows,
            } => {
                writeln!(out, "# {title}")?;
                let widths: Vec<usize> = columns
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        rows.iter()
                            .filter_map(|r| r.get(i))
                            .map(|v| plain(v).chars().count())
                            .chain([c.len()])
                            .max()
                            .unwrap_or(0)
                    })
                    .collect();
                let header: Vec<String> = columns
                    .iter()
                    .zip(&widths)
                    .map(|(c, w)| format!("{c:<w$}"))
                    .collect();
                writeln!(out, "# {}", header.join("  ").trim_end())?;
                for row in rows {
                    let cells: Vec<String> = row
                        .iter()
                        .zip(&widths)
                        .map(|(v, w)| format!("{:<w$}", plain(v)))
                        .collect();
                    writeln!(out, "  {}", cells.join("  ").trim_end())?;
                }
            }
        }
        Ok(())
    }

    fn write_delimited<W: Write>(&self, out: &mut W, delimiter: char) -> Result<()> {
        let join = |cells: Vec<String>| {
            cells
                .into_iter()
                .map(|c| quote(c, delimiter))
                .collect::<Vec<_>>()
                .join(&delimiter.to_string())
        };
        match self {
            Report::Record { fields, .. } => {
                writeln!(out, "{}", join(fields.iter().map(|(k, _)| k.to_string()).collect()))?;
                writeln!(out, "{}", join(fields.iter().map(|(_, v)| plain(v)).collect()))?;
            }
            Report::Table { columns, rows, .. } => {
                writeln!(out, "{}", join(columns.iter().map(|c| c.to_string()).collect()))?;
                for row in rows {
                    writeln!(out, "{}", join(row.iter().map(plain).collect()))?;
                }
            }
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        match self {
            Report::Record { fields, .. } => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect::<Map<_, _>>(),
            ),
            Report::Table { columns, rows, .. } => Value::Array(
                rows.iter()
                    .map(|row| {
                        Value::Object(
                            columns
                                .iter()
                                .zip(row)
                                .map(|(c, v)| (c.to_string(), v.clone()))
                                .collect(),
                        )
                    })
                    .collect(),
            ),
        }
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(plain).collect::<Vec<_>>().join("; "),
        other => other.to_string(),
    }
}

fn quote(cell: String, delimiter: char) -> String {
    if cell.contains(delimiter) || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bragg() -> Report {
        Report::record("Bragg diffraction")
            .field("crystal", "LiF(200)")
            .field("order", 1)
            .field("theta_deg", 45.5)
            .field("allowed_orders", json!([1, 2]))
    }

    fn render(report: &Report, format: Format) -> String {
        let mut out = Vec::new();
        report.write(&mut out, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn record_as_text_aligns_keys() {
        let text = render(&bragg(), Format::Text);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# Bragg diffraction");
        assert_eq!(lines[1], "  crystal         LiF(200)");
        assert_eq!(lines[4], "  allowed_orders  1; 2");
    }

    #[test]
    fn record_as_csv_quotes_cells() {
        let text = render(&bragg(), Format::Csv);
        assert_eq!(
            text,
            "crystal,order,theta_deg,allowed_orders\nLiF(200),1,45.5,1; 2\n"
        );
        let report = Report::record("x").field("term", "a,b");
        assert_eq!(render(&report, Format::Csv), "term\n\"a,b\"\n");
    }

    #[test]
    fn record_as_json_keeps_types() {
        let value: Value = serde_json::from_str(&render(&bragg(), Format::Json)).unwrap();
        assert_eq!(value["order"], 1);
        assert_eq!(value["crystal"], "LiF(200)");
        assert_eq!(value["allowed_orders"][1], 2);
    }

    #[test]
    fn debug_names_the_variant() {
        let debug = format!("{:?}", bragg());
        assert!(debug.starts_with("Record"));
        assert!(debug.contains("LiF(200)"));
    }

    #[test]
    fn table_renders_rows() {
        let mut report = Report::table("Materials", vec!["name", "density"]);
        report.push_row(vec![json!("mylar"), json!(1.4)]);
        report.push_row(vec![json!("Parylene-C"), Value::Null]);

        let text = render(&report, Format::Text);
        assert_eq!(text.lines().nth(1), Some("# name        density"));
        assert_eq!(text.lines().nth(3), Some("  Parylene-C  -"));

        let tsv = render(&report, Format::Tsv);
        assert_eq!(tsv.lines().nth(1), Some("mylar\t1.4"));

        let json: Value = serde_json::from_str(&render(&report, Format::Json)).unwrap();
        assert_eq!(json[0]["name"], "mylar");
        assert!(json[1]["density"].is_null());
    }
}
