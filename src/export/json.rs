use serde::Serialize;
use std::io::Write;

use super::error::Error;
use crate::db::Database;
use crate::db::henke::TransmissionCurve;
use crate::db::nist::IonizationEnergy;

#[derive(Serialize)]
struct Source {
    database: Database,
    id: &'static str,
    version: &'static str,
    citation: &'static str,
}

impl From<Database> for Source {
    fn from(database: Database) -> Self {
        Self {
            database,
            id: database.id(),
            version: database.version(),
            citation: database.citation(),
        }
    }
}

#[derive(Serialize)]
struct Document<'a, T: Serialize + ?Sized> {
    source: Source,
    data: &'a T,
}

fn write_document<W: Write, T: Serialize + ?Sized>(
    mut writer: W,
    database: Database,
    data: &T,
) -> Result<(), Error> {
    let document = Document {
        source: database.into(),
        data,
    };
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_ionization<W: Write>(writer: W, rows: &[IonizationEnergy]) -> Result<(), Error> {
    write_document(writer, Database::NistAsd, rows)
}

pub fn write_transmission<W: Write>(writer: W, curve: &TransmissionCurve) -> Result<(), Error> {
    write_document(writer, Database::Henke, curve)
}
