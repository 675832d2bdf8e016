mod report;

pub use report::Report;

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, StdoutLock, Write};
use std::path::Path;

use anyhow::{Context, Result};

use spectroscopy::export::Format;

use crate::cli::{GlobalOptions, OutputFormat};

pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

pub enum OutputTarget {
    File(BufWriter<File>),
    Stdout(BufWriter<StdoutLock<'static>>),
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::File(w) => w.write(buf),
            OutputTarget::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::File(w) => w.flush(),
            OutputTarget::Stdout(w) => w.flush(),
        }
    }
}

pub fn create_output(path: Option<&Path>) -> Result<OutputTarget> {
    match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("Failed to create output file: {}", p.display()))?;
            Ok(OutputTarget::File(BufWriter::new(file)))
        }
        None => Ok(OutputTarget::Stdout(BufWriter::new(io::stdout().lock()))),
    }
}

/// `--format` first, then the `--output` extension, then plain text.
pub fn resolve_format(global: &GlobalOptions) -> Format {
    if let Some(format) = global.format {
        return match format {
            OutputFormat::Text => Format::Text,
            OutputFormat::Csv => Format::Csv,
            OutputFormat::Tsv => Format::Tsv,
            OutputFormat::Json => Format::Json,
        };
    }
    global
        .output
        .as_deref()
        .and_then(Format::from_path)
        .unwrap_or_default()
}

/// Opens the output, runs `write` on it and flushes.
pub fn write_output<F>(global: &GlobalOptions, write: F) -> Result<Format>
where
    F: FnOnce(&mut OutputTarget, Format) -> Result<()>,
{
    let format = resolve_format(global);
    let mut out = create_output(global.output.as_deref())?;
    write(&mut out, format)?;
    out.flush().context("Failed to flush output")?;
    Ok(format)
}
