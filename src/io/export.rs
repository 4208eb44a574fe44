//! CSV export for the cumulative savings projection.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::calc::projection::Projection;

/// Column header for projection CSV export.
const HEADER: &str = "year,cumulative_grid,cumulative_solar,difference";

/// Exports a projection to a CSV file at the given path.
///
/// Writes a header row followed by one data row per year. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `projection` - Projection to export
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_projection_csv(projection: &Projection, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_projection_csv(projection, buf)
}

/// Writes a projection as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_projection_csv(projection: &Projection, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for p in &projection.points {
        wtr.write_record(&[
            p.year.to_string(),
            p.cumulative_grid.to_string(),
            p.cumulative_solar.to_string(),
            p.difference().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
