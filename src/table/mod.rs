//! Reading and writing the semicolon-delimited interchange table.
//!
//! The format is `id;name;birthDate` with a header row. Quoting follows the
//! usual delimited-text rules, so names containing `;` or quotes survive a
//! round trip.

use crate::error::TableResult;
use crate::models::TableRow;
use std::io::{Read, Write};

const DELIMITER: u8 = b';';

/// Read all well-formed rows from `reader`.
///
/// The first line is treated as the header and skipped whatever it contains.
/// Blank lines and rows with fewer than three fields are dropped silently.
pub fn read_rows<R: Read>(reader: R) -> TableResult<Vec<TableRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        match TableRow::from_fields(record.iter()) {
            Some(row) => rows.push(row),
            None => tracing::debug!(fields = record.len(), "Dropping malformed table row"),
        }
    }
    Ok(rows)
}

/// Write the header followed by `rows` to `writer`.
pub fn write_rows<'a, W, I>(writer: W, rows: I) -> TableResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a TableRow>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);

    csv_writer.write_record(TableRow::HEADER)?;
    for row in rows {
        csv_writer.write_record(row.fields())?;
    }
    csv_writer.flush()?;
    Ok(())
}
