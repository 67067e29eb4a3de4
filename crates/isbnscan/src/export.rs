//! Contains the [`Exporter`] trait and the spreadsheet implementation of it, [`XlsxExporter`].

use std::path::{Path, PathBuf};

use log::{info, trace};
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::{record::BookRecord, Error, ErrorKind};

/// File name used when no output path is chosen.
pub const DEFAULT_FILE_NAME: &str = "ISBN_List.xlsx";

/// Name of the single worksheet in the exported file.
pub const SHEET_NAME: &str = "ISBNs";

/// First row of every exported table.
pub const HEADER: [&str; 9] = [
    "ISBN",
    "Title",
    "Authors",
    "Publisher",
    "Published Date",
    "Description",
    "Page Count",
    "Categories",
    "Language",
];

/// A sink for the records of a finished session.
pub trait Exporter {
    /// Writes every record, in order, as one table.
    ///
    /// # Errors
    ///
    /// Will return [`Err`] if the records cannot be written.
    fn export(&mut self, records: &[BookRecord]) -> Result<(), Error>;
}

/// A single table cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// Text, written as a string cell.
    Text(String),
    /// A count, written as a number cell.
    Number(u32),
    /// A missing value.
    Empty,
}

impl From<Option<&String>> for Cell {
    fn from(value: Option<&String>) -> Self {
        value.map_or(Self::Empty, |s| Self::Text(s.clone()))
    }
}

/// Builds the rows for `records`: the [`HEADER`] followed by one row per record.
#[must_use]
pub fn table(records: &[BookRecord]) -> Vec<Vec<Cell>> {
    let header = HEADER
        .iter()
        .map(|title| Cell::Text((*title).to_owned()))
        .collect();

    std::iter::once(header)
        .chain(records.iter().map(row))
        .collect()
}

fn row(record: &BookRecord) -> Vec<Cell> {
    vec![
        Cell::Text(record.isbn().to_owned()),
        record.title.as_ref().into(),
        record.authors.as_ref().into(),
        record.publisher.as_ref().into(),
        record.published_date.as_ref().into(),
        record.description.as_ref().into(),
        record.page_count.map_or(Cell::Empty, Cell::Number),
        record.categories.as_ref().into(),
        record.language.as_ref().into(),
    ]
}

/// Writes the records to a single sheet `.xlsx` workbook.
#[derive(Debug)]
pub struct XlsxExporter {
    path: PathBuf,
}

impl XlsxExporter {
    /// Creates an exporter writing to `path`, an existing file is overwritten.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Where the workbook is written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Builds the workbook for `records` in memory and returns the file bytes.
    ///
    /// # Errors
    ///
    /// Will return an [`ErrorKind::Export`] error if the workbook cannot be assembled.
    pub fn to_buffer(records: &[BookRecord]) -> Result<Vec<u8>, Error> {
        let mut workbook = workbook(records).map_err(|e| Error::wrap(ErrorKind::Export, e))?;
        workbook
            .save_to_buffer()
            .map_err(|e| Error::wrap(ErrorKind::Export, e))
    }
}

impl Exporter for XlsxExporter {
    fn export(&mut self, records: &[BookRecord]) -> Result<(), Error> {
        trace!("Building workbook with {} record(s)", records.len());
        let mut workbook = workbook(records).map_err(|e| Error::wrap(ErrorKind::Export, e))?;

        workbook.save(&self.path).map_err(|e| {
            Error::new(
                ErrorKind::Export,
                format!("cannot write '{}': {e}", self.path.display()),
            )
        })?;

        info!(
            "Saved {} record(s) to '{}'",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn workbook(records: &[BookRecord]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (r, cells) in (0u32..).zip(table(records)) {
        for (c, cell) in (0u16..).zip(cells) {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(r, c, text)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, c, f64::from(n))?;
                }
                Cell::Empty => {}
            }
        }
    }

    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Provider;

    use assert_fs::{fixture::PathChild, TempDir};

    fn dune() -> BookRecord {
        let mut record = BookRecord::new("9780441013593", Provider::GoogleBooks);
        record.title = Some("Dune".to_owned());
        record.authors = Some("Frank Herbert".to_owned());
        record.page_count = Some(896);
        record
    }

    fn hobbit() -> BookRecord {
        let mut record = BookRecord::new("9780261102217", Provider::OpenLibrary);
        record.title = Some("The Hobbit".to_owned());
        record.categories = Some("Fantasy".to_owned());
        record
    }

    #[test]
    fn empty_ledger_is_header_only() {
        let rows = table(&[]);
        assert_eq!(1, rows.len());
        assert_eq!(Cell::Text("ISBN".to_owned()), rows[0][0]);
        assert_eq!(Cell::Text("Language".to_owned()), rows[0][8]);
    }

    #[test]
    fn rows_follow_record_order_with_empty_cells() {
        let rows = table(&[dune(), hobbit()]);

        assert_eq!(3, rows.len());
        assert!(rows.iter().all(|row| row.len() == HEADER.len()));

        assert_eq!(Cell::Text("9780441013593".to_owned()), rows[1][0]);
        assert_eq!(Cell::Text("Dune".to_owned()), rows[1][1]);
        assert_eq!(Cell::Text("Frank Herbert".to_owned()), rows[1][2]);
        assert_eq!(Cell::Empty, rows[1][3]);
        assert_eq!(Cell::Number(896), rows[1][6]);

        assert_eq!(Cell::Text("9780261102217".to_owned()), rows[2][0]);
        assert_eq!(Cell::Empty, rows[2][6]);
        assert_eq!(Cell::Text("Fantasy".to_owned()), rows[2][7]);
    }

    #[test]
    fn table_is_deterministic() {
        let records = [dune(), hobbit()];
        assert_eq!(table(&records), table(&records));
    }

    #[test]
    fn buffer_is_a_zip_archive() {
        let bytes = XlsxExporter::to_buffer(&[dune()]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn export_writes_file() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");
        let path = dir.child(DEFAULT_FILE_NAME);

        let mut exporter = XlsxExporter::new(path.path());
        exporter.export(&[dune(), hobbit()]).unwrap();

        let metadata = std::fs::metadata(path.path()).expect("Workbook should exist");
        assert!(metadata.len() > 0);
    }

    #[test]
    fn export_to_missing_directory_is_export_error() {
        let dir = TempDir::new().expect("Cannot create temp directory for test");
        let path = dir.child("missing").child(DEFAULT_FILE_NAME);

        let err = XlsxExporter::new(path.path())
            .export(&[dune()])
            .expect_err("Parent directory does not exist");
        assert_eq!(ErrorKind::Export, err.kind());
    }
}
