//! The in-memory list of books recorded during one session.

use log::trace;

use crate::{record::BookRecord, Error, ErrorKind};

/// Append-only, insertion-ordered collection of [`BookRecord`]s with at most one record per ISBN.
///
/// A ledger lives exactly as long as the session that owns it, nothing is persisted.
#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<BookRecord>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns true if a record for `isbn` has already been recorded.
    #[must_use]
    pub fn contains(&self, isbn: &str) -> bool {
        self.records.iter().any(|record| record.isbn() == isbn)
    }

    /// Adds `record` to the end of the ledger.
    ///
    /// Callers are expected to check [`Ledger::contains`] before doing a lookup, this only guards
    /// the uniqueness invariant.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::Duplicate`] error is returned, and the ledger is left unchanged, when a
    /// record with the same ISBN already exists.
    pub fn append(&mut self, record: BookRecord) -> Result<(), Error> {
        if self.contains(record.isbn()) {
            return Err(Error::new(
                ErrorKind::Duplicate,
                format!("A record for ISBN '{}' already exists", record.isbn()),
            ));
        }

        trace!("Recording ISBN '{}'", record.isbn());
        self.records.push(record);
        Ok(())
    }

    /// Every record in the order it was appended.
    #[must_use]
    pub fn all(&self) -> &[BookRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::{
        record::{BookRecord, Provider},
        ErrorKind,
    };

    fn record(isbn: &str, title: &str) -> BookRecord {
        let mut record = BookRecord::new(isbn, Provider::GoogleBooks);
        record.title = Some(title.to_owned());
        record
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.append(record("3", "c")).unwrap();
        ledger.append(record("1", "a")).unwrap();
        ledger.append(record("2", "b")).unwrap();

        let isbns = ledger.all().iter().map(BookRecord::isbn).collect::<Vec<_>>();
        assert_eq!(vec!["3", "1", "2"], isbns);
        assert_eq!(3, ledger.len());
    }

    #[test]
    fn contains_matches_exact_isbn() {
        let mut ledger = Ledger::new();
        assert!(!ledger.contains("9780441013593"));

        ledger.append(record("9780441013593", "Dune")).unwrap();

        assert!(ledger.contains("9780441013593"));
        assert!(!ledger.contains("0441013597"));
    }

    #[test]
    fn duplicate_append_is_rejected() {
        let mut ledger = Ledger::new();
        ledger.append(record("9780441013593", "Dune")).unwrap();

        let err = ledger
            .append(record("9780441013593", "Dune Messiah"))
            .expect_err("Same ISBN twice must be rejected");

        assert_eq!(ErrorKind::Duplicate, err.kind());
        assert_eq!(1, ledger.len());
        assert_eq!(Some("Dune"), ledger.all()[0].title.as_deref());
    }
}
