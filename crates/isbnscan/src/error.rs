pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The Errors that may occur while scanning, looking up or exporting books.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The barcode source could not be opened, this is fatal to a session.
    SourceInit,
    /// The barcode source was used while it was not running.
    Source,
    /// The error is associated with an underlying IO or network error.
    IO,
    /// An error caused when parsing/deserialization fails.
    Deserialize,
    /// A record for the same ISBN already exists in the ledger.
    Duplicate,
    /// The spreadsheet could not be written.
    Export,
    /// The operator prompt failed or was cancelled.
    Interact,
}

impl Error {
    /// Creates a new [`Error`] based on the [`ErrorKind`] and message to describe the error.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`Error`].
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::SourceInit => f.write_str("Barcode source unavailable")?,
            ErrorKind::Source => f.write_str("Barcode source error")?,
            ErrorKind::IO => f.write_str("IO error")?,
            ErrorKind::Deserialize => f.write_str("Deserialize error")?,
            ErrorKind::Duplicate => f.write_str("Duplicate error")?,
            ErrorKind::Export => f.write_str("Export error")?,
            ErrorKind::Interact => f.write_str("Interact error")?,
        };

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(cause) = &self.source {
            write!(f, ": caused by {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}
