//! Barcode sources that feed decoded symbols into a session.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Stdin},
    path::Path,
};

use log::{debug, trace};

use crate::{symbol, Error, ErrorKind};

/// Something that produces decoded barcode symbols.
///
/// A source is started and stopped by the session, symbols are only asked for while it is
/// running. The session stops the source while a symbol is being looked up so that there is
/// never more than one lookup in flight.
pub trait BarcodeSource {
    /// Begin sampling for barcodes.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::SourceInit`] error when the source cannot be (re)started.
    fn start(&mut self) -> Result<(), Error>;

    /// Stop sampling, nothing is detected until [`BarcodeSource::start`] is called again.
    fn stop(&mut self);

    /// Blocks until the next symbol is detected, `Ok(None)` once the source is exhausted.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::Source`] error if the source is not running, or an [`ErrorKind::IO`]
    /// error when reading fails.
    fn next_symbol(&mut self) -> Result<Option<String>, Error>;
}

/// Reads one symbol per line, as written by keyboard-wedge and serial barcode scanners.
///
/// Blank lines are skipped and each symbol is cleaned with [`symbol::normalize`].
#[derive(Debug)]
pub struct LineSource<R: BufRead> {
    reader: R,
    running: bool,
}

impl<R: BufRead> LineSource<R> {
    /// Wraps `reader`, the source starts out stopped.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            running: false,
        }
    }
}

impl LineSource<BufReader<File>> {
    /// Opens the scanner device (or any file) at `path`.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::SourceInit`] error when the path cannot be opened for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!("Opening barcode source '{}'", path.display());
        File::open(path)
            .map(|file| Self::new(BufReader::new(file)))
            .map_err(|e| {
                Error::new(
                    ErrorKind::SourceInit,
                    format!("cannot open '{}': {e}", path.display()),
                )
            })
    }
}

impl LineSource<io::StdinLock<'static>> {
    /// Reads symbols typed (or piped) into stdin.
    #[must_use]
    pub fn stdin() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock())
    }
}

impl<R: BufRead> BarcodeSource for LineSource<R> {
    fn start(&mut self) -> Result<(), Error> {
        trace!("Barcode source started");
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        trace!("Barcode source stopped");
        self.running = false;
    }

    fn next_symbol(&mut self) -> Result<Option<String>, Error> {
        if !self.running {
            return Err(Error::new(
                ErrorKind::Source,
                "Barcode source is not running",
            ));
        }

        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| Error::wrap(ErrorKind::IO, e))?;

            if read == 0 {
                debug!("Barcode source exhausted");
                return Ok(None);
            }

            if let Some(symbol) = symbol::normalize(&line) {
                return Ok(Some(symbol));
            }
        }
    }
}
