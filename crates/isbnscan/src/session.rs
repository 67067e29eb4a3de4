//! The scan → lookup → dedupe → accumulate → export loop.
//!
//! A [`Session`] owns the [`Ledger`] and moves through [`State`]s one transition at a time. The
//! barcode source is stopped whenever the session leaves [`State::Scanning`], so there is at most
//! one lookup in flight and a symbol can never be detected while another is being resolved.

use std::{fmt, marker::PhantomData};

use log::{error, info, trace, warn};

use crate::{
    api::Client,
    export::Exporter,
    ledger::Ledger,
    lookup,
    record::BookRecord,
    source::BarcodeSource,
    symbol::is_valid_isbn,
    Error, ErrorKind,
};

/// What the operator wants to do after a book has been shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    /// Clear the result and scan the next book.
    Continue,
    /// Stop scanning and export everything recorded so far.
    Finalize,
}

/// Short lived messages for the operator, scanning resumes right after each one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The symbol is already in the ledger.
    Duplicate(String),
    /// Neither provider knows the symbol.
    NotFound(String),
    /// A lookup request failed, the details are in the log.
    LookupFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Duplicate(isbn) => write!(f, "ISBN {isbn} has already been scanned."),
            Notice::NotFound(isbn) => write!(f, "No book found for ISBN {isbn}."),
            Notice::LookupFailed(isbn) => write!(f, "Lookup for ISBN {isbn} failed."),
        }
    }
}

/// The operator facing side of a session.
pub trait Presenter {
    /// Render a freshly recorded book.
    fn show_record(&mut self, record: &BookRecord);

    /// Tell the operator about something that did not produce a record.
    fn notify(&mut self, notice: &Notice);

    /// Ask whether to keep scanning or finish after a book was shown.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::Interact`] error means the prompt failed or was cancelled, the session
    /// then finishes and exports as if [`Choice::Finalize`] was picked. Any other error ends the
    /// session without exporting.
    fn choose(&mut self) -> Result<Choice, Error>;

    /// Remove the rendered book again.
    fn clear(&mut self);
}

/// Where a [`Session`] currently is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// The source is running and waiting for a barcode.
    Scanning,
    /// `symbol` is being looked up, the source is stopped.
    Resolving {
        /// The symbol being looked up.
        symbol: String,
    },
    /// The last recorded book is on screen, waiting for a [`Choice`].
    ShowingResult,
    /// `symbol` was scanned before, the notice is shown and scanning resumes.
    ShowingDuplicateNotice {
        /// The symbol that was scanned again.
        symbol: String,
    },
    /// The session is over, nothing else happens.
    Finished,
}

/// One scanning session, generic over the HTTP [`Client`] used for lookups.
pub struct Session<C, S, P, E>
where
    C: Client,
    S: BarcodeSource,
    P: Presenter,
    E: Exporter,
{
    source: S,
    presenter: P,
    exporter: E,
    ledger: Ledger,
    state: State,
    _client: PhantomData<C>,
}

impl<C, S, P, E> Session<C, S, P, E>
where
    C: Client,
    S: BarcodeSource,
    P: Presenter,
    E: Exporter,
{
    /// Creates a session with an empty ledger.
    pub fn new(source: S, presenter: P, exporter: E) -> Self {
        Self::with_ledger(source, presenter, exporter, Ledger::new())
    }

    /// Creates a session that records into `ledger`.
    pub fn with_ledger(source: S, presenter: P, exporter: E, ledger: Ledger) -> Self {
        Self {
            source,
            presenter,
            exporter,
            ledger,
            state: State::Scanning,
            _client: PhantomData,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Everything recorded so far.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The presenter, mostly useful to inspect what was shown.
    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Starts the source and runs until the session is [`State::Finished`], returning the
    /// ledger.
    ///
    /// # Errors
    ///
    /// Lookup failures never end a session and a cancelled prompt finalizes it. Source failures
    /// and export failures end it with an error.
    pub fn run(mut self) -> Result<Ledger, Error> {
        self.source.start()?;
        while self.state != State::Finished {
            self.step()?;
        }
        Ok(self.ledger)
    }

    /// Performs a single transition.
    ///
    /// The source must already be started when the session is in [`State::Scanning`], which
    /// [`Session::run`] takes care of.
    ///
    /// # Errors
    ///
    /// See [`Session::run`].
    pub fn step(&mut self) -> Result<(), Error> {
        let state = std::mem::replace(&mut self.state, State::Finished);
        trace!("Session step from {state:?}");

        self.state = match state {
            State::Scanning => self.scan()?,
            State::Resolving { symbol } => self.resolve(symbol)?,
            State::ShowingResult => self.decide()?,
            State::ShowingDuplicateNotice { symbol } => {
                self.presenter.notify(&Notice::Duplicate(symbol));
                self.resume()?
            }
            State::Finished => State::Finished,
        };
        Ok(())
    }

    fn scan(&mut self) -> Result<State, Error> {
        let Some(symbol) = self.source.next_symbol()? else {
            self.source.stop();
            return self.finalize();
        };
        self.source.stop();

        if !is_valid_isbn(&symbol) {
            warn!("'{symbol}' does not look like an ISBN - looking it up anyway");
        }

        if self.ledger.contains(&symbol) {
            Ok(State::ShowingDuplicateNotice { symbol })
        } else {
            Ok(State::Resolving { symbol })
        }
    }

    fn resolve(&mut self, symbol: String) -> Result<State, Error> {
        match lookup::resolve::<C>(&symbol) {
            Ok(Some(record)) => {
                info!("Found '{symbol}' using {}", record.provider());
                self.ledger.append(record)?;
                if let Some(record) = self.ledger.all().last() {
                    self.presenter.show_record(record);
                }
                Ok(State::ShowingResult)
            }
            Ok(None) => {
                info!("No book found for '{symbol}'");
                self.presenter.notify(&Notice::NotFound(symbol));
                self.resume()
            }
            Err(err) => {
                error!("Lookup for '{symbol}' failed: {err}");
                self.presenter.notify(&Notice::LookupFailed(symbol));
                self.resume()
            }
        }
    }

    fn decide(&mut self) -> Result<State, Error> {
        let choice = match self.presenter.choose() {
            Ok(choice) => choice,
            Err(err) if err.kind() == ErrorKind::Interact => {
                warn!("{err} - finishing the session");
                Choice::Finalize
            }
            Err(err) => return Err(err),
        };

        match choice {
            Choice::Continue => {
                self.presenter.clear();
                self.resume()
            }
            Choice::Finalize => self.finalize(),
        }
    }

    fn resume(&mut self) -> Result<State, Error> {
        self.source.start()?;
        Ok(State::Scanning)
    }

    fn finalize(&mut self) -> Result<State, Error> {
        if self.ledger.is_empty() {
            info!("Nothing was recorded - no file written");
        } else {
            self.exporter.export(self.ledger.all())?;
        }
        Ok(State::Finished)
    }
}
