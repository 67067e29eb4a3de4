#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{error, path::PathBuf, process};

mod file;
mod interact;

use file::output_path;
use interact::Terminal;

use isbnscan::{export::XlsxExporter, source::LineSource, Session};

use clap::Parser;
use log::{info, trace};

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{}", err);
        process::exit(2);
    }
}

fn try_main() -> Result<(), Box<dyn error::Error>> {
    let Cli {
        device,
        output,
        batch,
        verbosity,
        quiet,
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let output = output_path(output)?;
    trace!("Writing the spreadsheet to '{}' when done", output.display());

    let terminal = Terminal::new(batch, quiet);
    let exporter = XlsxExporter::new(&output);

    let ledger = if let Some(device) = device {
        trace!("'device' option used with value of '{}'", device.display());
        let source = LineSource::open(&device)?;
        Session::new(source, terminal, exporter).run()
    } else {
        trace!("'device' option not used - reading barcodes from stdin");
        Session::new(LineSource::stdin(), terminal, exporter).run()
    }?;

    info!("Session finished with {} book(s)", ledger.len());
    if !quiet && !ledger.is_empty() {
        println!(
            "Saved {} book(s) to {}",
            ledger.len(),
            output.display()
        );
    }
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> Result<(), Box<dyn error::Error>> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 1 } else { verbosity + 2 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "isbnscan")]
#[clap(about = "Scan ISBN barcodes, look the books up and collect them in a spreadsheet")]
#[clap(version, author)]
struct Cli {
    /// Read barcodes from this device or file instead of stdin
    ///
    /// Barcode scanners in keyboard or serial mode write one code per line, blank lines are
    /// ignored.
    #[clap(short, long, parse(from_os_str))]
    device: Option<PathBuf>,

    /// The name of the spreadsheet file, `ISBN_List.xlsx` if not set
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Keep scanning after every book without asking, the spreadsheet is written once the input
    /// ends.
    #[clap(short, long)]
    batch: bool,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long)]
    quiet: bool,
}
