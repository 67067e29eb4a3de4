use std::path::{Path, PathBuf};

use isbnscan::export::DEFAULT_FILE_NAME;

use eyre::{eyre, Result};
use log::{info, trace};

const EXT: &str = "xlsx";

/// Works out where the spreadsheet is written.
///
/// No path means `ISBN_List.xlsx` in the current directory, a directory means `ISBN_List.xlsx`
/// inside it and any other path gets the `.xlsx` extension.
pub fn output_path(file_name: Option<PathBuf>) -> Result<PathBuf> {
    let path = match file_name {
        Some(path) if path.is_dir() => {
            trace!("'{}' is a directory - using the default file name", path.display());
            path.join(DEFAULT_FILE_NAME)
        }
        Some(path) => path.with_extension(EXT),
        None => PathBuf::from(DEFAULT_FILE_NAME),
    };

    check_parent_directory(&path)?;

    if path.exists() {
        info!(
            "'{}' already exists and will be overwritten when the session ends",
            path.display()
        );
    }

    Ok(path)
}

fn check_parent_directory(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => Err(eyre!(
            "Cannot write '{}' - the directory '{}' does not exist",
            path.display(),
            parent.display()
        )),
        _ => Ok(()),
    }
}
