//! List command implementation.

use crate::archive::Archive;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the list command.
pub fn execute_list(archive: &Archive, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_archive(archive.schedules())?);
    Ok(())
}
