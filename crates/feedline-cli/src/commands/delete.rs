//! Delete command implementation.

use crate::archive::Archive;
use crate::cli::DeleteArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use feedline_domain::ScheduleId;
use std::io::{self, Write};

/// Execute the delete command.
pub fn execute_delete(
    args: DeleteArgs,
    archive: &mut Archive,
    formatter: &Formatter,
) -> Result<()> {
    let ids = parse_ids(&args.ids)?;

    // Confirm deletion unless --yes is specified
    if !args.yes {
        println!("About to delete {} schedule(s):", ids.len());
        for id in &ids {
            println!("  - {}", id);
        }
        print!("Continue? [y/N] ");
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    let removed = remove_all(archive, &ids)?;
    archive.save()?;
    println!("{}", formatter.success(&format!("Deleted {} schedule(s)", removed)));
    Ok(())
}

fn parse_ids(raw: &[String]) -> Result<Vec<ScheduleId>> {
    raw.iter()
        .map(|id| {
            ScheduleId::from_string(id.trim())
                .map_err(|e| CliError::InvalidInput(format!("Invalid ID '{}': {}", id, e)))
        })
        .collect()
}

/// Remove every id, failing before any change if one is missing.
fn remove_all(archive: &mut Archive, ids: &[ScheduleId]) -> Result<usize> {
    if let Some(missing) = ids
        .iter()
        .find(|id| !archive.schedules().iter().any(|stored| &stored.id == *id))
    {
        return Err(CliError::NotFound(missing.to_string()));
    }

    Ok(ids.iter().filter_map(|id| archive.remove(id)).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedline_domain::{Identified, ScheduleDocument};
    use tempfile::TempDir;

    fn empty_schedule() -> ScheduleDocument {
        ScheduleDocument::new(Identified::Unknown, Identified::Unknown, vec![])
    }

    #[test]
    fn test_parse_ids() {
        let id = ScheduleId::new();
        let parsed = parse_ids(&[format!(" {} ", id)]).unwrap();
        assert_eq!(parsed, vec![id]);
        assert!(matches!(
            parse_ids(&["not-an-id".to_string()]),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_remove_all() {
        let dir = TempDir::new().unwrap();
        let mut archive = Archive::load(dir.path().join("schedules.json")).unwrap();
        let a = archive.add("a.txt", empty_schedule());
        let b = archive.add("b.txt", empty_schedule());

        assert_eq!(remove_all(&mut archive, &[a]).unwrap(), 1);
        assert_eq!(archive.len(), 1);

        let result = remove_all(&mut archive, &[b, a]);
        assert!(matches!(result, Err(CliError::NotFound(_))));
        assert_eq!(archive.len(), 1);
    }
}
