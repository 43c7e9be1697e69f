//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use feedline_batch::{classify, DocumentRef, DocumentSource, TextFileSource};
use feedline_extractor::ScheduleExtractor;

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    extractor: &ScheduleExtractor,
    formatter: &Formatter,
) -> Result<()> {
    let document = DocumentRef::from(args.file.as_path());
    let text = TextFileSource::new().fetch_text(&document).await?;

    let (schedule, report) = extractor.extract_with_report(&text);
    tracing::info!(
        document = %document,
        rejected = report.rejected,
        duplicates = report.duplicates,
        fallback_used = report.fallback_used,
        "Extracted schedule"
    );

    println!("{}", formatter.format_schedule(document.as_str(), &schedule)?);

    if formatter.format() == OutputFormat::Table {
        if let Err(reason) = classify(&schedule) {
            println!("{}", formatter.warning(&reason.to_string()));
        }
    }

    Ok(())
}
