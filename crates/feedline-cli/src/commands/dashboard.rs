//! Dashboard command implementation.

use crate::archive::Archive;
use crate::cli::{DashboardArgs, ViewArg};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use chrono::NaiveDate;
use feedline_aggregator::{aggregate, AggregationFilter};

/// Execute the dashboard command.
pub fn execute_dashboard(
    args: DashboardArgs,
    config: &Config,
    archive: &Archive,
    formatter: &Formatter,
) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    println!("{}", render_dashboard(&args, config, archive, formatter, today)?);
    Ok(())
}

/// Aggregate the archive and render the requested view.
fn render_dashboard(
    args: &DashboardArgs,
    config: &Config,
    archive: &Archive,
    formatter: &Formatter,
    today: NaiveDate,
) -> Result<String> {
    let day_window = args
        .days
        .unwrap_or_else(|| i64::from(config.settings.day_window));
    let filter = AggregationFilter::parse(&args.farm, &args.barn, day_window)?;
    let view = aggregate(archive.documents(), &filter, today);

    match args.view {
        ViewArg::Overview => formatter.format_overview(&view),
        ViewArg::Timeline => {
            let entries: Vec<_> = view.timeline.iter().collect();
            formatter.format_timeline(&entries, view.day_window)
        }
        ViewArg::Upcoming => formatter.format_timeline(&view.upcoming(), view.day_window),
    }
}
