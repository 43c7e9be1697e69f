//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use feedline_aggregator::{AggregationView, TimelineEntry};
use feedline_batch::{BatchOutcome, BatchProgress};
use feedline_domain::{ScheduleDocument, StoredSchedule};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format one extracted schedule.
    pub fn format_schedule(
        &self,
        document_ref: &str,
        schedule: &ScheduleDocument,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&schedule_json(
                document_ref,
                schedule,
            )?)?),
            OutputFormat::Table => Ok(self.format_schedule_table(document_ref, schedule)),
        }
    }

    fn format_schedule_table(&self, document_ref: &str, schedule: &ScheduleDocument) -> String {
        let heading = format!(
            "{} ({}): {} deliveries, {} total, {} average",
            schedule.location(),
            document_ref,
            schedule.total_deliveries(),
            format_weight(schedule.total_weight()),
            format_weight(schedule.average_weight()),
        );

        if schedule.deliveries().is_empty() {
            return format!("{}\n{}", heading, self.colorize("No deliveries found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Date", "Weight", "Source"]);
        for delivery in schedule.deliveries() {
            builder.push_record(vec![
                delivery.date.to_string(),
                format_weight(delivery.weight),
                delivery.source_text.replace('\n', " "),
            ]);
        }

        format!("{}\n{}", heading, render(builder))
    }

    /// Format the result of a batch run.
    pub fn format_batch(&self, outcome: &BatchOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let successful = outcome
                    .successful
                    .iter()
                    .map(|s| schedule_json(s.document.as_str(), &s.schedule))
                    .collect::<Result<Vec<_>>>()?;
                let failed: Vec<serde_json::Value> = outcome
                    .failed
                    .iter()
                    .map(|f| {
                        serde_json::json!({
                            "documentRef": f.document.as_str(),
                            "reason": f.reason.to_string(),
                            "kind": f.reason.kind(),
                        })
                    })
                    .collect();
                let cancelled: Vec<&str> = outcome.cancelled.iter().map(|d| d.as_str()).collect();

                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "successful": successful,
                    "failed": failed,
                    "cancelled": cancelled,
                    "totalProcessed": outcome.total_processed,
                }))?)
            }
            OutputFormat::Table => Ok(self.format_batch_table(outcome)),
        }
    }

    fn format_batch_table(&self, outcome: &BatchOutcome) -> String {
        let mut lines = Vec::new();

        if outcome.total_processed > 0 {
            let mut builder = Builder::default();
            builder.push_record(["Document", "Status", "Details"]);
            for success in &outcome.successful {
                builder.push_record(vec![
                    success.document.to_string(),
                    "ok".to_string(),
                    format!(
                        "{}, {} deliveries",
                        success.schedule.location(),
                        success.schedule.total_deliveries()
                    ),
                ]);
            }
            for failure in &outcome.failed {
                builder.push_record(vec![
                    failure.document.to_string(),
                    "failed".to_string(),
                    failure.reason.to_string(),
                ]);
            }
            lines.push(render(builder));
        }

        let summary = format!(
            "Processed {} document(s): {} succeeded, {} failed",
            outcome.total_processed,
            outcome.successful.len(),
            outcome.failed.len()
        );
        lines.push(if outcome.failed.is_empty() {
            self.success(&summary)
        } else {
            self.warning(&summary)
        });

        if outcome.was_cancelled() {
            lines.push(self.warning(&format!(
                "Cancelled before starting {} document(s)",
                outcome.cancelled.len()
            )));
        }

        lines.join("\n")
    }

    /// Format archived schedules.
    pub fn format_archive(&self, schedules: &[StoredSchedule]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(schedules)?),
            OutputFormat::Table => {
                if schedules.is_empty() {
                    return Ok(self.colorize("No schedules archived.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "ID",
                    "Location",
                    "Deliveries",
                    "Total",
                    "Document",
                    "Uploaded",
                ]);
                for stored in schedules {
                    builder.push_record(vec![
                        stored.id.to_string(),
                        stored.schedule.location(),
                        stored.schedule.total_deliveries().to_string(),
                        format_weight(stored.schedule.total_weight()),
                        stored.document_ref.clone(),
                        stored.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format the dashboard overview.
    pub fn format_overview(&self, view: &AggregationView) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
            OutputFormat::Table => {
                let summary = &view.summary;
                let heading = format!(
                    "{} schedules, {} deliveries, {} total, {} active farm(s)",
                    summary.total_schedules,
                    summary.total_deliveries,
                    format_weight(summary.total_weight),
                    summary.active_farms
                );

                if view.is_empty() {
                    return Ok(format!(
                        "{}\n{}",
                        heading,
                        self.colorize("No schedules match the filter.", "yellow")
                    ));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "Farm".to_string(),
                    "Barn".to_string(),
                    "Schedules".to_string(),
                    "Deliveries".to_string(),
                    "Total".to_string(),
                    format!("Next {} days", view.day_window),
                ]);
                for (farm_label, farm) in &view.farms {
                    for (barn_label, barn) in &farm.barns {
                        builder.push_record(vec![
                            farm_label.clone(),
                            barn_label.clone(),
                            barn.schedule_count.to_string(),
                            barn.delivery_count.to_string(),
                            format_weight(barn.total_weight),
                            barn.upcoming_deliveries.to_string(),
                        ]);
                    }
                    builder.push_record(vec![
                        farm_label.clone(),
                        "all".to_string(),
                        farm.schedule_count.to_string(),
                        farm.total_deliveries.to_string(),
                        format_weight(farm.total_weight),
                        farm.upcoming_deliveries.to_string(),
                    ]);
                }

                Ok(format!("{}\n{}", heading, render(builder)))
            }
        }
    }

    /// Format timeline entries.
    pub fn format_timeline(&self, entries: &[&TimelineEntry], day_window: u32) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No deliveries found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Date", "When", "Location", "Weight"]);
                for entry in entries {
                    let mut when = describe_days(entry.days_until);
                    if entry.days_until >= 0 && entry.days_until <= i64::from(day_window) {
                        when.push_str(" *");
                    }
                    builder.push_record(vec![
                        entry.date.to_string(),
                        when,
                        entry.location.clone(),
                        format_weight(entry.weight),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format batch progress for a status line.
    pub fn progress(&self, progress: BatchProgress) -> String {
        format!(
            "Processing {}/{} ({:.0}%)",
            progress.completed,
            progress.total,
            progress.fraction() * 100.0
        )
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn schedule_json(document_ref: &str, schedule: &ScheduleDocument) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(schedule)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("documentRef".into(), document_ref.into());
        object.insert("totalWeight".into(), schedule.total_weight().into());
        object.insert("totalDeliveries".into(), schedule.total_deliveries().into());
        object.insert("averageWeight".into(), schedule.average_weight().into());
    }
    Ok(value)
}

/// Render a weight with thousands separators, e.g. `5,250 KG`.
pub fn format_weight(weight: f64) -> String {
    let tenths = (weight.abs() * 10.0).round() as u64;
    let digits = (tenths / 10).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if weight < 0.0 && tenths > 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if tenths % 10 != 0 {
        grouped.push('.');
        grouped.push_str(&(tenths % 10).to_string());
    }

    format!("{} KG", grouped)
}

fn describe_days(days_until: i64) -> String {
    match days_until {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        d if d > 0 => format!("in {} days", d),
        d => format!("{} days ago", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use feedline_aggregator::{aggregate, AggregationFilter};
    use feedline_batch::{BatchFailure, DocumentRef, FailureReason};
    use feedline_domain::{BarnCode, DeliveryRecord, FarmCode, Identified};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2025, 1, 1)
    }

    fn create_test_schedule() -> ScheduleDocument {
        ScheduleDocument::new(
            Identified::Known(FarmCode::Vas),
            Identified::Known(BarnCode::from_digits("2").unwrap()),
            vec![
                DeliveryRecord::new(ymd(2025, 1, 4), 5250.0, "01/04/2025 5,250"),
                DeliveryRecord::new(ymd(2025, 3, 1), 6100.0, "03/01/2025 6,100"),
            ],
        )
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(5250.0), "5,250 KG");
        assert_eq!(format_weight(100.0), "100 KG");
        assert_eq!(format_weight(1234567.0), "1,234,567 KG");
        assert_eq!(format_weight(800.5), "800.5 KG");
        assert_eq!(format_weight(0.0), "0 KG");
    }

    #[test]
    fn test_schedule_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_schedule("vas.txt", &create_test_schedule()).unwrap();
        assert!(output.contains("VAS-B2 (vas.txt): 2 deliveries"));
        assert!(output.contains("11,350 KG total"));
        assert!(output.contains("2025-01-04"));
        assert!(output.contains("Source"));
    }

    #[test]
    fn test_schedule_json_includes_totals() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_schedule("vas.txt", &create_test_schedule()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["farmCode"], "VAS");
        assert_eq!(value["barnCode"], "B2");
        assert_eq!(value["totalDeliveries"], 2);
        assert_eq!(value["totalWeight"], 11350.0);
        assert_eq!(value["deliveries"][0]["date"], "2025-01-04");
        assert_eq!(value["documentRef"], "vas.txt");
    }

    #[test]
    fn test_batch_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let outcome = BatchOutcome {
            failed: vec![BatchFailure {
                document: DocumentRef::new("blank.txt"),
                reason: FailureReason::UnknownFarm,
            }],
            total_processed: 1,
            ..Default::default()
        };
        let output = formatter.format_batch(&outcome).unwrap();
        assert!(output.contains("blank.txt"));
        assert!(output.contains("Could not identify farm name"));
        assert!(output.contains("Processed 1 document(s): 0 succeeded, 1 failed"));
    }

    #[test]
    fn test_batch_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let outcome = BatchOutcome {
            failed: vec![BatchFailure {
                document: DocumentRef::new("blank.txt"),
                reason: FailureReason::NoDeliveries,
            }],
            cancelled: vec![DocumentRef::new("late.txt")],
            total_processed: 1,
            ..Default::default()
        };
        let value: serde_json::Value =
            serde_json::from_str(&formatter.format_batch(&outcome).unwrap()).unwrap();
        assert_eq!(value["failed"][0]["reason"], "No delivery dates found");
        assert_eq!(value["failed"][0]["kind"], "no_deliveries");
        assert_eq!(value["cancelled"][0], "late.txt");
        assert_eq!(value["totalProcessed"], 1);
    }

    #[test]
    fn test_overview_and_timeline() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let docs = vec![create_test_schedule()];
        let view = aggregate(&docs, &AggregationFilter::default(), today());

        let overview = formatter.format_overview(&view).unwrap();
        assert!(overview.contains("1 schedules, 2 deliveries, 11,350 KG total, 1 active farm(s)"));
        assert!(overview.contains("Next 30 days"));

        let upcoming = formatter.format_timeline(&view.upcoming(), view.day_window).unwrap();
        assert!(upcoming.contains("in 3 days"));
        assert!(!upcoming.contains("2025-03-01"));
    }

    #[test]
    fn test_empty_outputs() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(formatter.format_archive(&[]).unwrap().contains("No schedules archived"));
        assert!(formatter.format_timeline(&[], 30).unwrap().contains("No deliveries found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }

    #[test]
    fn test_describe_days() {
        assert_eq!(describe_days(0), "today");
        assert_eq!(describe_days(5), "in 5 days");
        assert_eq!(describe_days(-3), "3 days ago");
    }
}
