//! Shared utilities for CLI commands.

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result, anyhow};
use chrono::TimeDelta;
use sw_core::{ReportError, SleepReport, read_log};

use crate::Config;
use crate::style::{Painter, Style};

/// Reads the configured sleep log and builds the report.
pub fn load_report(config: &Config) -> Result<SleepReport> {
    let path = &config.data_file;
    let file = File::open(path)
        .with_context(|| format!("failed to open sleep log {}", path.display()))?;
    let log = read_log(BufReader::new(file))
        .with_context(|| format!("failed to read sleep log {}", path.display()))?;

    let options = config.theme.report_options()?;
    SleepReport::build(&log.spans, &options).map_err(|err| match err {
        ReportError::NoData => anyhow!("found no parsable data in {}", path.display()),
        err @ ReportError::DegeneratePeriod(_) => {
            anyhow::Error::new(err).context(format!("cannot report on {}", path.display()))
        }
    })
}

/// Splits a duration into whole hours and minutes, after rounding to the second.
pub fn delta_fields(delta: TimeDelta) -> (i64, i64) {
    let seconds = (delta.num_milliseconds() + 500).div_euclid(1000);
    (seconds.div_euclid(3600), seconds.rem_euclid(3600) / 60)
}

/// Formats a duration as `   H hours MM minutes`.
pub fn format_delta(painter: &Painter<'_>, delta: TimeDelta) -> String {
    let theme = painter.theme();
    let (hours, minutes) = delta_fields(delta);
    format!(
        "{}{}{}{}",
        painter.paint(&format!("{hours:4}"), Style::fg(theme.time)),
        painter.paint(" hours ", Style::fg(theme.time_text)),
        painter.paint(&format!("{minutes:2}"), Style::fg(theme.time)),
        painter.paint(" minutes", Style::fg(theme.time_text)),
    )
}

/// Formats a duration as `H:MM`, `  :MM` below an hour, or nothing when zero.
pub fn format_delta_short(painter: &Painter<'_>, delta: TimeDelta) -> String {
    let theme = painter.theme();
    match delta_fields(delta) {
        (0, 0) => String::new(),
        (0, minutes) => format!(
            "{}{}",
            painter.paint("  :", Style::fg(theme.time_text)),
            painter.paint(&format!("{minutes:02}"), Style::fg(theme.time)),
        ),
        (hours, minutes) => format!(
            "{}{}{}",
            painter.paint(&format!("{hours:2}"), Style::fg(theme.time)),
            painter.paint(":", Style::fg(theme.time_text)),
            painter.paint(&format!("{minutes:02}"), Style::fg(theme.time)),
        ),
    }
}

/// Formats the observed period and sleep totals.
pub fn format_summary(painter: &Painter<'_>, report: &SleepReport) -> String {
    let theme = painter.theme();
    let mut lines = Vec::with_capacity(4);
    lines.push(format!(
        "{}{} – {} ({}{})",
        painter.paint("Period:  ", Style::plain().bold()),
        report.first_day().format("%B %d %Y"),
        report.last_day().format("%B %d %Y"),
        painter.paint(&report.number_of_days().to_string(), Style::fg(theme.time)),
        painter.paint(" days", Style::fg(theme.time_text)),
    ));
    lines.push(String::new());
    lines.push(format!(
        "{}{}",
        painter.paint("Total time sleeping: ", Style::plain().bold()),
        format_delta(painter, report.total_time())
    ));
    lines.push(format!(
        "{}{}",
        painter.paint("Daily average:      ", Style::plain().bold()),
        format_delta(painter, report.daily_average())
    ));
    lines.join("\n")
}
