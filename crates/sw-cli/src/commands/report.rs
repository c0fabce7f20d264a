//! Report command: the full terminal report, or JSON.
//!
//! The terminal report has three parts:
//! - the summary (period and sleep totals)
//! - the time-of-day histogram, stacked over several rows
//! - one bar per day, newest first, grouped into month sections

use std::io::Write;

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use sw_core::profile::is_grid_bucket;
use sw_core::{DayBar, HistogramRow, SleepReport};

use crate::Config;
use crate::commands::util::{format_delta_short, format_summary, load_report};
use crate::style::{Painter, Style};

/// Left margin in front of cells, the width of a row label.
const MARGIN: &str = "        ";

const GRID_HEADER: &str = "▆           ▆           ▆           ▆           ▆";
const GRID_FOOTER: &str = "▀           ▀           ▀           ▀           ▀";

// ========== Text Formatting ==========

/// Time-of-day axis with sun and moon markers.
pub fn time_header(painter: &Painter<'_>) -> String {
    let theme = painter.theme();
    format!(
        "       0:00 {}      6:00 {}     12:00 {}     18:00 {}     24:00 {}",
        painter.paint("☾", Style::fg(theme.night)),
        painter.paint("☀", Style::fg(theme.sunrise)),
        painter.paint("☀", Style::fg(theme.noon)),
        painter.paint("☀", Style::fg(theme.sunset)),
        painter.paint("☽", Style::fg(theme.night)),
    )
}

fn grid_header(painter: &Painter<'_>) -> String {
    painter.paint(GRID_HEADER, Style::fg(painter.theme().grid))
}

fn grid_footer(painter: &Painter<'_>) -> String {
    painter.paint(GRID_FOOTER, Style::fg(painter.theme().grid))
}

/// Boxed month heading centred in the output width, e.g. `┌─── January 2024 ───┐`.
pub fn format_heading(painter: &Painter<'_>, month: NaiveDate) -> String {
    let theme = painter.theme();
    let title = format!(" {} ", month.format("%B %Y"));
    let title_len = title.chars().count();
    let left = theme.output_width.saturating_sub(title_len) / 2;
    let right = theme.output_width.saturating_sub(left + title_len);

    format!(
        "{}{}{}",
        painter.paint(
            &format!("┌{}", "─".repeat(left)),
            Style::fg(theme.heading_line)
        ),
        painter.paint(&title, Style::fg(theme.heading)),
        painter.paint(
            &format!("{}┐", "─".repeat(right)),
            Style::fg(theme.heading_line)
        ),
    )
}

/// One stacked histogram row; the bottom row is labelled `min`.
pub fn format_histogram_row(painter: &Painter<'_>, row: &HistogramRow) -> String {
    let theme = painter.theme();
    let row_index = usize::from(row.row_index);
    let color = theme
        .histogram
        .get(row_index)
        .copied()
        .unwrap_or(theme.foreground);
    let grid_color = theme
        .histogram_grid
        .get(row_index)
        .copied()
        .unwrap_or(color);

    let label = if row.row_index == 0 { "   min" } else { "      " };
    let cells: String = row
        .cells
        .iter()
        .map(|cell| {
            let style = Style::fg(if cell.grid { grid_color } else { color })
                .on_if(cell.grid, theme.grid);
            painter.paint(painter.glyph(cell.level), style)
        })
        .collect();

    format!(
        "{label}  {cells}{}",
        painter.paint(" ", Style::plain().on(theme.grid))
    )
}

/// One day: weekday, day of month, bar and total.
pub fn format_day(painter: &Painter<'_>, day: &DayBar) -> String {
    let theme = painter.theme();
    let weekday = day.date.weekday();
    let weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);

    let name = painter.paint(
        &day.date.format("%a").to_string(),
        Style::fg(if weekend { theme.weekend } else { theme.weekday })
            .bold_if(weekday == Weekday::Sun),
    );
    let day_of_month = day.date.format(" %d").to_string().replace(" 0", "  ");

    let cells: String = day
        .levels
        .iter()
        .enumerate()
        .map(|(index, &level)| {
            let grid = is_grid_bucket(index);
            let color = match (weekend, grid) {
                (false, false) => theme.bar,
                (false, true) => theme.bar_grid,
                (true, false) => theme.bar_weekend,
                (true, true) => theme.bar_weekend_grid,
            };
            painter.paint(
                painter.glyph(level),
                Style::fg(color).on_if(grid, theme.grid),
            )
        })
        .collect();

    format!(
        "{name}{day_of_month}  {cells}{} {}",
        painter.paint(" ", Style::plain().on(theme.grid)),
        format_delta_short(painter, day.total)
    )
}

/// Writes the full report.
pub fn write_report<W: Write>(
    out: &mut W,
    painter: &Painter<'_>,
    report: &SleepReport,
) -> std::io::Result<()> {
    let theme = painter.theme();
    write!(out, "{}", painter.escape(Style::fg(theme.foreground)))?;

    writeln!(out, "{}", format_summary(painter, report))?;
    writeln!(out)?;
    writeln!(out)?;

    writeln!(out, "{}", painter.paint("Histogram:", Style::plain().bold()))?;
    writeln!(out)?;
    writeln!(out, "{}", time_header(painter))?;
    writeln!(out, "   max  {}", grid_header(painter))?;
    for row in report.histogram.rows() {
        writeln!(out, "{}", format_histogram_row(painter, row))?;
    }
    writeln!(out, "{MARGIN}{}", grid_footer(painter))?;
    writeln!(out)?;

    for day in &report.days {
        if day.opens_month {
            writeln!(out)?;
            writeln!(out)?;
            writeln!(out, "{}", format_heading(painter, day.date))?;
            writeln!(out)?;
            writeln!(out, "{}", time_header(painter))?;
            writeln!(out, "{MARGIN}{}", grid_header(painter))?;
        }
        writeln!(out, "{}", format_day(painter, day))?;
        if day.closes_section {
            writeln!(out, "{MARGIN}{}", grid_footer(painter))?;
        }
    }

    write!(out, "{}", painter.reset())
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub period: JsonPeriod,
    pub totals: JsonTotals,
    pub histogram: JsonHistogram,
    pub days: Vec<JsonDay>,
}

#[derive(Debug, Serialize)]
pub struct JsonPeriod {
    pub start: String,
    pub end: String,
    pub days: i64,
}

#[derive(Debug, Serialize)]
pub struct JsonTotals {
    pub sleep_ms: i64,
    pub daily_average_ms: i64,
}

#[derive(Debug, Serialize)]
pub struct JsonHistogram {
    pub levels: u8,
    pub rows: usize,
    pub buckets: Vec<JsonBucket>,
}

#[derive(Debug, Serialize)]
pub struct JsonBucket {
    pub time: String,
    pub sleep_ms: i64,
    pub fraction: f64,
    pub grid: bool,
    /// Row levels, top row first.
    pub levels: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct JsonDay {
    pub date: String,
    pub sleep_ms: i64,
    pub levels: Vec<u8>,
}

/// Formats the report as JSON.
pub fn format_report_json(report: &SleepReport) -> Result<String> {
    let json = JsonReport {
        period: JsonPeriod {
            start: report.first_day().format("%Y-%m-%d").to_string(),
            end: report.last_day().format("%Y-%m-%d").to_string(),
            days: report.number_of_days(),
        },
        totals: JsonTotals {
            sleep_ms: report.total_time().num_milliseconds(),
            daily_average_ms: report.daily_average().num_milliseconds(),
        },
        histogram: JsonHistogram {
            levels: report.histogram.levels(),
            rows: report.histogram.rows().len(),
            buckets: report
                .profile
                .buckets()
                .iter()
                .map(|bucket| JsonBucket {
                    time: bucket.time().format("%H:%M").to_string(),
                    sleep_ms: bucket.accumulated.num_milliseconds(),
                    fraction: bucket.fraction,
                    grid: bucket.grid,
                    levels: report.histogram.column(bucket.index),
                })
                .collect(),
        },
        days: report
            .days
            .iter()
            .map(|day| JsonDay {
                date: day.date.format("%Y-%m-%d").to_string(),
                sleep_ms: day.total.num_milliseconds(),
                levels: day.levels.clone(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&json)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: Write>(out: &mut W, config: &Config, json: bool) -> Result<()> {
    let report = load_report(config)?;

    if json {
        writeln!(out, "{}", format_report_json(&report)?)?;
    } else {
        let painter = Painter::new(&config.theme, config.color.enabled());
        write_report(out, &painter, &report)?;
    }

    Ok(())
}
