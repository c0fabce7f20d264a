//! Summary command: the observed period and sleep totals only.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::commands::util::{format_summary, load_report};
use crate::style::{Painter, Style};

/// Runs the summary command.
pub fn run<W: Write>(out: &mut W, config: &Config) -> Result<()> {
    let report = load_report(config)?;
    let painter = Painter::new(&config.theme, config.color.enabled());

    writeln!(
        out,
        "{}{}{}",
        painter.escape(Style::fg(config.theme.foreground)),
        format_summary(&painter, &report),
        painter.reset()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::style::ColorMode;

    #[test]
    fn test_summary_from_log_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "sleep Mon Jan 01 23:00:00 2024 - Tue Jan 02 06:00:00 2024\n\
             sleep Tue Jan 02 23:30:00 2024 - Wed Jan 03 06:30:00 2024"
        )
        .unwrap();
        let config = Config {
            data_file: file.path().to_path_buf(),
            color: ColorMode::Never,
            ..Config::default()
        };

        let mut out = Vec::new();
        run(&mut out, &config).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.starts_with("Period:  January 01 2024 – January 03 2024 (3 days)\n"));
        assert!(output.ends_with("Daily average:         4 hours 40 minutes\n"));
    }

    #[test]
    fn test_summary_without_sessions_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing recorded yet").unwrap();
        let config = Config {
            data_file: file.path().to_path_buf(),
            color: ColorMode::Never,
            ..Config::default()
        };

        let err = run(&mut Vec::new(), &config).unwrap_err();
        assert!(err.to_string().starts_with("found no parsable data in "));
    }

    #[test]
    fn test_missing_log_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            data_file: dir.path().join("missing.data"),
            ..Config::default()
        };

        let err = run(&mut Vec::new(), &config).unwrap_err();
        assert!(err.to_string().starts_with("failed to open sleep log"));
    }
}
