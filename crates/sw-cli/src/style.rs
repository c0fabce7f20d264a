//! Terminal styling: colour theme, glyph ramp and ANSI escape sequences.

use std::io::IsTerminal;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use sw_core::ReportOptions;

/// When to emit ANSI escape sequences.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colour only when stdout is a terminal.
    #[default]
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

impl ColorMode {
    /// Resolves the mode against the current stdout.
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => std::io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Colours (256-colour palette indices), glyphs and layout of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub foreground: u8,
    pub heading: u8,
    pub heading_line: u8,
    pub time: u8,
    pub time_text: u8,
    /// One colour per histogram row, bottom row first.
    pub histogram: Vec<u8>,
    /// Histogram row colours on gridlines, bottom row first.
    pub histogram_grid: Vec<u8>,
    pub weekday: u8,
    pub weekend: u8,
    pub bar: u8,
    pub bar_weekend: u8,
    pub bar_grid: u8,
    pub bar_weekend_grid: u8,
    pub night: u8,
    pub sunrise: u8,
    pub noon: u8,
    pub sunset: u8,
    pub grid: u8,
    /// Level glyphs from empty to full.
    pub glyphs: Vec<String>,
    /// Width of month headings.
    pub output_width: usize,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: 251,
            heading: 208,
            heading_line: 246,
            time: 231,
            time_text: 246,
            histogram: vec![57, 56, 126, 197],
            histogram_grid: vec![99, 97, 169, 204],
            weekday: 245,
            weekend: 231,
            bar: 28,
            bar_weekend: 82,
            bar_grid: 77,
            bar_weekend_grid: 156,
            night: 51,
            sunrise: 228,
            noon: 226,
            sunset: 214,
            grid: 238,
            glyphs: [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"]
                .into_iter()
                .map(String::from)
                .collect(),
            output_width: 61,
        }
    }
}

impl Theme {
    /// Derives quantization settings from the glyph ramp and row colours.
    ///
    /// Histogram cells use the whole ramp; day bars leave out the full glyph so
    /// consecutive days stay apart.
    pub fn report_options(&self) -> Result<ReportOptions> {
        if self.glyphs.len() < 3 {
            bail!(
                "theme needs at least 3 glyphs, got {}",
                self.glyphs.len()
            );
        }
        let Ok(histogram_levels) = u8::try_from(self.glyphs.len() - 1) else {
            bail!("theme has too many glyphs: {}", self.glyphs.len());
        };
        if self.histogram.is_empty() || self.histogram.len() != self.histogram_grid.len() {
            bail!(
                "theme needs matching histogram colours, got {} and {} grid colours",
                self.histogram.len(),
                self.histogram_grid.len()
            );
        }
        let Ok(histogram_rows) = u8::try_from(self.histogram.len()) else {
            bail!("theme has too many histogram rows: {}", self.histogram.len());
        };

        Ok(ReportOptions {
            histogram_levels,
            histogram_rows,
            bar_levels: histogram_levels - 1,
        })
    }
}

/// Foreground, background and weight of a run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    fg: Option<u8>,
    bg: Option<u8>,
    bold: bool,
}

impl Style {
    /// Text in the given colour.
    pub const fn fg(color: u8) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            bold: false,
        }
    }

    /// Text in the theme's foreground colour.
    pub const fn plain() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
        }
    }

    /// Adds a background colour.
    pub const fn on(self, color: u8) -> Self {
        Self {
            bg: Some(color),
            ..self
        }
    }

    /// Adds a background colour when `grid` is set.
    pub const fn on_if(self, grid: bool, color: u8) -> Self {
        if grid { self.on(color) } else { self }
    }

    /// Makes the text bold.
    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Makes the text bold when `bold` is set.
    pub const fn bold_if(self, bold: bool) -> Self {
        if bold { self.bold() } else { self }
    }
}

/// Applies a theme to text, or leaves it plain when colour is off.
#[derive(Debug, Clone, Copy)]
pub struct Painter<'a> {
    theme: &'a Theme,
    enabled: bool,
}

impl<'a> Painter<'a> {
    pub const fn new(theme: &'a Theme, enabled: bool) -> Self {
        Self { theme, enabled }
    }

    /// The theme being applied.
    pub const fn theme(&self) -> &'a Theme {
        self.theme
    }

    /// Escape sequence switching to `style`, preceded by a reset.
    pub fn escape(&self, style: Style) -> String {
        if !self.enabled {
            return String::new();
        }
        let mut params = Vec::with_capacity(3);
        if let Some(fg) = style.fg {
            params.push(format!("38;5;{fg}"));
        }
        if let Some(bg) = style.bg {
            params.push(format!("48;5;{bg}"));
        }
        if style.bold {
            params.push("1".to_string());
        }
        format!("{}\x1b[{}m", self.reset(), params.join(";"))
    }

    /// Sequence resetting every attribute.
    pub const fn reset(&self) -> &'static str {
        if self.enabled { "\x1b[0m" } else { "" }
    }

    /// Styles `text`, then returns to the theme's foreground colour.
    pub fn paint(&self, text: &str, style: Style) -> String {
        let style = Style {
            fg: style.fg.or(Some(self.theme.foreground)),
            ..style
        };
        format!(
            "{}{text}{}",
            self.escape(style),
            self.escape(Style::fg(self.theme.foreground))
        )
    }

    /// Glyph for a quantized level, clamped to the ramp.
    pub fn glyph(&self, level: u8) -> &'a str {
        let glyphs = &self.theme.glyphs;
        glyphs
            .get(usize::from(level))
            .or_else(|| glyphs.last())
            .map_or(" ", String::as_str)
    }
}
