//! Level quantization.
//!
//! Maps continuous coverage fractions onto discrete glyph levels, where level
//! `0` is an empty cell and level `levels` a full one.
//!
//! Two modes exist:
//!
//! - **Daily bars** map the fraction of a slot spent asleep directly onto the
//!   level range, with no normalization across days.
//! - **Stacked histogram** rows first stretch the bucket fractions between
//!   their minimum and maximum, then spread the resulting level over several
//!   rows so the chart resolves `levels * rows` steps instead of `levels`.

use crate::profile::TimeOfDayProfile;

/// Normalized value every bucket takes when all buckets are equal.
pub const FLAT_LEVEL: f64 = 0.5;

/// Rounds half to even, so `x.5` steps do not all drift upwards.
#[allow(clippy::cast_possible_truncation)]
fn round_level(value: f64) -> i64 {
    value.round_ties_even() as i64
}

fn clamp_level(level: i64, levels: u8) -> u8 {
    u8::try_from(level.clamp(0, i64::from(levels))).unwrap_or(levels)
}

/// Level of one daily-bar cell: `round(fraction * levels)`, clamped to `[0, levels]`.
pub fn daily_level(fraction: f64, levels: u8) -> u8 {
    clamp_level(round_level(fraction * f64::from(levels)), levels)
}

/// Level of one row of a stacked histogram cell.
///
/// `row_index` counts from the bottom (least significant) row at `0` up to
/// `rows - 1` at the top. A row only fills once every row below it is full.
pub fn stacked_level(normalized: f64, levels: u8, rows: u8, row_index: u8) -> u8 {
    let total = round_level(normalized * f64::from(levels) * f64::from(rows));
    clamp_level(total - i64::from(row_index) * i64::from(levels), levels)
}

/// Stretches fractions so the smallest maps to `0.0` and the largest to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalizer {
    /// Fractions differ; they are rescaled over `[min, max]`.
    Range { min: f64, max: f64 },
    /// Every fraction is the same; all map to [`FLAT_LEVEL`].
    Flat,
}

impl Normalizer {
    /// Creates a normalizer over `[min_level, max_level]`.
    pub fn new(min_level: f64, max_level: f64) -> Self {
        if max_level > min_level {
            Self::Range {
                min: min_level,
                max: max_level,
            }
        } else {
            Self::Flat
        }
    }

    /// Rescales a fraction into `[0, 1]`.
    pub fn normalize(&self, fraction: f64) -> f64 {
        match *self {
            Self::Range { min, max } => ((fraction - min) / (max - min)).clamp(0.0, 1.0),
            Self::Flat => FLAT_LEVEL,
        }
    }
}

/// One cell of a histogram row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramCell {
    pub level: u8,
    /// Whether the bucket sits on a six-hour gridline.
    pub grid: bool,
}

/// One stacked row of the histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramRow {
    /// `0` for the bottom row.
    pub row_index: u8,
    pub cells: Vec<HistogramCell>,
}

/// The time-of-day histogram as stacked rows of quantized levels.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    normalizer: Normalizer,
    levels: u8,
    rows: Vec<HistogramRow>,
}

impl Histogram {
    /// Quantizes a profile into `row_count` stacked rows of `levels` levels each.
    pub fn build(profile: &TimeOfDayProfile, levels: u8, row_count: u8) -> Self {
        let (min_level, max_level) = profile.fraction_range();
        let normalizer = Normalizer::new(min_level, max_level);
        if normalizer == Normalizer::Flat {
            tracing::debug!(fraction = min_level, "flat time-of-day profile");
        }

        let rows = (0..row_count)
            .rev()
            .map(|row_index| HistogramRow {
                row_index,
                cells: profile
                    .buckets()
                    .iter()
                    .map(|bucket| HistogramCell {
                        level: stacked_level(
                            normalizer.normalize(bucket.fraction),
                            levels,
                            row_count,
                            row_index,
                        ),
                        grid: bucket.grid,
                    })
                    .collect(),
            })
            .collect();

        Self {
            normalizer,
            levels,
            rows,
        }
    }

    /// Rows ordered top (most significant) to bottom.
    pub fn rows(&self) -> &[HistogramRow] {
        &self.rows
    }

    /// Levels per row.
    pub const fn levels(&self) -> u8 {
        self.levels
    }

    /// How bucket fractions were stretched.
    pub const fn normalizer(&self) -> Normalizer {
        self.normalizer
    }

    /// Row levels of one bucket, top row first.
    pub fn column(&self, bucket: usize) -> Vec<u8> {
        self.rows
            .iter()
            .filter_map(|row| row.cells.get(bucket).map(|cell| cell.level))
            .collect()
    }
}
