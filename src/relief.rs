//! GDAL color-relief tables.
//!
//! The output is the text format read by `gdaldem color-relief`,
//! preceded by a provenance header:
//! ```text
//! # GDAL Color Relief for VHI
//! # Generated from: VHI.json
//! # Date: 2024-01-01T00:00:00.000Z
//! # Format: value R G B A
//!
//! 0 165 0 38 255
//! 50 255 255 255 255
//! ```

use std::{fmt, path::{Path, PathBuf}};
use chrono::{DateTime, SecondsFormat, Utc};
use rgb::RGBA8;
use crate::{color::parse_color,
            error::{Error, Result},
            metadata::{ColorMetadata, StopValue}};

/// Description of the data columns, last line of the header.
pub const FORMAT_LINE: &str = "# Format: value R G B A";

/// A color relief table, computed once from a [`ColorMetadata`].
///
/// Its [`Display`](fmt::Display) is the content of the output file
/// (no trailing newline).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRelief {
    short_name: String,
    source: String,
    date: DateTime<Utc>,
    entries: Vec<(StopValue, RGBA8)>,
}

/// Build the relief of `metadata`.  `source` is the basename of the
/// metadata file and `now` the date written in the header; the wall
/// clock is never read here so that the output is reproducible.
///
/// Stops keep their order.  Colors that cannot be parsed become opaque
/// black.  Fails with [`Error::InvalidFormat`] if there are no stops.
pub fn convert(metadata: &ColorMetadata, source: &str, now: DateTime<Utc>)
               -> Result<ColorRelief> {
    if metadata.stops.is_empty() { return Err(Error::InvalidFormat) }
    let entries = metadata.stops.iter()
        .map(|s| (s.value, parse_color(&s.color)))
        .collect();
    Ok(ColorRelief { short_name: metadata.short_name.clone(),
                     source: source.to_string(),
                     date: now,
                     entries })
}

/// Validate the metadata document `json` and [`convert`] it.
pub fn convert_json(json: &str, source: &str, now: DateTime<Utc>)
                    -> Result<ColorRelief> {
    convert(&ColorMetadata::from_json(json)?, source, now)
}

/// Parse an RFC 3339 date such as `2024-01-01T00:00:00Z` (any offset is
/// converted to UTC).
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| Error::InvalidTimestamp(format!("{s:?}: {e}")))
}

/// ISO-8601 with milliseconds and a `Z` suffix.
fn iso_date(d: &DateTime<Utc>) -> String {
    d.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl ColorRelief {
    pub fn short_name(&self) -> &str { &self.short_name }

    /// Number of data lines.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Always `false`: [`convert`] refuses empty stop lists.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// The stop values and their parsed colors, in order.
    pub fn entries(&self) -> &[(StopValue, RGBA8)] { &self.entries }

    /// The header lines, the last one being empty.
    pub fn header(&self) -> [String; 5] {
        [format!("# GDAL Color Relief for {}", self.short_name),
         format!("# Generated from: {}", self.source),
         format!("# Date: {}", iso_date(&self.date)),
         FORMAT_LINE.to_string(),
         String::new()]
    }

    /// The data lines `value R G B A`.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|(v, c)| {
            format!("{v} {} {} {} {}", c.r, c.g, c.b, c.a)
        })
    }

    /// `{short_name}-colormap.txt`.
    pub fn file_name(&self) -> String {
        format!("{}-colormap.txt", self.short_name)
    }

    /// Where the relief goes by default: [`ColorRelief::file_name`] in
    /// the directory of the metadata file `source`.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        source.with_file_name(self.file_name())
    }
}

impl fmt::Display for ColorRelief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The header ends with an empty line, hence the blank line
        // before the data.
        f.write_str(&self.header().join("\n"))?;
        for l in self.lines() {
            write!(f, "\n{l}")?;
        }
        Ok(())
    }
}
