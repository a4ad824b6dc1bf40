//! Typed view of a drought-index metadata document.
//!
//! Only the parts needed to build a color relief are kept:
//! ```text
//! { "short_name": string,
//!   "colormap": { "paint": { "fill-color": { "stops": [[number, string], …] } } } }
//! ```
//! Every other key is ignored.

use std::fmt;
use serde::Deserialize;
use serde_json::Value;
use crate::error::{Error, Result};

/// JSON pointer to the stop list inside `colormap`.
const STOPS_POINTER: &str = "/paint/fill-color/stops";

/// Numeric threshold of a [`ColorStop`].
///
/// Displayed in its natural form: integral values without a decimal
/// part (`50`), others with the shortest decimal representation that
/// reads back to the same number (`-0.25`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct StopValue(pub f64);

impl fmt::Display for StopValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `-0.` must print as "0".
        if self.0 == 0. { f.write_str("0") }
        else { write!(f, "{}", self.0) }
    }
}

impl From<f64> for StopValue {
    #[inline]
    fn from(v: f64) -> Self { StopValue(v) }
}

/// One breakpoint of a color ramp: a value and the color text
/// (`rgb(…)` or `rgba(…)`) associated to it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(StopValue, String)")]
pub struct ColorStop {
    pub value: StopValue,
    pub color: String,
}

impl From<(StopValue, String)> for ColorStop {
    fn from((value, color): (StopValue, String)) -> Self {
        ColorStop { value, color }
    }
}

impl ColorStop {
    pub fn new(value: impl Into<StopValue>, color: impl Into<String>) -> Self {
        ColorStop { value: value.into(), color: color.into() }
    }
}

/// The color scale of a drought index.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMetadata {
    /// Index identifier such as `"SPEI-3"`; names the output file.
    pub short_name: String,
    /// Stops from low to high values.  The order is kept as given,
    /// it is never sorted.
    pub stops: Vec<ColorStop>,
}

impl ColorMetadata {
    pub fn new(short_name: impl Into<String>, stops: Vec<ColorStop>) -> Self {
        ColorMetadata { short_name: short_name.into(), stops }
    }

    /// Parse and validate a metadata document.
    ///
    /// Fails with [`Error::InvalidFormat`] when
    /// `colormap.paint.fill-color.stops` is absent, empty or not a list
    /// of `[number, string]` pairs, with [`Error::MissingShortName`]
    /// when `short_name` is not a string and with
    /// [`Error::InvalidShortName`] when it is empty or could leave the
    /// directory of the output file (`/`, `\`, `..`).
    ///
    /// # Example
    ///
    /// ```
    /// use color_relief::ColorMetadata;
    /// let m = ColorMetadata::from_json(r#"{"short_name": "SPI-1",
    ///     "colormap": {"paint": {"fill-color": {"stops": [[-2, "rgb(1,2,3)"]]}}}}"#)?;
    /// assert_eq!(m.short_name, "SPI-1");
    /// assert_eq!(m.stops.len(), 1);
    /// # Ok::<(), color_relief::Error>(())
    /// ```
    pub fn from_json(s: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(s)?;
        Self::try_from(doc)
    }

    /// Same as [`ColorMetadata::from_json`] on raw bytes.
    pub fn from_slice(v: &[u8]) -> Result<Self> {
        let doc: Value = serde_json::from_slice(v)?;
        Self::try_from(doc)
    }
}

/// Whether `s` can be used as a file name stem in the current
/// directory on every platform.
fn is_plain_name(s: &str) -> bool {
    !s.is_empty() && !s.contains(['/', '\\', '\0']) && !s.contains("..")
}

impl TryFrom<Value> for ColorMetadata {
    type Error = Error;

    fn try_from(mut doc: Value) -> Result<Self> {
        let stops = doc.get_mut("colormap")
            .and_then(|c| c.pointer_mut(STOPS_POINTER))
            .map(Value::take)
            .ok_or(Error::InvalidFormat)?;
        let stops = Vec::<ColorStop>::deserialize(stops)
            .map_err(|_| Error::InvalidFormat)?;
        if stops.is_empty() { return Err(Error::InvalidFormat) }
        let short_name = match doc.get_mut("short_name").map(Value::take) {
            Some(Value::String(s)) => s,
            _ => return Err(Error::MissingShortName),
        };
        if !is_plain_name(&short_name) {
            return Err(Error::InvalidShortName(short_name))
        }
        Ok(ColorMetadata { short_name, stops })
    }
}
