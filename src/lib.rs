//! Color ramps of drought indices as GDAL color-relief tables.
//!
//! The display metadata of an index (SPEI, SPI, VHI,…) carries its
//! color scale as Mapbox-style stops `[value, "rgba(r,g,b,a)"]`.
//! [`convert`] turns them into the text table understood by
//! `gdaldem color-relief`:
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! let json = r#"{"short_name": "VHI", "colormap": {"paint": {"fill-color":
//!     {"stops": [[0, "rgba(165,0,38,1)"], [100, "rgba(0,104,55,1)"]]}}}}"#;
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let relief = color_relief::convert_json(json, "VHI.json", now)?;
//! assert_eq!(relief.file_name(), "VHI-colormap.txt");
//! assert!(relief.to_string().ends_with("0 165 0 38 255\n100 0 104 55 255"));
//! # Ok::<(), color_relief::Error>(())
//! ```
//!
//! - [`ColorMetadata`]: validated input.
//! - [`parse_color`]: `rgb(…)`/`rgba(…)` to [`RGBA8`].
//! - [`ColorRelief`]: the output table.

mod color;
mod error;
mod metadata;
mod relief;

pub use rgb::RGBA8;
pub use color::{parse_color, try_parse_color, FALLBACK};
pub use error::{Error, Result};
pub use metadata::{ColorMetadata, ColorStop, StopValue};
pub use relief::{convert, convert_json, parse_timestamp, ColorRelief,
                 FORMAT_LINE};
