//! Geotag annotations embedded in chapter markup.
//!
//! The content service renders every map reference as an anchor whose
//! `onclick` calls a function with eleven positional arguments:
//!
//! ```text
//! showLocation(id,'name',lat,lon,viewLat,viewLon,viewTilt,viewRoll,viewAltitude,viewHeading,'flag')
//! ```

use std::sync::LazyLock;

use foundation::GeoPlace;
use regex::Regex;
use serde::Serialize;

const NUM: &str = r"\s*([^,'()]*?)\s*";
const GEOTAG_ARGS: usize = 11;
const QUOTED: &str = r"\s*'((?:[^'\\]|\\.)*)'\s*";

static ONCLICK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\sonclick\s*=\s*"([^"]*)""#).expect("valid onclick pattern")
});

static CALL: LazyLock<Regex> = LazyLock::new(|| {
    let numbers = vec![NUM; 8].join(",");
    let pattern = format!(
        r"^\s*[A-Za-z_$][\w$.]*\(\s*([^,()]*?)\s*,{QUOTED},{numbers},{QUOTED}\)\s*;?\s*$"
    );
    Regex::new(&pattern).expect("valid geotag call pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeotagError {
    /// The handler is not an eleven-argument geotag call.
    NotACall(String),
    BadNumber { field: &'static str, value: String },
}

impl std::fmt::Display for GeotagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeotagError::NotACall(src) => write!(f, "not a geotag call: {src}"),
            GeotagError::BadNumber { field, value } => {
                write!(f, "geotag field {field} is not a number: {value}")
            }
        }
    }
}

impl std::error::Error for GeotagError {}

/// Camera parameters the service suggests for viewing a place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoView {
    pub latitude: f64,
    pub longitude: f64,
    pub tilt: f64,
    pub roll: f64,
    pub altitude: f64,
    pub heading: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geotag {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub view: GeoView,
    pub flag: String,
}

impl Geotag {
    /// Marker label: the name, followed by the flag when one is set.
    pub fn label(&self) -> String {
        if self.flag.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.flag)
        }
    }

    pub fn place(&self) -> GeoPlace {
        GeoPlace::new(self.label(), self.latitude, self.longitude, self.view.altitude)
    }
}

/// Parses a single `onclick` handler (entities already decoded).
pub fn parse_geotag_call(handler: &str) -> Result<Geotag, GeotagError> {
    let caps = CALL
        .captures(handler)
        .ok_or_else(|| GeotagError::NotACall(handler.to_string()))?;

    let number = |idx: usize, field: &'static str| -> Result<f64, GeotagError> {
        let raw = &caps[idx];
        raw.parse::<f64>().map_err(|_| GeotagError::BadNumber {
            field,
            value: raw.to_string(),
        })
    };

    Ok(Geotag {
        id: caps[1].to_string(),
        name: unquote(&caps[2]),
        latitude: number(3, "latitude")?,
        longitude: number(4, "longitude")?,
        view: GeoView {
            latitude: number(5, "viewLatitude")?,
            longitude: number(6, "viewLongitude")?,
            tilt: number(7, "viewTilt")?,
            roll: number(8, "viewRoll")?,
            altitude: number(9, "viewAltitude")?,
            heading: number(10, "viewHeading")?,
        },
        flag: unquote(&caps[11]),
    })
}

fn unquote(s: &str) -> String {
    s.replace("\\'", "'").replace("\\\\", "\\")
}

/// Every anchor `onclick` handler in `html`, decoded, in document order.
pub fn onclick_handlers(html: &str) -> impl Iterator<Item = String> + '_ {
    ONCLICK
        .captures_iter(html)
        .map(|caps| htmlize::unescape(&caps[1]).into_owned())
}

/// Parses every anchor handler carrying at least the eleven geotag arguments.
/// Shorter handlers (toggles, footnotes) are skipped; long ones with the
/// wrong shape surface as errors.
pub fn scan_geotags(html: &str) -> impl Iterator<Item = Result<Geotag, GeotagError>> + '_ {
    onclick_handlers(html)
        .filter(|handler| handler.matches(',').count() >= GEOTAG_ARGS - 1)
        .map(|handler| parse_geotag_call(&handler))
}
