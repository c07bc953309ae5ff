//! Name template rendering.
//!
//! Footprint names, library names and keyword strings are built from
//! templates such as
//! `{man:s}_{series:s}_{mpn:s}_{num_rows:01}x{pins_per_row:02}_P{pitch:.2f}mm`.
//!
//! # Placeholder Syntax
//!
//! - `{key}`: value in its plain form
//! - `{key:s}`: string
//! - `{key:02}` / `{key:02d}`: integer, zero padded to width 2
//! - `{key:.2f}`: fixed point with 2 decimals (integers are promoted)
//! - `{{` and `}}`: literal braces
//!
//! A width without a leading zero pads numbers on the left and strings on
//! the right with spaces.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::kicad::{KicadError, KicadResult};

const PLACEHOLDER_PATTERN: &str = r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)(?::([^{}]*))?\}";
const SPEC_PATTERN: &str = r"^(?P<zero>0)?(?P<width>[1-9][0-9]*)?(?:\.(?P<precision>[0-9]+))?(?P<kind>[sdf])?$";

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"))
}

fn spec_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SPEC_PATTERN).expect("format spec pattern is valid"))
}

/// A value substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text.
    Text(String),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl FieldValue {
    const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    fn plain(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            // Whole floats keep one decimal, e.g. "2.0".
            Self::Float(f) if f.is_finite() && f.fract().abs() < f64::EPSILON => format!("{f:.1}"),
            Self::Float(f) => f.to_string(),
        }
    }
}

/// Named template fields, looked up in order.
#[derive(Debug, Clone, Default)]
pub struct Fields(Vec<(&'static str, FieldValue)>);

impl Fields {
    /// Creates an empty field set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a field, builder style.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<FieldValue>) -> Self {
        self.0.push((key, value.into()));
        self
    }

    fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Renders `template`, substituting every placeholder from `fields`.
///
/// # Errors
///
/// Returns [`KicadError::UnknownPlaceholder`] for a key missing from
/// `fields`, and [`KicadError::InvalidFormatSpec`] for a spec that does not
/// apply to the value's type.
///
/// # Examples
///
/// ```
/// use harwin_footprints::connectors::naming::{render, Fields};
///
/// let fields = Fields::new().with("n", 4u32).with("p", 2.0);
/// let name = render("X_{n:02}_P{p:.2f}mm", &fields).unwrap();
/// assert_eq!(name, "X_04_P2.00mm");
/// ```
pub fn render(template: &str, fields: &Fields) -> KicadResult<String> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        out.push_str(&substitute(template, &caps, fields)?);
        last = whole.end();
    }
    out.push_str(&template[last..]);

    Ok(out)
}

fn substitute(template: &str, caps: &Captures<'_>, fields: &Fields) -> KicadResult<Cow<'static, str>> {
    let Some(key) = caps.get(1) else {
        // Escaped brace: "{{" or "}}".
        let brace = if &caps[0] == "{{" { "{" } else { "}" };
        return Ok(Cow::Borrowed(brace));
    };
    let key = key.as_str();
    let value = fields
        .get(key)
        .ok_or_else(|| KicadError::unknown_placeholder(key, template))?;
    let spec = caps.get(2).map_or("", |m| m.as_str());

    apply_spec(key, spec, value).map(Cow::Owned)
}

#[allow(clippy::cast_precision_loss)] // Pin counts and similar small integers
fn apply_spec(key: &str, spec: &str, value: &FieldValue) -> KicadResult<String> {
    if spec.is_empty() {
        return Ok(value.plain());
    }

    let invalid = || KicadError::invalid_format_spec(key, spec);
    let caps = spec_regex().captures(spec).ok_or_else(invalid)?;
    let zero_pad = caps.name("zero").is_some();
    let width = caps
        .name("width")
        .map_or(Ok(0), |m| m.as_str().parse::<usize>())
        .map_err(|_| invalid())?;
    let precision = caps
        .name("precision")
        .map(|m| m.as_str().parse::<usize>())
        .transpose()
        .map_err(|_| invalid())?;
    let kind = caps.name("kind").map(|m| m.as_str());

    let body = match (value, kind, precision) {
        (FieldValue::Text(s), None | Some("s"), None) if !zero_pad => s.clone(),
        (FieldValue::Int(i), None | Some("d"), None) => i.to_string(),
        (FieldValue::Int(i), Some("f"), p) => format!("{:.*}", p.unwrap_or(6), *i as f64),
        (FieldValue::Float(f), Some("f"), p) => format!("{:.*}", p.unwrap_or(6), f),
        (FieldValue::Float(_), None, None) => value.plain(),
        _ => return Err(invalid()),
    };

    Ok(pad(body, width, zero_pad, value.is_numeric()))
}

fn pad(body: String, width: usize, zero_pad: bool, numeric: bool) -> String {
    let len = body.chars().count();
    if len >= width {
        return body;
    }
    let fill = width - len;

    if zero_pad {
        // Zeros go after the sign.
        let (sign, digits) = body
            .strip_prefix('-')
            .map_or(("", body.as_str()), |rest| ("-", rest));
        format!("{sign}{}{digits}", "0".repeat(fill))
    } else if numeric {
        format!("{}{body}", " ".repeat(fill))
    } else {
        format!("{body}{}", " ".repeat(fill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONNECTOR_NAME: &str =
        "{man:s}_{series:s}_{mpn:s}_{num_rows:01}x{pins_per_row:02}{mounting_pad:s}_P{pitch:.2f}mm_{orientation:s}";

    #[test]
    fn connector_name_template() {
        let fields = Fields::new()
            .with("man", "Harwin")
            .with("series", "M80")
            .with("mpn", "54004xx")
            .with("num_rows", 2u32)
            .with("pins_per_row", 2u32)
            .with("mounting_pad", "")
            .with("pitch", 2.0)
            .with("orientation", "Horizontal");
        assert_eq!(
            render(CONNECTOR_NAME, &fields).unwrap(),
            "Harwin_M80_54004xx_2x02_P2.00mm_Horizontal"
        );
    }

    #[test]
    fn integer_specs() {
        let fields = Fields::new().with("n", 7u32);
        assert_eq!(render("{n}", &fields).unwrap(), "7");
        assert_eq!(render("{n:02}", &fields).unwrap(), "07");
        assert_eq!(render("{n:03d}", &fields).unwrap(), "007");
        assert_eq!(render("{n:01}", &fields).unwrap(), "7");
        assert_eq!(render("[{n:3}]", &fields).unwrap(), "[  7]");
        assert_eq!(render("{n:.2f}", &fields).unwrap(), "7.00");
    }

    #[test]
    fn negative_zero_padding_keeps_sign_first() {
        let fields = Fields::new().with("n", FieldValue::Int(-5));
        assert_eq!(render("{n:03}", &fields).unwrap(), "-05");
    }

    #[test]
    fn float_specs() {
        let fields = Fields::new().with("p", 2.54);
        assert_eq!(render("{p:.2f}", &fields).unwrap(), "2.54");
        assert_eq!(render("{p:.1f}", &fields).unwrap(), "2.5");
        assert_eq!(render("{p}", &fields).unwrap(), "2.54");
        assert_eq!(render("{q}", &Fields::new().with("q", 2.0)).unwrap(), "2.0");
    }

    #[test]
    fn string_width_pads_right() {
        let fields = Fields::new().with("s", "ab");
        assert_eq!(render("[{s:4}]", &fields).unwrap(), "[ab  ]");
    }

    #[test]
    fn escaped_braces() {
        let fields = Fields::new().with("x", "v");
        assert_eq!(render("{{{x}}}", &fields).unwrap(), "{v}");
        assert!(render("${KISYS3DMOD}", &Fields::new()).is_err());
    }

    #[test]
    fn unknown_placeholder_is_error() {
        let err = render("{man}_{series}", &Fields::new().with("man", "Harwin")).unwrap_err();
        assert!(matches!(err, KicadError::UnknownPlaceholder { ref key, .. } if key == "series"));
    }

    #[test]
    fn mismatched_spec_is_error() {
        let text = Fields::new().with("s", "abc");
        assert!(render("{s:.2f}", &text).is_err());
        assert!(render("{s:02}", &text).is_err());

        let float = Fields::new().with("f", 1.5);
        assert!(render("{f:d}", &float).is_err());
        assert!(render("{f:s}", &float).is_err());
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        assert_eq!(
            render("connector harwin ltek M80", &Fields::new()).unwrap(),
            "connector harwin ltek M80"
        );
    }
}
