//! Configuration structures for deserialisation.
//!
//! These structures map directly to the style configuration files.
//! Every field has a KLC v3 default, so an empty object is a valid config.
//! The style files are shared with other generators, so keys this crate
//! does not use are collected and ignored rather than rejected.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::kicad::Layer;

/// Orientation keys every family looks up.
const REQUIRED_ORIENTATIONS: [&str; 2] = ["H", "V"];

/// Root configuration structure.
///
/// The result of merging the global style config with a series config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema")]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment")]
    _comment: Option<String>,

    /// Footprint name template.
    pub fp_name_format_string: String,

    /// Library name template.
    pub lib_name_format_string: String,

    /// Keyword (tags) template.
    pub keyword_fp_string: String,

    /// Orientation key (`H`, `V`) to the word used in names.
    pub orientation_options: IndexMap<String, String>,

    /// Orientation key to the entry direction used in tags.
    pub entry_direction: IndexMap<String, String>,

    /// Fabrication layer line width (mm).
    pub fab_line_width: f64,

    /// Silkscreen line width (mm).
    pub silk_line_width: f64,

    /// Courtyard line width (mm).
    pub courtyard_line_width: f64,

    /// Clearance between silkscreen and copper (mm).
    pub silk_pad_clearance: f64,

    /// Distance of the silkscreen outline outside the fab outline (mm).
    pub silk_fab_offset: f64,

    /// Courtyard clearances.
    pub courtyard_offset: CourtyardOffset,

    /// Grid courtyard coordinates are rounded to (mm). Zero disables rounding.
    pub courtyard_grid: f64,

    /// Prefix of 3D model paths.
    #[serde(rename = "3d_model_prefix")]
    pub model_3d_prefix: String,

    /// Reference designator fields. The first is the real reference, the
    /// others are `%R` user texts.
    pub references: Vec<TextFieldConfig>,

    /// Value fields. The first is the real value, the others are `%V` user texts.
    pub values: Vec<TextFieldConfig>,

    /// Emit KiCad 4 compatible output.
    pub kicad4_compatible: bool,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Keys used by other generators sharing the style file.
    #[serde(flatten)]
    ignored: IndexMap<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            _schema: None,
            _comment: None,
            fp_name_format_string: "{man:s}_{series:s}_{mpn:s}_{num_rows:01}x{pins_per_row:02}{mounting_pad:s}_P{pitch:.2f}mm_{orientation:s}".to_string(),
            lib_name_format_string: "Connector_{man:s}".to_string(),
            keyword_fp_string: "connector {man:s} {series:s} {orientation:s} {entry:s}".to_string(),
            orientation_options: IndexMap::from([
                ("V".to_string(), "Vertical".to_string()),
                ("H".to_string(), "Horizontal".to_string()),
            ]),
            entry_direction: IndexMap::from([
                ("V".to_string(), "top entry".to_string()),
                ("H".to_string(), "side entry".to_string()),
            ]),
            fab_line_width: 0.1,
            silk_line_width: 0.12,
            courtyard_line_width: 0.05,
            silk_pad_clearance: 0.2,
            silk_fab_offset: 0.11,
            courtyard_offset: CourtyardOffset::default(),
            courtyard_grid: 0.01,
            model_3d_prefix: "${KISYS3DMOD}/".to_string(),
            references: vec![
                TextFieldConfig::new(Layer::FrontSilkscreen, TextPosition::OutsideTop),
                TextFieldConfig::scaled(Layer::FrontFab, TextPosition::Center),
            ],
            values: vec![TextFieldConfig::new(
                Layer::FrontFab,
                TextPosition::OutsideBottom,
            )],
            kicad4_compatible: false,
            logging: LoggingConfig::default(),
            ignored: IndexMap::new(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let widths = [
            ("fab_line_width", self.fab_line_width),
            ("silk_line_width", self.silk_line_width),
            ("courtyard_line_width", self.courtyard_line_width),
        ];
        for (name, width) in widths {
            if width <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {width}")));
            }
        }

        if self.courtyard_grid < 0.0 {
            return Err(invalid(format!(
                "courtyard_grid must not be negative, got {}",
                self.courtyard_grid
            )));
        }

        for key in REQUIRED_ORIENTATIONS {
            if !self.orientation_options.contains_key(key) {
                return Err(invalid(format!("orientation_options is missing '{key}'")));
            }
            if !self.entry_direction.contains_key(key) {
                return Err(invalid(format!("entry_direction is missing '{key}'")));
            }
        }

        if self.references.is_empty() {
            return Err(invalid("at least one references entry is required".to_string()));
        }
        if self.values.is_empty() {
            return Err(invalid("at least one values entry is required".to_string()));
        }
        for field in self.references.iter().chain(&self.values) {
            field.font.validate().map_err(|problem| {
                invalid(format!("text field on {}: {problem}", field.layer))
            })?;
        }

        Ok(())
    }

    /// Orientation word for a key such as `H`, or the key itself if unmapped.
    #[must_use]
    pub fn orientation<'a>(&'a self, key: &'a str) -> &'a str {
        self.orientation_options
            .get(key)
            .map_or(key, String::as_str)
    }

    /// Entry direction for an orientation key.
    #[must_use]
    pub fn entry(&self, key: &str) -> &str {
        self.entry_direction.get(key).map_or("", String::as_str)
    }

    /// Top-level keys present in the style file but not used here.
    pub fn ignored_keys(&self) -> impl Iterator<Item = &str> {
        self.ignored.keys().map(String::as_str)
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError { message }
}

/// Courtyard clearance per component class (mm).
///
/// Only the connector class is read; the other classes of the shared
/// style file are ignored.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CourtyardOffset {
    /// Clearance for connectors.
    pub connector: f64,
}

impl Default for CourtyardOffset {
    fn default() -> Self {
        Self { connector: 0.5 }
    }
}

/// Vertical placement of a text field relative to the part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPosition {
    /// Above the courtyard.
    OutsideTop,
    /// Below the courtyard.
    OutsideBottom,
    /// Inside the body.
    Center,
}

/// Font of a text field: either fixed, or scaled to the part body.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextFont {
    /// Size derived from the body, clamped to `size_min..=size_max`.
    Scaled {
        /// Smallest allowed size (width, height) in mm.
        size_min: [f64; 2],
        /// Largest allowed size (width, height) in mm.
        size_max: [f64; 2],
        /// Stroke thickness as a fraction of the text width.
        thickness_factor: f64,
    },
    /// Fixed size.
    Fixed {
        /// Font size (width, height) in mm.
        #[serde(default = "default_text_size")]
        size: [f64; 2],
        /// Stroke thickness in mm.
        #[serde(default = "default_fontwidth")]
        fontwidth: f64,
    },
}

impl TextFont {
    fn validate(&self) -> Result<(), String> {
        match *self {
            Self::Fixed { size, fontwidth } => {
                if size[0] <= 0.0 || size[1] <= 0.0 || fontwidth <= 0.0 {
                    return Err("size and fontwidth must be positive".to_string());
                }
            }
            Self::Scaled {
                size_min,
                size_max,
                thickness_factor,
            } => {
                if size_min[0] <= 0.0 || size_min[1] <= 0.0 || thickness_factor <= 0.0 {
                    return Err("size_min and thickness_factor must be positive".to_string());
                }
                if size_max[0] < size_min[0] || size_max[1] < size_min[1] {
                    return Err("size_max must not be smaller than size_min".to_string());
                }
            }
        }
        Ok(())
    }
}

/// Placement and font of one text field.
#[derive(Debug, Clone, Deserialize)]
pub struct TextFieldConfig {
    /// Layer the text is drawn on.
    pub layer: Layer,
    /// Vertical placement.
    pub position_y: TextPosition,
    /// Font definition.
    #[serde(flatten)]
    pub font: TextFont,
}

impl TextFieldConfig {
    /// Creates a field with the default 1 mm font.
    #[must_use]
    pub const fn new(layer: Layer, position_y: TextPosition) -> Self {
        Self {
            layer,
            position_y,
            font: TextFont::Fixed {
                size: default_text_size(),
                fontwidth: default_fontwidth(),
            },
        }
    }

    /// Creates a field scaled to the body between 0.25 mm and 1 mm.
    #[must_use]
    pub const fn scaled(layer: Layer, position_y: TextPosition) -> Self {
        Self {
            layer,
            position_y,
            font: TextFont::Scaled {
                size_min: [0.25, 0.25],
                size_max: [1.0, 1.0],
                thickness_factor: 0.15,
            },
        }
    }
}

const fn default_text_size() -> [f64; 2] {
    [1.0, 1.0]
}

const fn default_fontwidth() -> f64 {
    0.15
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.lib_name_format_string, "Connector_{man:s}");
        assert!((config.courtyard_offset.connector - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "KLC v3",
            "fp_name_format_string": "{man}_{series}_{mpn}",
            "lib_name_format_string": "Conn_{man}",
            "keyword_fp_string": "conn {man}",
            "orientation_options": {"H": "Horiz", "V": "Vert"},
            "entry_direction": {"H": "side", "V": "top"},
            "fab_line_width": 0.1,
            "silk_line_width": 0.15,
            "courtyard_line_width": 0.05,
            "silk_pad_clearance": 0.2,
            "silk_fab_offset": 0.11,
            "courtyard_offset": {"default": 0.25, "connector": 0.5},
            "courtyard_grid": 0.05,
            "3d_model_prefix": "${KICAD6_3DMODEL_DIR}/",
            "references": [
                {"layer": "F.SilkS", "position_y": "outside_top", "size": [1, 1], "fontwidth": 0.15}
            ],
            "values": [
                {"layer": "F.Fab", "position_y": "outside_bottom"}
            ],
            "kicad4_compatible": true,
            "logging": {"level": "debug"}
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.orientation("H"), "Horiz");
        assert_eq!(config.entry("V"), "top");
        assert_eq!(config.model_3d_prefix, "${KICAD6_3DMODEL_DIR}/");
        assert!((config.courtyard_grid - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.references.len(), 1);
        assert_eq!(config.references[0].layer, Layer::FrontSilkscreen);
        assert_eq!(config.values[0].position_y, TextPosition::OutsideBottom);
        assert_eq!(
            config.values[0].font,
            TextFont::Fixed {
                size: [1.0, 1.0],
                fontwidth: 0.15
            }
        );
        assert!(config.kicad4_compatible);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn default_text_fields() {
        let config = Config::default();
        assert_eq!(config.references.len(), 2);
        assert_eq!(config.references[0].position_y, TextPosition::OutsideTop);
        assert_eq!(config.references[1].position_y, TextPosition::Center);
        assert!(matches!(config.references[1].font, TextFont::Scaled { .. }));
        assert_eq!(config.values.len(), 1);
    }

    #[test]
    fn orientation_falls_back_to_key() {
        let config = Config::default();
        assert_eq!(config.orientation("H"), "Horizontal");
        let key = String::from("X");
        assert_eq!(config.orientation(&key), "X");
    }

    #[test]
    fn scaled_text_field() {
        let json = r#"{
            "references": [
                {"layer": "F.SilkS", "position_y": "outside_top", "size": [1, 1], "fontwidth": 0.15},
                {"layer": "F.Fab", "position_y": "center", "size_min": [0.25, 0.25], "size_max": [1, 1], "thickness_factor": 0.15}
            ]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.references[1].font,
            TextFont::Scaled {
                size_min: [0.25, 0.25],
                size_max: [1.0, 1.0],
                thickness_factor: 0.15
            }
        );
    }

    #[test]
    fn reject_inverted_scaled_range() {
        let json = r#"{
            "references": [
                {"layer": "F.Fab", "position_y": "center", "size_min": [1, 1], "size_max": [0.5, 0.5], "thickness_factor": 0.15}
            ]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_non_positive_width() {
        let json = r#"{ "silk_line_width": 0 }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("silk_line_width"));
    }

    #[test]
    fn reject_missing_orientation() {
        let json = r#"{ "orientation_options": {"V": "Vertical"} }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_empty_values() {
        let json = r#"{ "values": [] }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_position() {
        let json = r#"{ "references": [{"layer": "F.SilkS", "position_y": "left"}] }"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_are_collected() {
        let json = r#"{
            "silk_reference_text_distance": 0.2,
            "courtyard_offset": {"default": 0.25, "connector": 0.5, "bga": 1.0}
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.ignored_keys().collect::<Vec<_>>(),
            vec!["silk_reference_text_distance"]
        );
    }
}
