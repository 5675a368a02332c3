//! Configuration structures for deserialisation.
//!
//! These structures map directly to the merged YAML configuration (global
//! style document overlaid with the series document). Unknown keys are
//! ignored: the global document is shared with generators for other part
//! families.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::kicad::Layer;
use crate::naming::{FootprintName, Keywords, LibraryCategory, LibraryName, Template};

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Footprint name template.
    pub fp_name_format_string: Template<FootprintName>,

    /// Keyword (tags) template.
    pub keyword_fp_string: Template<Keywords>,

    /// Library name template keyed by manufacturer.
    pub lib_name_format_string: Template<LibraryName>,

    /// Library name template keyed by connector category.
    pub lib_name_specific_function_format_string: Template<LibraryCategory>,

    /// Orientation names used in footprint names.
    pub orientation_options: OrientationStrings,

    /// Entry direction names used in keywords.
    pub entry_direction: OrientationStrings,

    /// Pad number given to mechanical mounting pads.
    #[serde(default = "default_mounting_pad_number")]
    pub mounting_pad_number: String,

    /// Silkscreen line width in mm.
    pub silk_line_width: f64,

    /// Fabrication layer line width in mm.
    pub fab_line_width: f64,

    /// Courtyard line width in mm.
    pub courtyard_line_width: f64,

    /// Clearance between silkscreen lines and pad copper in mm.
    pub silk_pad_clearance: f64,

    /// Distance between fab outline and silkscreen outline in mm.
    pub silk_fab_offset: f64,

    /// Grid the courtyard corners snap to in mm.
    pub courtyard_grid: f64,

    /// Courtyard clearance around the part.
    pub courtyard_offset: CourtyardOffset,

    /// Size of the pin 1 marker drawn on the fab layer in mm.
    #[serde(default = "default_fab_pin1_marker_length")]
    pub fab_pin1_marker_length: f64,

    /// Reference designator fields.
    #[serde(default = "default_references")]
    pub references: Vec<TextFieldConfig>,

    /// Value fields.
    #[serde(default = "default_values")]
    pub values: Vec<TextFieldConfig>,

    /// Prefix for 3D model paths.
    #[serde(rename = "3d_model_prefix", default = "default_model_prefix")]
    pub model_prefix: String,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("silk_line_width", self.silk_line_width),
            ("fab_line_width", self.fab_line_width),
            ("courtyard_line_width", self.courtyard_line_width),
            ("courtyard_grid", self.courtyard_grid),
            ("fab_pin1_marker_length", self.fab_pin1_marker_length),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{key} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("silk_pad_clearance", self.silk_pad_clearance),
            ("silk_fab_offset", self.silk_fab_offset),
            ("courtyard_offset.connector", self.courtyard_offset.connector),
            ("courtyard_offset.default", self.courtyard_offset.default),
        ];
        for (key, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{key} must not be negative, got {value}")));
            }
        }

        if self.mounting_pad_number.trim().is_empty() {
            return Err(invalid("mounting_pad_number must not be empty".to_string()));
        }

        for (group, fields) in [("references", &self.references), ("values", &self.values)] {
            for (i, field) in fields.iter().enumerate() {
                if field.size.iter().any(|s| !(s.is_finite() && *s > 0.0)) || field.fontwidth <= 0.0
                {
                    return Err(invalid(format!(
                        "{group}[{i}] must have a positive size and fontwidth"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Returns the silkscreen-to-pad offset: clearance plus half a silk line.
    #[must_use]
    pub fn pad_silk_offset(&self) -> f64 {
        self.silk_pad_clearance + self.silk_line_width / 2.0
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError { message }
}

/// Connector orientation relative to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Mating direction parallel to the board (right-angle / angled).
    Horizontal,
    /// Mating direction perpendicular to the board.
    Vertical,
}

impl Orientation {
    /// Returns the orientation for an angled flag.
    #[must_use]
    pub const fn from_angled(angled: bool) -> Self {
        if angled {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// Strings keyed by orientation (`H` / `V`).
#[derive(Debug, Clone, Deserialize)]
pub struct OrientationStrings {
    /// Text for horizontal parts.
    #[serde(rename = "H")]
    pub horizontal: String,
    /// Text for vertical parts.
    #[serde(rename = "V")]
    pub vertical: String,
}

impl OrientationStrings {
    /// Returns the text for an orientation.
    #[must_use]
    pub fn get(&self, orientation: Orientation) -> &str {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }
}

/// Courtyard clearances in mm.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CourtyardOffset {
    /// Clearance used for connectors.
    pub connector: f64,
    /// Clearance used for everything else.
    #[serde(default = "default_courtyard_offset")]
    pub default: f64,
}

/// Vertical placement of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPosition {
    /// Above the courtyard.
    OutsideTop,
    /// Below the courtyard.
    OutsideBottom,
    /// Inside the body, placed per the generator's inside position.
    Inside,
    /// At the body centre.
    Center,
}

/// One reference or value text field.
#[derive(Debug, Clone, Deserialize)]
pub struct TextFieldConfig {
    /// Target layer.
    pub layer: Layer,
    /// Vertical placement.
    pub position_y: TextPosition,
    /// Glyph width and height in mm.
    #[serde(default = "default_text_size")]
    pub size: [f64; 2],
    /// Stroke thickness in mm.
    #[serde(default = "default_fontwidth")]
    pub fontwidth: f64,
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

fn default_mounting_pad_number() -> String {
    "MP".to_string()
}

const fn default_fab_pin1_marker_length() -> f64 {
    1.0
}

const fn default_courtyard_offset() -> f64 {
    0.25
}

const fn default_text_size() -> [f64; 2] {
    [1.0, 1.0]
}

const fn default_fontwidth() -> f64 {
    0.15
}

fn default_references() -> Vec<TextFieldConfig> {
    vec![
        TextFieldConfig {
            layer: Layer::FrontSilkscreen,
            position_y: TextPosition::OutsideTop,
            size: default_text_size(),
            fontwidth: default_fontwidth(),
        },
        TextFieldConfig {
            layer: Layer::FrontFab,
            position_y: TextPosition::Inside,
            size: default_text_size(),
            fontwidth: default_fontwidth(),
        },
    ]
}

fn default_values() -> Vec<TextFieldConfig> {
    vec![TextFieldConfig {
        layer: Layer::FrontFab,
        position_y: TextPosition::OutsideBottom,
        size: default_text_size(),
        fontwidth: default_fontwidth(),
    }]
}

fn default_model_prefix() -> String {
    "${KISYS3DMOD}/".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
fp_name_format_string: "{man:s}_{series:s}_{mpn:s}_{num_rows:01}x{pins_per_row:02d}{mounting_pad:s}_P{pitch:.2f}mm_{orientation:s}"
keyword_fp_string: "connector {man:s} {series:s} {orientation:s} {entry:s}"
lib_name_format_string: "Connector_{man:s}"
lib_name_specific_function_format_string: "Connector_{category:s}"
orientation_options:
  H: Horizontal
  V: Vertical
entry_direction:
  H: side entry
  V: top entry
silk_line_width: 0.12
fab_line_width: 0.1
courtyard_line_width: 0.05
silk_pad_clearance: 0.2
silk_fab_offset: 0.11
courtyard_grid: 0.01
courtyard_offset:
  default: 0.25
  connector: 0.5
  bga: 1.0
"#;

    fn parse(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn parse_full_config() {
        let config = parse(FULL_CONFIG);
        assert!(config.validate().is_ok());
        assert_eq!(config.mounting_pad_number, "MP");
        assert_eq!(config.model_prefix, "${KISYS3DMOD}/");
        assert!((config.courtyard_offset.connector - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.orientation_options.get(Orientation::Horizontal), "Horizontal");
        assert_eq!(config.entry_direction.get(Orientation::Vertical), "top entry");
        assert_eq!(config.references.len(), 2);
        assert_eq!(config.values[0].position_y, TextPosition::OutsideBottom);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn pad_silk_offset_adds_half_line() {
        let config = parse(FULL_CONFIG);
        assert!((config.pad_silk_offset() - 0.26).abs() < 1e-12);
    }

    #[test]
    fn missing_key_is_rejected() {
        let yaml = FULL_CONFIG.replace("courtyard_grid: 0.01\n", "");
        let result: Result<Config, _> = serde_yaml::from_str(&yaml);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("courtyard_grid"));
    }

    #[test]
    fn bad_template_is_rejected_at_load() {
        let yaml = FULL_CONFIG.replace("Connector_{man:s}\"", "Connector_{vendor:s}\"");
        let result: Result<Config, _> = serde_yaml::from_str(&yaml);
        assert!(result.unwrap_err().to_string().contains("vendor"));
    }

    #[test]
    fn reject_zero_grid() {
        let yaml = FULL_CONFIG.replace("courtyard_grid: 0.01", "courtyard_grid: 0");
        assert!(parse(&yaml).validate().is_err());
    }

    #[test]
    fn reject_negative_offset() {
        let yaml = FULL_CONFIG.replace("silk_fab_offset: 0.11", "silk_fab_offset: -0.11");
        assert!(parse(&yaml).validate().is_err());
    }

    #[test]
    fn text_fields_parse_layers() {
        let yaml = format!(
            "{FULL_CONFIG}references:\n  - layer: F.SilkS\n    position_y: outside_top\n    size: [1.2, 1.2]\n    fontwidth: 0.18\n"
        );
        let config = parse(&yaml);
        assert_eq!(config.references.len(), 1);
        assert_eq!(config.references[0].layer, Layer::FrontSilkscreen);
        assert!((config.references[0].size[0] - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }
}
