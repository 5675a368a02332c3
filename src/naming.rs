//! Typed naming templates.
//!
//! Footprint names, keyword strings and library names are configured as
//! format strings such as `{man:s}_{series:s}_{mpn:s}_{num_rows:01}x{pins_per_row:02d}`.
//! Each string is parsed once, when the configuration loads, against the
//! fields its [`TemplateKind`] provides. Unknown fields and format specs
//! that do not fit the field type are rejected at that point, so rendering
//! never fails.
//!
//! # Placeholder Syntax
//!
//! `{name}` or `{name:spec}` where `spec` is `[0][width][.precision][type]`
//! and `type` is one of `s` (string), `d` (integer) or `f` (fixed point).
//! A float precision needs the `f` type. `{{` and `}}` are literal braces.

use std::marker::PhantomData;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::error::TemplateError;

/// Type of value a template field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Text value.
    Str,
    /// Unsigned integer value.
    Int,
    /// Floating point value (millimetres).
    Float,
}

impl FieldKind {
    const fn describe(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "integer",
            Self::Float => "float",
        }
    }
}

/// A concrete field value supplied at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Text value.
    Str(&'a str),
    /// Unsigned integer value.
    Int(u32),
    /// Floating point value.
    Float(f64),
}

/// A family of templates sharing one set of named fields.
pub trait TemplateKind {
    /// Field names and their types.
    const FIELDS: &'static [(&'static str, FieldKind)];

    /// Values supplied when rendering.
    type Values<'a>;

    /// Looks up a field by name.
    fn lookup<'v>(values: &'v Self::Values<'_>, name: &str) -> Option<FieldValue<'v>>;
}

/// Parsed `[0][width][.precision][type]` spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FormatSpec {
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
    ty: Option<char>,
}

impl FormatSpec {
    fn parse(field: &str, spec: &str) -> Result<Self, TemplateError> {
        static SPEC: OnceLock<Regex> = OnceLock::new();
        let re = SPEC.get_or_init(|| {
            Regex::new(r"^(0)?([0-9]+)?(?:\.([0-9]+))?([sdf])?$").expect("spec pattern is valid")
        });

        let invalid = || TemplateError::InvalidSpec {
            field: field.to_string(),
            spec: spec.to_string(),
        };
        let caps = re.captures(spec).ok_or_else(invalid)?;

        let width = match caps.get(2) {
            Some(m) => m.as_str().parse().map_err(|_| invalid())?,
            None => 0,
        };
        let precision = match caps.get(3) {
            Some(m) => Some(m.as_str().parse().map_err(|_| invalid())?),
            None => None,
        };

        Ok(Self {
            zero_pad: caps.get(1).is_some(),
            width,
            precision,
            ty: caps.get(4).and_then(|m| m.as_str().chars().next()),
        })
    }

    /// Checks the spec against the field kind.
    const fn accepts(&self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Str => {
                !self.zero_pad && self.precision.is_none() && matches!(self.ty, None | Some('s'))
            }
            FieldKind::Int => match self.ty {
                None | Some('d') => self.precision.is_none(),
                Some('f') => true,
                Some(_) => false,
            },
            FieldKind::Float => match self.ty {
                None => self.precision.is_none(),
                Some('f') => true,
                Some(_) => false,
            },
        }
    }

    fn format(&self, value: FieldValue<'_>, out: &mut String) {
        match value {
            FieldValue::Str(s) => {
                out.push_str(s);
                let len = s.chars().count();
                if len < self.width {
                    out.extend(std::iter::repeat(' ').take(self.width - len));
                }
            }
            FieldValue::Int(i) if self.ty == Some('f') => {
                self.pad_number(&format_float(f64::from(i), self.precision.or(Some(6))), out);
            }
            FieldValue::Int(i) => self.pad_number(&i.to_string(), out),
            FieldValue::Float(f) => {
                let precision = match (self.precision, self.ty) {
                    (Some(p), _) => Some(p),
                    (None, Some('f')) => Some(6),
                    (None, _) => None,
                };
                self.pad_number(&format_float(f, precision), out);
            }
        }
    }

    fn pad_number(&self, digits: &str, out: &mut String) {
        let len = digits.chars().count();
        if len >= self.width {
            out.push_str(digits);
            return;
        }
        let fill = self.width - len;
        if self.zero_pad {
            let (sign, rest) = digits
                .strip_prefix('-')
                .map_or(("", digits), |rest| ("-", rest));
            out.push_str(sign);
            out.extend(std::iter::repeat('0').take(fill));
            out.push_str(rest);
        } else {
            out.extend(std::iter::repeat(' ').take(fill));
            out.push_str(digits);
        }
    }
}

/// Formats a float either with fixed precision or in short form, where
/// integral values keep one decimal (`1.0`).
fn format_float(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{value:.p$}"),
        None if value.fract() == 0.0 && value.abs() < 1e16 => format!("{value:.1}"),
        None => format!("{value}"),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Field { name: &'static str, spec: FormatSpec },
}

/// A parsed, validated naming template.
#[derive(Debug, Clone)]
pub struct Template<K> {
    source: String,
    segments: Vec<Segment>,
    kind: PhantomData<K>,
}

impl<K: TemplateKind> Template<K> {
    /// Parses a template, checking every placeholder against `K::FIELDS`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown fields, malformed specs, specs that do
    /// not match the field type, or stray braces. A lone `{` or `}` is
    /// stray; doubled ones render as one literal brace.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER.get_or_init(|| {
            Regex::new(r"\{\{|\}\}|\{([^{}]*)\}").expect("placeholder pattern is valid")
        });

        let unbalanced = || TemplateError::UnbalancedBrace {
            template: source.to_string(),
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for caps in re.captures_iter(source) {
            let whole = caps.get(0).ok_or_else(unbalanced)?;
            push_literal(&mut segments, &source[last..whole.start()]).ok_or_else(unbalanced)?;
            last = whole.end();

            // Doubled brace
            let Some(body) = caps.get(1).map(|m| m.as_str()) else {
                segments.push(Segment::Literal(whole.as_str()[..1].to_string()));
                continue;
            };
            let (name, spec) = body.split_once(':').unwrap_or((body, ""));
            let (field, kind) = K::FIELDS
                .iter()
                .find(|(field, _)| *field == name)
                .copied()
                .ok_or_else(|| TemplateError::UnknownField {
                    field: name.to_string(),
                    template: source.to_string(),
                })?;

            let spec = FormatSpec::parse(field, spec)?;
            if !spec.accepts(kind) {
                return Err(TemplateError::TypeMismatch {
                    field: field.to_string(),
                    spec: body.split_once(':').map_or("", |(_, s)| s).to_string(),
                    kind: kind.describe(),
                });
            }
            segments.push(Segment::Field { name: field, spec });
        }
        push_literal(&mut segments, &source[last..]).ok_or_else(unbalanced)?;

        Ok(Self {
            source: source.to_string(),
            segments,
            kind: PhantomData,
        })
    }

    /// Renders the template with the given values.
    #[must_use]
    pub fn render(&self, values: &K::Values<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { name, spec } => {
                    let value = K::lookup(values, name).unwrap_or(FieldValue::Str(""));
                    spec.format(value, &mut out);
                }
            }
        }
        out
    }
}

/// Pushes a literal segment, rejecting stray braces.
fn push_literal(segments: &mut Vec<Segment>, text: &str) -> Option<()> {
    if text.contains(['{', '}']) {
        return None;
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Some(())
}

impl<'de, K: TemplateKind> Deserialize<'de> for Template<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::parse(&source).map_err(serde::de::Error::custom)
    }
}

/// Footprint name template (`fp_name_format_string`).
#[derive(Debug, Clone, Copy)]
pub struct FootprintName;

/// Values for [`FootprintName`] templates.
#[derive(Debug, Clone, Copy)]
pub struct FootprintNameFields<'a> {
    /// Manufacturer.
    pub man: &'a str,
    /// Series name (may be empty).
    pub series: &'a str,
    /// Manufacturer part number.
    pub mpn: &'a str,
    /// Number of pin rows.
    pub num_rows: u32,
    /// Total pin count.
    pub pins: u32,
    /// Pins in each row.
    pub pins_per_row: u32,
    /// Mounting pad suffix such as `-1MP`, or empty.
    pub mounting_pad: &'a str,
    /// Pin pitch in mm.
    pub pitch: f64,
    /// Orientation text from `orientation_options`.
    pub orientation: &'a str,
}

impl TemplateKind for FootprintName {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("man", FieldKind::Str),
        ("series", FieldKind::Str),
        ("mpn", FieldKind::Str),
        ("num_rows", FieldKind::Int),
        ("pins", FieldKind::Int),
        ("pins_per_row", FieldKind::Int),
        ("mounting_pad", FieldKind::Str),
        ("pitch", FieldKind::Float),
        ("orientation", FieldKind::Str),
    ];

    type Values<'a> = FootprintNameFields<'a>;

    fn lookup<'v>(values: &'v Self::Values<'_>, name: &str) -> Option<FieldValue<'v>> {
        Some(match name {
            "man" => FieldValue::Str(values.man),
            "series" => FieldValue::Str(values.series),
            "mpn" => FieldValue::Str(values.mpn),
            "num_rows" => FieldValue::Int(values.num_rows),
            "pins" => FieldValue::Int(values.pins),
            "pins_per_row" => FieldValue::Int(values.pins_per_row),
            "mounting_pad" => FieldValue::Str(values.mounting_pad),
            "pitch" => FieldValue::Float(values.pitch),
            "orientation" => FieldValue::Str(values.orientation),
            _ => return None,
        })
    }
}

/// Keyword template (`keyword_fp_string`).
#[derive(Debug, Clone, Copy)]
pub struct Keywords;

/// Values for [`Keywords`] templates.
#[derive(Debug, Clone, Copy)]
pub struct KeywordFields<'a> {
    /// Manufacturer.
    pub man: &'a str,
    /// Series name.
    pub series: &'a str,
    /// Orientation text.
    pub orientation: &'a str,
    /// Entry direction text.
    pub entry: &'a str,
}

impl TemplateKind for Keywords {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("man", FieldKind::Str),
        ("series", FieldKind::Str),
        ("orientation", FieldKind::Str),
        ("entry", FieldKind::Str),
    ];

    type Values<'a> = KeywordFields<'a>;

    fn lookup<'v>(values: &'v Self::Values<'_>, name: &str) -> Option<FieldValue<'v>> {
        Some(FieldValue::Str(match name {
            "man" => values.man,
            "series" => values.series,
            "orientation" => values.orientation,
            "entry" => values.entry,
            _ => return None,
        }))
    }
}

/// Library name template keyed by manufacturer (`lib_name_format_string`).
#[derive(Debug, Clone, Copy)]
pub struct LibraryName;

/// Values for [`LibraryName`] templates.
#[derive(Debug, Clone, Copy)]
pub struct LibraryNameFields<'a> {
    /// Manufacturer.
    pub man: &'a str,
    /// Series name.
    pub series: &'a str,
}

impl TemplateKind for LibraryName {
    const FIELDS: &'static [(&'static str, FieldKind)] =
        &[("man", FieldKind::Str), ("series", FieldKind::Str)];

    type Values<'a> = LibraryNameFields<'a>;

    fn lookup<'v>(values: &'v Self::Values<'_>, name: &str) -> Option<FieldValue<'v>> {
        match name {
            "man" => Some(FieldValue::Str(values.man)),
            "series" => Some(FieldValue::Str(values.series)),
            _ => None,
        }
    }
}

/// Library name template keyed by connector category
/// (`lib_name_specific_function_format_string`).
#[derive(Debug, Clone, Copy)]
pub struct LibraryCategory;

impl TemplateKind for LibraryCategory {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[("category", FieldKind::Str)];

    type Values<'a> = &'a str;

    fn lookup<'v>(values: &'v Self::Values<'_>, name: &str) -> Option<FieldValue<'v>> {
        (name == "category").then_some(FieldValue::Str(*values))
    }
}

/// Collapses the `__` left behind by an empty series field.
#[must_use]
pub fn collapse_underscores(name: &str) -> String {
    name.replace("__", "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    const KLC_NAME: &str =
        "{man:s}_{series:s}_{mpn:s}_{num_rows:01}x{pins_per_row:02d}{mounting_pad:s}_P{pitch:.2f}mm_{orientation:s}";

    fn molex_fields() -> FootprintNameFields<'static> {
        FootprintNameFields {
            man: "Molex",
            series: "",
            mpn: "52207-1060",
            num_rows: 1,
            pins: 10,
            pins_per_row: 10,
            mounting_pad: "-1MP",
            pitch: 1.0,
            orientation: "Horizontal",
        }
    }

    #[test]
    fn renders_klc_footprint_name() {
        let template = Template::<FootprintName>::parse(KLC_NAME).unwrap();
        let name = collapse_underscores(&template.render(&molex_fields()));
        assert_eq!(name, "Molex_52207-1060_1x10-1MP_P1.00mm_Horizontal");
    }

    #[test]
    fn unformatted_float_keeps_one_decimal() {
        let template = Template::<FootprintName>::parse("P{pitch}").unwrap();
        assert_eq!(template.render(&molex_fields()), "P1.0");
    }

    #[test]
    fn integer_width_without_zero_pads_with_spaces() {
        let template = Template::<FootprintName>::parse("[{pins:3}]").unwrap();
        assert_eq!(template.render(&molex_fields()), "[ 10]");
    }

    #[test]
    fn rejects_unknown_field() {
        let err = Template::<LibraryName>::parse("Connector_{colour}").unwrap_err();
        assert!(matches!(err, TemplateError::UnknownField { ref field, .. } if field == "colour"));
    }

    #[test]
    fn rejects_integer_spec_on_string() {
        let err = Template::<FootprintName>::parse("{man:02d}").unwrap_err();
        assert!(matches!(err, TemplateError::TypeMismatch { .. }));
    }

    #[test]
    fn rejects_precision_on_integer() {
        let err = Template::<FootprintName>::parse("{pins:.2}").unwrap_err();
        assert!(matches!(err, TemplateError::TypeMismatch { .. }));
    }

    #[test]
    fn rejects_float_precision_without_type() {
        let err = Template::<FootprintName>::parse("P{pitch:.2}mm").unwrap_err();
        assert!(matches!(err, TemplateError::TypeMismatch { ref field, .. } if field == "pitch"));

        let fixed = Template::<FootprintName>::parse("P{pitch:.2f}mm").unwrap();
        assert_eq!(fixed.render(&molex_fields()), "P1.00mm");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let template = Template::<FootprintName>::parse("{{{pins:02d}}}_{{x}}").unwrap();
        assert_eq!(template.render(&molex_fields()), "{10}_{x}");
    }

    #[test]
    fn rejects_lone_closing_brace() {
        let err = Template::<LibraryCategory>::parse("Connector}_{category}").unwrap_err();
        assert!(matches!(err, TemplateError::UnbalancedBrace { .. }));
    }

    #[test]
    fn rejects_garbage_spec() {
        let err = Template::<FootprintName>::parse("{pitch:>8x}").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidSpec { .. }));
    }

    #[test]
    fn rejects_stray_brace() {
        let err = Template::<LibraryCategory>::parse("Connector_{category").unwrap_err();
        assert!(matches!(err, TemplateError::UnbalancedBrace { .. }));
    }

    #[test]
    fn category_template() {
        let template = Template::<LibraryCategory>::parse("Connector_{category:s}").unwrap();
        assert_eq!(template.render(&"FFC-FPC"), "Connector_FFC-FPC");
    }

    #[test]
    fn deserialises_and_validates() {
        let ok: Result<Template<Keywords>, _> =
            serde_yaml::from_str("\"{man:s} {series:s} {orientation:s} {entry:s}\"");
        assert!(ok.is_ok());

        let bad: Result<Template<Keywords>, _> = serde_yaml::from_str("\"{mpn}\"");
        assert!(bad.is_err());
    }
}
