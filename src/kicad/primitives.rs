//! Footprint primitive types.
//!
//! These are the drawing instructions that make up a footprint: poly-lines,
//! rectangles, circles, pads and text. Each one carries its layer; line
//! primitives also carry their stroke width.

use serde::{Deserialize, Serialize};

/// A 2D point in millimetres. KiCad's Y axis points down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// KiCad board layers used by generated footprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Front copper.
    #[serde(rename = "F.Cu")]
    FrontCopper,
    /// Front silkscreen.
    #[serde(rename = "F.SilkS")]
    FrontSilkscreen,
    /// Front fabrication (documentation) layer.
    #[serde(rename = "F.Fab")]
    FrontFab,
    /// Front courtyard.
    #[serde(rename = "F.CrtYd")]
    FrontCourtyard,
    /// Front solder paste.
    #[serde(rename = "F.Paste")]
    FrontPaste,
    /// Front solder mask.
    #[serde(rename = "F.Mask")]
    FrontMask,
    /// All copper layers.
    #[serde(rename = "*.Cu")]
    AllCopper,
    /// Both solder mask layers.
    #[serde(rename = "*.Mask")]
    AllMask,
}

impl Layer {
    /// Returns the KiCad layer name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FrontCopper => "F.Cu",
            Self::FrontSilkscreen => "F.SilkS",
            Self::FrontFab => "F.Fab",
            Self::FrontCourtyard => "F.CrtYd",
            Self::FrontPaste => "F.Paste",
            Self::FrontMask => "F.Mask",
            Self::AllCopper => "*.Cu",
            Self::AllMask => "*.Mask",
        }
    }
}

/// Pad mounting technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PadType {
    /// Surface mount.
    Smt,
    /// Plated through hole.
    ThroughHole,
    /// Non-plated hole (mechanical).
    NpThroughHole,
}

impl PadType {
    /// Returns the KiCad keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smt => "smd",
            Self::ThroughHole => "thru_hole",
            Self::NpThroughHole => "np_thru_hole",
        }
    }

    /// Layer set used by this pad type.
    #[must_use]
    pub const fn layers(self) -> &'static [Layer] {
        match self {
            Self::Smt => &[Layer::FrontCopper, Layer::FrontPaste, Layer::FrontMask],
            Self::ThroughHole | Self::NpThroughHole => &[Layer::AllCopper, Layer::AllMask],
        }
    }
}

/// Copper pad shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PadShape {
    /// Rectangle.
    Rect,
    /// Oval / obround.
    Oval,
    /// Circle.
    Circle,
}

impl PadShape {
    /// Returns the KiCad keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Oval => "oval",
            Self::Circle => "circle",
        }
    }
}

/// A pad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pad {
    /// Pad number; empty for mechanical holes.
    pub number: String,
    /// Mounting technology.
    pub pad_type: PadType,
    /// Copper shape.
    pub shape: PadShape,
    /// Centre position.
    pub at: Point,
    /// Width and height (mm).
    pub size: (f64, f64),
    /// Drill diameter for through-hole pads (mm).
    pub drill: Option<f64>,
}

impl Pad {
    /// Creates a rectangular SMT pad.
    #[must_use]
    pub fn smt(number: impl Into<String>, at: Point, size: (f64, f64)) -> Self {
        Self {
            number: number.into(),
            pad_type: PadType::Smt,
            shape: PadShape::Rect,
            at,
            size,
            drill: None,
        }
    }

    /// Creates a plated through-hole pad.
    #[must_use]
    pub fn through_hole(
        number: impl Into<String>,
        at: Point,
        size: (f64, f64),
        shape: PadShape,
        drill: f64,
    ) -> Self {
        Self {
            number: number.into(),
            pad_type: PadType::ThroughHole,
            shape,
            at,
            size,
            drill: Some(drill),
        }
    }

    /// Creates an unnumbered non-plated mounting hole.
    #[must_use]
    pub fn mounting_hole(at: Point, drill: f64) -> Self {
        Self {
            number: String::new(),
            pad_type: PadType::NpThroughHole,
            shape: PadShape::Circle,
            at,
            size: (drill, drill),
            drill: Some(drill),
        }
    }

    /// Repeats this pad `count` times along X, centred on `center`.
    ///
    /// Pads are numbered from 1 in order of increasing X.
    #[must_use]
    pub fn array(&self, count: u32, center: Point, x_spacing: f64) -> Vec<Self> {
        let first_x = center.x - f64::from(count.saturating_sub(1)) * x_spacing / 2.0;
        (0..count)
            .map(|i| Self {
                number: (i + 1).to_string(),
                at: Point::new(f64::from(i).mul_add(x_spacing, first_x), center.y),
                ..self.clone()
            })
            .collect()
    }
}

/// An open or closed sequence of line segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolyLine {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Target layer.
    pub layer: Layer,
    /// Stroke width (mm).
    pub width: f64,
}

impl PolyLine {
    /// Creates a poly-line from anything convertible to points.
    #[must_use]
    pub fn new<P: Into<Point>>(
        points: impl IntoIterator<Item = P>,
        layer: Layer,
        width: f64,
    ) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
            layer,
            width,
        }
    }
}

/// An axis-aligned rectangle outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// First corner.
    pub start: Point,
    /// Opposite corner.
    pub end: Point,
    /// Target layer.
    pub layer: Layer,
    /// Stroke width (mm).
    pub width: f64,
}

impl Rect {
    /// Creates a rectangle outline.
    #[must_use]
    pub const fn new(start: Point, end: Point, layer: Layer, width: f64) -> Self {
        Self {
            start,
            end,
            layer,
            width,
        }
    }

    /// Returns the four corners in drawing order, starting at `start`.
    #[must_use]
    pub const fn corners(&self) -> [Point; 4] {
        [
            self.start,
            Point::new(self.end.x, self.start.y),
            self.end,
            Point::new(self.start.x, self.end.y),
        ]
    }
}

/// A circle outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    /// Centre.
    pub center: Point,
    /// Radius (mm).
    pub radius: f64,
    /// Target layer.
    pub layer: Layer,
    /// Stroke width (mm).
    pub width: f64,
}

/// Footprint text role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Reference designator.
    Reference,
    /// Value field.
    Value,
    /// Free user text.
    User,
}

impl TextKind {
    /// Returns the KiCad keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Value => "value",
            Self::User => "user",
        }
    }
}

/// A text field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    /// Text role.
    pub kind: TextKind,
    /// Text content.
    pub text: String,
    /// Anchor (centre) position.
    pub at: Point,
    /// Target layer.
    pub layer: Layer,
    /// Glyph width and height (mm).
    pub size: (f64, f64),
    /// Stroke thickness (mm).
    pub thickness: f64,
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Poly-line.
    PolyLine(PolyLine),
    /// Rectangle outline.
    Rect(Rect),
    /// Circle outline.
    Circle(Circle),
    /// Pad.
    Pad(Pad),
    /// Text.
    Text(Text),
}

impl Primitive {
    /// Returns the layer the primitive is drawn on; `None` for pads, which
    /// span a layer set.
    #[must_use]
    pub const fn layer(&self) -> Option<Layer> {
        match self {
            Self::PolyLine(p) => Some(p.layer),
            Self::Rect(r) => Some(r.layer),
            Self::Circle(c) => Some(c.layer),
            Self::Text(t) => Some(t.layer),
            Self::Pad(_) => None,
        }
    }
}

impl From<PolyLine> for Primitive {
    fn from(value: PolyLine) -> Self {
        Self::PolyLine(value)
    }
}

impl From<Rect> for Primitive {
    fn from(value: Rect) -> Self {
        Self::Rect(value)
    }
}

impl From<Circle> for Primitive {
    fn from(value: Circle) -> Self {
        Self::Circle(value)
    }
}

impl From<Pad> for Primitive {
    fn from(value: Pad) -> Self {
        Self::Pad(value)
    }
}

impl From<Text> for Primitive {
    fn from(value: Text) -> Self {
        Self::Text(value)
    }
}

/// Reference to a 3D model file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Model3d {
    /// Model path, usually rooted at a KiCad path variable.
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_array_is_centred_and_numbered() {
        let proto = Pad::smt("", Point::default(), (0.6, 1.9));
        let pads = proto.array(4, Point::new(0.0, -3.15), 1.0);

        assert_eq!(pads.len(), 4);
        assert_eq!(pads[0].number, "1");
        assert_eq!(pads[3].number, "4");
        assert!((pads[0].at.x + 1.5).abs() < 1e-9);
        assert!((pads[3].at.x - 1.5).abs() < 1e-9);
        assert!(pads.iter().all(|p| (p.at.y + 3.15).abs() < 1e-9));
    }

    #[test]
    fn pad_array_with_single_pad_sits_on_centre() {
        let proto = Pad::smt("", Point::default(), (1.0, 1.0));
        let pads = proto.array(1, Point::new(2.0, 0.0), 5.0);
        assert_eq!(pads.len(), 1);
        assert!((pads[0].at.x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn rect_corners_are_closed_loop_order() {
        let rect = Rect::new(
            Point::new(-1.0, -2.0),
            Point::new(1.0, 2.0),
            Layer::FrontFab,
            0.1,
        );
        let c = rect.corners();
        assert_eq!(c[1], Point::new(1.0, -2.0));
        assert_eq!(c[3], Point::new(-1.0, 2.0));
    }

    #[test]
    fn primitives_serialise_with_type_tag() {
        let line: Primitive =
            PolyLine::new([(0.0, 0.0), (1.0, 0.0)], Layer::FrontSilkscreen, 0.12).into();
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["type"], "poly_line");
        assert_eq!(value["layer"], "F.SilkS");
        assert_eq!(value["points"][1]["x"], 1.0);
    }

    #[test]
    fn layer_names_match_serde_names() {
        for layer in [
            Layer::FrontSilkscreen,
            Layer::FrontFab,
            Layer::FrontCourtyard,
            Layer::AllCopper,
        ] {
            let yaml = serde_yaml::to_string(&layer).unwrap();
            assert_eq!(yaml.trim().trim_matches(['\'', '"']), layer.as_str());
        }
    }
}
