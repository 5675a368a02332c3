//! S-expression writer for `.kicad_mod` files.
//!
//! # Output Layout
//!
//! ```text
//! (module NAME (layer F.Cu) (tedit 0)
//!   (descr "...")
//!   (tags "...")
//!   (attr smd)
//!   (fp_text ...)      // texts
//!   (fp_line ...)      // poly-lines and rectangles, expanded to segments
//!   (fp_circle ...)    // circles
//!   (pad ...)          // pads
//!   (model ...)        // 3D model reference
//! )
//! ```
//!
//! Primitives are grouped by kind and keep their insertion order within each
//! group, so identical footprints always serialise to identical bytes.

use std::fmt::Write;

use super::primitives::{Circle, Pad, Point, Primitive, Text};
use super::Footprint;

/// Serialises a footprint to `.kicad_mod` text.
#[must_use]
pub fn write_footprint(footprint: &Footprint) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "(module {} (layer F.Cu) (tedit 0)",
        quote(&footprint.name)
    );
    if !footprint.description.is_empty() {
        let _ = writeln!(out, "  (descr {})", quote(&footprint.description));
    }
    if !footprint.tags.is_empty() {
        let _ = writeln!(out, "  (tags {})", quote(&footprint.tags));
    }
    if let Some(attr) = footprint.attribute {
        let _ = writeln!(out, "  (attr {})", attr.as_str());
    }

    for primitive in &footprint.primitives {
        if let Primitive::Text(text) = primitive {
            write_text(&mut out, text);
        }
    }

    for primitive in &footprint.primitives {
        match primitive {
            Primitive::PolyLine(line) => {
                for pair in line.points.windows(2) {
                    write_line(&mut out, pair[0], pair[1], line.layer.as_str(), line.width);
                }
            }
            Primitive::Rect(rect) => {
                let corners = rect.corners();
                for i in 0..corners.len() {
                    let next = corners[(i + 1) % corners.len()];
                    write_line(&mut out, corners[i], next, rect.layer.as_str(), rect.width);
                }
            }
            _ => {}
        }
    }

    for primitive in &footprint.primitives {
        if let Primitive::Circle(circle) = primitive {
            write_circle(&mut out, circle);
        }
    }

    for primitive in &footprint.primitives {
        if let Primitive::Pad(pad) = primitive {
            write_pad(&mut out, pad);
        }
    }

    if let Some(model) = &footprint.model {
        let _ = writeln!(out, "  (model {}", quote(&model.path));
        out.push_str("    (at (xyz 0 0 0))\n");
        out.push_str("    (scale (xyz 1 1 1))\n");
        out.push_str("    (rotate (xyz 0 0 0))\n");
        out.push_str("  )\n");
    }

    out.push_str(")\n");
    out
}

fn write_text(out: &mut String, text: &Text) {
    let _ = writeln!(
        out,
        "  (fp_text {} {} (at {} {}) (layer {})",
        text.kind.as_str(),
        quote(&text.text),
        num(text.at.x),
        num(text.at.y),
        text.layer.as_str()
    );
    let _ = writeln!(
        out,
        "    (effects (font (size {} {}) (thickness {})))",
        num(text.size.0),
        num(text.size.1),
        num(text.thickness)
    );
    out.push_str("  )\n");
}

fn write_line(out: &mut String, start: Point, end: Point, layer: &str, width: f64) {
    let _ = writeln!(
        out,
        "  (fp_line (start {} {}) (end {} {}) (layer {layer}) (width {}))",
        num(start.x),
        num(start.y),
        num(end.x),
        num(end.y),
        num(width)
    );
}

fn write_circle(out: &mut String, circle: &Circle) {
    let _ = writeln!(
        out,
        "  (fp_circle (center {} {}) (end {} {}) (layer {}) (width {}))",
        num(circle.center.x),
        num(circle.center.y),
        num(circle.center.x + circle.radius),
        num(circle.center.y),
        circle.layer.as_str(),
        num(circle.width)
    );
}

fn write_pad(out: &mut String, pad: &Pad) {
    let _ = write!(
        out,
        "  (pad {} {} {} (at {} {}) (size {} {})",
        quote(&pad.number),
        pad.pad_type.as_str(),
        pad.shape.as_str(),
        num(pad.at.x),
        num(pad.at.y),
        num(pad.size.0),
        num(pad.size.1)
    );
    if let Some(drill) = pad.drill {
        let _ = write!(out, " (drill {})", num(drill));
    }
    let layers: Vec<&str> = pad.pad_type.layers().iter().map(|l| l.as_str()).collect();
    let _ = writeln!(out, " (layers {}))", layers.join(" "));
}

/// Formats a length with at most six decimals and no trailing zeros.
///
/// Negative zero prints as `0`.
#[must_use]
pub fn num(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// Quotes a string when it would not parse as a bare S-expression atom.
#[must_use]
pub fn quote(text: &str) -> String {
    let needs_quotes = text.is_empty()
        || text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\\'));
    if !needs_quotes {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kicad::{Attribute, Layer, Model3d, PadShape, PolyLine, Rect};

    #[test]
    fn num_strips_trailing_zeros() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(0.15), "0.15");
        assert_eq!(num(-3.15), "-3.15");
        assert_eq!(num(0.1 + 0.2), "0.3");
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(-0.000_000_1), "0");
    }

    #[test]
    fn quote_only_when_needed() {
        assert_eq!(quote("REF**"), "REF**");
        assert_eq!(quote("%R"), "%R");
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("a b"), "\"a b\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn writes_smd_footprint() {
        let mut fp = Footprint::new("Test_FP");
        fp.set_description("A test footprint");
        fp.set_attribute(Attribute::Smd);
        fp.append(Pad::smt("1", Point::new(-0.5, 0.0), (0.6, 1.9)));
        fp.append(PolyLine::new(
            [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0)],
            Layer::FrontFab,
            0.1,
        ));
        fp.set_model(Model3d {
            path: "${KISYS3DMOD}/Test.3dshapes/Test_FP.wrl".to_string(),
        });

        let text = write_footprint(&fp);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "(module Test_FP (layer F.Cu) (tedit 0)");
        assert_eq!(lines[1], "  (descr \"A test footprint\")");
        assert_eq!(lines[2], "  (attr smd)");
        assert_eq!(
            lines[3],
            "  (fp_line (start -1 -1) (end 1 -1) (layer F.Fab) (width 0.1))"
        );
        assert_eq!(
            lines[5],
            "  (pad 1 smd rect (at -0.5 0) (size 0.6 1.9) (layers F.Cu F.Paste F.Mask))"
        );
        assert_eq!(
            lines[6],
            "  (model ${KISYS3DMOD}/Test.3dshapes/Test_FP.wrl"
        );
        assert_eq!(*lines.last().unwrap(), ")");
    }

    #[test]
    fn rect_expands_to_four_segments() {
        let mut fp = Footprint::new("R");
        fp.append(Rect::new(
            Point::new(-1.0, -1.0),
            Point::new(1.0, 1.0),
            Layer::FrontCourtyard,
            0.05,
        ));
        let text = write_footprint(&fp);
        assert_eq!(text.matches("(fp_line").count(), 4);
        assert!(text.contains("(fp_line (start -1 1) (end -1 -1) (layer F.CrtYd) (width 0.05))"));
    }

    #[test]
    fn mounting_hole_has_empty_number_and_drill() {
        let mut fp = Footprint::new("H");
        fp.append(Pad::mounting_hole(Point::new(-10.16, 3.6), 2.5));
        fp.append(Pad::through_hole(
            "1",
            Point::new(0.0, 0.0),
            (2.16, 4.1),
            PadShape::Rect,
            1.7,
        ));
        let text = write_footprint(&fp);
        assert!(text.contains(
            "(pad \"\" np_thru_hole circle (at -10.16 3.6) (size 2.5 2.5) (drill 2.5) (layers *.Cu *.Mask))"
        ));
        assert!(text.contains(
            "(pad 1 thru_hole rect (at 0 0) (size 2.16 4.1) (drill 1.7) (layers *.Cu *.Mask))"
        ));
    }

    #[test]
    fn texts_come_before_lines() {
        let mut fp = Footprint::new("T");
        fp.append(PolyLine::new([(0.0, 0.0), (1.0, 0.0)], Layer::FrontSilkscreen, 0.12));
        fp.append(Text {
            kind: crate::kicad::TextKind::Reference,
            text: "REF**".to_string(),
            at: Point::new(0.0, -2.0),
            layer: Layer::FrontSilkscreen,
            size: (1.0, 1.0),
            thickness: 0.15,
        });
        let text = write_footprint(&fp);
        let text_pos = text.find("fp_text").unwrap();
        let line_pos = text.find("fp_line").unwrap();
        assert!(text_pos < line_pos);
    }
}
