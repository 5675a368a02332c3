//! Reference and value text placement.
//!
//! Fields outside the part sit just beyond the courtyard; fields inside sit
//! on the body and shrink to fit narrow bodies.

use crate::config::{Config, TextFieldConfig, TextPosition};
use crate::kicad::{Footprint, Point, Text, TextKind};
use crate::series::geometry::{round_to_base, BoundingBox};

/// Gap between the courtyard and the nearest edge of outside text (mm).
const OUTSIDE_CLEARANCE: f64 = 0.2;

/// Smallest glyph size used for shrunk inside text (mm).
const MIN_TEXT_SIZE: f64 = 0.25;

/// Grid text anchors are rounded to (mm).
const TEXT_GRID: f64 = 0.01;

/// Where `inside` fields sit vertically on the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsidePosition {
    /// Near the top body edge.
    Top,
    /// At the body centre.
    #[default]
    Center,
    /// Near the bottom body edge.
    Bottom,
}

/// Appends every configured reference and value field.
///
/// The first reference field is the real reference (`REF**`); further ones
/// are user text repeating it (`%R`). Values work the same way with the
/// footprint name and `%V`.
pub fn add_text_fields(
    footprint: &mut Footprint,
    config: &Config,
    body: &BoundingBox,
    courtyard: &BoundingBox,
    fp_name: &str,
    inside: InsidePosition,
) {
    for (i, field) in config.references.iter().enumerate() {
        let (kind, text) = if i == 0 {
            (TextKind::Reference, "REF**")
        } else {
            (TextKind::User, "%R")
        };
        footprint.append(place(field, kind, text, body, courtyard, inside));
    }

    for (i, field) in config.values.iter().enumerate() {
        let (kind, text) = if i == 0 {
            (TextKind::Value, fp_name)
        } else {
            (TextKind::User, "%V")
        };
        footprint.append(place(field, kind, text, body, courtyard, inside));
    }
}

fn place(
    field: &TextFieldConfig,
    kind: TextKind,
    text: &str,
    body: &BoundingBox,
    courtyard: &BoundingBox,
    inside: InsidePosition,
) -> Text {
    let [mut width, mut height] = field.size;
    let mut thickness = field.fontwidth;

    let y = match field.position_y {
        TextPosition::OutsideTop => courtyard.top - height / 2.0 - OUTSIDE_CLEARANCE,
        TextPosition::OutsideBottom => courtyard.bottom + height / 2.0 + OUTSIDE_CLEARANCE,
        TextPosition::Inside | TextPosition::Center => {
            let scale = fit_scale(text, width, body.width());
            width = round_to_base(width * scale, TEXT_GRID);
            height = round_to_base(height * scale, TEXT_GRID);
            thickness = round_to_base(thickness * scale, TEXT_GRID);

            match (field.position_y, inside) {
                (TextPosition::Inside, InsidePosition::Top) => body.top + height / 2.0 + thickness,
                (TextPosition::Inside, InsidePosition::Bottom) => {
                    body.bottom - height / 2.0 - thickness
                }
                _ => body.center().y,
            }
        }
    };

    Text {
        kind,
        text: text.to_string(),
        at: Point::new(
            round_to_base(body.center().x, TEXT_GRID),
            round_to_base(y, TEXT_GRID),
        ),
        layer: field.layer,
        size: (width, height),
        thickness,
    }
}

/// Scale factor that lets `text` fit in `available` width, never enlarging
/// and never going below [`MIN_TEXT_SIZE`].
#[allow(clippy::cast_precision_loss)] // label lengths are tiny
fn fit_scale(text: &str, glyph_width: f64, available: f64) -> f64 {
    let chars = text.chars().count().max(1) as f64;
    let needed = chars * glyph_width;
    let min_scale = (MIN_TEXT_SIZE / glyph_width).min(1.0);
    (available / needed).clamp(min_scale, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kicad::Layer;

    fn fab_field(position_y: TextPosition) -> TextFieldConfig {
        TextFieldConfig {
            layer: Layer::FrontFab,
            position_y,
            size: [1.0, 1.0],
            fontwidth: 0.15,
        }
    }

    #[test]
    fn inside_text_follows_requested_edge() {
        let body = BoundingBox::new(-10.0, -5.0, 10.0, 5.0);
        let courtyard = body.expanded(0.5);
        let field = fab_field(TextPosition::Inside);
        let y = |inside| place(&field, TextKind::User, "%R", &body, &courtyard, inside).at.y;

        assert!((y(InsidePosition::Top) + 4.35).abs() < 1e-9);
        assert!(y(InsidePosition::Center).abs() < 1e-9);
        assert!((y(InsidePosition::Bottom) - 4.35).abs() < 1e-9);
    }

    #[test]
    fn centred_text_ignores_inside_position() {
        let body = BoundingBox::new(-10.0, -2.0, 10.0, 6.0);
        let courtyard = body.expanded(0.5);
        let field = fab_field(TextPosition::Center);
        for inside in [InsidePosition::Top, InsidePosition::Bottom] {
            let text = place(&field, TextKind::User, "%R", &body, &courtyard, inside);
            assert!((text.at.y - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn fit_scale_never_enlarges() {
        assert!((fit_scale("%R", 1.0, 20.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fit_scale_shrinks_to_body() {
        let scale = fit_scale("%R", 1.0, 1.0);
        assert!((scale - 0.5).abs() < 1e-12);
    }

    #[test]
    fn fit_scale_has_floor() {
        let scale = fit_scale("%R", 1.0, 0.01);
        assert!((scale - MIN_TEXT_SIZE).abs() < 1e-12);
    }
}
