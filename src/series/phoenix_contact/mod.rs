//! Phoenix Contact PC series: 10.16 mm pitch pluggable terminal blocks,
//! angled, with or without a threaded flange.
//!
//! Pin 1 sits at the origin and the row runs along +X. The body extends
//! behind the row (negative Y) by `back_to_pin` and reaches forward to the
//! plug face. Flanged parts carry screw flanges at each end, and parts with
//! a mount hole get a non-plated hole in each flange.

pub mod params;

use indexmap::IndexMap;

pub use params::{
    all_params, dimensions, generate_description, generate_params, Dimensions, ParamOverrides,
    PartParameters, SeriesParameters,
};

use crate::config::{Config, Orientation};
use crate::kicad::{Circle, Footprint, Layer, Pad, PadShape, Point, PolyLine, Rect};
use crate::naming::{collapse_underscores, FootprintNameFields, KeywordFields, LibraryNameFields};
use crate::series::geometry::{connector_courtyard, courtyard_rect, BoundingBox};
use crate::series::text_fields::{add_text_fields, InsidePosition};
use crate::series::{model_for, normalise_tags, SeriesGenerator};

const MANUFACTURER: &str = "PhoenixContact";

/// Plug outline inset from the body sides when there is no flange (mm).
const PLUG_SIDE_INSET: f64 = 0.5;

/// Generator for the catalogued PC series parts.
#[derive(Debug, Clone)]
pub struct PhoenixContactPc {
    series: SeriesParameters,
    parts: IndexMap<String, PartParameters>,
}

impl Default for PhoenixContactPc {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoenixContactPc {
    /// Creates the generator over the full part table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(all_params())
    }

    /// Creates a generator over a custom part table.
    #[must_use]
    pub fn with_parts(parts: IndexMap<String, PartParameters>) -> Self {
        Self {
            series: SeriesParameters::pc(),
            parts,
        }
    }

    /// Returns the part table.
    #[must_use]
    pub const fn parts(&self) -> &IndexMap<String, PartParameters> {
        &self.parts
    }

    /// Builds the footprint name for a part.
    #[must_use]
    pub fn footprint_name(&self, params: &PartParameters, config: &Config) -> String {
        let orientation = Orientation::from_angled(params.angled);
        collapse_underscores(&config.fp_name_format_string.render(&FootprintNameFields {
            man: MANUFACTURER,
            series: &params.series_name,
            mpn: params.order_number(),
            num_rows: 1,
            pins: params.num_pins,
            pins_per_row: params.num_pins,
            mounting_pad: "",
            pitch: params.pin_pitch,
            orientation: config.orientation_options.get(orientation),
        }))
    }

    /// Builds the footprint of one part.
    ///
    /// `variant` is the catalogue name used in the description.
    #[must_use]
    pub fn footprint(&self, variant: &str, params: &PartParameters, config: &Config) -> Footprint {
        let dims = dimensions(params);
        tracing::debug!(variant, ?dims, "Derived PC dimensions");

        let orientation = Orientation::from_angled(params.angled);
        let name = self.footprint_name(params, config);

        let mut fp = Footprint::new(&name);
        fp.set_description(generate_description(params, variant));
        fp.set_tags(normalise_tags(&config.keyword_fp_string.render(&KeywordFields {
            man: MANUFACTURER,
            series: &params.series_name,
            orientation: config.orientation_options.get(orientation),
            entry: config.entry_direction.get(orientation),
        })));

        let body = BoundingBox::new(
            dims.left_to_pin,
            params.back_to_pin,
            dims.left_to_pin + dims.length,
            params.back_to_pin + dims.width,
        );

        // Pads
        let mut copper = body;
        for i in 0..params.num_pins {
            let at = Point::new(f64::from(i) * params.pin_pitch, 0.0);
            let shape = if i == 0 { PadShape::Rect } else { PadShape::Oval };
            fp.append(Pad::through_hole(
                (i + 1).to_string(),
                at,
                (params.pin_sx, params.pin_sy),
                shape,
                self.series.drill,
            ));
            copper = copper.union(BoundingBox::around(at, params.pin_sx, params.pin_sy));
        }

        let holes = [dims.mount_hole_left, dims.mount_hole_right].map(Point::from);
        if params.mount_hole {
            for at in holes {
                fp.append(Pad::mounting_hole(at, self.series.mount_drill));
                copper = copper.union(BoundingBox::around(
                    at,
                    self.series.mount_drill,
                    self.series.mount_drill,
                ));
            }
        }

        self.add_fab(&mut fp, params, &dims, &body, config);
        if params.mount_hole {
            for center in holes {
                fp.append(Circle {
                    center,
                    radius: self.series.mount_screw_head_r,
                    layer: Layer::FrontFab,
                    width: config.fab_line_width,
                });
            }
        }
        let silk = add_silk(&mut fp, &body, config);

        let courtyard = connector_courtyard(copper.union(silk), config);
        fp.append(courtyard_rect(&courtyard, config));

        add_text_fields(
            &mut fp,
            config,
            &body,
            &courtyard,
            &name,
            InsidePosition::Center,
        );

        fp.set_model(model_for(config, &self.library_name(config), &name));
        fp
    }

    fn add_fab(
        &self,
        fp: &mut Footprint,
        params: &PartParameters,
        dims: &Dimensions,
        body: &BoundingBox,
        config: &Config,
    ) {
        let width = config.fab_line_width;
        let (top_left, bottom_right) = body.corners();
        fp.append(Rect::new(top_left, bottom_right, Layer::FrontFab, width));

        let inset = if params.flanged {
            self.series.flange_length
        } else {
            PLUG_SIDE_INSET
        };
        let plug_left = body.left + inset;
        let plug_right = body.right - inset;
        fp.append(Rect::new(
            Point::new(plug_left, dims.plug_back),
            Point::new(plug_right, dims.plug_front),
            Layer::FrontFab,
            width,
        ));

        let score_y = params.back_to_pin + self.series.scoreline_from_back;
        fp.append(PolyLine::new(
            [(plug_left, score_y), (plug_right, score_y)],
            Layer::FrontFab,
            width,
        ));
        self.add_plug_face(fp, params, dims, width);

        if params.flanged {
            let flange_y = dims.mount_hole_left.1;
            let half = dims.flange_width / 2.0;
            for (left, right) in [
                (body.left, body.left + self.series.flange_length),
                (body.right - self.series.flange_length, body.right),
            ] {
                fp.append(Rect::new(
                    Point::new(left, flange_y - half),
                    Point::new(right, flange_y + half),
                    Layer::FrontFab,
                    width,
                ));
            }
        }

        let m = config.fab_pin1_marker_length;
        fp.append(PolyLine::new(
            [(body.left, -m / 2.0), (body.left + m / 2.0, 0.0), (body.left, m / 2.0)],
            Layer::FrontFab,
            width,
        ));
    }

    /// Per-pin wire entries, screw access trapezoids and separator walls.
    fn add_plug_face(
        &self,
        fp: &mut Footprint,
        params: &PartParameters,
        dims: &Dimensions,
        width: f64,
    ) {
        let s = &self.series;
        let cut_half = s.plug_cut_width / 2.0;
        let cut_bottom = dims.plug_front - s.plug_cut_len;
        let long_half = s.plug_trapezoid_long / 2.0;
        let short_half = s.plug_trapezoid_short / 2.0;
        let trapezoid_inner = dims.plug_back + s.plug_trapezoid_width;

        for i in 0..params.num_pins {
            let x = f64::from(i) * params.pin_pitch;
            fp.append(PolyLine::new(
                [
                    (x - cut_half, dims.plug_front),
                    (x - cut_half, cut_bottom + s.plug_arc_len),
                    (x - cut_half + s.plug_arc_len, cut_bottom),
                    (x + cut_half - s.plug_arc_len, cut_bottom),
                    (x + cut_half, cut_bottom + s.plug_arc_len),
                    (x + cut_half, dims.plug_front),
                ],
                Layer::FrontFab,
                width,
            ));
            fp.append(PolyLine::new(
                [
                    (x - long_half, dims.plug_back),
                    (x - short_half, trapezoid_inner),
                    (x + short_half, trapezoid_inner),
                    (x + long_half, dims.plug_back),
                ],
                Layer::FrontFab,
                width,
            ));

            if i + 1 < params.num_pins {
                let mid = x + params.pin_pitch / 2.0;
                for wall in [
                    mid - s.plug_separator_distance / 2.0,
                    mid + s.plug_separator_distance / 2.0,
                ] {
                    fp.append(PolyLine::new(
                        [(wall, trapezoid_inner), (wall, cut_bottom)],
                        Layer::FrontFab,
                        width,
                    ));
                }
            }
        }
    }
}

/// Draws the silkscreen and returns its extent, stroke included.
fn add_silk(fp: &mut Footprint, body: &BoundingBox, config: &Config) -> BoundingBox {
    let width = config.silk_line_width;
    let outline = body.expanded(config.silk_fab_offset);
    let (top_left, bottom_right) = outline.corners();
    fp.append(Rect::new(
        top_left,
        bottom_right,
        Layer::FrontSilkscreen,
        width,
    ));

    // Pin 1 arrow left of the outline, pointing at the row
    let m = config.fab_pin1_marker_length / 2.0;
    let tip = outline.left - width;
    fp.append(PolyLine::new(
        [(tip - m, -m / 2.0), (tip, 0.0), (tip - m, m / 2.0), (tip - m, -m / 2.0)],
        Layer::FrontSilkscreen,
        width,
    ));

    outline
        .union(BoundingBox::new(tip - m, -m / 2.0, tip, m / 2.0))
        .expanded(width / 2.0)
}

impl SeriesGenerator for PhoenixContactPc {
    fn id(&self) -> &'static str {
        "phoenix-contact"
    }

    fn library_name(&self, config: &Config) -> String {
        config.lib_name_format_string.render(&LibraryNameFields {
            man: MANUFACTURER,
            series: "",
        })
    }

    fn footprints<'a>(&'a self, config: &'a Config) -> Box<dyn Iterator<Item = Footprint> + 'a> {
        Box::new(
            self.parts
                .iter()
                .map(move |(variant, params)| self.footprint(variant, params, config)),
        )
    }
}
