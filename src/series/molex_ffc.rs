//! Molex 52207 series: 1.00 mm pitch Easy-On, right-angle, ZIF,
//! top-contact FFC/FPC connectors (3 to 30 circuits).
//!
//! Geometry is measured from the pad row. The body's back edge sits behind
//! the pads, the actuator extends forward of the body and is drawn both
//! closed (part of the body outline) and open (separate fab outline).
//!
//! # Dimension Rules
//!
//! - Pin span = (pins - 1) x pitch
//! - Body width = pin span + 5.7
//! - Actuator width = pin span + 2 x 3.5
//! - Mounting pads sit 2.1 mm beyond the outermost pin centre

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::config::{Config, Orientation};
use crate::kicad::{Attribute, Footprint, Layer, Pad, Point, PolyLine};
use crate::naming::{collapse_underscores, FootprintNameFields, KeywordFields};
use crate::series::geometry::{connector_courtyard, courtyard_rect, BoundingBox};
use crate::series::text_fields::{add_text_fields, InsidePosition};
use crate::series::{model_for, normalise_tags, SeriesGenerator};

/// Fixed constants of an FFC/FPC connector series. All lengths in mm.
#[derive(Debug, Clone)]
pub struct FfcSeries {
    /// Manufacturer name used in names and keywords.
    pub manufacturer: &'static str,
    /// Series name (empty when the part number says it all).
    pub series: &'static str,
    /// Long series description.
    pub series_long: &'static str,
    /// Library category.
    pub category: &'static str,
    /// Mounting orientation.
    pub orientation: Orientation,
    /// Number of pin rows.
    pub number_of_rows: u32,
    /// Supported circuit counts.
    pub pins: RangeInclusive<u32>,
    /// Pin pitch.
    pub pitch: f64,
    /// Signal pad size (width, height).
    pub pad_size: (f64, f64),
    /// Mounting pad size (width, height).
    pub mp_size: (f64, f64),
    /// Distance from the body front edge reference to the pad row edge.
    pub pad_row_offset: f64,
    /// Gap between the outermost pin centre and the mounting pad.
    pub mp_gap: f64,
    /// Body width beyond the pin span.
    pub body_extension: f64,
    /// Width of the mounting pin tabs on the fab outline.
    pub mount_pin_width: f64,
    /// Depth of the mounting pin tabs.
    pub mount_pin_height: f64,
    /// Pin length behind the pad edge.
    pub pin_length: f64,
    /// How far the pad edge overlaps the body back edge.
    pub pad_back_overlap: f64,
    /// Actuator overhang on each side of the pin span.
    pub actuator_ext_w: f64,
    /// Body depth from the back edge.
    pub body_height: f64,
    /// Actuator front edge when closed, from the back edge.
    pub actuator_closed_height: f64,
    /// Actuator front edge when open, from the back edge.
    pub actuator_open_height: f64,
}

impl FfcSeries {
    /// Molex 52207 constants.
    #[must_use]
    pub const fn molex_52207() -> Self {
        Self {
            manufacturer: "Molex",
            series: "",
            series_long: "Molex 1.00mm Pitch Easy-On, Right-Angle, ZIF, Top Contact FFC/FPC",
            category: "FFC-FPC",
            orientation: Orientation::Horizontal,
            number_of_rows: 1,
            pins: 3..=30,
            pitch: 1.0,
            pad_size: (0.6, 1.9),
            mp_size: (2.1, 2.8),
            pad_row_offset: 1.6 + 0.6,
            mp_gap: 2.1,
            body_extension: 5.7,
            mount_pin_width: 0.8,
            mount_pin_height: 2.0,
            pin_length: 2.0,
            pad_back_overlap: 0.3,
            actuator_ext_w: 3.5,
            body_height: 4.3,
            actuator_closed_height: 5.6,
            actuator_open_height: 6.9,
        }
    }

    /// Manufacturer part number for a circuit count.
    #[must_use]
    pub fn part_number(&self, pin_count: u32) -> String {
        format!("52207-{pin_count:02}60")
    }

    /// Datasheet URL for a circuit count.
    #[must_use]
    pub fn datasheet(&self, pin_count: u32) -> String {
        format!("https://www.molex.com/pdm_docs/sd/52207{pin_count:02}60_sd.pdf")
    }
}

/// Derived dimensions of one FFC part. All lengths in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FfcDimensions {
    /// Distance between the outermost pin centres.
    pub pin_span: f64,
    /// Body width.
    pub body_width: f64,
    /// Actuator width.
    pub actuator_width: f64,
    /// Y of the signal pad centres.
    pub pad_y: f64,
    /// X of the right mounting pad centre (left is mirrored).
    pub mp_x: f64,
    /// Y of the mounting pad centres.
    pub mp_y: f64,
    /// Y of the body back edge.
    pub back_y: f64,
}

impl FfcDimensions {
    /// Computes the dimensions for `pin_count` circuits.
    #[must_use]
    pub fn new(series: &FfcSeries, pin_count: u32) -> Self {
        let pin_span = f64::from(pin_count).mul_add(series.pitch, -series.pitch);
        let (mp_w, mp_h) = series.mp_size;
        let pad_h = series.pad_size.1;

        let pad_y = -series.pad_row_offset - pad_h / 2.0;
        let mp_y = pad_y + pad_h / 2.0 + mp_h / 2.0;
        let back_y = pad_y - pad_h / 2.0 + series.pad_back_overlap + series.pin_length;

        Self {
            pin_span,
            body_width: pin_span + series.body_extension,
            actuator_width: 2.0f64.mul_add(series.actuator_ext_w, pin_span),
            pad_y,
            mp_x: pin_span / 2.0 + series.mp_gap + mp_w / 2.0,
            mp_y,
            back_y,
        }
    }
}

/// Generator for the Molex 52207 series.
#[derive(Debug, Clone)]
pub struct Molex52207 {
    series: FfcSeries,
}

impl Default for Molex52207 {
    fn default() -> Self {
        Self::new()
    }
}

impl Molex52207 {
    /// Creates the generator with the Molex 52207 constants.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            series: FfcSeries::molex_52207(),
        }
    }

    /// Returns the series constants.
    #[must_use]
    pub const fn series(&self) -> &FfcSeries {
        &self.series
    }

    /// Computes the dimensions for a circuit count.
    #[must_use]
    pub fn dimensions(&self, pin_count: u32) -> FfcDimensions {
        FfcDimensions::new(&self.series, pin_count)
    }

    /// Builds the footprint name for a circuit count.
    #[must_use]
    pub fn footprint_name(&self, pin_count: u32, config: &Config) -> String {
        let s = &self.series;
        let mpn = s.part_number(pin_count);
        collapse_underscores(&config.fp_name_format_string.render(&FootprintNameFields {
            man: s.manufacturer,
            series: s.series,
            mpn: &mpn,
            num_rows: s.number_of_rows,
            pins: pin_count,
            pins_per_row: pin_count,
            mounting_pad: "-1MP",
            pitch: s.pitch,
            orientation: config.orientation_options.get(s.orientation),
        }))
    }

    /// Builds the footprint for a circuit count.
    #[must_use]
    pub fn footprint(&self, pin_count: u32, config: &Config) -> Footprint {
        let s = &self.series;
        let dims = self.dimensions(pin_count);
        tracing::debug!(pin_count, ?dims, "Derived FFC dimensions");

        let mpn = s.part_number(pin_count);
        let name = self.footprint_name(pin_count, config);
        let orientation = config.orientation_options.get(s.orientation);

        let mut fp = Footprint::new(&name);
        fp.set_attribute(Attribute::Smd);
        fp.set_description(format!(
            "Molex {}, {mpn}, {pin_count} Circuits ({}), generated with {}",
            s.series_long,
            s.datasheet(pin_count),
            env!("CARGO_PKG_NAME")
        ));
        fp.set_tags(normalise_tags(&config.keyword_fp_string.render(&KeywordFields {
            man: s.manufacturer,
            series: s.series,
            orientation,
            entry: config.entry_direction.get(s.orientation),
        })));

        // Pads
        for side in [-1.0, 1.0] {
            fp.append(Pad::smt(
                config.mounting_pad_number.as_str(),
                Point::new(side * dims.mp_x, dims.mp_y),
                s.mp_size,
            ));
        }
        let proto = Pad::smt("", Point::default(), s.pad_size);
        fp.extend(proto.array(pin_count, Point::new(0.0, dims.pad_y), s.pitch));

        self.add_fab(&mut fp, &dims, config);
        self.add_silk(&mut fp, &dims, config);

        // Courtyard
        let outline = BoundingBox::new(
            -dims.mp_x - s.mp_size.0 / 2.0,
            dims.pad_y - s.pad_size.1 / 2.0,
            dims.mp_x + s.mp_size.0 / 2.0,
            dims.back_y + s.actuator_open_height,
        );
        let courtyard = connector_courtyard(outline, config);
        fp.append(courtyard_rect(&courtyard, config));

        add_text_fields(
            &mut fp,
            config,
            &outline,
            &courtyard,
            &name,
            InsidePosition::Center,
        );

        let lib_name = self.library_name(config);
        fp.set_model(model_for(config, &lib_name, &name));
        fp
    }

    fn add_fab(&self, fp: &mut Footprint, dims: &FfcDimensions, config: &Config) {
        let s = &self.series;
        let width = config.fab_line_width;
        let body_x = dims.body_width / 2.0;
        let act_x = dims.actuator_width / 2.0;
        let tab_x = body_x + s.mount_pin_width;
        let back = dims.back_y;
        let tab_y = back + s.mount_pin_height;
        let body_y = back + s.body_height;
        let closed_y = back + s.actuator_closed_height;
        let open_y = back + s.actuator_open_height;
        let open_step_y = back + (s.actuator_closed_height + s.actuator_open_height) / 2.0;

        fp.append(PolyLine::new(
            [
                (-tab_x, back),
                (-tab_x, tab_y),
                (-body_x, tab_y),
                (-body_x, body_y),
                (-act_x, body_y),
                (-act_x, closed_y),
                (act_x, closed_y),
                (act_x, body_y),
                (body_x, body_y),
                (body_x, tab_y),
                (tab_x, tab_y),
                (tab_x, back),
                (-tab_x, back),
            ],
            Layer::FrontFab,
            width,
        ));

        let pin1_x = -dims.pin_span / 2.0;
        fp.append(PolyLine::new(
            [
                (pin1_x - 0.5, back),
                (pin1_x, back + 0.75),
                (pin1_x + 0.5, back),
            ],
            Layer::FrontFab,
            width,
        ));

        // Actuator in the open position
        fp.append(PolyLine::new(
            [
                (-body_x, closed_y),
                (-body_x, open_step_y),
                (-act_x, open_step_y),
                (-act_x, open_y),
                (act_x, open_y),
                (act_x, open_step_y),
                (body_x, open_step_y),
                (body_x, closed_y),
            ],
            Layer::FrontFab,
            width,
        ));
    }

    fn add_silk(&self, fp: &mut Footprint, dims: &FfcDimensions, config: &Config) {
        let s = &self.series;
        let width = config.silk_line_width;
        let pad_off = config.pad_silk_offset();
        let fab_off = config.silk_fab_offset;
        let (pad_w, pad_h) = s.pad_size;
        let (mp_w, mp_h) = s.mp_size;

        let back = dims.back_y - fab_off;
        let outer_pin_x = dims.pin_span / 2.0 + pad_w / 2.0 + pad_off;
        let mp_inner_x = dims.mp_x - mp_w / 2.0 - pad_off;
        let body_x = dims.body_width / 2.0 + fab_off;
        let act_x = dims.actuator_width / 2.0 + fab_off;
        let below_mp_y = dims.mp_y + mp_h / 2.0 + pad_off;
        let body_y = dims.back_y + s.body_height - fab_off;
        let closed_y = dims.back_y + s.actuator_closed_height + fab_off;

        // Pin 1 side, running along the back edge up to the mounting pad
        fp.append(PolyLine::new(
            [
                (-outer_pin_x, dims.pad_y - pad_h / 2.0),
                (-outer_pin_x, back),
                (-mp_inner_x, back),
            ],
            Layer::FrontSilkscreen,
            width,
        ));

        fp.append(PolyLine::new(
            [
                (-body_x, below_mp_y),
                (-body_x, body_y),
                (-act_x, body_y),
                (-act_x, closed_y),
                (act_x, closed_y),
                (act_x, body_y),
                (body_x, body_y),
                (body_x, below_mp_y),
            ],
            Layer::FrontSilkscreen,
            width,
        ));

        fp.append(PolyLine::new(
            [(outer_pin_x, back), (mp_inner_x, back)],
            Layer::FrontSilkscreen,
            width,
        ));
    }
}

impl SeriesGenerator for Molex52207 {
    fn id(&self) -> &'static str {
        "molex-52207"
    }

    fn library_name(&self, config: &Config) -> String {
        config
            .lib_name_specific_function_format_string
            .render(&self.series.category)
    }

    fn footprints<'a>(&'a self, config: &'a Config) -> Box<dyn Iterator<Item = Footprint> + 'a> {
        Box::new(
            self.series
                .pins
                .clone()
                .map(move |pins| self.footprint(pins, config)),
        )
    }
}
