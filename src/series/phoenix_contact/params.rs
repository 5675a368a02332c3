//! Phoenix Contact PC series parameters and derived dimensions.

use indexmap::IndexMap;
use serde::Serialize;

/// Fixed constants shared by every PC series part. All lengths in mm.
#[derive(Debug, Clone, Copy)]
pub struct SeriesParameters {
    /// Pin drill diameter.
    pub drill: f64,
    /// Nominal annular ring; narrowed when pad clearance demands it.
    pub annular_ring: f64,
    /// Mount screw hole diameter.
    pub mount_drill: f64,
    /// Mount screw head radius.
    pub mount_screw_head_r: f64,
    /// Length of the threaded flange along the pin row.
    pub flange_length: f64,
    /// Scoreline distance from the body back edge.
    pub scoreline_from_back: f64,
    /// Depth of the wire entry cut-out in the plug front.
    pub plug_cut_len: f64,
    /// Width of the wire entry cut-out.
    pub plug_cut_width: f64,
    /// Corner run of the cut-out bottom, drawn as a chamfer.
    pub plug_arc_len: f64,
    /// Inner side of the screw access trapezoid at the plug back.
    pub plug_trapezoid_short: f64,
    /// Outer side of the screw access trapezoid, on the plug back edge.
    pub plug_trapezoid_long: f64,
    /// Trapezoid depth.
    pub plug_trapezoid_width: f64,
    /// Gap between the two separator walls between adjacent pins.
    pub plug_separator_distance: f64,
    /// Screw recommendation for flanged parts with a mount hole.
    pub mount_screw_info: &'static str,
    /// Minimum copper clearance between adjacent pads.
    ///
    /// Rated 1000 V (III/3) with 8 kV surge; VDE 0110-1/4.97 asks for 8 mm.
    pub min_pad_to_pad_clearance: f64,
}

impl SeriesParameters {
    /// PC series constants.
    #[must_use]
    pub const fn pc() -> Self {
        Self {
            drill: 1.7,
            annular_ring: 0.4,
            mount_drill: 2.5,
            mount_screw_head_r: 2.5,
            flange_length: 7.36,
            scoreline_from_back: 6.0,
            plug_cut_len: 3.0,
            plug_cut_width: 4.3,
            plug_arc_len: 1.5,
            plug_trapezoid_short: 2.5,
            plug_trapezoid_long: 3.0,
            plug_trapezoid_width: 1.0,
            plug_separator_distance: 1.5,
            mount_screw_info: "ISO 1481-ST 2.2x4.5 C or ISO 7049-ST 2.2x4.5 C (http://www.fasteners.eu/standards/ISO/7049/)",
            min_pad_to_pad_clearance: 8.0,
        }
    }

    /// Pad width before the clearance adjustment.
    #[must_use]
    pub fn nominal_pin_sx(&self) -> f64 {
        2.0f64.mul_add(self.annular_ring, self.drill)
    }

    /// Pad height.
    #[must_use]
    pub fn nominal_pin_sy(&self) -> f64 {
        2.0f64.mul_add(1.2, self.drill)
    }
}

/// Parameters of one concrete part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartParameters {
    /// Series name, e.g. `PC-G1`.
    pub series_name: String,
    /// Right-angle part.
    pub angled: bool,
    /// Has a threaded flange.
    pub flanged: bool,
    /// Pin count.
    pub num_pins: u32,
    /// Pin pitch.
    pub pin_pitch: f64,
    /// Footprint carries mount screw holes.
    pub mount_hole: bool,
    /// Order number to rating text, in catalogue order.
    pub order_info: IndexMap<String, String>,
    /// Distance from the outer pins to the mount holes.
    pub mount_hole_to_pin: f64,
    /// Distance from the body side to the outer pins.
    pub side_to_pin: f64,
    /// Body back edge relative to the pin row.
    pub back_to_pin: f64,
    /// Pad width.
    pub pin_sx: f64,
    /// Pad height.
    pub pin_sy: f64,
}

impl PartParameters {
    /// First order number, used as the part number.
    #[must_use]
    pub fn order_number(&self) -> &str {
        self.order_info.keys().next().map_or("", String::as_str)
    }

    /// Distance between the first and last pin centres.
    #[must_use]
    pub fn pin_span(&self) -> f64 {
        f64::from(self.num_pins.saturating_sub(1)) * self.pin_pitch
    }
}

/// Optional overrides for [`generate_params`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamOverrides {
    /// Footprint carries mount screw holes.
    pub mount_hole: bool,
    /// Defaults to the pitch.
    pub mount_hole_to_pin: Option<f64>,
    /// Defaults to `(3 x pitch)/2` flanged, `(pitch + 2)/2` otherwise.
    pub side_to_pin: Option<f64>,
    /// Defaults to `8 - 9.2` angled, `3 - 7.25` vertical.
    pub back_to_pin: Option<f64>,
    /// Defaults to the series clearance.
    pub min_pad_to_pad_clearance: Option<f64>,
}

/// Builds the parameters of one part, filling unset values with series
/// defaults.
///
/// The pad is narrowed so adjacent pads keep the minimum clearance.
#[must_use]
pub fn generate_params(
    num_pins: u32,
    series_name: &str,
    pin_pitch: f64,
    angled: bool,
    flanged: bool,
    order_info: &[(&str, &str)],
    overrides: ParamOverrides,
) -> PartParameters {
    let series = SeriesParameters::pc();
    let min_clearance = overrides
        .min_pad_to_pad_clearance
        .unwrap_or(series.min_pad_to_pad_clearance);
    let nominal_sx = series.nominal_pin_sx();

    let pin_sx = if pin_pitch - nominal_sx >= min_clearance {
        nominal_sx
    } else {
        pin_pitch - min_clearance
    };

    let default_side = if flanged {
        3.0 * pin_pitch / 2.0
    } else {
        (pin_pitch + 2.0) / 2.0
    };
    let default_back = if angled { 8.0 - 9.2 } else { 3.0 - 7.25 };

    PartParameters {
        series_name: series_name.to_string(),
        angled,
        flanged,
        num_pins,
        pin_pitch,
        mount_hole: overrides.mount_hole,
        order_info: order_info
            .iter()
            .map(|(num, info)| ((*num).to_string(), (*info).to_string()))
            .collect(),
        mount_hole_to_pin: overrides.mount_hole_to_pin.unwrap_or(pin_pitch),
        side_to_pin: overrides.side_to_pin.unwrap_or(default_side),
        back_to_pin: overrides.back_to_pin.unwrap_or(default_back),
        pin_sx,
        pin_sy: series.nominal_pin_sy(),
    }
}

const PITCH: f64 = 10.16;
const RATING: &str = "76A 1000V";

/// G1 order numbers for 2 to 9 pins.
const G1_ORDER_NUMBERS: [&str; 8] = [
    "1998933", "1998946", "1998959", "1998962", "1998975", "1998988", "1998991", "1996391",
];

/// G1F order numbers for 2 to 8 pins.
const G1F_ORDER_NUMBERS: [&str; 7] = [
    "1999000", "1999013", "1999026", "1999039", "1999042", "1999055", "1999068",
];

/// Every catalogued PC part keyed by variant name, in catalogue order.
#[must_use]
pub fn all_params() -> IndexMap<String, PartParameters> {
    let mut table = IndexMap::new();

    for (num_pins, order) in (2..).zip(G1_ORDER_NUMBERS) {
        table.insert(
            format!("PC_01x{num_pins:02}_G1_10.16mm"),
            generate_params(
                num_pins,
                "PC-G1",
                PITCH,
                true,
                false,
                &[(order, RATING)],
                ParamOverrides {
                    side_to_pin: Some(6.6),
                    back_to_pin: Some(-14.4),
                    ..ParamOverrides::default()
                },
            ),
        );
    }

    // Threaded flange with mount hole
    for (num_pins, order) in (2..).zip(G1F_ORDER_NUMBERS) {
        table.insert(
            format!("PC_01x{num_pins:02}_G1F_10.16mm"),
            generate_params(
                num_pins,
                "PC-G1F",
                PITCH,
                true,
                true,
                &[(order, RATING)],
                ParamOverrides {
                    mount_hole: true,
                    mount_hole_to_pin: Some(10.16),
                    side_to_pin: Some(13.96),
                    back_to_pin: Some(-14.4),
                    ..ParamOverrides::default()
                },
            ),
        );
    }

    table
}

/// Derived outline dimensions of one part. All lengths in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    /// Body length along the pin row.
    pub length: f64,
    /// Body depth.
    pub width: f64,
    /// Body left edge relative to pin 1.
    pub left_to_pin: f64,
    /// Left mount hole centre.
    pub mount_hole_left: (f64, f64),
    /// Right mount hole centre.
    pub mount_hole_right: (f64, f64),
    /// Flange depth.
    pub flange_width: f64,
    /// Plug front edge.
    pub plug_front: f64,
    /// Plug back edge.
    pub plug_back: f64,
}

/// Computes the outline dimensions of a part.
#[must_use]
pub fn dimensions(params: &PartParameters) -> Dimensions {
    let mount_hole_y = if params.angled { 3.6 } else { 0.0 };
    let width = if params.angled { 34.0 } else { 7.25 };
    let span = params.pin_span();

    Dimensions {
        length: 2.0f64.mul_add(params.side_to_pin, span),
        width,
        left_to_pin: -params.side_to_pin,
        mount_hole_left: (-params.mount_hole_to_pin, mount_hole_y),
        mount_hole_right: (span + params.mount_hole_to_pin, mount_hole_y),
        flange_width: if params.angled { 9.2 } else { 6.0 },
        plug_front: width + params.back_to_pin - 0.75,
        plug_back: params.back_to_pin + 0.6 + 0.25,
    }
}

/// Footprint description for a part.
///
/// `mpn` names the part; every order number is appended after `||`.
#[must_use]
pub fn generate_description(params: &PartParameters, mpn: &str) -> String {
    let series = SeriesParameters::pc();
    let mut description = format!(
        "Generic Phoenix Contact connector footprint for: {mpn}; number of pins: {:02}; pin pitch: {:.2}mm; {}",
        params.num_pins,
        params.pin_pitch,
        if params.angled { "Angled" } else { "Vertical" }
    );

    if params.flanged {
        description.push_str("; threaded flange");
        if params.mount_hole {
            description.push_str("; footprint includes mount hole for mounting screw: ");
            description.push_str(series.mount_screw_info);
        }
    }

    for (order_num, info) in &params.order_info {
        description.push_str(" || order number: ");
        description.push_str(order_num);
        description.push(' ');
        description.push_str(info);
    }

    description
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn table_has_every_variant_in_order() {
        let table = all_params();
        assert_eq!(table.len(), 15);
        assert_eq!(table.get_index(0).unwrap().0, "PC_01x02_G1_10.16mm");
        assert_eq!(table.get_index(7).unwrap().0, "PC_01x09_G1_10.16mm");
        assert_eq!(table.get_index(8).unwrap().0, "PC_01x02_G1F_10.16mm");
        assert_eq!(table["PC_01x09_G1_10.16mm"].order_number(), "1996391");
        assert_eq!(table["PC_01x08_G1F_10.16mm"].order_number(), "1999068");
    }

    #[test]
    fn five_pin_length() {
        let table = all_params();
        let dims = dimensions(&table["PC_01x05_G1_10.16mm"]);
        assert!(approx(dims.length, 53.84));
        assert!(approx(dims.left_to_pin, -6.6));
        assert!(approx(dims.plug_front, 18.85));
        assert!(approx(dims.plug_back, -13.55));
    }

    #[test]
    fn pad_is_narrowed_for_clearance() {
        let series = SeriesParameters::pc();
        for params in all_params().values() {
            assert!(params.pin_sx <= params.pin_pitch - series.min_pad_to_pad_clearance + 1e-9);
            assert!(params.pin_pitch - params.pin_sx >= series.min_pad_to_pad_clearance - 1e-9);
            assert!(approx(params.pin_sy, 4.1));
        }
    }

    #[test]
    fn wide_pitch_keeps_nominal_pad() {
        let params = generate_params(3, "X", 12.0, true, false, &[], ParamOverrides::default());
        assert!(approx(params.pin_sx, 2.5));
    }

    #[test]
    fn defaults_for_vertical_plain_part() {
        let params = generate_params(4, "PC-V", 10.16, false, false, &[], ParamOverrides::default());
        assert!(approx(params.side_to_pin, (10.16 + 2.0) / 2.0));
        assert!(approx(params.back_to_pin, 3.0 - 7.25));
        assert!(approx(params.mount_hole_to_pin, 10.16));
        assert!(!params.mount_hole);

        let dims = dimensions(&params);
        assert!(approx(dims.width, 7.25));
        assert!(approx(dims.flange_width, 6.0));
        assert!(approx(dims.mount_hole_left.1, 0.0));
    }

    #[test]
    fn flanged_default_side() {
        let params = generate_params(2, "PC-F", 10.16, true, true, &[], ParamOverrides::default());
        assert!(approx(params.side_to_pin, 3.0 * 10.16 / 2.0));
    }

    #[test]
    fn mount_holes_symmetric_about_pin_row() {
        for params in all_params().values().filter(|p| p.mount_hole) {
            let dims = dimensions(params);
            let centre = params.pin_span() / 2.0;
            assert!(approx(centre - dims.mount_hole_left.0, dims.mount_hole_right.0 - centre));
        }
    }

    #[test]
    fn description_lists_flange_and_order() {
        let table = all_params();
        let desc = generate_description(&table["PC_01x03_G1F_10.16mm"], "PC_01x03_G1F_10.16mm");
        assert!(desc.starts_with(
            "Generic Phoenix Contact connector footprint for: PC_01x03_G1F_10.16mm; number of pins: 03; pin pitch: 10.16mm; Angled; threaded flange; footprint includes mount hole for mounting screw: ISO 1481"
        ));
        assert!(desc.ends_with(" || order number: 1999013 76A 1000V"));

        let plain = generate_description(&table["PC_01x03_G1_10.16mm"], "x");
        assert!(!plain.contains("flange"));
    }
}
