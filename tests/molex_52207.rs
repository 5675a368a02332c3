//! Molex 52207 FFC footprint tests.
//!
//! Checks generated geometry against the series drawing and the KLC
//! layout rules for every supported circuit count.

use connector_footprints::config::{parse_config, Config};
use connector_footprints::kicad::{Attribute, Layer, PadType, Primitive};
use connector_footprints::series::molex_ffc::Molex52207;
use connector_footprints::series::SeriesGenerator;

const GLOBAL: &str = include_str!("../config/global_config.yaml");
const SERIES: &str = include_str!("../config/conn_config.yaml");

fn config() -> Config {
    parse_config(GLOBAL, SERIES).expect("bundled config loads")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// =============================================================================
// Naming
// =============================================================================

#[test]
fn test_ten_pin_name_and_library() {
    let config = config();
    let gen = Molex52207::new();
    let fp = gen.footprint(10, &config);

    assert_eq!(fp.name, "Molex_52207-1060_1x10-1MP_P1.00mm_Horizontal");
    assert_eq!(gen.library_name(&config), "Connector_FFC-FPC");
    assert_eq!(fp.attribute, Some(Attribute::Smd));
    assert_eq!(fp.tags, "connector Molex Horizontal side entry");
    assert!(fp.description.starts_with(
        "Molex Molex 1.00mm Pitch Easy-On, Right-Angle, ZIF, Top Contact FFC/FPC, 52207-1060, 10 Circuits (https://www.molex.com/pdm_docs/sd/522071060_sd.pdf)"
    ));
    assert_eq!(
        fp.model.as_ref().map(|m| m.path.as_str()),
        Some("${KISYS3DMOD}/Connector_FFC-FPC.3dshapes/Molex_52207-1060_1x10-1MP_P1.00mm_Horizontal.wrl")
    );
}

#[test]
fn test_series_covers_three_to_thirty_circuits() {
    let config = config();
    let footprints = Molex52207::new().footprints(&config).collect::<Vec<_>>();
    assert_eq!(footprints.len(), 28);
    assert_eq!(footprints[0].name, "Molex_52207-0360_1x03-1MP_P1.00mm_Horizontal");
    assert_eq!(footprints[27].name, "Molex_52207-3060_1x30-1MP_P1.00mm_Horizontal");
}

// =============================================================================
// Pads
// =============================================================================

#[test]
fn test_pad_layout() {
    let config = config();
    let fp = Molex52207::new().footprint(10, &config);
    let pads: Vec<_> = fp.pads().collect();
    assert_eq!(pads.len(), 12);

    let mounting: Vec<_> = pads.iter().filter(|p| p.number == "MP").collect();
    assert_eq!(mounting.len(), 2);
    for pad in &mounting {
        assert!(approx(pad.at.x.abs(), 7.65));
        assert!(approx(pad.at.y, -0.8));
        assert!(approx(pad.size.0, 2.1) && approx(pad.size.1, 2.8));
    }

    let signal: Vec<_> = pads.iter().filter(|p| p.number != "MP").collect();
    assert_eq!(signal[0].number, "1");
    assert!(approx(signal[0].at.x, -4.5));
    assert!(approx(signal[0].at.y, -3.15));
    assert_eq!(signal[9].number, "10");
    assert!(approx(signal[9].at.x, 4.5));
    assert!(pads.iter().all(|p| p.pad_type == PadType::Smt));
}

#[test]
fn test_pads_symmetric_for_every_pin_count() {
    let config = config();
    for fp in Molex52207::new().footprints(&config) {
        let pads: Vec<_> = fp.pads().collect();
        let sum_x: f64 = pads.iter().map(|p| p.at.x).sum();
        assert!(sum_x.abs() < 1e-9, "{} is not symmetric", fp.name);

        let signal: Vec<_> = pads.iter().filter(|p| p.number != "MP").collect();
        for pair in signal.windows(2) {
            assert!(approx(pair[1].at.x - pair[0].at.x, 1.0));
        }
    }
}

// =============================================================================
// Outlines
// =============================================================================

#[test]
fn test_layer_contents() {
    let config = config();
    let fp = Molex52207::new().footprint(10, &config);

    let fab_lines = fp
        .on_layer(Layer::FrontFab)
        .filter(|p| matches!(p, Primitive::PolyLine(_)))
        .count();
    let silk_lines = fp
        .on_layer(Layer::FrontSilkscreen)
        .filter(|p| matches!(p, Primitive::PolyLine(_)))
        .count();
    assert_eq!(fab_lines, 3);
    assert_eq!(silk_lines, 3);
    assert_eq!(fp.on_layer(Layer::FrontCourtyard).count(), 1);
}

#[test]
fn test_courtyard_is_grid_aligned() {
    let config = config();
    for fp in Molex52207::new().footprints(&config) {
        for primitive in fp.on_layer(Layer::FrontCourtyard) {
            let Primitive::Rect(rect) = primitive else {
                panic!("courtyard is not a rectangle");
            };
            for v in [rect.start.x, rect.start.y, rect.end.x, rect.end.y] {
                let snapped = (v / 0.01).round() * 0.01;
                assert!((v - snapped).abs() < 1e-9, "{v} off grid in {}", fp.name);
            }
        }
    }
}

#[test]
fn test_ten_pin_courtyard() {
    let config = config();
    let fp = Molex52207::new().footprint(10, &config);
    let text = fp.to_kicad_mod();

    assert!(text.contains("(fp_line (start -9.2 -4.6) (end 9.2 -4.6) (layer F.CrtYd) (width 0.05))"));
    assert!(text.contains("(fp_line (start 9.2 -4.6) (end 9.2 5.6) (layer F.CrtYd) (width 0.05))"));
}

#[test]
fn test_text_fields() {
    let config = config();
    let fp = Molex52207::new().footprint(10, &config);
    let text = fp.to_kicad_mod();

    assert!(text.contains("(fp_text reference REF** (at 0 -5.3) (layer F.SilkS)"));
    assert!(text.contains("(fp_text user %R (at 0 0.5) (layer F.Fab)"));
    assert!(text.contains(
        "(fp_text value Molex_52207-1060_1x10-1MP_P1.00mm_Horizontal (at 0 6.3) (layer F.Fab)"
    ));
}

#[test]
fn test_output_starts_with_module_header() {
    let config = config();
    let text = Molex52207::new().footprint(3, &config).to_kicad_mod();
    assert!(text.starts_with("(module Molex_52207-0360_1x03-1MP_P1.00mm_Horizontal (layer F.Cu) (tedit 0)\n"));
    assert!(text.contains("  (attr smd)\n"));
    assert!(text.ends_with(")\n"));
}
