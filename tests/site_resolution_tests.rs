// End-to-end checks: resolve a site, ingest simulator output, derive the
// report metrics the dashboard shows.

use approx::assert_abs_diff_eq;
use icestupa_rust::metrics;
use icestupa_rust::output_table::SimulationOutputTable;
use icestupa_rust::params::{classify_columns, ParameterKind};
use icestupa_rust::report;
use icestupa_rust::results::ResultsSummary;
use icestupa_rust::site::{resolve, SiteId, SprayMode};
use std::path::PathBuf;

const OUTPUT_CSV: &str = "\
time,Discharge,T_a,fountain_froze,melted,iceV,f_cone
2021-01-18 00:00:00,0,-12.0,0,0.0,0.2,0.31
2021-01-18 01:00:00,60,-13.5,220,0.0,0.5,0.32
2021-01-18 02:00:00,60,-13.1,275,0.0,0.9,0.33
2021-01-18 03:00:00,0,-9.4,0,18.0,0.85,0.35
";

const RESULTS_JSON: &str = r#"{
    "R_F": 9.05,
    "M_F": 1554000.0,
    "D_F": 60.0,
    "M_water": 230000.0,
    "M_sub": 12000.0,
    "M_input": 1600000.0,
    "M_runoff": 990000.0,
    "WUE": 24.5
}"#;

#[test]
fn test_resolution_feeds_metrics_end_to_end() {
    let (constants, profile, layout) = resolve("Gangles 2021", None).unwrap();
    assert_eq!(profile.name, "gangles21");
    assert_abs_diff_eq!(profile.altitude, 4009.0);
    assert_abs_diff_eq!(profile.fountain.initial_height(), 5.0);
    assert_eq!(
        layout.output_table_path("output.csv"),
        PathBuf::from("data/gangles21/processed/output.csv")
    );

    let table = SimulationOutputTable::from_csv(OUTPUT_CSV.as_bytes()).unwrap();
    let summary = ResultsSummary::from_json_str(RESULTS_JSON).unwrap();
    let report_metrics = metrics::compute(&table, &summary, &constants).unwrap();

    // two fountain-on hours at 60 min/step
    assert_eq!(report_metrics.fountain_active_duration, 2);
    assert_abs_diff_eq!(
        report_metrics.mean_freeze_rate.unwrap(),
        (220.0 + 275.0) / 2.0 / 60.0,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        report_metrics.mean_melt_rate,
        18.0 / 4.0 / 60.0,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(report_metrics.max_ice_volume, 0.9);
    assert_abs_diff_eq!(
        report_metrics.net_water_loss_fraction,
        (990000.0 + 12000.0) / 1600000.0 * 100.0
    );
    assert_abs_diff_eq!(report_metrics.water_use_efficiency.unwrap(), 24.5);

    // the same run renders to both dashboard tables without error
    let fountain = report::fountain_table(&report_metrics, &summary).unwrap();
    assert!(fountain.contains("| Spray Radius | 9.1 m |"));
    let icestupa = report::icestupa_table(&report_metrics, &summary, &profile).unwrap();
    assert!(icestupa.contains("| Melt-out date | Jun 20 |"));
}

#[test]
fn test_every_registered_site_resolves_both_ways() {
    for site in SiteId::all() {
        let (constants, profile, layout) = resolve(site.code(), None).unwrap();
        let by_name = resolve(site.display_name(), None).unwrap();
        assert_eq!(profile, by_name.1);
        assert_eq!(constants, by_name.0);
        assert_eq!(layout, by_name.2);
        assert_eq!(profile.name, site.code());
    }
}

#[test]
fn test_guttannen22_auto_variant_through_resolver() {
    let (_, manual, _) = resolve("guttannen22", Some(SprayMode::Manual)).unwrap();
    let (_, auto, _) = resolve("guttannen22", Some(SprayMode::Automated)).unwrap();
    assert_ne!(manual.start_date, auto.start_date);
    assert_eq!(manual.expiry_date, auto.expiry_date);
}

#[test]
fn test_table_columns_classify_for_display() {
    let table = SimulationOutputTable::from_csv(OUTPUT_CSV.as_bytes()).unwrap();
    let classified = classify_columns(&table);
    assert_eq!(classified.input.len(), 2); // Discharge, T_a
    assert_eq!(classified.output.len(), 3); // fountain_froze, melted, iceV
    assert_eq!(classified.derived.len(), 1); // f_cone
    assert_eq!(classified.derived[0].label, "Solar Surface Area Fraction");

    let meta = icestupa_rust::params::get_parameter_metadata("Discharge");
    assert_eq!(meta.kind, ParameterKind::Input);
}
