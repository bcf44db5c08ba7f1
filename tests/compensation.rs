use dotgain::compensation::compensationreport::CompensationReport;
use dotgain::compensation::continuouscompensation::solve_input_for_output;
use dotgain::compensation::targettones::TargetTones;
use dotgain::configuration::Configuration;
use dotgain::engine::curvecache::SingleThreadedCurveEngine;
use dotgain::engine::curveengine::{
    compensate_for,
    compute_curve,
    DEFAULT_STEP
};
use dotgain::export::curveexport::curve_to_tsv;
use dotgain::tvi::customprofile::CustomProfileBuilder;
use dotgain::tvi::profilecomparison::{
    GainDifference,
    ProfileComparison
};
use dotgain::tvi::tviprofile::TviProfile;
use dotgain::tvi::tvipreset::TviPreset;

#[test]
fn custom_profile_edit_flow() {
    let engine = SingleThreadedCurveEngine::new(DEFAULT_STEP);
    let mut builder = CustomProfileBuilder::new();

    let empty_curve = engine.curve(&builder.build());
    assert!(empty_curve.iter().all(|s| s.output() == s.input()));

    for (tone, gain) in [(10.0, 5.0), (20.0, 10.0), (30.0, 14.0), (40.0, 16.0), (50.0, 17.0),
                         (60.0, 15.0), (70.0, 12.0), (80.0, 8.0), (90.0, 4.0)] {
        builder.set(tone, gain).unwrap();
    }
    let filled = builder.build();
    let filled_curve = engine.curve(&filled);

    assert_eq!(*filled_curve, compute_curve(&TviPreset::Medium.profile(), DEFAULT_STEP));
    assert_eq!(filled_curve.len(), 21);

    let report = engine.report(&filled, &TargetTones::default());
    assert_eq!(report.highlight().input(), 35.0);
    assert_eq!(report.shadow().input(), 90.0);
}

#[test]
fn sampled_and_continuous_inverses_agree() {
    for preset in TviPreset::ALL {
        let profile = preset.profile();
        let curve = compute_curve(&profile, DEFAULT_STEP);
        for target in [10.0, 30.0, 50.0, 70.0, 90.0] {
            let sampled = compensate_for(&curve, target);
            let exact = solve_input_for_output(&profile, target).unwrap().unwrap();
            assert!((sampled - exact).abs() <= DEFAULT_STEP,
                    "{preset} target {target}: sampled {sampled}, exact {exact}");
        }
    }
}

#[test]
fn configured_profile_feeds_the_export() {
    let config = Configuration::new();
    config
        .from_json_str(r#"{
            "step": 25,
            "targets": { "highlight": 10, "shadow": 90 },
            "profiles": [ { "name": "press-b", "points": { "50": 20 } } ]
        }"#)
        .unwrap();

    let profile = config.profile("press-b").unwrap();
    let curve = compute_curve(&profile, config.step());
    assert_eq!(
        curve_to_tsv(&curve),
        "Input %\tTVI %\tOutput %\tBump %\n\
         0\t0\t0\t0\n\
         25\t10\t35\t10\n\
         50\t20\t70\t20\n\
         75\t10\t85\t10\n\
         100\t0\t100\t0");

    let report = CompensationReport::evaluate(&curve, &config.targets());
    assert_eq!(report.highlight().target(), 10.0);
    assert!(report.highlight().input() < 10.0);
    assert!(!report.shadow().is_fallback());
}

#[test]
fn measured_press_matches_medium_preset() {
    let measurements: Vec<(f64, f64)> = TviPreset::Medium
        .profile()
        .control_points()
        .iter()
        .map(|pt| (pt.input_tone(), pt.input_tone() + pt.gain() + 0.3))
        .collect();
    let measured = TviProfile::from_measurements(&measurements).unwrap();
    assert_eq!(measured.gain_at(50.0), Some(17.3));

    let comparison = ProfileComparison::evaluate(&TviPreset::Medium.profile(), &measured);
    assert!(comparison.deltas().iter().all(|d| d.delta() == 0.3));
    assert_eq!(comparison.difference(), GainDifference::VerySimilar);

    let against_heavy = ProfileComparison::evaluate(&measured, &TviPreset::Heavy.profile());
    assert_eq!(against_heavy.difference(), GainDifference::Significant);
}
