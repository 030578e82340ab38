use approx::{assert_abs_diff_eq, assert_relative_eq};
use constancy_rs::constancy::classical::{
    robust_awb_with_trace, EdgeBasedParams, GrayWorldParams, RobustAwbParams, ShadesOfGrayParams,
    WhitePatchParams,
};
use constancy_rs::constancy::{
    angular_error, compute_statistics, edge_based, gray_world, max_rgb, normalize, shades_of_gray,
    validate, white_patch, ClassicalSuiteConfig, ConstancyError, EvaluationConfig,
    EvaluationPipeline, Illuminant, LabeledSample, NdArray, StatisticsConfig, StatisticsReport,
};

fn textured_scene(light: [f64; 3]) -> NdArray {
    let pixels: Vec<[f64; 3]> = (0..100)
        .map(|i| {
            let albedo = 0.1 + 0.8 * ((i * 37 % 100) as f64 / 100.0);
            light.map(|l| l * albedo)
        })
        .collect();
    NdArray::from_rgb_f64(10, 10, &pixels)
}

#[test]
fn gray_world_on_uniform_gray_is_unit_diagonal() {
    let expected = 1.0 / 3.0f64.sqrt();
    for c in [1u8, 17, 128, 255] {
        let array = NdArray::from_rgb_u8(5, 7, &[[c, c, c]; 35]);
        let view = validate(&array).unwrap();
        let unit = normalize(gray_world(&view, &GrayWorldParams::default()).unwrap()).unwrap();
        for v in unit.as_array() {
            assert_relative_eq!(v, expected, epsilon = 1e-12);
        }
    }
}

#[test]
fn white_patch_returns_raw_channel_maxima() {
    let array = NdArray::from_rgb_f64(
        2,
        2,
        &[[0.1, 0.2, 0.3], [0.9, 0.1, 0.1], [0.2, 0.8, 0.2], [0.3, 0.3, 0.7]],
    );
    let view = validate(&array).unwrap();
    let raw = white_patch(&view, &WhitePatchParams::default()).unwrap();
    assert_eq!(raw, Illuminant::new(0.9, 0.8, 0.7));
    assert_eq!(raw, max_rgb(&view).unwrap());
}

#[test]
fn shades_of_gray_limiting_cases() {
    let array = textured_scene([0.8, 0.6, 0.5]);
    let view = validate(&array).unwrap();

    let p1 = shades_of_gray(&view, &ShadesOfGrayParams::with_p(1.0)).unwrap();
    let gw = gray_world(&view, &GrayWorldParams::default()).unwrap();
    for (a, b) in p1.as_array().iter().zip(gw.as_array().iter()) {
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    let large = shades_of_gray(&view, &ShadesOfGrayParams::with_p(2048.0)).unwrap();
    let max = max_rgb(&view).unwrap();
    for (a, b) in large.as_array().iter().zip(max.as_array().iter()) {
        assert_relative_eq!(a, b, max_relative = 0.01);
    }
}

#[test]
fn every_estimator_recovers_light_on_achromatic_texture() {
    let light = [0.9, 0.7, 0.45];
    let array = textured_scene(light);
    let view = validate(&array).unwrap();

    for method in ClassicalSuiteConfig::default().methods() {
        let estimate = method.estimate(&view).unwrap();
        let err = angular_error(estimate, light).unwrap();
        assert!(err < 1e-4, "{} off by {err}°", method.name());
    }

    let edge = edge_based(&view, &EdgeBasedParams::default()).unwrap();
    assert!(angular_error(edge, light).unwrap() < 1e-4);
}

#[test]
fn robust_awb_terminates_on_all_saturated_image() {
    let array = NdArray::uniform_f64(16, 16, [1.0, 1.0, 1.0]);
    let view = validate(&array).unwrap();
    let params = RobustAwbParams::default().max_iterations(5);
    let trace = robust_awb_with_trace(&view, &params).unwrap();
    assert!(trace.iterations <= 5);
    assert!(matches!(
        normalize(trace.illuminant),
        Err(ConstancyError::DegenerateVectorError { .. })
    ));
}

#[test]
fn normalize_rejects_zero_and_is_idempotent() {
    assert!(matches!(
        normalize([0.0, 0.0, 0.0]),
        Err(ConstancyError::DegenerateVectorError { .. })
    ));
    let unit = normalize([0.3, 0.1, 0.6]).unwrap();
    let again = normalize(unit).unwrap();
    assert_relative_eq!(Illuminant::from(again).norm(), 1.0, epsilon = 1e-12);
}

#[test]
fn angular_error_properties() {
    let v = [0.25, 0.5, 0.8];
    assert_abs_diff_eq!(angular_error(v, v).unwrap(), 0.0, epsilon = 1e-6);
    let w = [0.7, 0.2, 0.1];
    assert_abs_diff_eq!(
        angular_error(v, w).unwrap(),
        angular_error(w, v).unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn statistics_on_zero_errors_and_empty_input() {
    let report = compute_statistics(&[0.0, 0.0, 0.0, 0.0], &StatisticsConfig::default()).unwrap();
    assert_eq!((report.mean, report.median, report.std), (0.0, 0.0, 0.0));
    assert!(report.percentiles.iter().all(|p| p.value == 0.0));
    assert!(report.success_rates.iter().all(|r| r.rate == 1.0));

    assert!(matches!(
        compute_statistics(&[], &StatisticsConfig::default()),
        Err(ConstancyError::EmptyInputError)
    ));
}

#[test]
fn report_round_trips_through_json_file() {
    let samples = vec![
        LabeledSample::new("a", textured_scene([0.9, 0.6, 0.3]), [0.9, 0.6, 0.3]),
        LabeledSample::new("b", textured_scene([0.4, 0.6, 0.9]), [0.5, 0.6, 0.8]),
    ];
    let pipeline = EvaluationPipeline::with_config(
        constancy_rs::constancy::ClassicalMethod::MaxRgb,
        EvaluationConfig::default(),
    );
    let outcome = pipeline.evaluate(&samples).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    outcome.report.write_json(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: StatisticsReport = serde_json::from_str(&text).unwrap();
    assert_eq!(back.count, 2);
    assert_relative_eq!(back.mean, outcome.report.mean, max_relative = 1e-12);
    assert_relative_eq!(back.max, outcome.report.max, max_relative = 1e-12);
    assert_eq!(back.success_rates.len(), outcome.report.success_rates.len());
    assert!(outcome.report.to_string().contains("Error Statistics (n=2)"));
}
