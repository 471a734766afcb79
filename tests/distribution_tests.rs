use skewcurve::{
    ContinuousDistribution, Distribution, GridRange, SampleTable, SkewGtParams, SkewTParams,
};

/// Generate a random `f64` in `[low, high)`.
fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Moderate skew-t parameters: heavy tails excluded so the `[-5, 5]` window
/// captures essentially all of the mass.
fn moderate_skew_t(rng: &mut fastrand::Rng) -> SkewTParams {
    SkewTParams::new(
        f64_range(rng, -1.0, 1.0),
        f64_range(rng, 0.6, 1.2),
        f64_range(rng, 4.0, 8.0),
        f64_range(rng, -2.0, 2.0),
    )
    .unwrap()
}

fn moderate_skew_gt(rng: &mut fastrand::Rng) -> SkewGtParams {
    SkewGtParams::new(
        f64_range(rng, -1.0, 1.0),
        f64_range(rng, 0.6, 1.2),
        f64_range(rng, -0.8, 0.8),
        f64_range(rng, 2.0, 3.0),
        f64_range(rng, 3.0, 6.0),
    )
    .unwrap()
}

/// Trapezoidal integral of the table's density column over its grid.
fn table_pdf_integral(table: &SampleTable) -> f64 {
    table
        .pdf_vals()
        .windows(2)
        .map(|pair| 0.5 * (pair[0] + pair[1]) * table.step())
        .sum()
}

#[test]
fn skew_t_density_integrates_to_one() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..6 {
        let params = moderate_skew_t(&mut rng);
        let table = SampleTable::build(&params, GridRange::default(), 0.2).unwrap();
        let integral = table_pdf_integral(&table);
        assert!((integral - 1.0).abs() < 0.05, "params={params:?} integral={integral}");
    }
}

#[test]
fn skew_gt_density_integrates_to_one() {
    let mut rng = fastrand::Rng::with_seed(43);
    for _ in 0..20 {
        let params = moderate_skew_gt(&mut rng);
        let table = SampleTable::build(&params, GridRange::default(), 0.1).unwrap();
        let integral = table_pdf_integral(&table);
        assert!((integral - 1.0).abs() < 0.05, "params={params:?} integral={integral}");
    }
}

#[test]
fn table_cdf_is_monotone_for_fuzzed_parameters() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..10 {
        let dist = if rng.bool() {
            Distribution::SkewT(moderate_skew_t(&mut rng))
        } else {
            Distribution::SkewGeneralizedT(moderate_skew_gt(&mut rng))
        };
        let table = SampleTable::build(&dist, GridRange::default(), 0.2).unwrap();
        for pair in table.cdf_vals().windows(2) {
            assert!(pair[1] >= pair[0], "dist={dist:?}");
        }
    }
}

#[test]
fn raw_cdf_is_monotone_up_to_integration_tolerance() {
    // Outside the table the skew-t CDF comes from per-point trapezoid
    // integration; adjacent evaluations may wiggle at the error floor but
    // never meaningfully decrease.
    let mut rng = fastrand::Rng::with_seed(19);
    for _ in 0..4 {
        let params = moderate_skew_t(&mut rng);
        let mut prev = 0.0;
        let mut x = -5.0;
        while x <= 5.0 {
            let cdf = params.cdf(x).unwrap();
            assert!(cdf >= prev - 1e-7, "params={params:?} x={x}");
            prev = cdf;
            x += 0.5;
        }
    }
}

#[test]
fn skew_t_with_zero_alpha_is_student_t() {
    // Closed-form Student-t CDF values for nu = 1 (Cauchy) and the density
    // scenario value for nu = 5.
    let cauchy = SkewTParams::new(0.0, 1.0, 1.0, 0.0).unwrap();
    assert!((cauchy.cdf(1.0).unwrap() - 0.75).abs() < 1e-6);
    assert!((cauchy.cdf(-1.0).unwrap() - 0.25).abs() < 1e-6);

    let t5 = SkewTParams::new(0.0, 1.0, 5.0, 0.0).unwrap();
    assert!((t5.pdf(0.0).unwrap() - 0.3796).abs() < 1e-3);
    assert!((t5.cdf(0.0).unwrap() - 0.5).abs() < 1e-9);
}

#[test]
fn skewed_cdf_covers_nearly_all_mass_across_the_support() {
    let params = SkewTParams::new(0.5, 1.0, 5.0, 2.0).unwrap();
    let low = params.cdf(params.xi - 9.0).unwrap();
    let high = params.cdf(params.xi + 20.0).unwrap();
    assert!(low < 0.01, "low={low}");
    assert!(high > 0.99, "high={high}");
}

#[test]
fn skew_gt_cdf_matches_integrated_density() {
    // The closed-form incomplete-beta CDF must agree with brute-force
    // integration of the density.
    let params = SkewGtParams::new(0.3, 1.2, 0.5, 2.5, 4.0).unwrap();
    for &x in &[-2.0, -0.5, 0.3, 1.0, 3.0] {
        let lower = params.mu - 30.0 * params.sigma;
        let n = 20_000;
        let h = (x - lower) / f64::from(n);
        let mut sum = 0.5 * (params.pdf(lower).unwrap() + params.pdf(x).unwrap());
        for i in 1..n {
            sum += params.pdf(lower + f64::from(i) * h).unwrap();
        }
        let integrated = sum * h;
        let closed = params.cdf(x).unwrap();
        assert!((integrated - closed).abs() < 2e-3, "x={x}: {integrated} vs {closed}");
    }
}

#[test]
fn both_families_reject_invalid_records_identically() {
    assert!(SkewTParams::new(0.0, -1.0, 5.0, 0.0).is_err());
    assert!(SkewTParams::new(0.0, 1.0, f64::NAN, 0.0).is_err());
    assert!(SkewGtParams::new(0.0, 1.0, -1.2, 2.0, 3.0).is_err());
    assert!(SkewGtParams::new(0.0, 1.0, 0.0, 0.5, 0.5).is_err());

    // A failed build produces no table at all, not a partial one.
    let bad = Distribution::SkewT(SkewTParams { xi: 0.0, omega: 0.0, nu: 5.0, alpha: 0.0 });
    assert!(SampleTable::build(&bad, GridRange::default(), 0.1).is_err());
}
