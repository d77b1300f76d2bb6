//! End-to-end approximation scenarios.
//!
//! The absolute-value scenario reproduces a published discrete minimax run:
//! degree 10 over 9999 equally spaced points on [-1, 1], where the
//! single-point exchange needs 32 iterations and the multi-point exchange 9,
//! both landing on the same polynomial with peak residual
//! 2.784511444310045e-2. The tangent scenario is Problem C from McBride's
//! 1973 thesis on discrete Tchebycheff approximation.

use remez::prelude::*;

/// Published degree-10 coefficients for |x| on a 9999-point grid.
const ABS_COEFFICIENTS: [f64; 11] = [
    2.784511444309240e-02,
    7.387882828314054e-15,
    4.753650534277715e+00,
    -2.198759996752948e-13,
    -2.064625072315169e+01,
    9.222549488347914e-13,
    4.777533702515291e+01,
    -1.369184236745336e-12,
    -4.959209462628783e+01,
    6.694441544223950e-13,
    1.870935779000889e+01,
];

const ABS_PEAK_RESIDUAL: f64 = 2.784511444310045e-02;

fn abs_processor(method: ExchangeMethod) -> Remez<f64> {
    Remez::<f64>::new()
        .degree(10)
        .grid_points(9999)
        .exchange_method(method)
        .max_iterations(50)
        .return_residuals()
        .return_trial_points()
        .return_history()
        .build()
        .unwrap()
}

fn approximate_abs(method: ExchangeMethod) -> RemezResult<f64> {
    abs_processor(method)
        .approximate(-1.0, 1.0, |x: f64| x.abs())
        .unwrap()
}

fn assert_matches_published_abs(result: &RemezResult<f64>) {
    assert!(
        (result.level_error.abs() - ABS_PEAK_RESIDUAL).abs() < 1e-10,
        "level error {:e}",
        result.level_error
    );
    assert!(
        (result.max_residual - ABS_PEAK_RESIDUAL).abs() < 1e-10,
        "peak residual {:e}",
        result.max_residual
    );
    for (k, (&got, &expected)) in result
        .coefficients
        .iter()
        .zip(ABS_COEFFICIENTS.iter())
        .enumerate()
    {
        if k % 2 == 0 {
            let tolerance = 1e-5 * expected.abs().max(1.0);
            assert!(
                (got - expected).abs() < tolerance,
                "c[{}] = {:e}, expected {:e}",
                k,
                got,
                expected
            );
        } else {
            // Odd coefficients vanish by symmetry, up to solver noise.
            assert!(got.abs() < 1e-8, "c[{}] = {:e}", k, got);
        }
    }
}

// ============================================================================
// Golden scenarios
// ============================================================================

#[test]
fn abs_single_point_matches_published_run() {
    let _ = env_logger::builder().is_test(true).try_init();

    let result = approximate_abs(ExchangeMethod::SinglePoint);
    assert_eq!(result.iterations, 32);
    assert_matches_published_abs(&result);
}

#[test]
fn abs_multi_point_converges_in_far_fewer_iterations() {
    let result = approximate_abs(ExchangeMethod::MultiPoint);
    assert_eq!(result.iterations, 9);
    assert_matches_published_abs(&result);
}

#[test]
fn strategies_agree_on_the_minimax_polynomial() {
    let single = approximate_abs(ExchangeMethod::SinglePoint);
    let multi = approximate_abs(ExchangeMethod::MultiPoint);

    assert!((single.level_error.abs() - multi.level_error.abs()).abs() < 1e-12);
    for (k, (&a, &b)) in single
        .coefficients
        .iter()
        .zip(multi.coefficients.iter())
        .enumerate()
    {
        let tolerance = 1e-5 * a.abs().max(1.0);
        assert!((a - b).abs() < tolerance, "c[{}]: {:e} vs {:e}", k, a, b);
    }
}

#[test]
fn tan_matches_mcbride_problem_c() {
    let result = Remez::<f64>::new()
        .degree(5)
        .grid_points(51)
        .exchange_method(ExchangeMethod::MultiPoint)
        .max_iterations(10)
        .build()
        .unwrap()
        .approximate(0.0, core::f64::consts::FRAC_PI_4, |x: f64| x.tan())
        .unwrap();

    assert!((result.level_error.abs() - 4.610770518016552e-05).abs() < 1e-10);
    assert!((result.coefficients[1] - 1.003821087881176e+00).abs() < 1e-6);
    assert!(result.iterations <= 6);
}

// ============================================================================
// Structural properties
// ============================================================================

#[test]
fn equioscillation_holds_at_the_final_alternation_set() {
    let result = approximate_abs(ExchangeMethod::MultiPoint);
    let residuals = result.residuals.as_ref().unwrap();
    let trial = result.trial_points.as_ref().unwrap();
    let magnitude = result.level_error.abs();

    assert_eq!(trial.len(), 12);
    let mut previous_sign = 0.0_f64;
    for &index in trial {
        let r = residuals[index];
        assert!(
            (r.abs() - magnitude).abs() < 1e-9 * magnitude.max(1e-30),
            "residual {:e} at grid index {} is off the level {:e}",
            r,
            index,
            magnitude
        );
        assert!(r * previous_sign <= 0.0, "sign failed to alternate");
        previous_sign = r;
    }
}

#[test]
fn level_error_history_grows_until_the_final_check() {
    let result = approximate_abs(ExchangeMethod::SinglePoint);
    let history = result.history.as_ref().unwrap();
    assert_eq!(history.len(), result.iterations);

    // Every accepted iteration grows the level error; only the final record
    // is allowed to fall back, by construction of the stopping rule.
    for pair in history[..history.len() - 1].windows(2) {
        assert!(
            pair[1].level_error >= pair[0].level_error,
            "level error shrank from {:e} to {:e} at iteration {}",
            pair[0].level_error,
            pair[1].level_error,
            pair[1].iteration
        );
    }
}

#[test]
fn runs_are_deterministic() {
    let first = approximate_abs(ExchangeMethod::MultiPoint);
    let second = approximate_abs(ExchangeMethod::MultiPoint);

    assert_eq!(first.iterations, second.iterations);
    assert_eq!(first.level_error.to_bits(), second.level_error.to_bits());
    for (a, b) in first.coefficients.iter().zip(second.coefficients.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_and_sequential_runs_are_identical() {
    let run = |parallel: bool| {
        Remez::<f64>::new()
            .degree(10)
            .grid_points(9999)
            .exchange_method(ExchangeMethod::MultiPoint)
            .max_iterations(50)
            .parallel(parallel)
            .build()
            .unwrap()
            .approximate(-1.0, 1.0, |x: f64| x.abs())
            .unwrap()
    };

    let sequential = run(false);
    let parallel = run(true);
    assert_eq!(sequential.iterations, parallel.iterations);
    assert_eq!(
        sequential.level_error.to_bits(),
        parallel.level_error.to_bits()
    );
    for (a, b) in sequential
        .coefficients
        .iter()
        .zip(parallel.coefficients.iter())
    {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn grid_of_exactly_degree_plus_two_converges_in_one_iteration() {
    for method in [ExchangeMethod::SinglePoint, ExchangeMethod::MultiPoint] {
        let result = Remez::<f64>::new()
            .degree(3)
            .grid_points(5)
            .exchange_method(method)
            .return_trial_points()
            .return_residuals()
            .build()
            .unwrap()
            .approximate(-1.0, 1.0, |x: f64| x.exp())
            .unwrap();

        assert_eq!(result.iterations, 1, "{:?}", method);
        assert_eq!(
            result.trial_points.as_ref().unwrap(),
            &vec![0, 1, 2, 3, 4],
            "{:?}",
            method
        );

        // With no grid point outside the set, the residual equioscillates
        // over the entire grid.
        let magnitude = result.level_error.abs();
        for &r in result.residuals.as_ref().unwrap() {
            assert!((r.abs() - magnitude).abs() < 1e-12);
        }
    }
}

#[test]
fn zero_target_yields_the_zero_polynomial() {
    // The level error pins to exactly zero; the run converges once the
    // repeat is observed on the second solve.
    let result = Remez::<f64>::new()
        .degree(4)
        .grid_points(33)
        .build()
        .unwrap()
        .approximate(-1.0, 1.0, |_| 0.0)
        .unwrap();

    assert_eq!(result.iterations, 2);
    assert_eq!(result.level_error, 0.0);
    for &c in &result.coefficients {
        assert_eq!(c, 0.0);
    }
}

#[test]
fn iteration_cap_is_reported_as_a_distinct_failure() {
    let err = Remez::<f64>::new()
        .degree(10)
        .grid_points(9999)
        .exchange_method(ExchangeMethod::SinglePoint)
        .max_iterations(5)
        .build()
        .unwrap()
        .approximate(-1.0, 1.0, |x: f64| x.abs())
        .unwrap_err();

    assert_eq!(err, RemezError::MaxIterations { limit: 5 });
}

#[test]
fn non_finite_target_values_are_rejected() {
    let err = Remez::<f64>::new()
        .degree(3)
        .grid_points(21)
        .build()
        .unwrap()
        .approximate(-1.0, 1.0, |x: f64| 1.0 / x)
        .unwrap_err();

    assert!(matches!(err, RemezError::NumericDomain(_)));
}

#[test]
fn polynomial_targets_are_recovered_exactly() {
    // The minimax approximation of a degree-3 polynomial by degree 3 is the
    // polynomial itself, with a vanishing level error.
    let result = Remez::<f64>::new()
        .degree(3)
        .grid_points(101)
        .build()
        .unwrap()
        .approximate(-2.0, 2.0, |x: f64| 1.0 - 0.5 * x + 0.125 * x * x * x)
        .unwrap();

    assert!(result.level_error.abs() < 1e-12);
    assert!((result.coefficients[0] - 1.0).abs() < 1e-10);
    assert!((result.coefficients[1] + 0.5).abs() < 1e-10);
    assert!(result.coefficients[2].abs() < 1e-10);
    assert!((result.coefficients[3] - 0.125).abs() < 1e-10);
}
