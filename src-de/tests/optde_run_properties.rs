use std::cell::{Cell, RefCell};

use deopt_de::{
    BoundedProblem, DEConfig, DEConfigBuilder, DEError, DifferentialEvolution, Mutation, Problem,
    optimize,
};
use deopt_testfunctions::{create_bounds, sphere};
use ndarray::{Array1, Array2};

/// Sphere objective counting its evaluations
fn counting_problem(calls: &Cell<usize>, n: usize) -> BoundedProblem<impl Fn(&Array1<f64>) -> f64 + '_> {
    BoundedProblem::new(
        move |x: &Array1<f64>| {
            calls.set(calls.get() + 1);
            sphere(x)
        },
        &create_bounds(n, -5.0, 5.0),
    )
    .unwrap()
}

#[test]
fn test_evaluation_count_without_budget() {
    let calls = Cell::new(0);
    let problem = counting_problem(&calls, 3);
    let config = DEConfigBuilder::new().seed(1).popsize(20).maxiter(5).build();

    let report = optimize(&problem, config).unwrap();

    assert_eq!(report.nfev, 20 + 5 * 20);
    assert_eq!(calls.get(), 120);
    assert_eq!(report.nit, 5);
    assert_eq!(report.logbook.len(), 6);
    let cumulative: Vec<usize> = report.logbook.records().iter().map(|r| r.nfev).collect();
    assert_eq!(cumulative, vec![20, 40, 60, 80, 100, 120]);
    let gens: Vec<usize> = report.logbook.records().iter().map(|r| r.generation).collect();
    assert_eq!(gens, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_budget_checked_at_generation_boundaries() {
    let calls = Cell::new(0);
    let problem = counting_problem(&calls, 2);

    let exact = DEConfigBuilder::new().seed(2).popsize(10).max_nfev(50).build();
    let report = optimize(&problem, exact).unwrap();
    assert_eq!(report.nfev, 50);
    assert_eq!(report.nit, 4);
    assert!(report.message.contains("budget"), "{}", report.message);

    // 55 is not a multiple of the population: the run overshoots to 60
    let overshoot = DEConfigBuilder::new().seed(2).popsize(10).max_nfev(55).build();
    let report = optimize(&problem, overshoot).unwrap();
    assert_eq!(report.nfev, 60);
    assert_eq!(report.nit, 5);

    // the generation limit still applies under a budget
    let capped = DEConfigBuilder::new().seed(2).popsize(10).max_nfev(10_000).maxiter(3).build();
    let report = optimize(&problem, capped).unwrap();
    assert_eq!(report.nfev, 40);
    assert_eq!(report.nit, 3);
}

#[test]
fn test_best_so_far_never_increases() {
    let problem = BoundedProblem::new(sphere, &create_bounds(4, -5.0, 5.0)).unwrap();
    let config = DEConfigBuilder::new()
        .seed(3)
        .popsize(12)
        .maxiter(60)
        .variant_str("rand/2/exp")
        .unwrap()
        .mutation(Mutation::range(0.2, 0.9))
        .build();

    let seen = RefCell::new(Vec::new());
    let report = DifferentialEvolution::new(&problem, config)
        .unwrap()
        .with_callback(|it| seen.borrow_mut().push((it.iter, it.fun, it.stats.min)))
        .solve()
        .unwrap();

    let seen = seen.into_inner();
    assert_eq!(seen.len(), 61);
    for w in seen.windows(2) {
        assert_eq!(w[1].0, w[0].0 + 1);
        assert!(w[1].1 <= w[0].1, "best regressed: {} -> {}", w[0].1, w[1].1);
        assert!(w[1].2 <= w[0].2, "population min regressed");
    }
    let last = seen.last().unwrap();
    assert_eq!(report.fun, last.1);
    assert_eq!(report.fun, sphere(&report.x));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let problem = BoundedProblem::new(sphere, &create_bounds(3, -5.0, 5.0)).unwrap();
    let config = DEConfigBuilder::new()
        .seed(42)
        .popsize(10)
        .maxiter(25)
        .mutation(Mutation::range(0.3, 0.9))
        .build();

    let a = optimize(&problem, config.clone()).unwrap();
    let b = optimize(&problem, config.clone()).unwrap();
    assert_eq!(a, b);

    let other = optimize(&problem, DEConfig { seed: Some(43), ..config }).unwrap();
    assert_ne!(a.logbook, other.logbook);
}

#[test]
fn test_initial_population_is_used() {
    let problem = BoundedProblem::new(sphere, &create_bounds(2, -5.0, 5.0)).unwrap();
    let mut init = Array2::<f64>::from_elem((6, 2), 4.0);
    init[(3, 0)] = 0.0;
    init[(3, 1)] = 0.0;
    let config = DEConfigBuilder::new()
        .seed(5)
        .popsize(6)
        .maxiter(0)
        .initial_population(init.clone())
        .build();

    let report = optimize(&problem, config).unwrap();
    assert_eq!(report.fun, 0.0);
    assert_eq!(report.nfev, 6);
    assert_eq!(report.nit, 0);
    assert_eq!(report.logbook.records()[0].stats.max, 32.0);

    let wrong_shape = DEConfigBuilder::new().popsize(7).initial_population(init).build();
    let err = optimize(&problem, wrong_shape).unwrap_err();
    assert!(matches!(err, DEError::PopulationShapeMismatch { .. }));
}

#[test]
fn test_invalid_configuration_fails_before_evaluation() {
    let calls = Cell::new(0);
    let problem = counting_problem(&calls, 2);

    assert!(DEConfigBuilder::new().variant_str("worst/1/bin").is_err());
    let from_json = serde_json::from_str::<DEConfig>(r#"{"variant": "worst/1/bin"}"#);
    assert!(from_json.is_err());

    let bad = [
        DEConfigBuilder::new().popsize(3).build(),
        DEConfigBuilder::new().mutation(Mutation::Factor(2.5)).build(),
        DEConfigBuilder::new().mutation(Mutation::Range { min: 0.9, max: 0.2 }).build(),
        DEConfigBuilder::new().recombination(-0.1).build(),
        DEConfigBuilder::new().variant_str("best/2/bin").unwrap().popsize(5).build(),
    ];
    for config in bad {
        let err = optimize(&problem, config).unwrap_err();
        assert!(err.is_config_error() || err.is_population_error(), "{err}");
    }
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_problem_without_closure() {
    // Custom problem type that never leaves the unit box
    struct Shifted {
        lower: Array1<f64>,
        upper: Array1<f64>,
    }
    impl Problem for Shifted {
        fn bounds(&self) -> (&Array1<f64>, &Array1<f64>) {
            (&self.lower, &self.upper)
        }
        fn evaluate_fitness(&self, x: &Array1<f64>) -> f64 {
            x.iter().map(|v| (v - 0.25).powi(2)).sum()
        }
    }

    let problem = Shifted { lower: Array1::zeros(3), upper: Array1::ones(3) };
    let config = DEConfigBuilder::new().seed(8).popsize(15).maxiter(200).build();
    let report = optimize(&problem, config).unwrap();
    assert!(report.fun < 1e-6, "f = {}", report.fun);
    for &v in report.x.iter() {
        assert!((0.0..=1.0).contains(&v));
    }
}
