//! End-to-end solve scenarios.

use u_tour::config::{SolverConfig, Strategy};
use u_tour::error::{DimensionError, ErrorKind, SolveError};
use u_tour::evaluation::{tour_cost, validate_tour};
use u_tour::expr::{parse_variable_input, CellValue};
use u_tour::{solve, RouteSolver, SolveRequest};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn four_cities() -> Vec<Vec<CellValue>> {
    vec![
        vec![0.into(), 10.into(), 15.into(), 20.into()],
        vec![10.into(), 0.into(), 35.into(), 25.into()],
        vec![15.into(), 35.into(), 0.into(), 30.into()],
        vec![20.into(), 25.into(), 30.into(), 0.into()],
    ]
}

#[test]
fn worked_four_city_example() {
    let sol = solve(&four_cities(), &labels(&["A", "B", "C", "D"]), None).expect("solves");
    assert_eq!(sol.route().to_string(), "A -> B -> D -> C -> A");
    assert_eq!(sol.route().total_cost(), 80.0);
    assert_eq!(sol.route().format_cost(), "80");
    assert!(!sol.diagonal_warning());
}

#[test]
fn worked_example_as_text_cells() {
    let cells: Vec<Vec<CellValue>> = four_cities()
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|c| match c {
                    CellValue::Number(v) => CellValue::Text(format!("{v}")),
                    other => other,
                })
                .collect()
        })
        .collect();
    let sol = solve(&cells, &labels(&["A", "B", "C", "D"]), None).expect("solves");
    assert_eq!(sol.route().labels(), vec!["A", "B", "D", "C", "A"]);
}

/// Ten crane positions A1..A5, B1..B5 with formula cells.
#[test]
fn crane_grid_with_formulas() {
    let names: Vec<String> = (1..=5)
        .map(|i| format!("A{i}"))
        .chain((1..=5).map(|i| format!("B{i}")))
        .collect();
    let cells: Vec<Vec<CellValue>> = (0..10)
        .map(|i: i32| {
            (0..10)
                .map(|j: i32| {
                    if i == j {
                        CellValue::from("0")
                    } else if (i < 5) == (j < 5) {
                        CellValue::Text(format!("{} * np.sqrt(2)", (i - j).abs()))
                    } else {
                        CellValue::Text(format!("m + {}", (i - j).abs()))
                    }
                })
                .collect()
        })
        .collect();

    let request = SolveRequest::new(cells, names, Some(parse_variable_input("7")));
    let sol = RouteSolver::default().solve(&request).expect("solves");

    let tour = sol.route().indices();
    assert_eq!(validate_tour(10, &tour), Ok(()));
    let recomputed = tour_cost(sol.matrix(), &tour);
    assert!((recomputed - sol.route().total_cost()).abs() < 1e-9);
    assert_eq!(sol.route().labels()[0], "A1");
    assert_eq!(sol.matrix().cost(0, 5), 12.0);
    assert!((sol.matrix().cost(0, 2) - 2.0 * 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn blank_variable_means_zero() {
    let cells = vec![vec![0.into(), "m + 1".into()], vec!["m * 4 + 2".into(), 0.into()]];
    let sol = solve(&cells, &labels(&["P", "Q"]), Some(parse_variable_input(""))).expect("solves");
    assert_eq!(sol.route().total_cost(), 3.0);
}

#[test]
fn two_nodes_with_negative_arc_is_range_error() {
    let cells = vec![vec![0.into(), "-5".into()], vec![5.into(), 0.into()]];
    let err = solve(&cells, &labels(&["A", "B"]), None).expect_err("invalid");
    assert_eq!(
        err,
        SolveError::Range {
            row: 0,
            col: 1,
            value: -5.0
        }
    );
}

#[test]
fn two_nodes_with_blank_arc_is_expression_error() {
    let cells = vec![vec![0.into(), "".into()], vec![5.into(), 0.into()]];
    let err = solve(&cells, &labels(&["A", "B"]), None).expect_err("invalid");
    assert_eq!(err.kind(), ErrorKind::Expression);
    assert_eq!(err.location(), "cell (row 0, column 1)");
}

#[test]
fn two_nodes_with_missing_arc_is_dimension_error() {
    let cells = vec![vec![0.into()], vec![5.into(), 0.into()]];
    let err = solve(&cells, &labels(&["A", "B"]), None).expect_err("invalid");
    assert!(matches!(
        err,
        SolveError::Dimension(DimensionError::NotSquare { row: 0, .. })
    ));
}

#[test]
fn single_node_is_dimension_error() {
    let cells = vec![vec![0.into()]];
    let err = solve(&cells, &labels(&["A"]), None).expect_err("invalid");
    assert_eq!(
        err,
        SolveError::Dimension(DimensionError::TooFewNodes { n: 1 })
    );
}

#[test]
fn disallowed_names_are_rejected() {
    for text in ["__import__('os')", "exp(1)", "np.pi", "m ** 2", "1e3"] {
        let cells = vec![vec![0.into(), text.into()], vec![1.into(), 0.into()]];
        let err = solve(&cells, &labels(&["A", "B"]), Some(2.0)).expect_err(text);
        assert_eq!(err.kind(), ErrorKind::Expression, "{text}");
    }
}

#[test]
fn deeply_nested_formula_is_expression_error() {
    for text in [
        format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000)),
        format!("{}1{}", "(".repeat(400), ")".repeat(400)),
        format!("{}1", "-".repeat(1_000)),
    ] {
        let cells = vec![vec![0.into(), text.as_str().into()], vec![1.into(), 0.into()]];
        let err = solve(&cells, &labels(&["A", "B"]), None).expect_err("too deep");
        assert_eq!(err.kind(), ErrorKind::Expression);
        assert_eq!(err.location(), "cell (row 0, column 1)");
    }
}

#[test]
fn strategies_agree_on_worked_example() {
    let req = SolveRequest::new(four_cities(), labels(&["A", "B", "C", "D"]), None);
    let global = RouteSolver::default().solve(&req).expect("global");
    let path = RouteSolver::new(SolverConfig::default().with_strategy(Strategy::PathCheapestArc))
        .solve(&req)
        .expect("path");
    assert_eq!(global.route(), path.route());
}

#[test]
fn solver_is_shareable_across_threads() {
    let solver = std::sync::Arc::new(RouteSolver::default());
    let handles: Vec<_> = (0..4)
        .map(|k| {
            let solver = std::sync::Arc::clone(&solver);
            std::thread::spawn(move || {
                let req = SolveRequest::new(four_cities(), labels(&["A", "B", "C", "D"]), Some(k as f64));
                solver.solve(&req).map(|s| s.route().total_cost())
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().expect("thread"), Ok(80.0));
    }
}
