use serde::Deserialize;
use simplex_solver::{Constraint, LpProblem, Sense, Solver, SolverError};

/// JSON description of a linear program.
///
/// ```json
/// {
///   "objective": [3, 2],
///   "sense": "max",
///   "constraints": [
///     { "coefficients": [2, 1], "relation": "<=", "rhs": 18 }
///   ],
///   "max_iterations": 1000
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemFile {
    pub objective: Vec<f64>,
    #[serde(default)]
    pub sense: Sense,
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

/// Solver settings given on the command line, taking precedence over the file
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub max_iterations: Option<usize>,
    pub tolerance: Option<f64>,
}

impl ProblemFile {
    pub fn parse(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn into_solver(self, overrides: Overrides) -> Result<Solver, SolverError> {
        let problem = LpProblem::new(self.objective, self.constraints, self.sense)?;
        let mut solver = Solver::new(problem);
        if let Some(max) = overrides.max_iterations.or(self.max_iterations) {
            solver = solver.with_max_iterations(max);
        }
        if let Some(tol) = overrides.tolerance.or(self.tolerance) {
            solver = solver.with_tolerance(tol);
        }
        solver.validate()?;
        Ok(solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplex_solver::{DEFAULT_MAX_ITERATIONS, Relation};

    const STANDARD: &str = r#"{
        "objective": [3, 2],
        "sense": "max",
        "constraints": [
            { "coefficients": [2, 1], "relation": "<=", "rhs": 18 },
            { "coefficients": [2, 3], "relation": "<=", "rhs": 42 },
            { "coefficients": [3, 1], "relation": "<=", "rhs": 24 }
        ],
        "max_iterations": 20
    }"#;

    #[test]
    fn test_parse_problem_file() {
        let file = ProblemFile::parse(STANDARD).unwrap();
        assert_eq!(file.sense, Sense::Max);
        assert_eq!(file.constraints.len(), 3);
        assert_eq!(file.constraints[1].relation, Relation::Le);
        assert_eq!(file.max_iterations, Some(20));
        assert_eq!(file.tolerance, None);
    }

    #[test]
    fn test_sense_defaults_to_min() {
        let file = ProblemFile::parse(
            r#"{ "objective": [1], "constraints": [{ "coefficients": [1], "relation": ">=", "rhs": 2 }] }"#,
        )
        .unwrap();
        assert_eq!(file.sense, Sense::Min);
        assert_eq!(file.constraints[0].relation, Relation::Ge);

        let solver = file.into_solver(Overrides::default()).unwrap();
        assert_eq!(solver.max_iterations(), DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_unknown_relation_rejected() {
        let result = ProblemFile::parse(
            r#"{ "objective": [1], "constraints": [{ "coefficients": [1], "relation": "<", "rhs": 2 }] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let file = ProblemFile::parse(STANDARD).unwrap();
        let solver = file
            .into_solver(Overrides {
                max_iterations: Some(1),
                tolerance: Some(1e-6),
            })
            .unwrap();
        assert_eq!(solver.max_iterations(), 1);
        assert_eq!(solver.tolerance(), 1e-6);
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        let file = ProblemFile::parse(STANDARD).unwrap();
        let result = file.into_solver(Overrides {
            max_iterations: None,
            tolerance: Some(-1.0),
        });
        assert!(matches!(result, Err(SolverError::InvalidInput(_))));
    }

    #[test]
    fn test_sense_is_case_insensitive() {
        let file = ProblemFile::parse(
            r#"{ "objective": [1], "sense": "MAX", "constraints": [{ "coefficients": [1], "relation": "<=", "rhs": 2 }] }"#,
        )
        .unwrap();
        assert_eq!(file.sense, Sense::Max);

        let result = ProblemFile::parse(
            r#"{ "objective": [1], "sense": "maximize", "constraints": [{ "coefficients": [1], "relation": "<=", "rhs": 2 }] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_solves_standard_problem() {
        let solution = ProblemFile::parse(STANDARD)
            .unwrap()
            .into_solver(Overrides::default())
            .unwrap()
            .solve()
            .unwrap();
        assert!((solution.objective_value() - 33.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_rhs_rejected_before_solving() {
        let file = ProblemFile::parse(
            r#"{ "objective": [1], "constraints": [{ "coefficients": [1], "relation": "<=", "rhs": -5 }] }"#,
        )
        .unwrap();
        assert!(matches!(
            file.into_solver(Overrides::default()),
            Err(SolverError::InvalidInput(_))
        ));
    }
}
