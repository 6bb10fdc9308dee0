//! Two-phase simplex solver for linear programs over non-negative variables.
//!
//! ```
//! use simplex_solver::{LpProblem, Sense, Solver};
//!
//! let problem = LpProblem::from_rows(
//!     vec![3.0, 2.0],
//!     vec![vec![2.0, 1.0], vec![2.0, 3.0], vec![3.0, 1.0]],
//!     vec![18.0, 42.0, 24.0],
//!     &["<=", "<=", "<="],
//!     Sense::Max,
//! )?;
//! let solution = Solver::new(problem).solve()?;
//! assert!((solution["x1"] - 3.0).abs() < 1e-9);
//! assert!((solution.objective_value() - 33.0).abs() < 1e-9);
//! # Ok::<(), simplex_solver::SolverError>(())
//! ```

mod error;
mod problem;
mod simplex;
mod solution;
mod tableau;

pub use error::{Phase, Result, SolverError};
pub use problem::{Constraint, LpProblem, Relation, Sense};
pub use simplex::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, Solver};
pub use solution::{OBJECTIVE_KEY, Solution};
